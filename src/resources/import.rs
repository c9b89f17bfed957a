//! Maps import from the config generator service
//!
//! `POST /resources/import_maps` asks the config generator for the map
//! names of the current tenant and inserts the ones missing from the
//! inventory. Importing twice is a no-op (set difference).

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::config::Config;
use crate::settings::ServiceConfig;

use super::store::{ResourceStore, StoreError};

/// Resource type assigned to imported maps
pub const MAP_TYPE: &str = "map";

#[derive(Debug)]
pub enum ImportError {
    /// Client construction or request transport failure
    Request(String),
    /// Config generator answered with a non-success status
    Status(u16),
    /// Response body was not a JSON array of map names
    Decode(String),
    /// Inserting an imported map failed
    Store(StoreError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Request(msg) => write!(f, "could not reach config generator: {}", msg),
            ImportError::Status(status) => {
                write!(f, "config generator returned status {}", status)
            }
            ImportError::Decode(msg) => write!(f, "invalid maps response: {}", msg),
            ImportError::Store(e) => write!(f, "could not store imported map: {}", e),
        }
    }
}

impl std::error::Error for ImportError {}

/// Result of one import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Names of the maps that were added, sorted
    pub added: Vec<String>,
}

/// Client for the config generator's maps endpoint
pub struct MapsImporter {
    client: reqwest::Client,
    base_url: Url,
    tenant: String,
}

impl MapsImporter {
    /// Build the importer from the validated service configuration
    ///
    /// The request timeout is the process-wide HTTP timeout, overridden by
    /// `proxy_timeout` from the service configuration when present.
    pub fn new(config: &Config, service_config: &ServiceConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(service_config.config.config_generator_service_url.trim())?;

        let request_timeout = service_config
            .config
            .proxy_timeout
            .unwrap_or(config.http_request_timeout_secs);
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.http_connect_timeout_secs))
            .timeout(Duration::from_secs(request_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url,
            tenant: config.tenant.clone(),
        })
    }

    /// Fetch the tenant's map names and insert the missing ones
    pub async fn import_maps(&self, store: &ResourceStore) -> Result<ImportOutcome, ImportError> {
        let url = self
            .base_url
            .join("maps")
            .map_err(|e| ImportError::Request(e.to_string()))?;

        let response = self
            .client
            .get(url.clone())
            .query(&[("tenant", &self.tenant)])
            .send()
            .await
            .map_err(|e| ImportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                url = %url,
                status = status.as_u16(),
                "Could not get maps from config generator"
            );
            return Err(ImportError::Status(status.as_u16()));
        }

        let maps_from_config: Vec<String> = response
            .json()
            .await
            .map_err(|e| ImportError::Decode(e.to_string()))?;

        let new_maps = missing_maps(&maps_from_config, &store.names_of_type(MAP_TYPE));
        for map_name in &new_maps {
            store
                .insert(MAP_TYPE, map_name, None)
                .map_err(ImportError::Store)?;
        }

        if new_maps.is_empty() {
            tracing::info!(tenant = %self.tenant, "No additional maps found");
        } else {
            tracing::info!(
                tenant = %self.tenant,
                added = new_maps.len(),
                "Imported new maps from config generator"
            );
        }

        Ok(ImportOutcome { added: new_maps })
    }
}

/// Map names present in the config generator response but not yet in the
/// inventory, sorted
fn missing_maps(from_config: &[String], existing: &[String]) -> Vec<String> {
    let existing: HashSet<&str> = existing.iter().map(|s| s.as_str()).collect();
    let mut new_maps: Vec<String> = from_config
        .iter()
        .filter(|name| !existing.contains(name.as_str()))
        .cloned()
        .collect();
    new_maps.sort();
    new_maps.dedup();
    new_maps
}
