//! Service configuration contract
//!
//! Loading and validation for the admin GUI configuration document.
//! The document shape is defined by `schema/admin-gui-config.schema.json`;
//! the generated types live in `schema_gen`.

use std::fmt;
use std::fs;

use url::Url;

use super::schema_gen::ServiceConfig;

/// Service name this configuration document must declare
pub const SERVICE_NAME: &str = "admin-gui";

/// Where the configuration document was loaded from
///
/// Used in error messages and logs so operators can tell which source
/// was active, without ever echoing the raw JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Inline JSON from the ADMIN_GUI_CONFIG_JSON env var
    EnvJson,
    /// File referenced by the ADMIN_GUI_CONFIG_PATH env var
    FilePath,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::EnvJson => write!(f, "env JSON"),
            ConfigSource::FilePath => write!(f, "file path"),
        }
    }
}

/// Validation or loading failure for the configuration document
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(String),
    /// Document is not valid JSON or misses required fields
    Parse(String),
    /// `service` is not "admin-gui"
    WrongService(String),
    /// A required field is present but empty
    EmptyField(&'static str),
    /// config_generator_service_url is not an absolute URL
    InvalidServiceUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "could not read configuration: {}", msg),
            ConfigError::Parse(msg) => write!(f, "invalid configuration document: {}", msg),
            ConfigError::WrongService(found) => write!(
                f,
                "configuration is for service '{}', expected '{}'",
                found, SERVICE_NAME
            ),
            ConfigError::EmptyField(field) => {
                write!(f, "required config field '{}' is empty", field)
            }
            ConfigError::InvalidServiceUrl(url) => {
                write!(f, "config_generator_service_url is not a valid URL: {}", url)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Non-sensitive summary of a loaded configuration
///
/// db_url may embed credentials, so it never appears here.
#[derive(Debug)]
pub struct ConfigSummary {
    pub service: String,
    pub totp_enabled: bool,
    pub user_info_fields: usize,
    pub proxy_url_whitelist: usize,
    pub proxy_timeout: Option<u64>,
}

impl ServiceConfig {
    /// Parse a configuration document from a JSON string
    pub fn from_json_with_source(json: &str, source: ConfigSource) -> Result<Self, ConfigError> {
        serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(format!("{} ({})", e, source)))
    }

    /// Parse a configuration document from a file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path, e)))?;
        Self::from_json_with_source(&content, ConfigSource::FilePath)
    }

    /// Validate the document beyond what decoding already enforces
    ///
    /// Decoding guarantees the required fields exist with the right JSON
    /// types. This checks that the document is addressed to this service,
    /// that the required strings are non-empty, and that the config
    /// generator URL is absolute (it is joined with endpoint paths later).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service != SERVICE_NAME {
            return Err(ConfigError::WrongService(self.service.clone()));
        }
        if self.config.db_url.trim().is_empty() {
            return Err(ConfigError::EmptyField("db_url"));
        }
        let service_url = self.config.config_generator_service_url.trim();
        if service_url.is_empty() {
            return Err(ConfigError::EmptyField("config_generator_service_url"));
        }
        if Url::parse(service_url).is_err() {
            return Err(ConfigError::InvalidServiceUrl(service_url.to_string()));
        }
        Ok(())
    }

    /// Summary for startup logging
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            service: self.service.clone(),
            totp_enabled: self.config.totp_enabled,
            user_info_fields: self
                .config
                .user_info_fields
                .as_ref()
                .map(Vec::len)
                .unwrap_or(0),
            proxy_url_whitelist: self
                .config
                .proxy_url_whitelist
                .as_ref()
                .map(Vec::len)
                .unwrap_or(0),
            proxy_timeout: self.config.proxy_timeout,
        }
    }
}
