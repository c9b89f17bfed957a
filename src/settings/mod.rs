pub mod contract;
mod schema_gen;

pub use contract::{ConfigError, ConfigSource, ConfigSummary, SERVICE_NAME};
pub use schema_gen::{ConfigOptions, ProxyUrlRule, ServiceConfig, UserInfoField};

use crate::config::{ConfigDocument, ConfigSource as EnvSource};

/// Load and validate the service configuration from the configured source
///
/// This function:
/// 1. Loads the document from the configured source (env var or file)
/// 2. Validates it against the contract rules
/// 3. Returns the configuration or a detailed error
///
/// Note: This function never logs the raw configuration JSON; db_url may
/// embed database credentials.
pub fn load_service_config(doc: &ConfigDocument) -> anyhow::Result<ServiceConfig> {
    let (config, source) = match &doc.source {
        EnvSource::Json(json) => {
            let config = ServiceConfig::from_json_with_source(json, ConfigSource::EnvJson)
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            (config, ConfigSource::EnvJson)
        }
        EnvSource::File(path) => {
            let config = ServiceConfig::from_file(path).map_err(|e| anyhow::anyhow!("{}", e))?;
            (config, ConfigSource::FilePath)
        }
    };

    if let Err(error) = config.validate() {
        // Log which source was used, never the raw JSON
        tracing::error!(
            source = %source,
            error = %error,
            "Service configuration validation failed"
        );
        return Err(anyhow::anyhow!(
            "Service configuration validation failed ({}): {}",
            source,
            error
        ));
    }

    // Log summary (non-sensitive) for debugging
    let summary = config.summary();
    tracing::info!(
        source = %source,
        service = %summary.service,
        totp_enabled = summary.totp_enabled,
        user_info_fields = summary.user_info_fields,
        proxy_url_whitelist = summary.proxy_url_whitelist,
        proxy_timeout = ?summary.proxy_timeout,
        "Service configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config_json() -> &'static str {
        r#"{
            "$schema": "https://example.com/admin-gui-config.schema.json",
            "service": "admin-gui",
            "config": {
                "db_url": "postgresql:///?service=qwc_configdb",
                "config_generator_service_url": "http://config-generator:9900/",
                "totp_enabled": true,
                "proxy_timeout": 60
            }
        }"#
    }

    #[test]
    fn test_load_service_config_from_json() {
        let doc = ConfigDocument {
            source: EnvSource::Json(sample_config_json().to_string()),
        };
        let config = load_service_config(&doc).unwrap();
        assert_eq!(config.service, "admin-gui");
        assert_eq!(config.config.proxy_timeout, Some(60));
    }

    #[test]
    fn test_load_service_config_from_file() {
        let temp_dir = std::env::temp_dir();
        let temp_file = temp_dir.join("test_admin_gui_config.json");
        std::fs::write(&temp_file, sample_config_json()).unwrap();

        let doc = ConfigDocument {
            source: EnvSource::File(temp_file.to_string_lossy().to_string()),
        };
        let config = load_service_config(&doc).unwrap();
        assert_eq!(config.service, "admin-gui");

        std::fs::remove_file(&temp_file).ok();
    }

    #[test]
    fn test_load_service_config_missing_file() {
        let doc = ConfigDocument {
            source: EnvSource::File("/nonexistent/admin-gui-config.json".to_string()),
        };
        assert!(load_service_config(&doc).is_err());
    }

    #[test]
    fn test_load_service_config_rejects_other_service() {
        let doc = ConfigDocument {
            source: EnvSource::Json(
                r#"{
                    "service": "config-generator",
                    "config": {
                        "db_url": "postgresql:///?service=qwc_configdb",
                        "config_generator_service_url": "http://config-generator:9900/",
                        "totp_enabled": false
                    }
                }"#
                .to_string(),
            ),
        };
        assert!(load_service_config(&doc).is_err());
    }
}
