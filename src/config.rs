use std::env;

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

/// Source for a JSON configuration document
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Document provided as inline JSON via an env var
    Json(String),
    /// Document loaded from a file path via an env var
    File(String),
}

/// Service configuration document location
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    pub source: ConfigSource,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Environment configuration
    pub environment: Environment,

    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // Tenant name forwarded to the config generator service
    pub tenant: String,

    // Cookie configuration (None = host-only cookie, Some = domain cookie)
    pub cookie_domain: Option<String>,

    // HTTP client timeout configuration (in seconds)
    pub http_connect_timeout_secs: u64,
    pub http_request_timeout_secs: u64,

    // Service configuration document (validated against the JSON Schema)
    pub service_config: ConfigDocument,

    // Optional inventory seed document (resource type catalog + resources)
    pub inventory_seed: Option<ConfigDocument>,
}

impl Config {
    /// Load configuration from environment variables using std::env::var
    pub fn load() -> anyhow::Result<Self> {
        // Parse environment type
        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        };

        // Optional variables with defaults
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let tenant = env::var("TENANT").unwrap_or_else(|_| "default".to_string());

        // Cookie domain: if not set or empty, use host-only cookies (no Domain attribute)
        let cookie_domain = env::var("COOKIE_DOMAIN").ok().filter(|s| !s.is_empty());

        let http_connect_timeout_secs = env::var("HTTP_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        let http_request_timeout_secs = env::var("HTTP_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        // Service configuration document (primary: JSON env var, fallback: file path)
        let service_config_source = if let Ok(json) = env::var("ADMIN_GUI_CONFIG_JSON") {
            ConfigSource::Json(json)
        } else if let Ok(path) = env::var("ADMIN_GUI_CONFIG_PATH") {
            ConfigSource::File(path)
        } else {
            return Err(anyhow::anyhow!(
                "Either ADMIN_GUI_CONFIG_JSON or ADMIN_GUI_CONFIG_PATH environment variable is required"
            ));
        };

        // Optional inventory seed (resource type catalog + initial resources)
        let inventory_seed = if let Ok(json) = env::var("INVENTORY_SEED_JSON") {
            Some(ConfigDocument {
                source: ConfigSource::Json(json),
            })
        } else if let Ok(path) = env::var("INVENTORY_SEED_PATH") {
            Some(ConfigDocument {
                source: ConfigSource::File(path),
            })
        } else {
            None
        };

        Ok(Config {
            environment,
            server_host,
            server_port,
            tenant,
            cookie_domain,
            http_connect_timeout_secs,
            http_request_timeout_secs,
            service_config: ConfigDocument {
                source: service_config_source,
            },
            inventory_seed,
        })
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get cookie security flags based on environment
    pub fn cookie_secure_flag(&self) -> &str {
        if self.is_production() {
            "; Secure"
        } else {
            ""
        }
    }

    /// Get cookie domain attribute string (empty if host-only cookie)
    pub fn cookie_domain_attr(&self) -> String {
        match &self.cookie_domain {
            Some(domain) => format!("; Domain={}", domain),
            None => String::new(),
        }
    }

    /// Get bind address for server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
