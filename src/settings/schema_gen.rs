//! GENERATED FILE - DO NOT EDIT
//!
//! Generated from: schema/admin-gui-config.schema.json
//!
//! To regenerate, run: cargo run --bin generate-types

use serde::{Deserialize, Serialize};

/// Additional user profile field shown in the account GUI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoField {
    /// Display title for the field
    pub title: String,
    /// Column name in the user info table
    pub name: String,
    /// Field input type (e.g., "text", "integer")
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Allowed proxy target, described as a regular expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyUrlRule {
    /// Regular expression matching allowed target URLs
    pub url: String,
}

/// Config options for the admin GUI service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOptions {
    /// Connection string for the configuration database
    pub db_url: String,
    /// Base URL of the config generator service
    pub config_generator_service_url: String,
    /// Show two-factor authentication fields for user accounts
    pub totp_enabled: bool,
    /// Additional user profile fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info_fields: Option<Vec<UserInfoField>>,
    /// Allowed proxy target URLs, described as regular expressions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url_whitelist: Option<Vec<ProxyUrlRule>>,
    /// Timeout in seconds for proxied requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_timeout: Option<u64>,
}

/// Top-level service configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// JSON Schema reference
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Service name (must be "admin-gui")
    pub service: String,
    /// Config options
    pub config: ConfigOptions,
}
