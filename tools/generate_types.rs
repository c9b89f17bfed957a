//! Generate Rust types from JSON Schema
//!
//! Usage: cargo run --bin generate-types
//!
//! This tool reads the canonical JSON schema and generates Rust types.
//! The generated file uses serde for serialization.

use serde::Deserialize;
use std::fs;
use std::path::Path;

const SCHEMA_PATH: &str = "schema/admin-gui-config.schema.json";
const OUTPUT_PATH: &str = "src/settings/schema_gen.rs";

#[derive(Debug, Deserialize)]
struct JsonSchema {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    config: ConfigProperty,
    // Note: the Rust generator only checks the required config fields;
    // per-field constraints (uri format, const service name) are handled
    // by serde decoding and the contract's validate()
}

#[derive(Debug, Deserialize)]
struct ConfigProperty {
    required: Vec<String>,
}

fn generate_header() -> String {
    r#"//! GENERATED FILE - DO NOT EDIT
//!
//! Generated from: schema/admin-gui-config.schema.json
//!
//! To regenerate, run: cargo run --bin generate-types

use serde::{Deserialize, Serialize};

"#
    .to_string()
}

fn generate_user_info_field() -> String {
    r#"/// Additional user profile field shown in the account GUI
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

"#
    .to_string()
}

fn generate_proxy_url_rule() -> String {
    r#"/// Allowed proxy target, described as a regular expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyUrlRule {
    /// Regular expression matching allowed target URLs
    pub url: String,
}

"#
    .to_string()
}

fn generate_config_options(schema: &JsonSchema) -> String {
    // the generated struct encodes required fields as non-Option; make
    // sure the schema still agrees before emitting it
    let expected = ["db_url", "config_generator_service_url", "totp_enabled"];
    for field in &expected {
        if !schema.properties.config.required.iter().any(|r| r == field) {
            panic!("schema no longer requires config field: {}", field);
        }
    }
    if schema.properties.config.required.len() != expected.len() {
        panic!(
            "schema required fields changed: {:?}",
            schema.properties.config.required
        );
    }

    r#"/// Config options for the admin GUI service
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

"#
    .to_string()
}

fn generate_service_config() -> String {
    r#"/// Top-level service configuration document
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
"#
    .to_string()
}

fn main() {
    println!("Generating Rust types from JSON Schema...");
    println!("  Schema: {}", SCHEMA_PATH);
    println!("  Output: {}", OUTPUT_PATH);

    let schema_content = fs::read_to_string(SCHEMA_PATH)
        .expect("Failed to read schema file");
    let schema: JsonSchema = serde_json::from_str(&schema_content)
        .expect("Failed to parse schema JSON");

    let output = format!(
        "{}{}{}{}{}",
        generate_header(),
        generate_user_info_field(),
        generate_proxy_url_rule(),
        generate_config_options(&schema),
        generate_service_config(),
    );

    // Ensure output directory exists
    if let Some(parent) = Path::new(OUTPUT_PATH).parent() {
        fs::create_dir_all(parent).expect("Failed to create output directory");
    }

    fs::write(OUTPUT_PATH, output).expect("Failed to write output file");
    println!("Done!");
}
