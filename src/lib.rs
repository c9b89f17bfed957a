//! Admin GUI service library
//!
//! Provides the core functionality for the resource administration web
//! service.

#![deny(dead_code)]

pub mod config;
pub mod resources;
pub mod settings;
pub mod web;

use config::Config;
use resources::{MapsImporter, ResourceStore, ResourceTypeMap};
use settings::ServiceConfig;
use std::sync::Arc;
use web::ResourceRoutes;

pub struct AppState {
    pub config: Arc<Config>,
    /// Validated service configuration, read-only for the process lifetime
    pub service_config: Arc<ServiceConfig>,
    pub resource_types: ResourceTypeMap,
    pub store: ResourceStore,
    pub importer: MapsImporter,
    pub routes: ResourceRoutes,
}
