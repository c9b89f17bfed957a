//! Web layer
//!
//! ## Structure
//!
//! - `routes`: router assembly and the `ResourceRoutes` URL builder
//! - `handlers`: HTTP handlers for the resource views and probes
//! - `templates`: askama templates and their view models
//! - `csrf`: anti-forgery token cookie handling

pub mod csrf;
pub mod handlers;
pub mod routes;
pub mod templates;

pub use routes::{create_router, ResourceRoutes};
