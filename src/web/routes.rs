use super::handlers::{
    create_handler, destroy_cascaded_handler, healthz_handler, hierarchy_handler, import_maps_handler,
    index_handler, new_handler, readyz_handler, root_handler,
};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::resources::ListParams;

/// URL builder for the resource views
///
/// All action URLs are derived from `base_route`; route handler names
/// follow the `<prefix>_<endpoint_suffix>` convention (`new_resource`,
/// `import_maps_resource`, `hierarchy_resource`), so the same templates
/// can serve another resource kind by swapping this builder. The views
/// never assemble URLs themselves.
#[derive(Debug, Clone)]
pub struct ResourceRoutes {
    pub base_route: String,
    pub endpoint_suffix: String,
}

impl ResourceRoutes {
    pub fn resources() -> Self {
        Self {
            base_route: "resources".to_string(),
            endpoint_suffix: "resource".to_string(),
        }
    }

    /// Route handler name for a given action prefix (used in logs)
    pub fn endpoint_name(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.endpoint_suffix)
    }

    /// Listing URL, with the given query parameters encoded
    pub fn index_url(&self, params: &ListParams) -> String {
        let query = params.to_query_string();
        if query.is_empty() {
            format!("/{}", self.base_route)
        } else {
            format!("/{}?{}", self.base_route, query)
        }
    }

    /// Listing URL carrying a notice or error message for the page chrome
    pub fn index_url_with_message(&self, params: &ListParams, key: &str, message: &str) -> String {
        let url = self.index_url(params);
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", url, separator, key, urlencoding::encode(message))
    }

    /// Creation form URL, scoped to the active type filter when set
    pub fn new_url(&self, active_type: Option<&str>) -> String {
        match active_type {
            Some(resource_type) => format!(
                "/{}/new?type={}",
                self.base_route,
                urlencoding::encode(resource_type)
            ),
            None => format!("/{}/new", self.base_route),
        }
    }

    pub fn create_url(&self) -> String {
        format!("/{}/create", self.base_route)
    }

    pub fn import_maps_url(&self) -> String {
        format!("/{}/import_maps", self.base_route)
    }

    pub fn hierarchy_url(&self, id: i64) -> String {
        format!("/{}/{}/hierarchy", self.base_route, id)
    }

    pub fn hierarchy_url_with_message(&self, id: i64, key: &str, message: &str) -> String {
        format!(
            "{}?{}={}",
            self.hierarchy_url(id),
            key,
            urlencoding::encode(message)
        )
    }

    /// Cascaded delete URL (POST with a `_method=DELETE` override field)
    pub fn delete_url(&self, id: i64) -> String {
        format!("/{}/{}/cascaded", self.base_route, id)
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .route("/resources", get(index_handler))
        .route("/resources/new", get(new_handler))
        .route("/resources/create", post(create_handler))
        .route("/resources/{id}/cascaded", post(destroy_cascaded_handler))
        .route("/resources/{id}/hierarchy", get(hierarchy_handler))
        .route("/resources/import_maps", post(import_maps_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}
