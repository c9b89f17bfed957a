use super::csrf;
use super::templates::{HierarchyTemplate, ResourceFormTemplate, ResourceListTemplate};
use crate::resources::{query, ListParams, StoreError, MAP_TYPE};
use crate::AppState;
use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::{header::SET_COOKIE, HeaderValue, StatusCode};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

/// Notice/error message carried across a redirect for the page chrome
#[derive(Debug, Default, Deserialize)]
pub struct NoticeParams {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Query parameters of the creation form
#[derive(Debug, Default, Deserialize)]
pub struct NewParams {
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
}

/// Fields of the creation form
#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub csrf_token: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: String,
}

/// Fields of the cascaded delete form
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub csrf_token: String,
    /// Workaround for missing DELETE support in HTML forms
    #[serde(rename = "_method", default)]
    pub method: Option<String>,
}

/// Fields of the maps import form
#[derive(Debug, Deserialize)]
pub struct ImportForm {
    pub csrf_token: String,
}

fn render_page<T: Template>(template: &T, set_cookie: Option<String>) -> Response {
    match template.render() {
        Ok(html) => {
            let mut response = Html(html).into_response();
            if let Some(cookie) = set_cookie {
                if let Ok(value) = HeaderValue::from_str(&cookie) {
                    response.headers_mut().insert(SET_COOKIE, value);
                }
            }
            response
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response(),
    }
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, "Invalid anti-forgery token").into_response()
}

/// Liveness probe - always returns OK if the process is running
pub async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe
///
/// The service configuration is validated and the inventory loaded before
/// the router is built, so a running process is ready; the body reports
/// the inventory size for quick inspection.
pub async fn readyz_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, format!("ready: {} resources", state.store.len()))
}

pub async fn root_handler(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&state.routes.index_url(&ListParams::default()))
}

/// Resource listing: filter, sort and paginate per the query parameters
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
    Query(messages): Query<NoticeParams>,
    headers: HeaderMap,
) -> Response {
    let params = params.normalized();
    let all = state.store.list();
    let (rows, pagination) = query::apply(all.clone(), &params, &state.resource_types);

    tracing::debug!(
        resource_type = ?params.resource_type,
        search = ?params.search,
        sort = ?params.sort,
        page = pagination.page,
        total = pagination.total,
        "Resource listing"
    );

    let (token, is_new) = csrf::request_token(&headers);
    let set_cookie = is_new.then(|| csrf::build_cookie(&token, &state.config));

    let template = ResourceListTemplate::build(
        &all,
        rows,
        pagination,
        &params,
        &state.resource_types,
        &state.routes,
        token,
        messages.notice,
        messages.error,
    );
    render_page(&template, set_cookie)
}

/// Creation form; an active type filter preselects the type
pub async fn new_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewParams>,
    headers: HeaderMap,
) -> Response {
    let (token, is_new) = csrf::request_token(&headers);
    let set_cookie = is_new.then(|| csrf::build_cookie(&token, &state.config));

    let all = state.store.list();
    let selected_type = params
        .resource_type
        .as_deref()
        .filter(|t| state.resource_types.contains(t));

    let template = ResourceFormTemplate::build(
        &all,
        &state.resource_types,
        &state.routes,
        token,
        selected_type,
        None,
        "",
        None,
    );
    render_page(&template, set_cookie)
}

pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    axum::Form(form): axum::Form<CreateForm>,
) -> Response {
    if !csrf::verify(&headers, &form.csrf_token) {
        return forbidden();
    }

    let name = form.name.trim();
    // empty or "0" means no parent (the form's blank option)
    let parent_id = match form.parent_id.trim() {
        "" | "0" => Ok(None),
        value => value.parse::<i64>().map(Some).map_err(|_| ()),
    };

    let error = if !state.resource_types.contains(&form.resource_type) {
        Some("Unknown resource type.".to_string())
    } else if name.is_empty() {
        Some("Name must not be empty.".to_string())
    } else if parent_id.is_err() {
        Some("Unknown parent resource.".to_string())
    } else {
        None
    };

    let parent_id = parent_id.unwrap_or(None);

    if error.is_none() {
        match state.store.insert(&form.resource_type, name, parent_id) {
            Ok(resource) => {
                tracing::info!(
                    endpoint = %state.routes.endpoint_name("create"),
                    id = resource.id,
                    resource_type = %resource.resource_type,
                    "Resource created"
                );
                let url = state.routes.index_url_with_message(
                    &ListParams::default(),
                    "notice",
                    "Resource has been created.",
                );
                return Redirect::to(&url).into_response();
            }
            Err(StoreError::UnknownParent(_)) => {
                return rerender_form(&state, &headers, &form, "Unknown parent resource.");
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not create resource");
                return rerender_form(&state, &headers, &form, "Could not create resource.");
            }
        }
    }

    let message = error.unwrap_or_default();
    rerender_form(&state, &headers, &form, &message)
}

fn rerender_form(
    state: &AppState,
    headers: &HeaderMap,
    form: &CreateForm,
    error: &str,
) -> Response {
    let (token, is_new) = csrf::request_token(headers);
    let set_cookie = is_new.then(|| csrf::build_cookie(&token, &state.config));

    let all = state.store.list();
    let selected_parent = form.parent_id.trim().parse::<i64>().ok().filter(|id| *id > 0);
    let template = ResourceFormTemplate::build(
        &all,
        &state.resource_types,
        &state.routes,
        token,
        Some(form.resource_type.as_str()),
        selected_parent,
        &form.name,
        Some(error.to_string()),
    );
    render_page(&template, set_cookie)
}

/// Delete a resource and its children
pub async fn destroy_cascaded_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    axum::Form(form): axum::Form<DeleteForm>,
) -> Response {
    let is_delete = form
        .method
        .as_deref()
        .map(|m| m.eq_ignore_ascii_case("DELETE"))
        .unwrap_or(false);
    if !is_delete {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    if !csrf::verify(&headers, &form.csrf_token) {
        return forbidden();
    }

    match state.store.delete_cascaded(id) {
        Ok((removed, parent_id)) => {
            tracing::info!(
                endpoint = %state.routes.endpoint_name("destroy_cascaded"),
                id,
                removed,
                "Resource deleted"
            );
            let notice = "Resource and its children have been deleted.";
            let url = match parent_id {
                // back to the hierarchy of the parent resource
                Some(parent_id) => state
                    .routes
                    .hierarchy_url_with_message(parent_id, "notice", notice),
                None => state
                    .routes
                    .index_url_with_message(&ListParams::default(), "notice", notice),
            };
            Redirect::to(&url).into_response()
        }
        Err(StoreError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(id, error = %e, "Could not delete resource");
            let url = state.routes.index_url_with_message(
                &ListParams::default(),
                "error",
                &format!("Could not delete resource: {}", e),
            );
            Redirect::to(&url).into_response()
        }
    }
}

/// Hierarchy view of the tree containing a resource
pub async fn hierarchy_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(messages): Query<NoticeParams>,
    headers: HeaderMap,
) -> Response {
    let items = match state.store.hierarchy(id, &state.resource_types) {
        Ok(items) => items,
        Err(StoreError::NotFound(_)) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(id, error = %e, "Could not collect hierarchy");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let (token, is_new) = csrf::request_token(&headers);
    let set_cookie = is_new.then(|| csrf::build_cookie(&token, &state.config));

    let template = HierarchyTemplate::build(
        items,
        id,
        &state.resource_types,
        &state.routes,
        token,
        messages.notice,
        messages.error,
    );
    render_page(&template, set_cookie)
}

/// Import map resources from the config generator service
pub async fn import_maps_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    axum::Form(form): axum::Form<ImportForm>,
) -> Response {
    if !csrf::verify(&headers, &form.csrf_token) {
        return forbidden();
    }

    match state.importer.import_maps(&state.store).await {
        Ok(outcome) => {
            let notice = if outcome.added.is_empty() {
                "No additional maps found.".to_string()
            } else {
                format!("{} new maps have been added.", outcome.added.len())
            };
            let params = ListParams {
                resource_type: Some(MAP_TYPE.to_string()),
                ..Default::default()
            };
            let url = state.routes.index_url_with_message(&params, "notice", &notice);
            Redirect::to(&url).into_response()
        }
        Err(e) => {
            tracing::error!(
                endpoint = %state.routes.endpoint_name("import_maps"),
                error = %e,
                "Maps import failed"
            );
            let url = state.routes.index_url_with_message(
                &ListParams::default(),
                "error",
                &format!("Could not import maps: {}", e),
            );
            Redirect::to(&url).into_response()
        }
    }
}
