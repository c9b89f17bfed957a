//! View models and askama templates for the resource views
//!
//! Handlers resolve everything the templates need up front (type labels,
//! parent summaries, action URLs), so the templates themselves stay free
//! of lookups and URL assembly.

use askama::Template;

use crate::resources::{
    HierarchyItem, ListParams, Pagination, Resource, ResourceTypeMap, Sort, SortKey,
    PER_PAGE_OPTIONS,
};

use super::routes::ResourceRoutes;

/// One entry of the type filter dropdown
pub struct TypeFilterOption {
    pub label: String,
    pub url: String,
    pub active: bool,
}

/// Sortable column header
pub struct SortLink {
    pub label: &'static str,
    pub url: String,
    /// "▲", "▼" or "" when this column is not the active sort
    pub indicator: &'static str,
}

/// One row of the resource list
pub struct ResourceRow {
    pub id: i64,
    pub type_label: String,
    pub name: String,
    /// "<parent name> (<parent type label>)", empty without a parent
    pub parent: String,
    pub hierarchy_url: String,
    pub delete_url: String,
}

/// Per-page selector entry
pub struct PerPageLink {
    pub label: String,
    pub url: String,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "resources/index.html")]
pub struct ResourceListTemplate {
    pub notice: Option<String>,
    pub error: Option<String>,
    pub rows: Vec<ResourceRow>,
    pub filter_options: Vec<TypeFilterOption>,
    pub active_type: Option<String>,
    pub search_text: String,
    /// Search form action: the listing URL without query parameters
    pub search_action: String,
    pub sort_links: Vec<SortLink>,
    pub new_url: String,
    pub import_maps_url: String,
    pub csrf_token: String,
    pub pagination: Pagination,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub per_page_links: Vec<PerPageLink>,
}

impl ResourceListTemplate {
    /// Assemble the list view from the listing result
    ///
    /// `all` is the unfiltered inventory (for parent lookups), `rows` the
    /// already filtered, sorted and paginated records, `params` the
    /// normalized listing parameters they were produced with.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        all: &[Resource],
        rows: Vec<Resource>,
        pagination: Pagination,
        params: &ListParams,
        types: &ResourceTypeMap,
        routes: &ResourceRoutes,
        csrf_token: String,
        notice: Option<String>,
        error: Option<String>,
    ) -> Self {
        let active_type = params.resource_type.clone();

        // type filter menu: "All" plus one entry per catalog key, keeping
        // search and sort, resetting the page
        let mut filter_options = Vec::with_capacity(types.len() + 1);
        filter_options.push(TypeFilterOption {
            label: "All".to_string(),
            url: routes.index_url(&ListParams {
                resource_type: None,
                page: None,
                ..params.clone()
            }),
            active: active_type.is_none(),
        });
        for (code, label) in types.iter() {
            filter_options.push(TypeFilterOption {
                label: label.to_string(),
                url: routes.index_url(&ListParams {
                    resource_type: Some(code.to_string()),
                    page: None,
                    ..params.clone()
                }),
                active: active_type.as_deref() == Some(code),
            });
        }

        let active_sort = params.sort();
        let sort_links = [
            (SortKey::Id, "ID"),
            (SortKey::Type, "Type"),
            (SortKey::Name, "Name"),
        ]
        .into_iter()
        .map(|(key, label)| SortLink {
            label,
            url: routes.index_url(&ListParams {
                sort: Some(Sort::toggle_param(active_sort, key)),
                page: None,
                ..params.clone()
            }),
            indicator: match active_sort {
                Some(sort) if sort.key == key => {
                    if sort.ascending {
                        "▲"
                    } else {
                        "▼"
                    }
                }
                _ => "",
            },
        })
        .collect();

        let rows = rows
            .into_iter()
            .map(|resource| {
                let parent = resource
                    .parent_id
                    .and_then(|parent_id| all.iter().find(|r| r.id == parent_id))
                    .map(|parent| {
                        format!("{} ({})", parent.name, types.label(&parent.resource_type))
                    })
                    .unwrap_or_default();
                ResourceRow {
                    id: resource.id,
                    type_label: types.label(&resource.resource_type).to_string(),
                    name: resource.name,
                    parent,
                    hierarchy_url: routes.hierarchy_url(resource.id),
                    delete_url: routes.delete_url(resource.id),
                }
            })
            .collect();

        let prev_url = pagination.has_prev().then(|| {
            routes.index_url(&ListParams {
                page: Some(pagination.page - 1),
                ..params.clone()
            })
        });
        let next_url = pagination.has_next().then(|| {
            routes.index_url(&ListParams {
                page: Some(pagination.page + 1),
                ..params.clone()
            })
        });

        let per_page_links = PER_PAGE_OPTIONS
            .iter()
            .map(|&option| PerPageLink {
                label: option.to_string(),
                url: routes.index_url(&ListParams {
                    per_page: Some(option),
                    page: None,
                    ..params.clone()
                }),
                active: pagination.per_page == option,
            })
            .collect();

        Self {
            notice,
            error,
            rows,
            filter_options,
            active_type,
            search_text: params.search.clone().unwrap_or_default(),
            search_action: routes.index_url(&ListParams::default()),
            sort_links,
            new_url: routes.new_url(params.resource_type.as_deref()),
            import_maps_url: routes.import_maps_url(),
            csrf_token,
            pagination,
            prev_url,
            next_url,
            per_page_links,
        }
    }
}

/// Select box entry of the creation form
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Parent select entries of one resource type
pub struct ParentGroup {
    pub label: String,
    pub options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "resources/form.html")]
pub struct ResourceFormTemplate {
    pub error: Option<String>,
    pub create_url: String,
    pub cancel_url: String,
    pub csrf_token: String,
    pub type_options: Vec<SelectOption>,
    pub parent_groups: Vec<ParentGroup>,
    /// Redisplayed name on validation errors
    pub name: String,
}

impl ResourceFormTemplate {
    /// Assemble the creation form
    ///
    /// `selected_type` preselects the type (the active list filter, or the
    /// submitted value on validation errors); `selected_parent` and `name`
    /// redisplay submitted values. Parent choices are grouped by resource
    /// type in catalog order, like the listing.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        all: &[Resource],
        types: &ResourceTypeMap,
        routes: &ResourceRoutes,
        csrf_token: String,
        selected_type: Option<&str>,
        selected_parent: Option<i64>,
        name: &str,
        error: Option<String>,
    ) -> Self {
        let type_options = types
            .iter()
            .map(|(code, label)| SelectOption {
                value: code.to_string(),
                label: label.to_string(),
                selected: selected_type == Some(code),
            })
            .collect();

        let mut candidates: Vec<&Resource> = all.iter().collect();
        candidates.sort_by(|a, b| {
            types
                .position(&a.resource_type)
                .cmp(&types.position(&b.resource_type))
                .then_with(|| a.resource_type.cmp(&b.resource_type))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut parent_groups: Vec<ParentGroup> = Vec::new();
        let mut current_type: Option<&str> = None;
        for resource in candidates {
            if current_type != Some(resource.resource_type.as_str()) {
                current_type = Some(resource.resource_type.as_str());
                parent_groups.push(ParentGroup {
                    label: types.label(&resource.resource_type).to_string(),
                    options: Vec::new(),
                });
            }
            if let Some(group) = parent_groups.last_mut() {
                group.options.push(SelectOption {
                    value: resource.id.to_string(),
                    label: resource.name.clone(),
                    selected: selected_parent == Some(resource.id),
                });
            }
        }

        Self {
            error,
            create_url: routes.create_url(),
            cancel_url: routes.index_url(&ListParams::default()),
            csrf_token,
            type_options,
            parent_groups,
            name: name.to_string(),
        }
    }
}

/// One row of the hierarchy view
pub struct HierarchyRow {
    pub id: i64,
    pub indent_px: usize,
    pub type_label: String,
    pub name: String,
    pub selected: bool,
    pub delete_url: String,
}

#[derive(Template)]
#[template(path = "resources/hierarchy.html")]
pub struct HierarchyTemplate {
    pub notice: Option<String>,
    pub error: Option<String>,
    pub rows: Vec<HierarchyRow>,
    pub back_url: String,
    pub csrf_token: String,
}

impl HierarchyTemplate {
    pub fn build(
        items: Vec<HierarchyItem>,
        selected_id: i64,
        types: &ResourceTypeMap,
        routes: &ResourceRoutes,
        csrf_token: String,
        notice: Option<String>,
        error: Option<String>,
    ) -> Self {
        let rows = items
            .into_iter()
            .map(|item| HierarchyRow {
                id: item.resource.id,
                indent_px: item.depth * 24,
                type_label: types.label(&item.resource.resource_type).to_string(),
                name: item.resource.name.clone(),
                selected: item.resource.id == selected_id,
                delete_url: routes.delete_url(item.resource.id),
            })
            .collect();

        Self {
            notice,
            error,
            rows,
            back_url: routes.index_url(&ListParams::default()),
            csrf_token,
        }
    }
}
