//! Listing query: filtering, sorting and pagination for the resource list
//!
//! All filter state is carried in URL query parameters (`type`, `search`,
//! `sort`, `page`, `per_page`), so listing views are stateless and
//! bookmarkable.

use serde::Deserialize;

use super::model::{Resource, ResourceTypeMap};

pub const PER_PAGE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PER_PAGE: usize = 10;

/// Sortable columns of the resource list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Type,
    Name,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Type => "type",
            SortKey::Name => "name",
        }
    }
}

/// Sort column plus direction
///
/// The URL form is the column key, with a trailing `-` for descending
/// order (`name`, `name-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub ascending: bool,
}

impl Sort {
    /// Parse a `sort` query parameter; unknown columns yield None
    pub fn parse(param: &str) -> Option<Sort> {
        let (key, ascending) = match param.strip_suffix('-') {
            Some(key) => (key, false),
            None => (param, true),
        };
        let key = match key {
            "id" => SortKey::Id,
            "type" => SortKey::Type,
            "name" => SortKey::Name,
            _ => return None,
        };
        Some(Sort { key, ascending })
    }

    /// Encode back to the `sort` query parameter form
    pub fn to_param(self) -> String {
        if self.ascending {
            self.key.as_str().to_string()
        } else {
            format!("{}-", self.key.as_str())
        }
    }

    /// Parameter value that a header link for `key` should carry:
    /// toggles to descending when this sort is already active ascending.
    pub fn toggle_param(active: Option<Sort>, key: SortKey) -> String {
        match active {
            Some(sort) if sort.key == key && sort.ascending => format!("{}-", key.as_str()),
            _ => key.as_str().to_string(),
        }
    }
}

/// Query parameters of the resource listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListParams {
    /// Resource type filter
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    /// Free-text search on the resource name
    pub search: Option<String>,
    /// Sort column, `-` suffix for descending
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ListParams {
    /// Treat empty strings as absent filters
    ///
    /// A cleared search box or an "All" type filter submits empty values;
    /// both must behave exactly like the parameter being missing.
    pub fn normalized(mut self) -> Self {
        self.resource_type = self.resource_type.filter(|s| !s.is_empty());
        self.search = self.search.filter(|s| !s.is_empty());
        self.sort = self.sort.filter(|s| !s.is_empty());
        self
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort.as_deref().and_then(Sort::parse)
    }

    pub fn per_page(&self) -> usize {
        self.per_page
            .filter(|n| PER_PAGE_OPTIONS.contains(n))
            .unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Encode as query pairs, skipping absent parameters
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(resource_type) = &self.resource_type {
            pairs.push(("type", resource_type.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }

    /// Encode as a URL query string ("" when all parameters are absent)
    pub fn to_query_string(&self) -> String {
        let pairs = self.to_query_pairs();
        if pairs.is_empty() {
            return String::new();
        }
        let encoded: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();
        encoded.join("&")
    }
}

/// Pagination state of one listing page
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: usize,
    pub num_pages: usize,
    pub per_page: usize,
    pub total: usize,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages
    }
}

/// Apply filter, sort and pagination to the full resource list
///
/// Default order matches the original listing: type catalog order, type
/// code, name, id. An explicit sort column replaces it:
/// - `id`: by id
/// - `type`: by type label, then name, then id
/// - `name`: by name, then catalog order, then type code, then id
pub fn apply(
    resources: Vec<Resource>,
    params: &ListParams,
    types: &ResourceTypeMap,
) -> (Vec<Resource>, Pagination) {
    let mut filtered: Vec<Resource> = resources
        .into_iter()
        .filter(|r| {
            if let Some(search) = &params.search {
                if !r.name.to_lowercase().contains(&search.to_lowercase()) {
                    return false;
                }
            }
            if let Some(resource_type) = &params.resource_type {
                if &r.resource_type != resource_type {
                    return false;
                }
            }
            true
        })
        .collect();

    match params.sort() {
        Some(Sort { key: SortKey::Id, ascending }) => {
            filtered.sort_by_key(|r| r.id);
            if !ascending {
                filtered.reverse();
            }
        }
        Some(Sort { key: SortKey::Type, ascending }) => {
            filtered.sort_by(|a, b| {
                let ordering = types
                    .label(&a.resource_type)
                    .cmp(types.label(&b.resource_type));
                let ordering = if ascending { ordering } else { ordering.reverse() };
                ordering
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        Some(Sort { key: SortKey::Name, ascending }) => {
            filtered.sort_by(|a, b| {
                let ordering = a.name.cmp(&b.name);
                let ordering = if ascending { ordering } else { ordering.reverse() };
                ordering
                    .then_with(|| {
                        types
                            .position(&a.resource_type)
                            .cmp(&types.position(&b.resource_type))
                    })
                    .then_with(|| a.resource_type.cmp(&b.resource_type))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        None => {
            filtered.sort_by(|a, b| {
                types
                    .position(&a.resource_type)
                    .cmp(&types.position(&b.resource_type))
                    .then_with(|| a.resource_type.cmp(&b.resource_type))
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
    }

    let total = filtered.len();
    let per_page = params.per_page();
    let num_pages = total.div_ceil(per_page);
    let page = params.page().min(num_pages.max(1));

    let start = (page - 1) * per_page;
    let rows: Vec<Resource> = filtered.into_iter().skip(start).take(per_page).collect();

    (
        rows,
        Pagination {
            page,
            num_pages,
            per_page,
            total,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: i64, resource_type: &str, name: &str) -> Resource {
        Resource {
            id,
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            parent_id: None,
        }
    }

    fn sample_resources() -> Vec<Resource> {
        vec![
            resource(1, "layer", "rivers"),
            resource(2, "map", "topo"),
            resource(3, "map", "ortho"),
            resource(4, "layer", "roads"),
        ]
    }

    // decode helper mirroring what the query extractor does on the server
    fn parse_query(query: &str) -> ListParams {
        let mut params = ListParams::default();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value).unwrap().into_owned();
            match key {
                "type" => params.resource_type = Some(value),
                "search" => params.search = Some(value),
                "sort" => params.sort = Some(value),
                "page" => params.page = value.parse().ok(),
                "per_page" => params.per_page = value.parse().ok(),
                _ => {}
            }
        }
        params
    }

    #[test]
    fn test_sort_parse_round_trip() {
        for param in ["id", "id-", "type", "type-", "name", "name-"] {
            let sort = Sort::parse(param).unwrap();
            assert_eq!(sort.to_param(), param);
        }
        assert!(Sort::parse("size").is_none());
        assert!(Sort::parse("").is_none());
    }

    #[test]
    fn test_sort_toggle() {
        let active = Sort::parse("name");
        assert_eq!(Sort::toggle_param(active, SortKey::Name), "name-");
        assert_eq!(Sort::toggle_param(active, SortKey::Id), "id");

        let descending = Sort::parse("name-");
        assert_eq!(Sort::toggle_param(descending, SortKey::Name), "name");
        assert_eq!(Sort::toggle_param(None, SortKey::Type), "type");
    }

    #[test]
    fn test_query_string_round_trip() {
        let params = ListParams {
            resource_type: Some("layer".to_string()),
            search: Some("main roads & paths".to_string()),
            sort: Some("name-".to_string()),
            page: Some(2),
            per_page: Some(25),
        };
        let query = params.to_query_string();
        assert_eq!(parse_query(&query), params);
    }

    #[test]
    fn test_query_string_skips_absent_params() {
        let params = ListParams {
            search: Some("topo".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query_string(), "search=topo");
        assert_eq!(ListParams::default().to_query_string(), "");
    }

    #[test]
    fn test_normalized_drops_empty_values() {
        let params = ListParams {
            resource_type: Some(String::new()),
            search: Some(String::new()),
            sort: Some(String::new()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(params, ListParams::default());
    }

    #[test]
    fn test_filter_by_type() {
        let types = ResourceTypeMap::default_catalog();
        let params = ListParams {
            resource_type: Some("map".to_string()),
            ..Default::default()
        };
        let (rows, pagination) = apply(sample_resources(), &params, &types);
        assert_eq!(pagination.total, 2);
        assert!(rows.iter().all(|r| r.resource_type == "map"));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let types = ResourceTypeMap::default_catalog();
        let params = ListParams {
            search: Some("RIV".to_string()),
            ..Default::default()
        };
        let (rows, _) = apply(sample_resources(), &params, &types);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "rivers");
    }

    #[test]
    fn test_default_order_is_catalog_then_name() {
        let types = ResourceTypeMap::default_catalog();
        let (rows, _) = apply(sample_resources(), &ListParams::default(), &types);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        // maps come before layers in the catalog
        assert_eq!(names, vec!["ortho", "topo", "rivers", "roads"]);
    }

    #[test]
    fn test_sort_by_name_descending() {
        let types = ResourceTypeMap::default_catalog();
        let params = ListParams {
            sort: Some("name-".to_string()),
            ..Default::default()
        };
        let (rows, _) = apply(sample_resources(), &params, &types);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["topo", "roads", "rivers", "ortho"]);
    }

    #[test]
    fn test_sort_by_id() {
        let types = ResourceTypeMap::default_catalog();
        let params = ListParams {
            sort: Some("id".to_string()),
            ..Default::default()
        };
        let (rows, _) = apply(sample_resources(), &params, &types);
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_pagination_slices_rows() {
        let types = ResourceTypeMap::default_catalog();
        let resources: Vec<Resource> = (1..=23)
            .map(|i| resource(i, "map", &format!("map{:02}", i)))
            .collect();
        let params = ListParams {
            sort: Some("id".to_string()),
            page: Some(3),
            per_page: Some(10),
            ..Default::default()
        };
        let (rows, pagination) = apply(resources, &params, &types);
        assert_eq!(pagination.num_pages, 3);
        assert_eq!(pagination.total, 23);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, 21);
        assert!(pagination.has_prev());
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_page_out_of_range_is_clamped() {
        let types = ResourceTypeMap::default_catalog();
        let params = ListParams {
            page: Some(99),
            ..Default::default()
        };
        let (rows, pagination) = apply(sample_resources(), &params, &types);
        assert_eq!(pagination.page, 1);
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_unlisted_per_page_falls_back_to_default() {
        let params = ListParams {
            per_page: Some(7),
            ..Default::default()
        };
        assert_eq!(params.per_page(), DEFAULT_PER_PAGE);
    }
}
