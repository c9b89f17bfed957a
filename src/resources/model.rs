use serde::{Deserialize, Serialize};

/// An administrative resource record (e.g., a map or layer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier
    pub id: i64,
    /// Resource type code (key into the type catalog)
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Display name
    pub name: String,
    /// Optional parent resource
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// Ordered mapping from resource type code to display label
///
/// Iteration order is catalog order and drives both the type filter menu
/// and the default listing order. Label lookup for a code missing from the
/// catalog falls back to the raw code, so rendering never fails on an
/// unmapped type.
#[derive(Debug, Clone)]
pub struct ResourceTypeMap {
    entries: Vec<(String, String)>,
}

impl ResourceTypeMap {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Built-in catalog used when no inventory seed provides one
    pub fn default_catalog() -> Self {
        Self::new(
            [
                ("map", "Map"),
                ("layer", "Layer"),
                ("attribute", "Attribute"),
                ("data", "Data"),
                ("viewer", "Viewer"),
            ]
            .iter()
            .map(|(code, label)| (code.to_string(), label.to_string()))
            .collect(),
        )
    }

    /// Display label for a type code, falling back to the code itself
    pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, label)| label.as_str())
            .unwrap_or(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|(c, _)| c == code)
    }

    /// Catalog position of a type code; unknown codes sort after known ones
    pub fn position(&self, code: &str) -> usize {
        self.entries
            .iter()
            .position(|(c, _)| c == code)
            .unwrap_or(self.entries.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, label)| (code.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        let types = ResourceTypeMap::default_catalog();
        assert_eq!(types.label("map"), "Map");
        assert_eq!(types.label("layer"), "Layer");
    }

    #[test]
    fn test_label_fallback_for_unmapped_type() {
        let types = ResourceTypeMap::default_catalog();
        assert_eq!(types.label("background_layer"), "background_layer");
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let types = ResourceTypeMap::new(vec![
            ("b".to_string(), "B".to_string()),
            ("a".to_string(), "A".to_string()),
        ]);
        let codes: Vec<&str> = types.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["b", "a"]);
        assert_eq!(types.position("b"), 0);
        assert_eq!(types.position("a"), 1);
        // unknown codes sort last
        assert_eq!(types.position("z"), 2);
    }
}
