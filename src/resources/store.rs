//! In-memory resource inventory
//!
//! Stand-in for the configuration database behind a narrow interface: the
//! handlers only see the operations below, so a database-backed store can
//! replace this one without touching the views.

use std::collections::HashSet;
use std::fmt;
use std::sync::RwLock;

use serde::Deserialize;

use super::model::{Resource, ResourceTypeMap};

/// Inventory operation failure
#[derive(Debug, PartialEq)]
pub enum StoreError {
    /// No resource with the given id
    NotFound(i64),
    /// parent_id references a resource that does not exist
    UnknownParent(i64),
    /// Seed document contains the same id twice
    DuplicateId(i64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "resource {} not found", id),
            StoreError::UnknownParent(id) => write!(f, "parent resource {} not found", id),
            StoreError::DuplicateId(id) => write!(f, "duplicate resource id {}", id),
        }
    }
}

impl std::error::Error for StoreError {}

/// Row of a hierarchy view: a resource and its depth below the root
#[derive(Debug, Clone)]
pub struct HierarchyItem {
    pub depth: usize,
    pub resource: Resource,
}

/// Seed entry for the resource type catalog
#[derive(Debug, Clone, Deserialize)]
pub struct SeedType {
    pub name: String,
    pub label: String,
}

/// Seed entry for a resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResource {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Optional inventory seed document
///
/// When `resourceTypes` is present it replaces the default catalog;
/// `resources` populates the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySeed {
    #[serde(default)]
    pub resource_types: Vec<SeedType>,
    #[serde(default)]
    pub resources: Vec<SeedResource>,
}

struct Inner {
    resources: Vec<Resource>,
    next_id: i64,
}

/// Shared, RwLock-protected resource inventory
pub struct ResourceStore {
    inner: RwLock<Inner>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                resources: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Build a store from seed resources
    ///
    /// Seed entries without an id are assigned the next free one. Entries
    /// referencing an unknown parent or reusing an id are rejected.
    pub fn from_seed(seed: &[SeedResource]) -> Result<Self, StoreError> {
        let mut resources: Vec<Resource> = Vec::with_capacity(seed.len());
        let mut ids: HashSet<i64> = HashSet::new();
        let mut next_id: i64 = 1;

        for entry in seed {
            let id = match entry.id {
                Some(id) => id,
                None => next_id,
            };
            if !ids.insert(id) {
                return Err(StoreError::DuplicateId(id));
            }
            next_id = next_id.max(id + 1);
            resources.push(Resource {
                id,
                resource_type: entry.resource_type.clone(),
                name: entry.name.clone(),
                parent_id: entry.parent_id,
            });
        }

        // parents may be declared in any order, check after collecting all ids
        for resource in &resources {
            if let Some(parent_id) = resource.parent_id {
                if !ids.contains(&parent_id) {
                    return Err(StoreError::UnknownParent(parent_id));
                }
            }
        }

        Ok(Self {
            inner: RwLock::new(Inner { resources, next_id }),
        })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// All resources in insertion order
    pub fn list(&self) -> Vec<Resource> {
        self.read().resources.clone()
    }

    pub fn len(&self) -> usize {
        self.read().resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().resources.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<Resource> {
        self.read().resources.iter().find(|r| r.id == id).cloned()
    }

    /// Names of all resources with the given type code
    pub fn names_of_type(&self, resource_type: &str) -> Vec<String> {
        self.read()
            .resources
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .map(|r| r.name.clone())
            .collect()
    }

    /// Insert a new resource, assigning the next free id
    pub fn insert(
        &self,
        resource_type: &str,
        name: &str,
        parent_id: Option<i64>,
    ) -> Result<Resource, StoreError> {
        let mut inner = self.write();

        if let Some(parent_id) = parent_id {
            if !inner.resources.iter().any(|r| r.id == parent_id) {
                return Err(StoreError::UnknownParent(parent_id));
            }
        }

        let resource = Resource {
            id: inner.next_id,
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            parent_id,
        };
        inner.next_id += 1;
        inner.resources.push(resource.clone());
        Ok(resource)
    }

    /// Delete a resource and all its descendants (depth first)
    ///
    /// Returns the number of removed resources and the parent id of the
    /// deleted root, so callers can redirect to the parent's hierarchy.
    pub fn delete_cascaded(&self, id: i64) -> Result<(usize, Option<i64>), StoreError> {
        let mut inner = self.write();

        let root = inner
            .resources
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;

        // collect the subtree ids
        let mut doomed: HashSet<i64> = HashSet::new();
        let mut queue = vec![id];
        while let Some(current) = queue.pop() {
            if doomed.insert(current) {
                for child in inner.resources.iter().filter(|r| r.parent_id == Some(current)) {
                    queue.push(child.id);
                }
            }
        }

        inner.resources.retain(|r| !doomed.contains(&r.id));
        Ok((doomed.len(), root.parent_id))
    }

    /// Collect the full hierarchy containing a resource
    ///
    /// Walks up to the root ancestor, then collects the tree depth first.
    /// Children are ordered by type catalog position, name, id, matching
    /// the default listing order.
    pub fn hierarchy(
        &self,
        id: i64,
        types: &ResourceTypeMap,
    ) -> Result<Vec<HierarchyItem>, StoreError> {
        let inner = self.read();

        let mut root = inner
            .resources
            .iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        while let Some(parent_id) = root.parent_id {
            match inner.resources.iter().find(|r| r.id == parent_id) {
                Some(parent) => root = parent,
                None => break,
            }
        }

        let mut items = Vec::new();
        collect_subtree(&inner.resources, root, 0, types, &mut items);
        Ok(items)
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_subtree(
    resources: &[Resource],
    resource: &Resource,
    depth: usize,
    types: &ResourceTypeMap,
    items: &mut Vec<HierarchyItem>,
) {
    items.push(HierarchyItem {
        depth,
        resource: resource.clone(),
    });

    let mut children: Vec<&Resource> = resources
        .iter()
        .filter(|r| r.parent_id == Some(resource.id))
        .collect();
    children.sort_by(|a, b| {
        types
            .position(&a.resource_type)
            .cmp(&types.position(&b.resource_type))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });

    for child in children {
        collect_subtree(resources, child, depth + 1, types, items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ResourceStore {
        let store = ResourceStore::new();
        let map = store.insert("map", "topo", None).unwrap();
        let layer = store.insert("layer", "roads", Some(map.id)).unwrap();
        store
            .insert("attribute", "surface", Some(layer.id))
            .unwrap();
        store.insert("layer", "rivers", Some(map.id)).unwrap();
        store.insert("map", "ortho", None).unwrap();
        store
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = ResourceStore::new();
        let a = store.insert("map", "a", None).unwrap();
        let b = store.insert("map", "b", None).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_insert_rejects_unknown_parent() {
        let store = ResourceStore::new();
        assert_eq!(
            store.insert("layer", "roads", Some(42)),
            Err(StoreError::UnknownParent(42))
        );
    }

    #[test]
    fn test_names_of_type() {
        let store = sample_store();
        let mut names = store.names_of_type("map");
        names.sort();
        assert_eq!(names, vec!["ortho", "topo"]);
    }

    #[test]
    fn test_delete_cascaded_removes_subtree_only() {
        let store = sample_store();
        let total = store.len();

        // deleting the "topo" map removes the map, both layers and the attribute
        let (removed, parent) = store.delete_cascaded(1).unwrap();
        assert_eq!(removed, 4);
        assert_eq!(parent, None);
        assert_eq!(store.len(), total - 4);
        // the unrelated map survives
        assert!(store.get(5).is_some());
    }

    #[test]
    fn test_delete_cascaded_reports_parent() {
        let store = sample_store();
        let (removed, parent) = store.delete_cascaded(2).unwrap();
        assert_eq!(removed, 2); // layer "roads" + attribute "surface"
        assert_eq!(parent, Some(1));
    }

    #[test]
    fn test_delete_cascaded_unknown_id() {
        let store = sample_store();
        assert_eq!(store.delete_cascaded(99), Err(StoreError::NotFound(99)));
    }

    #[test]
    fn test_hierarchy_is_depth_first_with_depths() {
        let store = sample_store();
        let types = ResourceTypeMap::default_catalog();

        // hierarchy of the attribute resolves to the whole "topo" tree
        let items = store.hierarchy(3, &types).unwrap();
        let rows: Vec<(usize, &str)> = items
            .iter()
            .map(|item| (item.depth, item.resource.name.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![(0, "topo"), (1, "rivers"), (1, "roads"), (2, "surface")]
        );
    }

    #[test]
    fn test_hierarchy_unknown_id() {
        let store = sample_store();
        let types = ResourceTypeMap::default_catalog();
        assert!(store.hierarchy(99, &types).is_err());
    }

    #[test]
    fn test_from_seed_assigns_missing_ids() {
        let seed = vec![
            SeedResource {
                id: Some(10),
                resource_type: "map".to_string(),
                name: "topo".to_string(),
                parent_id: None,
            },
            SeedResource {
                id: None,
                resource_type: "layer".to_string(),
                name: "roads".to_string(),
                parent_id: Some(10),
            },
        ];
        let store = ResourceStore::from_seed(&seed).unwrap();
        assert_eq!(store.len(), 2);
        // the unnumbered entry got id 11, the next insert continues after it
        let inserted = store.insert("map", "ortho", None).unwrap();
        assert_eq!(inserted.id, 12);
    }

    #[test]
    fn test_from_seed_rejects_duplicate_ids() {
        let seed = vec![
            SeedResource {
                id: Some(1),
                resource_type: "map".to_string(),
                name: "a".to_string(),
                parent_id: None,
            },
            SeedResource {
                id: Some(1),
                resource_type: "map".to_string(),
                name: "b".to_string(),
                parent_id: None,
            },
        ];
        assert_eq!(
            ResourceStore::from_seed(&seed).err(),
            Some(StoreError::DuplicateId(1))
        );
    }

    #[test]
    fn test_from_seed_rejects_unknown_parent() {
        let seed = vec![SeedResource {
            id: Some(1),
            resource_type: "layer".to_string(),
            name: "roads".to_string(),
            parent_id: Some(7),
        }];
        assert_eq!(
            ResourceStore::from_seed(&seed).err(),
            Some(StoreError::UnknownParent(7))
        );
    }

    #[test]
    fn test_from_seed_allows_forward_parent_references() {
        let seed = vec![
            SeedResource {
                id: Some(2),
                resource_type: "layer".to_string(),
                name: "roads".to_string(),
                parent_id: Some(1),
            },
            SeedResource {
                id: Some(1),
                resource_type: "map".to_string(),
                name: "topo".to_string(),
                parent_id: None,
            },
        ];
        assert!(ResourceStore::from_seed(&seed).is_ok());
    }
}
