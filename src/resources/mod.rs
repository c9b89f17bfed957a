pub mod import;
pub mod model;
pub mod query;
pub mod store;

pub use import::{ImportError, ImportOutcome, MapsImporter, MAP_TYPE};
pub use model::{Resource, ResourceTypeMap};
pub use query::{ListParams, Pagination, Sort, SortKey, DEFAULT_PER_PAGE, PER_PAGE_OPTIONS};
pub use store::{HierarchyItem, InventorySeed, ResourceStore, StoreError};

use crate::config::{ConfigDocument, ConfigSource};

/// Load the resource type catalog and the inventory store
///
/// Without a seed document the default catalog is used and the store
/// starts empty (resources then arrive through the GUI or the maps
/// import). A seed may provide its own catalog, initial resources, or
/// both.
pub fn load_inventory(
    seed_doc: Option<&ConfigDocument>,
) -> anyhow::Result<(ResourceTypeMap, ResourceStore)> {
    let Some(doc) = seed_doc else {
        return Ok((ResourceTypeMap::default_catalog(), ResourceStore::new()));
    };

    let json = match &doc.source {
        ConfigSource::Json(json) => json.clone(),
        ConfigSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("could not read inventory seed {}: {}", path, e))?,
    };
    let seed: InventorySeed = serde_json::from_str(&json)
        .map_err(|e| anyhow::anyhow!("invalid inventory seed document: {}", e))?;

    let types = if seed.resource_types.is_empty() {
        ResourceTypeMap::default_catalog()
    } else {
        ResourceTypeMap::new(
            seed.resource_types
                .iter()
                .map(|t| (t.name.clone(), t.label.clone()))
                .collect(),
        )
    };

    let store = ResourceStore::from_seed(&seed.resources)
        .map_err(|e| anyhow::anyhow!("invalid inventory seed document: {}", e))?;

    tracing::info!(
        resource_types = types.len(),
        resources = store.len(),
        "Inventory seed loaded"
    );

    Ok((types, store))
}
