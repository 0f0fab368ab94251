//! Static entity catalog backing the map views.
//!
//! A catalog is immutable once built: categories, entities, connections and
//! the data-source citations shown next to the products map. Lookups by id are
//! indexed; references that do not resolve are tolerated here and degrade at
//! render time (unknown category falls back to a neutral color, dangling
//! connections are skipped).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use supplymap_core::{Category, CategoryId, Connection, Entity, EntityId, ViewKind};
use thiserror::Error;

pub mod builtin;
mod records;

pub use records::{CatalogRecord, EntityRecord};

/// Fill color used when an entity references a category that does not exist.
pub const DEFAULT_CATEGORY_COLOR: &str = "#ccc";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate entity id {0}")]
    DuplicateEntity(EntityId),
    #[error("Duplicate category id {0}")]
    DuplicateCategory(CategoryId),
    #[error("Entity {0} has both a shortage and a surplus")]
    ConflictingStock(EntityId),
}

/// A reference in the catalog that does not resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    #[error("entity {entity} references unknown category {category}")]
    UnknownCategory {
        entity: EntityId,
        category: CategoryId,
    },
    #[error("connection {from} -> {to} references unknown entity {missing}")]
    DanglingConnection {
        from: EntityId,
        to: EntityId,
        missing: EntityId,
    },
}

/// Citation for the figures shown on a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    pub year: u16,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    entities: Vec<Entity>,
    connections: Vec<Connection>,
    data_sources: Vec<DataSource>,
    entity_index: HashMap<EntityId, usize>,
    category_index: HashMap<CategoryId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids. Unresolved references are
    /// kept and logged; see [`Catalog::validate`].
    pub fn new(
        categories: Vec<Category>,
        entities: Vec<Entity>,
        connections: Vec<Connection>,
    ) -> Result<Self, CatalogError> {
        let mut category_index = HashMap::with_capacity(categories.len());
        for (idx, category) in categories.iter().enumerate() {
            if category_index.insert(category.id, idx).is_some() {
                return Err(CatalogError::DuplicateCategory(category.id));
            }
        }

        let mut entity_index = HashMap::with_capacity(entities.len());
        for (idx, entity) in entities.iter().enumerate() {
            if entity_index.insert(entity.id, idx).is_some() {
                return Err(CatalogError::DuplicateEntity(entity.id));
            }
        }

        let catalog = Self {
            categories,
            entities,
            connections,
            data_sources: Vec::new(),
            entity_index,
            category_index,
        };

        for issue in catalog.validate() {
            tracing::warn!("Catalog reference does not resolve: {}", issue);
        }

        Ok(catalog)
    }

    pub fn with_data_sources(mut self, data_sources: Vec<DataSource>) -> Self {
        self.data_sources = data_sources;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let record: CatalogRecord = serde_json::from_str(json)?;
        record.into_catalog()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::info!("Loading catalog from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// The built-in dataset for a view.
    pub fn builtin(view: ViewKind) -> Result<Self, CatalogError> {
        match view {
            ViewKind::Partnership => builtin::partnership_network(),
            ViewKind::Products => builtin::products_map(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&CatalogRecord::from(self))?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn data_sources(&self) -> &[DataSource] {
        &self.data_sources
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entity_index.get(&id).map(|&idx| &self.entities[idx])
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.category_index.get(&id).map(|&idx| &self.categories[idx])
    }

    pub fn category_color(&self, id: CategoryId) -> &str {
        self.category(id)
            .map(|c| c.color.as_str())
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }

    /// Entities directly connected to `id`, in connection order, without
    /// duplicates and without `id` itself.
    pub fn neighbors(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = Vec::new();
        for other in self.connections.iter().filter_map(|c| c.other_end(id)) {
            if other != id && !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    /// All unresolved references, in catalog order.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for entity in &self.entities {
            if !self.category_index.contains_key(&entity.category_id) {
                issues.push(CatalogIssue::UnknownCategory {
                    entity: entity.id,
                    category: entity.category_id,
                });
            }
        }

        for conn in &self.connections {
            for endpoint in [conn.from, conn.to] {
                if !self.entity_index.contains_key(&endpoint) {
                    issues.push(CatalogIssue::DanglingConnection {
                        from: conn.from,
                        to: conn.to,
                        missing: endpoint,
                    });
                }
            }
        }

        issues
    }
}
