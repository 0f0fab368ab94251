use crate::{Catalog, CatalogError, DataSource};
use serde::{Deserialize, Serialize};
use supplymap_core::{
    Category, CategoryId, Connection, Entity, EntityId, Point, StockLevel, Supplier, TradedItem,
};

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub categories: Vec<Category>,
    pub entities: Vec<EntityRecord>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_sources: Vec<DataSource>,
}

impl CatalogRecord {
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let entities = self
            .entities
            .into_iter()
            .map(Entity::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Catalog::new(self.categories, entities, self.connections)?
            .with_data_sources(self.data_sources))
    }
}

impl From<&Catalog> for CatalogRecord {
    fn from(catalog: &Catalog) -> Self {
        Self {
            categories: catalog.categories().to_vec(),
            entities: catalog.entities().iter().map(EntityRecord::from).collect(),
            connections: catalog.connections().to_vec(),
            data_sources: catalog.data_sources().to_vec(),
        }
    }
}

/// Flat entity record. Stock is stored as two optional percentages, at most
/// one of which may be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub name: String,
    pub category_id: CategoryId,
    pub x: f64,
    pub y: f64,
    #[serde(alias = "relationship_strength", alias = "usage_volume")]
    pub metric: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortage_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surplus_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppliers: Vec<Supplier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traded_items: Vec<TradedItem>,
    #[serde(default)]
    pub details: String,
}

impl TryFrom<EntityRecord> for Entity {
    type Error = CatalogError;

    fn try_from(record: EntityRecord) -> Result<Self, Self::Error> {
        let stock = StockLevel::from_percents(record.shortage_percent, record.surplus_percent)
            .ok_or(CatalogError::ConflictingStock(record.id))?;
        Ok(Entity {
            id: record.id,
            name: record.name,
            category_id: record.category_id,
            position: Point::new(record.x, record.y),
            metric: record.metric,
            stock,
            suppliers: record.suppliers,
            traded_items: record.traded_items,
            details: record.details,
        })
    }
}

impl From<&Entity> for EntityRecord {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            category_id: entity.category_id,
            x: entity.position.x,
            y: entity.position.y,
            metric: entity.metric,
            shortage_percent: entity.stock.shortage_percent(),
            surplus_percent: entity.stock.surplus_percent(),
            suppliers: entity.suppliers.clone(),
            traded_items: entity.traded_items.clone(),
            details: entity.details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_stock_rejected() {
        let json = r##"{
            "entities": [
                { "id": 5, "name": "Gauze", "category_id": 1, "x": 0, "y": 0,
                  "metric": 10, "shortage_percent": 20, "surplus_percent": 5 }
            ]
        }"##;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::ConflictingStock(EntityId(5))));
    }

    #[test]
    fn test_malformed_json() {
        let err = Catalog::from_json_str("{ \"entities\": 3 }").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_export_then_reload_preserves_stock() {
        let catalog = Catalog::builtin(supplymap_core::ViewKind::Products).unwrap();
        let json = catalog.to_json_pretty().unwrap();
        assert!(json.contains("\"surplus_percent\": 35.0"));

        let reloaded = Catalog::from_json_str(&json).unwrap();
        assert_eq!(reloaded.entities(), catalog.entities());
        assert_eq!(reloaded.data_sources().len(), 3);
    }
}
