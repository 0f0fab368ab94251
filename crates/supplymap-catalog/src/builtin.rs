//! Built-in datasets for the two map views.

use crate::{Catalog, CatalogError, DataSource};
use supplymap_core::{
    Category, CategoryId, Connection, ConnectionKind, Entity, EntityId, Point, StockLevel,
    Supplier, TradedItem,
};

fn category(id: i64, name: &str, color: &str) -> Category {
    Category {
        id: CategoryId(id),
        name: name.to_string(),
        color: color.to_string(),
    }
}

fn connection(from: i64, to: i64, kind: ConnectionKind, strength: Option<f64>) -> Connection {
    Connection {
        from: EntityId(from),
        to: EntityId(to),
        kind,
        strength,
    }
}

fn traded(items: &[(&str, f64, &str)]) -> Vec<TradedItem> {
    items
        .iter()
        .map(|(name, shortage, slug)| TradedItem {
            name: name.to_string(),
            shortage_percent: *shortage,
            reorder_link: format!("/orders/new?item={slug}"),
        })
        .collect()
}

fn suppliers(item_slug: &str, entries: &[(&str, f64, &str)]) -> Vec<Supplier> {
    entries
        .iter()
        .map(|(name, availability, supplier_slug)| Supplier {
            name: name.to_string(),
            availability: *availability,
            reorder_link: format!("/orders/new?item={item_slug}&supplier={supplier_slug}"),
        })
        .collect()
}

struct Partner<'a> {
    id: i64,
    name: &'a str,
    category: i64,
    strength: f64,
    at: (f64, f64),
    items: &'a [(&'a str, f64, &'a str)],
    details: &'a str,
}

impl Partner<'_> {
    fn into_entity(self) -> Entity {
        Entity {
            id: EntityId(self.id),
            name: self.name.to_string(),
            category_id: CategoryId(self.category),
            position: Point::new(self.at.0, self.at.1),
            metric: self.strength,
            stock: StockLevel::Balanced,
            suppliers: Vec::new(),
            traded_items: traded(self.items),
            details: self.details.to_string(),
        }
    }
}

struct SupplyItem<'a> {
    id: i64,
    name: &'a str,
    slug: &'a str,
    category: i64,
    stock: StockLevel,
    usage: f64,
    at: (f64, f64),
    suppliers: &'a [(&'a str, f64, &'a str)],
    details: &'a str,
}

impl SupplyItem<'_> {
    fn into_entity(self) -> Entity {
        Entity {
            id: EntityId(self.id),
            name: self.name.to_string(),
            category_id: CategoryId(self.category),
            position: Point::new(self.at.0, self.at.1),
            metric: self.usage,
            stock: self.stock,
            suppliers: suppliers(self.slug, self.suppliers),
            traded_items: Vec::new(),
            details: self.details.to_string(),
        }
    }
}

/// Trading partners linked by primary, regional and distributor relationships.
pub fn partnership_network() -> Result<Catalog, CatalogError> {
    let categories = vec![
        category(1, "Primary Partners", "#4285F4"),
        category(2, "Regional Partners", "#34A853"),
        category(3, "Supply Distributors", "#FBBC05"),
        category(4, "New Partners", "#EA4335"),
    ];

    let entities = vec![
        Partner {
            id: 101,
            name: "MedSupply Co",
            category: 1,
            strength: 100.0,
            at: (400.0, 220.0),
            items: &[
                ("Surgical Instruments", 39.0, "surgical-instruments"),
                ("Medical Imaging Devices", 25.0, "imaging-devices"),
                ("Medications", 15.0, "medications"),
            ],
            details: "Primary medical supply partner since 2018",
        },
        Partner {
            id: 102,
            name: "HealthTech Solutions",
            category: 1,
            strength: 90.0,
            at: (300.0, 320.0),
            items: &[
                ("Emergency Supplies", 45.0, "emergency-supplies"),
                ("Respiratory Equipment", 30.0, "respiratory-equipment"),
                ("PPE", 20.0, "ppe"),
            ],
            details: "Technology-focused medical equipment provider",
        },
        Partner {
            id: 201,
            name: "Regional Medical Supply",
            category: 2,
            strength: 75.0,
            at: (500.0, 320.0),
            items: &[
                ("Cardiac Devices", 35.0, "cardiac-devices"),
                ("Lab Testing Supplies", 40.0, "lab-supplies"),
                ("Surgical Equipment", 25.0, "surgical-equipment"),
            ],
            details: "Regional supplier with next-day delivery",
        },
        Partner {
            id: 301,
            name: "Global Medical Distributors",
            category: 3,
            strength: 85.0,
            at: (600.0, 220.0),
            items: &[
                ("Joint Replacements", 42.0, "joint-replacements"),
                ("Orthopedic Tools", 38.0, "orthopedic-tools"),
                ("Rehabilitation Equipment", 20.0, "rehab-equipment"),
            ],
            details: "International medical equipment distributor",
        },
    ]
    .into_iter()
    .map(Partner::into_entity)
    .collect();

    let connections = vec![
        connection(101, 102, ConnectionKind::Primary, Some(90.0)),
        connection(101, 201, ConnectionKind::Regional, Some(75.0)),
        connection(101, 301, ConnectionKind::Distributor, Some(85.0)),
        connection(102, 201, ConnectionKind::Regional, Some(70.0)),
        connection(102, 301, ConnectionKind::Distributor, Some(80.0)),
    ];

    Catalog::new(categories, entities, connections)
}

/// Supply items with their shortage or surplus, usage volume and suppliers.
pub fn products_map() -> Result<Catalog, CatalogError> {
    let categories = vec![
        category(1, "Medical Devices", "#E57373"),
        category(2, "Pharmaceuticals", "#64B5F6"),
        category(3, "Personal Protective Equipment", "#81C784"),
        category(4, "Laboratory Supplies", "#FFD54F"),
        category(5, "Surgical Supplies", "#BA68C8"),
    ];

    let entities = vec![
        SupplyItem {
            id: 101,
            name: "Surgical Gloves",
            slug: "surgical-gloves",
            category: 1,
            stock: StockLevel::Shortage(45.0),
            usage: 95.0,
            at: (150.0, 120.0),
            suppliers: &[
                ("MedSupply Co", 55.0, "medsupply"),
                ("HealthTech Solutions", 45.0, "healthtech"),
            ],
            details: "Critical shortage of most used item",
        },
        SupplyItem {
            id: 102,
            name: "Face Masks",
            slug: "face-masks",
            category: 3,
            stock: StockLevel::Surplus(35.0),
            usage: 85.0,
            at: (250.0, 150.0),
            suppliers: &[("Global Medical Distributors", 100.0, "global")],
            details: "High usage item with surplus stock",
        },
        SupplyItem {
            id: 201,
            name: "Sterile Injectables",
            slug: "sterile-injectables",
            category: 2,
            stock: StockLevel::Shortage(76.0),
            usage: 70.0,
            at: (350.0, 120.0),
            suppliers: &[
                ("Regional Medical Supply", 24.0, "regional"),
                ("MedSupply Co", 18.0, "medsupply"),
            ],
            details: "Severe shortage of critical medication",
        },
        SupplyItem {
            id: 301,
            name: "N95 Masks",
            slug: "n95-masks",
            category: 3,
            stock: StockLevel::Surplus(15.0),
            usage: 60.0,
            at: (150.0, 360.0),
            suppliers: &[("HealthTech Solutions", 92.0, "healthtech")],
            details: "Moderate surplus maintained",
        },
        SupplyItem {
            id: 401,
            name: "Test Kits",
            slug: "test-kits",
            category: 4,
            stock: StockLevel::Shortage(42.0),
            usage: 55.0,
            at: (480.0, 350.0),
            suppliers: &[("Global Medical Distributors", 58.0, "global")],
            details: "Moderate shortage affecting diagnostics",
        },
        SupplyItem {
            id: 501,
            name: "Surgical Instruments",
            slug: "surgical-instruments",
            category: 5,
            stock: StockLevel::Shortage(39.0),
            usage: 75.0,
            at: (350.0, 220.0),
            suppliers: &[("MedSupply Co", 61.0, "medsupply")],
            details: "High usage items with ongoing shortage",
        },
    ]
    .into_iter()
    .map(SupplyItem::into_entity)
    .collect();

    let connections = vec![
        connection(101, 102, ConnectionKind::Related, None),
        connection(102, 201, ConnectionKind::Dependent, None),
        connection(301, 501, ConnectionKind::Related, None),
        connection(401, 301, ConnectionKind::Dependent, None),
    ];

    let data_sources = vec![
        DataSource {
            name: "FDA Medical Device Shortages List".to_string(),
            year: 2025,
            url: "https://www.fda.gov/medical-devices/coronavirus-covid-19-and-medical-devices/medical-device-shortages-during-covid-19-public-health-emergency".to_string(),
        },
        DataSource {
            name: "USP Medicine Supply Map".to_string(),
            year: 2025,
            url: "https://www.usp.org/supply-chain/medicine-supply-map".to_string(),
        },
        DataSource {
            name: "HRSA Health Professional Shortage Areas".to_string(),
            year: 2025,
            url: "https://data.hrsa.gov/topics/health-workforce/shortage-areas".to_string(),
        },
    ];

    Ok(Catalog::new(categories, entities, connections)?.with_data_sources(data_sources))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogs_resolve() {
        for catalog in [partnership_network().unwrap(), products_map().unwrap()] {
            assert!(catalog.validate().is_empty());
        }
    }

    #[test]
    fn test_partnership_neighbors() {
        let catalog = partnership_network().unwrap();
        assert_eq!(
            catalog.neighbors(EntityId(101)),
            vec![EntityId(102), EntityId(201), EntityId(301)]
        );
    }

    #[test]
    fn test_products_stock_levels() {
        let catalog = products_map().unwrap();
        let masks = catalog.entity(EntityId(102)).unwrap();
        assert_eq!(masks.stock, StockLevel::Surplus(35.0));
        let gloves = catalog.entity(EntityId(101)).unwrap();
        assert_eq!(
            gloves.suppliers[1].reorder_link,
            "/orders/new?item=surgical-gloves&supplier=healthtech"
        );
        assert_eq!(catalog.data_sources().len(), 3);
    }
}
