//! Detail panel for the focused entity.

use crate::style::{
    COLOR_SHORTAGE_HIGH, COLOR_SHORTAGE_LOW, Color, connection_style, format_percent,
};
use serde::Serialize;
use supplymap_catalog::Catalog;
use supplymap_core::{
    Connection, ConnectionKind, Entity, EntityId, MEDIUM_SHORTAGE_PERCENT, Severity, StockLevel,
};
use supplymap_events::{Event, EventBus};

const ORDER_PATH: &str = "/orders/new";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Destructive,
    Secondary,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortageBadge {
    pub variant: BadgeVariant,
    pub label: String,
}

impl ShortageBadge {
    pub fn for_stock(stock: StockLevel) -> Self {
        match stock.shortage_percent() {
            Some(p) if p > 0.0 => {
                let variant = match Severity::classify(Some(p)) {
                    Severity::High => BadgeVariant::Destructive,
                    Severity::Medium => BadgeVariant::Secondary,
                    Severity::Low => BadgeVariant::Default,
                };
                Self {
                    variant,
                    label: format!("{}%", format_percent(p)),
                }
            }
            _ => Self {
                variant: BadgeVariant::Default,
                label: "N/A".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradedItemView {
    pub name: String,
    pub shortage_percent: f64,
    /// Shortage at or above the medium threshold.
    pub alert: bool,
    pub color: Color,
    pub reorder_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierView {
    pub name: String,
    pub availability: f64,
    pub low_availability: bool,
    pub color: Color,
    pub reorder_href: String,
}

/// One row of "Key Relationships".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipView {
    pub id: EntityId,
    pub name: String,
    pub kind: ConnectionKind,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDetail {
    pub id: EntityId,
    pub title: String,
    pub title_color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub details: String,
    pub stock: StockLevel,
    pub badge: ShortageBadge,
    pub traded_items: Vec<TradedItemView>,
    pub suppliers: Vec<SupplierView>,
    pub relationships: Vec<RelationshipView>,
}

/// Build the panel for `entity`. Relationships come from `visible_edges`
/// only, so they agree with what the map currently draws.
pub fn project_detail(
    catalog: &Catalog,
    entity: &Entity,
    visible_edges: &[&Connection],
) -> EntityDetail {
    let category = catalog.category(entity.category_id);

    let traded_items = entity
        .traded_items
        .iter()
        .map(|item| {
            let alert = item.shortage_percent >= MEDIUM_SHORTAGE_PERCENT;
            TradedItemView {
                name: item.name.clone(),
                shortage_percent: item.shortage_percent,
                alert,
                color: if alert {
                    COLOR_SHORTAGE_HIGH
                } else {
                    COLOR_SHORTAGE_LOW
                },
                reorder_href: href_or_default(&item.reorder_link, &item.name, None),
            }
        })
        .collect();

    let suppliers = entity
        .suppliers
        .iter()
        .map(|supplier| {
            let low = supplier.is_low_availability();
            SupplierView {
                name: supplier.name.clone(),
                availability: supplier.availability,
                low_availability: low,
                color: if low {
                    COLOR_SHORTAGE_HIGH
                } else {
                    COLOR_SHORTAGE_LOW
                },
                reorder_href: href_or_default(
                    &supplier.reorder_link,
                    &entity.name,
                    Some(&supplier.name),
                ),
            }
        })
        .collect();

    let relationships = visible_edges
        .iter()
        .filter_map(|conn| {
            let other = conn.other_end(entity.id)?;
            let Some(peer) = catalog.entity(other) else {
                tracing::debug!("Relationship {} -> {} has no peer entity", entity.id, other);
                return None;
            };
            Some(RelationshipView {
                id: peer.id,
                name: peer.name.clone(),
                kind: conn.kind,
                color: connection_style(conn.kind).color,
                strength: conn.strength,
            })
        })
        .collect();

    EntityDetail {
        id: entity.id,
        title: entity.name.clone(),
        title_color: Color::from_hex_or_default(catalog.category_color(entity.category_id)),
        category: category.map(|c| c.name.clone()),
        details: entity.details.clone(),
        stock: entity.stock,
        badge: ShortageBadge::for_stock(entity.stock),
        traded_items,
        suppliers,
        relationships,
    }
}

/// Lower-case, with every run of non-alphanumerics collapsed to one `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// `/orders/new?item=<slug>[&supplier=<slug>]`
pub fn order_href(item: &str, supplier: Option<&str>) -> String {
    match supplier {
        Some(supplier) => format!(
            "{ORDER_PATH}?item={}&supplier={}",
            slugify(item),
            slugify(supplier)
        ),
        None => format!("{ORDER_PATH}?item={}", slugify(item)),
    }
}

fn href_or_default(link: &str, item: &str, supplier: Option<&str>) -> String {
    if link.trim().is_empty() {
        order_href(item, supplier)
    } else {
        link.to_string()
    }
}

/// Ask the host to navigate to a reorder form.
pub fn request_reorder(bus: &EventBus, href: &str) {
    tracing::debug!("Reorder requested: {}", href);
    bus.publish(Event::Navigate {
        href: href.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplymap_catalog::builtin;

    #[test]
    fn test_badge_variants() {
        let high = ShortageBadge::for_stock(StockLevel::Shortage(76.0));
        assert_eq!(high.variant, BadgeVariant::Destructive);
        assert_eq!(high.label, "76%");

        let medium = ShortageBadge::for_stock(StockLevel::Shortage(45.0));
        assert_eq!(medium.variant, BadgeVariant::Secondary);

        let low = ShortageBadge::for_stock(StockLevel::Shortage(12.0));
        assert_eq!(low.variant, BadgeVariant::Default);

        let surplus = ShortageBadge::for_stock(StockLevel::Surplus(35.0));
        assert_eq!(surplus.variant, BadgeVariant::Default);
        assert_eq!(surplus.label, "N/A");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Surgical Gloves"), "surgical-gloves");
        assert_eq!(slugify("N95 Masks"), "n95-masks");
        assert_eq!(slugify("  Lab / Testing  Supplies! "), "lab-testing-supplies");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_order_href() {
        assert_eq!(
            order_href("Surgical Gloves", Some("MedSupply Co")),
            "/orders/new?item=surgical-gloves&supplier=medsupply-co"
        );
        assert_eq!(order_href("PPE", None), "/orders/new?item=ppe");
    }

    #[test]
    fn test_partner_detail() {
        let catalog = builtin::partnership_network().unwrap();
        let healthtech = catalog.entity(EntityId(102)).unwrap();
        let edges: Vec<&Connection> = catalog.connections().iter().collect();
        let detail = project_detail(&catalog, healthtech, &edges);

        assert_eq!(detail.title, "HealthTech Solutions");
        assert_eq!(detail.title_color, Color::rgb(0x42, 0x85, 0xF4));
        assert_eq!(detail.category.as_deref(), Some("Primary Partners"));

        let alerts: Vec<bool> = detail.traded_items.iter().map(|i| i.alert).collect();
        assert_eq!(alerts, vec![true, true, false]);
        assert_eq!(detail.traded_items[2].reorder_href, "/orders/new?item=ppe");

        let peers: Vec<i64> = detail.relationships.iter().map(|r| r.id.0).collect();
        assert_eq!(peers, vec![101, 201, 301]);
        assert_eq!(detail.relationships[0].strength, Some(90.0));
    }

    #[test]
    fn test_relationships_follow_visible_edges() {
        let catalog = builtin::partnership_network().unwrap();
        let medsupply = catalog.entity(EntityId(101)).unwrap();
        let edges: Vec<&Connection> = catalog.connections().iter().take(1).collect();
        let detail = project_detail(&catalog, medsupply, &edges);
        assert_eq!(detail.relationships.len(), 1);
        assert_eq!(detail.relationships[0].name, "HealthTech Solutions");
    }

    #[test]
    fn test_supplier_availability() {
        let catalog = builtin::products_map().unwrap();
        let gloves = catalog.entity(EntityId(101)).unwrap();
        let detail = project_detail(&catalog, gloves, &[]);
        let low: Vec<bool> = detail.suppliers.iter().map(|s| s.low_availability).collect();
        assert_eq!(low, vec![false, true]);
        assert_eq!(
            detail.suppliers[0].reorder_href,
            "/orders/new?item=surgical-gloves&supplier=medsupply"
        );
        assert_eq!(detail.badge.variant, BadgeVariant::Secondary);
    }

    #[test]
    fn test_request_reorder_publishes() {
        let bus = EventBus::new();
        request_reorder(&bus, "/orders/new?item=test-kits&supplier=global");
        assert_eq!(
            bus.receiver().try_recv().unwrap(),
            Event::Navigate {
                href: "/orders/new?item=test-kits&supplier=global".to_string(),
            }
        );
    }
}
