use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use supplymap_catalog::Catalog;
use supplymap_core::{Connection, EntityId};

/// How an active highlight set narrows the eligible edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightMode {
    /// Keep edges touching the neighborhood.
    AnyEndpoint,
    /// Keep edges inside the neighborhood.
    BothEndpoints,
}

/// Entity ids rendered at full opacity: the focused entity first, then its
/// direct neighbors in connection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightSet(Vec<EntityId>);

impl HighlightSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// `{center} ∪ neighbors(center)` over every connection in the catalog,
    /// visible or not.
    pub fn around(center: EntityId, catalog: &Catalog) -> Self {
        let mut ids = vec![center];
        ids.extend(catalog.neighbors(center));
        Self(ids)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.0.contains(&id)
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.0
    }

    /// Both endpoints belong to the set.
    pub fn spans(&self, conn: &Connection) -> bool {
        self.contains(conn.from) && self.contains(conn.to)
    }
}

/// Edges whose endpoints are both visible, narrowed to the highlight
/// neighborhood when one is active. Input order is preserved.
pub fn resolve_edges<'a>(
    edges: &'a [Connection],
    visible: &HashSet<EntityId>,
    highlight: &HighlightSet,
    mode: HighlightMode,
) -> Vec<&'a Connection> {
    edges
        .iter()
        .filter(|conn| visible.contains(&conn.from) && visible.contains(&conn.to))
        .filter(|conn| {
            if highlight.is_empty() {
                return true;
            }
            match mode {
                HighlightMode::AnyEndpoint => {
                    highlight.contains(conn.from) || highlight.contains(conn.to)
                }
                HighlightMode::BothEndpoints => highlight.spans(conn),
            }
        })
        .collect()
}
