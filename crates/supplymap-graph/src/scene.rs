use crate::detail::{EntityDetail, project_detail};
use crate::filter::filter_entities;
use crate::profile::ViewProfile;
use crate::resolver::resolve_edges;
use crate::selection::MapState;
use crate::style::{
    EdgeState, EdgeStyle, IndicatorStyle, LabelStyle, NodeState, NodeStyle, edge_style,
    indicator_style, label_style, node_style,
};
use serde::Serialize;
use std::collections::HashSet;
use supplymap_catalog::{Catalog, DataSource};
use supplymap_core::{EntityId, ViewKind};

/// Everything drawn for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFrame {
    pub id: EntityId,
    pub name: String,
    pub bubble: NodeStyle,
    pub label: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<IndicatorStyle>,
}

/// A fully projected map, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub view: ViewKind,
    pub zoom: f64,
    pub nodes: Vec<NodeFrame>,
    pub edges: Vec<EdgeStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<EntityDetail>,
    /// "Click on any partner" / "Hover over items" instructions.
    pub hint_visible: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_sources: Vec<DataSource>,
}

impl Scene {
    pub fn node(&self, id: EntityId) -> Option<&NodeFrame> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, from: EntityId, to: EntityId) -> Option<&EdgeStyle> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }
}

/// Filter, resolve and style the catalog under `state`.
pub fn project(catalog: &Catalog, profile: &ViewProfile, state: &MapState) -> Scene {
    let criteria = state.criteria.scoped_to(profile);
    let visible = filter_entities(catalog.entities(), &criteria);
    let visible_ids: HashSet<EntityId> = visible.iter().map(|e| e.id).collect();
    let highlight = &state.highlight;
    let highlight_active = !highlight.is_empty();
    let focused = state.focused();

    let resolved = resolve_edges(
        catalog.connections(),
        &visible_ids,
        highlight,
        profile.highlight_mode,
    );

    let edges = resolved
        .iter()
        .filter_map(|conn| {
            let (Some(from), Some(to)) = (catalog.entity(conn.from), catalog.entity(conn.to))
            else {
                tracing::debug!("Skipping edge {} -> {}: endpoint missing", conn.from, conn.to);
                return None;
            };
            let edge_state = EdgeState::new()
                .with_highlight_active(highlight_active)
                .with_emphasized(highlight_active && highlight.spans(conn));
            Some(edge_style(from, to, conn.kind, edge_state, profile, state.zoom))
        })
        .collect();

    let nodes = visible
        .iter()
        .map(|entity| {
            let node_state = NodeState::new()
                .with_focused(focused == Some(entity.id))
                .with_highlighted(highlight.contains(entity.id))
                .with_highlight_active(highlight_active);
            let bubble = node_style(
                entity,
                catalog.category_color(entity.category_id),
                node_state,
                profile,
                state.zoom,
            );
            let label = label_style(entity, &bubble, node_state, profile);
            let indicator = profile
                .stock_indicator
                .then(|| indicator_style(entity, &bubble, node_state));
            NodeFrame {
                id: entity.id,
                name: entity.name.clone(),
                bubble,
                label,
                indicator,
            }
        })
        .collect();

    // A focused entity keeps its panel even when a filter hides its bubble.
    let detail = focused
        .and_then(|id| catalog.entity(id))
        .map(|entity| project_detail(catalog, entity, &resolved));

    Scene {
        view: profile.view,
        zoom: state.zoom,
        nodes,
        edges,
        hint_visible: detail.is_none(),
        detail,
        data_sources: if state.show_data_sources {
            catalog.data_sources().to_vec()
        } else {
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FocusMode;
    use crate::resolver::HighlightSet;
    use crate::style::{COLOR_SHORTAGE_HIGH, Z_DEFAULT, Z_FOCUSED, Z_HIGHLIGHTED};
    use supplymap_catalog::builtin;

    #[test]
    fn test_idle_partnership_scene() {
        let catalog = builtin::partnership_network().unwrap();
        let scene = project(
            &catalog,
            &ViewProfile::partnership(),
            &MapState::new(FocusMode::Click),
        );
        assert_eq!(scene.nodes.len(), 4);
        assert_eq!(scene.edges.len(), 5);
        assert!(scene.hint_visible);
        assert!(scene.detail.is_none());
        assert!(scene.nodes.iter().all(|n| n.bubble.opacity == 1.0));
        assert!(scene.nodes.iter().all(|n| n.indicator.is_none()));
        assert!(scene.edges.iter().all(|e| (e.opacity - 0.7).abs() < 1e-9));
    }

    #[test]
    fn test_selected_scene() {
        let catalog = builtin::partnership_network().unwrap();
        let mut state = MapState::new(FocusMode::Click);
        state.selected = Some(EntityId(201));
        state.highlight = HighlightSet::around(EntityId(201), &catalog);

        let scene = project(&catalog, &ViewProfile::partnership(), &state);
        let selected = scene.node(EntityId(201)).unwrap();
        assert_eq!(selected.bubble.z_index, Z_FOCUSED);

        let neighbor = scene.node(EntityId(101)).unwrap();
        assert_eq!(neighbor.bubble.z_index, Z_HIGHLIGHTED);

        let outsider = scene.node(EntityId(301)).unwrap();
        assert_eq!(outsider.bubble.z_index, Z_DEFAULT);
        assert!((outsider.bubble.opacity - 0.3).abs() < 1e-9);

        // 101-301 touches the neighborhood but is not inside it.
        let touching = scene.edge(EntityId(101), EntityId(301)).unwrap();
        assert!(!touching.emphasized);
        assert!((touching.opacity - 0.2).abs() < 1e-9);

        let inside = scene.edge(EntityId(101), EntityId(201)).unwrap();
        assert!(inside.emphasized);
        assert_eq!(inside.width, 4.0);

        let detail = scene.detail.as_ref().unwrap();
        assert_eq!(detail.title, "Regional Medical Supply");
        assert!(!scene.hint_visible);
    }

    #[test]
    fn test_products_indicators_and_sources() {
        let catalog = builtin::products_map().unwrap();
        let mut state = MapState::new(FocusMode::Hover);
        state.show_data_sources = true;

        let scene = project(&catalog, &ViewProfile::products(), &state);
        let injectables = scene.node(EntityId(201)).unwrap();
        let indicator = injectables.indicator.as_ref().unwrap();
        assert_eq!(indicator.text, "-76%");
        assert_eq!(indicator.color, COLOR_SHORTAGE_HIGH);
        assert!(!injectables.label.visible);
        assert_eq!(scene.data_sources.len(), 3);
    }

    #[test]
    fn test_detail_survives_filter() {
        let catalog = builtin::partnership_network().unwrap();
        let mut state = MapState::new(FocusMode::Click);
        state.selected = Some(EntityId(301));
        state.highlight = HighlightSet::around(EntityId(301), &catalog);
        state.criteria.search_term = "health".to_string();

        let scene = project(&catalog, &ViewProfile::partnership(), &state);
        assert_eq!(scene.nodes.len(), 1);
        assert!(scene.edges.is_empty());
        let detail = scene.detail.unwrap();
        assert_eq!(detail.id, EntityId(301));
        assert!(detail.relationships.is_empty());
    }

    #[test]
    fn test_scene_serializes() {
        let catalog = builtin::products_map().unwrap();
        let scene = project(
            &catalog,
            &ViewProfile::products(),
            &MapState::new(FocusMode::Hover),
        );
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["view"], "products");
        assert_eq!(json["nodes"][0]["bubble"]["border"], "#FFC107");
        assert!(json.get("data_sources").is_none());
    }
}
