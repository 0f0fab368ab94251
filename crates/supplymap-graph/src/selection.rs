//! Selection Controller
//!
//! [`MapState`] is the whole interactive state of one map. It only changes
//! through [`MapState::reduce`], which maps `(state, event)` to the next state
//! without side effects. [`MapController`] owns a state together with the
//! catalog it refers to and plugs into the [`EventBus`].

use crate::filter::FilterCriteria;
use crate::profile::{FocusMode, ViewProfile};
use crate::resolver::HighlightSet;
use crate::scene::{Scene, project};
use serde::{Deserialize, Serialize};
use supplymap_catalog::Catalog;
use supplymap_core::EntityId;
use supplymap_events::{Event, EventBus, EventListener};

/// Zoom precision; each step result is rounded to this many decimals.
const ZOOM_PRECISION: f64 = 1e6;

/// Clamp range and increment for the zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: 0.6,
            max: 1.5,
            step: 0.1,
        }
    }
}

impl ZoomBounds {
    pub fn clamp(&self, zoom: f64) -> f64 {
        let rounded = (zoom * ZOOM_PRECISION).round() / ZOOM_PRECISION;
        rounded.max(self.min).min(self.max)
    }

    pub fn zoom_in(&self, zoom: f64) -> f64 {
        self.clamp(zoom + self.step)
    }

    pub fn zoom_out(&self, zoom: f64) -> f64 {
        self.clamp(zoom - self.step)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    /// Which gesture focuses an entity on this map.
    pub focus_mode: FocusMode,
    pub selected: Option<EntityId>,
    pub hovered: Option<EntityId>,
    pub criteria: FilterCriteria,
    pub zoom: f64,
    pub highlight: HighlightSet,
    pub show_data_sources: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self::new(FocusMode::Click)
    }
}

impl MapState {
    pub fn new(focus_mode: FocusMode) -> Self {
        Self {
            focus_mode,
            selected: None,
            hovered: None,
            criteria: FilterCriteria::default(),
            zoom: 1.0,
            highlight: HighlightSet::empty(),
            show_data_sources: false,
        }
    }

    /// The entity the detail panel describes. A selection wins over hover.
    pub fn focused(&self) -> Option<EntityId> {
        match self.focus_mode {
            FocusMode::Click => self.selected,
            FocusMode::Hover => self.selected.or(self.hovered),
        }
    }

    pub fn reduce(mut self, event: &Event, catalog: &Catalog, bounds: &ZoomBounds) -> Self {
        match event {
            Event::SelectEntity { id } => {
                if catalog.entity(*id).is_none() {
                    tracing::debug!("Ignoring selection of unknown entity {}", id);
                    return self;
                }
                self.selected = if self.selected == Some(*id) {
                    None
                } else {
                    Some(*id)
                };
            }
            Event::HoverEntity { id } => {
                if id.is_some_and(|id| catalog.entity(id).is_none()) {
                    tracing::debug!("Ignoring hover over unknown entity {:?}", id);
                    return self;
                }
                self.hovered = *id;
            }
            Event::ClearSelection => {
                self.selected = None;
            }
            Event::SetSearchTerm { term } => {
                self.criteria.search_term = term.clone();
            }
            Event::SetCategoryFilter(filter) => {
                self.criteria.category = *filter;
            }
            Event::SetSeverityFilter(filter) => {
                self.criteria.severity = *filter;
            }
            Event::ZoomIn => {
                self.zoom = bounds.zoom_in(self.zoom);
            }
            Event::ZoomOut => {
                self.zoom = bounds.zoom_out(self.zoom);
            }
            Event::ToggleDataSources => {
                self.show_data_sources = !self.show_data_sources;
            }
            Event::Navigate { .. } => return self,
        }

        self.highlight = self
            .focused()
            .map(|id| HighlightSet::around(id, catalog))
            .unwrap_or_default();
        self
    }
}

/// Owns one map's catalog and state, and applies events to it.
pub struct MapController {
    catalog: Catalog,
    profile: ViewProfile,
    bounds: ZoomBounds,
    state: MapState,
    last_navigation: Option<String>,
}

impl MapController {
    pub fn new(catalog: Catalog, profile: ViewProfile, bounds: ZoomBounds) -> Self {
        let state = MapState::new(profile.focus);
        Self {
            catalog,
            profile,
            bounds,
            state,
            last_navigation: None,
        }
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    /// Most recent reorder target, if any was requested.
    pub fn last_navigation(&self) -> Option<&str> {
        self.last_navigation.as_deref()
    }

    /// Drain pending events from the bus. Returns how many were applied.
    pub fn pump(&mut self, bus: &EventBus) -> usize {
        bus.dispatch_to(self)
    }

    pub fn scene(&self) -> Scene {
        project(&self.catalog, &self.profile, &self.state)
    }
}

impl EventListener for MapController {
    fn handle_event(&mut self, event: &Event) {
        tracing::debug!(event = event.name(), "map event");
        if let Event::Navigate { href } = event {
            tracing::info!("Navigate to {}", href);
            self.last_navigation = Some(href.clone());
        }
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(event, &self.catalog, &self.bounds);
    }
}
