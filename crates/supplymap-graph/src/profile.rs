//! Per-view constants.
//!
//! The partnership map and the products map share one pipeline; everything
//! that differs between them (bubble sizing, focus gesture, how the highlight
//! narrows edges, whether zoom moves coordinates) lives in a [`ViewProfile`].

use crate::resolver::HighlightMode;
use serde::{Deserialize, Serialize};
use supplymap_core::ViewKind;

/// Linear bubble sizing: `base + metric / 100 * range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeScale {
    pub base: f64,
    pub range: f64,
}

impl SizeScale {
    /// Relationship strength drives partner bubbles.
    pub const PARTNERSHIP: SizeScale = SizeScale {
        base: 20.0,
        range: 30.0,
    };

    /// Usage volume drives supply item bubbles.
    pub const PRODUCTS: SizeScale = SizeScale {
        base: 25.0,
        range: 45.0,
    };

    pub fn size_for(&self, metric: f64) -> f64 {
        self.base + (metric / 100.0) * self.range
    }
}

/// Gesture that focuses an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusMode {
    Click,
    Hover,
}

/// What color the bubble border takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderMode {
    White,
    /// Shortage severity or surplus color.
    Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewProfile {
    pub view: ViewKind,
    pub size: SizeScale,
    pub focus: FocusMode,
    pub highlight_mode: HighlightMode,
    pub border: BorderMode,
    /// Multiply node coordinates by the zoom factor.
    pub zoom_coordinates: bool,
    /// Scale transform applied to the focused bubble.
    pub focus_scale: f64,
    /// Opacity of nodes outside an active highlight set.
    pub node_dim_opacity: f64,
    /// Opacity of edges not emphasized while a highlight set is active.
    pub edge_dim_opacity: f64,
    /// Opacity of edges when nothing is highlighted.
    pub edge_base_opacity: f64,
    /// Labels only render for the focused entity.
    pub labels_on_focus_only: bool,
    /// Draw a `+N%` / `-N%` stock indicator next to bubbles.
    pub stock_indicator: bool,
    /// Apply the severity predicate. Off where entities carry no shortage.
    pub severity_filter: bool,
}

impl ViewProfile {
    pub fn partnership() -> Self {
        Self {
            view: ViewKind::Partnership,
            size: SizeScale::PARTNERSHIP,
            focus: FocusMode::Click,
            highlight_mode: HighlightMode::AnyEndpoint,
            border: BorderMode::White,
            zoom_coordinates: true,
            focus_scale: 1.1,
            node_dim_opacity: 0.3,
            edge_dim_opacity: 0.2,
            edge_base_opacity: 0.7,
            labels_on_focus_only: false,
            stock_indicator: false,
            severity_filter: false,
        }
    }

    pub fn products() -> Self {
        Self {
            view: ViewKind::Products,
            size: SizeScale::PRODUCTS,
            focus: FocusMode::Hover,
            highlight_mode: HighlightMode::BothEndpoints,
            border: BorderMode::Status,
            // The products map has always drawn at native coordinates.
            zoom_coordinates: false,
            focus_scale: 1.2,
            node_dim_opacity: 0.3,
            edge_dim_opacity: 0.2,
            edge_base_opacity: 0.5,
            labels_on_focus_only: true,
            stock_indicator: true,
            severity_filter: true,
        }
    }

    pub fn for_view(view: ViewKind) -> Self {
        match view {
            ViewKind::Partnership => Self::partnership(),
            ViewKind::Products => Self::products(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_scales() {
        assert_eq!(SizeScale::PARTNERSHIP.size_for(100.0), 50.0);
        assert_eq!(SizeScale::PARTNERSHIP.size_for(0.0), 20.0);
        assert!((SizeScale::PRODUCTS.size_for(95.0) - 67.75).abs() < 1e-9);
    }

    #[test]
    fn test_profiles_differ_on_zoom() {
        assert!(ViewProfile::for_view(ViewKind::Partnership).zoom_coordinates);
        assert!(!ViewProfile::for_view(ViewKind::Products).zoom_coordinates);
    }

    #[test]
    fn test_severity_filter_only_on_products() {
        assert!(ViewProfile::products().severity_filter);
        assert!(!ViewProfile::partnership().severity_filter);
    }
}
