//! Map Style System
//!
//! Pure mapping from entity / connection data plus the current focus state to
//! drawable attributes: bubble geometry, fill and border colors, opacity,
//! stacking order, labels, stock indicators and edge strokes. Nothing here
//! holds state; callers re-project after every state transition.

use crate::profile::{BorderMode, ViewProfile};
use serde::{Serialize, Serializer};
use supplymap_core::{
    ConnectionKind, Entity, EntityId, HIGH_SHORTAGE_PERCENT, MEDIUM_SHORTAGE_PERCENT, ParseError,
    Point, StockLevel,
};

/// RGBA color, serialized as a `#RRGGBB` (or `#RRGGBBAA`) hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Ok(Self::rgba(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Like [`Color::from_hex`], degrading to the neutral category color.
    pub fn from_hex_or_default(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or_else(|err| {
            tracing::debug!("{}; using neutral color", err);
            COLOR_NEUTRAL
        })
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

// ============================================================================
// Color Constants
// ============================================================================

/// Fallback for unknown categories and connection kinds (`#ccc`).
pub const COLOR_NEUTRAL: Color = Color::rgb(0xCC, 0xCC, 0xCC);
pub const COLOR_WHITE: Color = Color::rgb(255, 255, 255);

// Stock status
pub const COLOR_SHORTAGE_HIGH: Color = Color::rgb(0xFF, 0x52, 0x52);
pub const COLOR_SHORTAGE_MEDIUM: Color = Color::rgb(0xFF, 0xC1, 0x07);
pub const COLOR_SHORTAGE_LOW: Color = Color::rgb(0x4C, 0xAF, 0x50);
pub const COLOR_SURPLUS: Color = Color::rgb(0x4C, 0xAF, 0x50);

// Connections
pub const COLOR_EDGE_PRIMARY: Color = Color::rgb(0x42, 0x85, 0xF4);
pub const COLOR_EDGE_REGIONAL: Color = Color::rgb(0x34, 0xA8, 0x53);
pub const COLOR_EDGE_DISTRIBUTOR: Color = Color::rgb(0xFB, 0xBC, 0x05);
pub const COLOR_EDGE_PRODUCT: Color = Color::rgb(0x66, 0x66, 0x66);

// Stacking
pub const Z_FOCUSED: i32 = 1000;
pub const Z_HIGHLIGHTED: i32 = 100;
pub const Z_DEFAULT: i32 = 10;
pub const Z_INDICATOR: i32 = 20;

/// Gap between the bubble's bottom edge and its label.
const LABEL_GAP: f64 = 5.0;
const INDICATOR_IDLE_OPACITY: f64 = 0.8;
const DASH_PATTERN: &str = "5,5";

// ============================================================================
// Style Types
// ============================================================================

/// Stroke for a connection kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionStyle {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

/// Bubble drawn for an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    pub center: Point,
    /// Top-left corner of the bubble's bounding box.
    pub left: f64,
    pub top: f64,
    pub size: f64,
    pub fill: Color,
    pub border: Color,
    pub opacity: f64,
    pub z_index: i32,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub visible: bool,
}

/// `+N%` / `-N%` badge placed at the bubble's upper right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorStyle {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub opacity: f64,
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub from: EntityId,
    pub to: EntityId,
    pub kind: ConnectionKind,
    pub title: &'static str,
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
    pub opacity: f64,
    pub emphasized: bool,
}

// ============================================================================
// State
// ============================================================================

/// Focus state of a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeState {
    /// Selected (click) or hovered, depending on the view
    pub is_focused: bool,

    /// Member of the active highlight set
    pub is_highlighted: bool,

    /// Whether any highlight set is active at all
    pub highlight_active: bool,
}

impl NodeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.is_highlighted = highlighted;
        self
    }

    pub fn with_highlight_active(mut self, active: bool) -> Self {
        self.highlight_active = active;
        self
    }

    pub fn opacity(&self, dim: f64) -> f64 {
        if self.highlight_active && !self.is_highlighted {
            dim
        } else {
            1.0
        }
    }

    pub fn z_index(&self) -> i32 {
        if self.is_focused {
            Z_FOCUSED
        } else if self.highlight_active && self.is_highlighted {
            Z_HIGHLIGHTED
        } else {
            Z_DEFAULT
        }
    }
}

/// Highlight state of a single edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeState {
    /// Both endpoints are in the highlight set
    pub is_emphasized: bool,

    /// Whether any highlight set is active at all
    pub highlight_active: bool,
}

impl EdgeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emphasized(mut self, emphasized: bool) -> Self {
        self.is_emphasized = emphasized;
        self
    }

    pub fn with_highlight_active(mut self, active: bool) -> Self {
        self.highlight_active = active;
        self
    }
}

// ============================================================================
// Style Functions
// ============================================================================

/// Severity color for a shortage percentage.
pub fn shortage_color(percent: f64) -> Color {
    if percent >= HIGH_SHORTAGE_PERCENT {
        COLOR_SHORTAGE_HIGH
    } else if percent >= MEDIUM_SHORTAGE_PERCENT {
        COLOR_SHORTAGE_MEDIUM
    } else {
        COLOR_SHORTAGE_LOW
    }
}

/// Border / badge color for a stock level. Surplus uses its own green.
pub fn status_color(stock: StockLevel) -> Color {
    match stock {
        StockLevel::Surplus(_) => COLOR_SURPLUS,
        StockLevel::Shortage(p) => shortage_color(p),
        StockLevel::Balanced => shortage_color(0.0),
    }
}

pub fn connection_style(kind: ConnectionKind) -> ConnectionStyle {
    let (color, width, dashed) = match kind {
        ConnectionKind::Primary => (COLOR_EDGE_PRIMARY, 3.0, false),
        ConnectionKind::Regional => (COLOR_EDGE_REGIONAL, 2.0, false),
        ConnectionKind::Distributor => (COLOR_EDGE_DISTRIBUTOR, 2.0, true),
        ConnectionKind::Related => (COLOR_EDGE_PRODUCT, 1.0, false),
        ConnectionKind::Dependent => (COLOR_EDGE_PRODUCT, 1.0, true),
        ConnectionKind::Unknown => (COLOR_NEUTRAL, 1.0, false),
    };
    ConnectionStyle {
        color,
        width,
        dashed,
    }
}

/// Screen position of an entity's center under the view's zoom rule.
pub fn node_center(entity: &Entity, profile: &ViewProfile, zoom: f64) -> Point {
    if profile.zoom_coordinates {
        entity.position.scaled(zoom)
    } else {
        entity.position
    }
}

pub fn node_style(
    entity: &Entity,
    category_color: &str,
    state: NodeState,
    profile: &ViewProfile,
    zoom: f64,
) -> NodeStyle {
    let size = profile.size.size_for(entity.metric);
    let center = node_center(entity, profile, zoom);
    let border = match profile.border {
        BorderMode::White => COLOR_WHITE,
        BorderMode::Status => status_color(entity.stock),
    };

    NodeStyle {
        center,
        left: center.x - size / 2.0,
        top: center.y - size / 2.0,
        size,
        fill: Color::from_hex_or_default(category_color),
        border,
        opacity: state.opacity(profile.node_dim_opacity),
        z_index: state.z_index(),
        scale: if state.is_focused {
            profile.focus_scale
        } else {
            1.0
        },
    }
}

pub fn label_style(
    entity: &Entity,
    node: &NodeStyle,
    state: NodeState,
    profile: &ViewProfile,
) -> LabelStyle {
    LabelStyle {
        text: entity.name.clone(),
        x: node.center.x,
        y: node.center.y + node.size / 2.0 + LABEL_GAP,
        opacity: node.opacity,
        visible: !profile.labels_on_focus_only || state.is_focused,
    }
}

/// Stock badge text: `+N%` for surplus, `-N%` for shortage, empty otherwise.
pub fn indicator_text(stock: StockLevel) -> String {
    match stock {
        StockLevel::Surplus(p) => format!("+{}%", format_percent(p)),
        StockLevel::Shortage(p) => format!("-{}%", format_percent(p)),
        StockLevel::Balanced => String::new(),
    }
}

pub fn indicator_style(entity: &Entity, node: &NodeStyle, state: NodeState) -> IndicatorStyle {
    IndicatorStyle {
        text: indicator_text(entity.stock),
        x: node.center.x + node.size / 2.0,
        y: node.center.y - node.size / 2.0,
        color: status_color(entity.stock),
        opacity: if state.is_focused {
            1.0
        } else {
            INDICATOR_IDLE_OPACITY
        },
        z_index: Z_INDICATOR,
    }
}

pub fn edge_style(
    from: &Entity,
    to: &Entity,
    kind: ConnectionKind,
    state: EdgeState,
    profile: &ViewProfile,
    zoom: f64,
) -> EdgeStyle {
    let base = connection_style(kind);
    let opacity = if state.is_emphasized {
        1.0
    } else if state.highlight_active {
        profile.edge_dim_opacity
    } else {
        profile.edge_base_opacity
    };

    EdgeStyle {
        from: from.id,
        to: to.id,
        kind,
        title: kind.label(),
        start: node_center(from, profile, zoom),
        end: node_center(to, profile, zoom),
        color: base.color,
        width: if state.is_emphasized {
            base.width * 2.0
        } else {
            base.width
        },
        dash: base.dashed.then_some(DASH_PATTERN),
        opacity,
        emphasized: state.is_emphasized,
    }
}

/// `45` for whole numbers, `45.5` otherwise.
pub fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{percent:.0}")
    } else {
        format!("{percent}")
    }
}
