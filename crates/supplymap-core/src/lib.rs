use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub mod error;
pub mod filter;
pub mod severity;

pub use error::ParseError;
pub use filter::{CategoryFilter, SeverityFilter};
pub use severity::{HIGH_SHORTAGE_PERCENT, MEDIUM_SHORTAGE_PERCENT, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map coordinates in unscaled canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Hex color, e.g. `#4285F4`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    /// Percentage in `[0, 100]`.
    pub availability: f64,
    pub reorder_link: String,
}

impl Supplier {
    /// Suppliers below half availability are flagged in the detail panel.
    pub fn is_low_availability(&self) -> bool {
        self.availability < 50.0
    }
}

/// An item a partner trades with us, with its current shortage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradedItem {
    pub name: String,
    pub shortage_percent: f64,
    pub reorder_link: String,
}

/// Stock position of an entity. Shortage and surplus never coexist.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "percent", rename_all = "snake_case")]
pub enum StockLevel {
    Shortage(f64),
    Surplus(f64),
    #[default]
    Balanced,
}

impl StockLevel {
    /// Builds a stock level from the two optional percentages found in
    /// catalog records. Returns `None` when both are present.
    pub fn from_percents(shortage: Option<f64>, surplus: Option<f64>) -> Option<Self> {
        match (shortage, surplus) {
            (Some(_), Some(_)) => None,
            (Some(p), None) => Some(StockLevel::Shortage(p)),
            (None, Some(p)) => Some(StockLevel::Surplus(p)),
            (None, None) => Some(StockLevel::Balanced),
        }
    }

    pub fn shortage_percent(&self) -> Option<f64> {
        match self {
            StockLevel::Shortage(p) => Some(*p),
            _ => None,
        }
    }

    pub fn surplus_percent(&self) -> Option<f64> {
        match self {
            StockLevel::Surplus(p) => Some(*p),
            _ => None,
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::classify(self.shortage_percent())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub category_id: CategoryId,
    pub position: Point,
    /// Relationship strength (partners) or usage volume (supply items), 0-100.
    pub metric: f64,
    pub stock: StockLevel,
    pub suppliers: Vec<Supplier>,
    pub traded_items: Vec<TradedItem>,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    // Partnership network
    Primary,
    Regional,
    Distributor,

    // Products map
    Related,
    Dependent,

    #[serde(other)]
    Unknown,
}

impl ConnectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::Primary => "primary",
            ConnectionKind::Regional => "regional",
            ConnectionKind::Distributor => "distributor",
            ConnectionKind::Related => "related",
            ConnectionKind::Dependent => "dependent",
            ConnectionKind::Unknown => "unknown",
        }
    }

    /// Human readable label used as the edge tooltip.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionKind::Primary => "Primary",
            ConnectionKind::Regional => "Regional",
            ConnectionKind::Distributor => "Distributor",
            ConnectionKind::Related => "Related Items",
            ConnectionKind::Dependent => "Supply Chain Dependency",
            ConnectionKind::Unknown => "Unknown",
        }
    }
}

/// Unrecognized tags parse as [`ConnectionKind::Unknown`], matching serde.
impl FromStr for ConnectionKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(ConnectionKind::Primary),
            "regional" => Ok(ConnectionKind::Regional),
            "distributor" => Ok(ConnectionKind::Distributor),
            "related" => Ok(ConnectionKind::Related),
            "dependent" => Ok(ConnectionKind::Dependent),
            _ => Ok(ConnectionKind::Unknown),
        }
    }
}

/// A typed relationship between two entities. Stored as an ordered pair but
/// treated as undirected when drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: EntityId,
    pub to: EntityId,
    pub kind: ConnectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

impl Connection {
    /// The endpoint opposite to `id`, if `id` is an endpoint at all.
    pub fn other_end(&self, id: EntityId) -> Option<EntityId> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Which visualization a catalog and state belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    #[default]
    Partnership,
    Products,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Partnership => write!(f, "partnership"),
            ViewKind::Products => write!(f, "products"),
        }
    }
}

impl FromStr for ViewKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "partnership" | "partners" => Ok(ViewKind::Partnership),
            "products" | "shortage" => Ok(ViewKind::Products),
            other => Err(ParseError::InvalidViewKind(other.to_string())),
        }
    }
}
