pub mod detail;
pub mod filter;
pub mod profile;
pub mod resolver;
pub mod scene;
pub mod selection;
pub mod style;

pub use detail::{
    BadgeVariant, EntityDetail, RelationshipView, ShortageBadge, SupplierView, TradedItemView,
    order_href, project_detail, request_reorder, slugify,
};
pub use filter::{FilterCriteria, filter_entities};
pub use profile::{BorderMode, FocusMode, SizeScale, ViewProfile};
pub use resolver::{HighlightMode, HighlightSet, resolve_edges};
pub use scene::{NodeFrame, Scene, project};
pub use selection::{MapController, MapState, ZoomBounds};
pub use style::{
    Color, ConnectionStyle, EdgeState, EdgeStyle, IndicatorStyle, LabelStyle, NodeState,
    NodeStyle, connection_style, shortage_color, status_color,
};
