//! PDF Highlighter Core Library
//!
//! Geometry and data model for document highlights: normalized and viewport
//! rectangles, the conversions between them, per-page bucketing and the
//! ghost highlight slot.

pub mod bucket;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod geometry;
pub mod ghost;
pub mod highlight;
pub mod scale;
pub mod viewport;

pub use bucket::group_by_page;
pub use config::HighlighterConfig;
pub use coordinates::{position_to_normalized, position_to_viewport, to_normalized, to_viewport};
pub use error::{
    DocumentStateError, GeometryError, HighlighterError, HighlighterResult, IntegrationError,
};
pub use geometry::{
    bounding_rect, merge_line_fragments, LineMergeMargins, NormalizedPosition, NormalizedRect,
    PageNumber, PageRect, Rect, ViewportPosition,
};
pub use ghost::GhostSlot;
pub use highlight::{
    Comment, Content, GhostHighlight, HasPosition, Highlight, HighlightId, LayerHighlight,
    ViewportHighlight,
};
pub use scale::ScaleValue;
pub use viewport::{PageViewport, PdfViewport, Rotation};
