//! PDF Highlighter UI Library
//!
//! Selection capture, tips and per-page highlight layers on top of a host
//! document viewer.
//!
//! The host implements [`DocumentViewer`] for its viewer and
//! [`HighlightRenderer`] for its drawing layer, then drives a
//! [`PageLayerManager`] with [`ViewerEvent`]s.

pub mod autoscroll;
pub mod events;
pub mod layer;
pub mod raster;
pub mod renderer;
pub mod selection;
pub mod tip;
pub mod viewer;

#[cfg(test)]
mod test_support;

pub use autoscroll::{Autoscroll, AutoscrollState};
pub use events::{Key, Modifiers, NativeSelection, PointerEvent, PointerTarget, ViewerEvent};
pub use layer::{HostNotification, PageLayerManager};
pub use raster::{screenshot, CanvasSnapshot, RasterSurface, ScreenshotError, PNG_DATA_URL_PREFIX};
pub use renderer::{HighlightContext, HighlightRenderer, PageBinding};
pub use selection::{AreaSelectionPredicate, PendingSelection, SelectionCapture, SelectionId};
pub use tip::{HoverMonitor, Tip, TipAnchor, TipPlacement, TipPlacer, TipSide, TipSize};
pub use viewer::{DocumentViewer, NodeId};
