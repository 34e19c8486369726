//! Error types for the highlighter
//!
//! Geometry and document-state errors are recoverable: the manager logs them
//! and skips the affected page or gesture. Integration errors mean the caller
//! used the API incorrectly and are returned to the host.

use crate::geometry::PageNumber;

/// A gesture or conversion that produced no usable geometry
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("selection has no area ({width}x{height})")]
    ZeroArea { width: f64, height: f64 },
    #[error("pointer released outside the viewer container")]
    OutsideContainer,
    #[error("no viewport available for page {0}")]
    PageNotReady(PageNumber),
    #[error("stored rect on page {0} has a zero reference extent")]
    DegenerateExtent(PageNumber),
    #[error("selection does not touch any page")]
    NoPage,
}

/// The viewer has not produced the nodes a page needs yet
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentStateError {
    #[error("text layer for page {0} is not mounted")]
    TextLayerMissing(PageNumber),
    #[error("unable to create highlight layer for page {0}")]
    LayerUnavailable(PageNumber),
    #[error("raster surface for page {0} is unavailable")]
    RasterUnavailable(PageNumber),
}

/// The host used the API incorrectly
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrationError {
    #[error("no document viewer attached")]
    ViewerNotAttached,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown pending selection")]
    StaleSelection,
}

#[derive(Debug, thiserror::Error)]
pub enum HighlighterError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    DocumentState(#[from] DocumentStateError),
    #[error(transparent)]
    Integration(#[from] IntegrationError),
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl HighlighterError {
    /// Whether the error must reach the host instead of being swallowed
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Integration(_) | Self::Config(_))
    }
}

/// Result type for highlighter operations
pub type HighlighterResult<T> = Result<T, HighlighterError>;
