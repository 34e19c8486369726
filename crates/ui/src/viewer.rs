//! The document viewer seam
//!
//! The highlighter does not render or lay out documents itself. A host
//! viewer (a pdf.js-style paginated view) implements `DocumentViewer` and
//! the highlighter drives it through these calls.
//!
//! Coordinate spaces used across this trait:
//! - Client space: window pixels, as carried by pointer events
//! - Container space: pixels within the scrollable container's content,
//!   i.e. client space minus the container origin plus the scroll offset
//! - Page space: pixels relative to a page's top-left corner

use pdf_highlighter_core::{PageNumber, PageViewport, Rect, ScaleValue};

use crate::raster::RasterSurface;

/// Opaque handle to a node owned by the viewer (a text layer or a
/// highlight layer). Handles can go stale when the viewer unloads a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Everything the highlighter needs from the hosting document viewer
pub trait DocumentViewer {
    /// Snapshot of a page's geometry at the current zoom
    type Viewport: PageViewport + Clone;

    /// Rendered pixels of a page
    type Raster: RasterSurface;

    /// Number of pages in the loaded document
    fn page_count(&self) -> u32;

    /// Current viewport of a page, `None` until the page has been laid out
    fn viewport(&self, page: PageNumber) -> Option<Self::Viewport>;

    /// Text layer node of a page, `None` while the page is not rendered
    fn text_layer(&self, page: PageNumber) -> Option<NodeId>;

    /// Whether a node handed out earlier is still mounted
    fn is_connected(&self, node: NodeId) -> bool;

    /// Find the highlight layer inside a text layer, creating it if needed
    fn find_or_create_highlight_layer(
        &mut self,
        page: PageNumber,
        text_layer: NodeId,
    ) -> Option<NodeId>;

    /// Page box in container space (offset from the container content origin
    /// plus the rendered size)
    fn page_box(&self, page: PageNumber) -> Option<Rect>;

    /// Container box in client space
    fn container_rect(&self) -> Rect;

    /// Current `(scroll_left, scroll_top)` of the container
    fn scroll_offset(&self) -> (f64, f64);

    /// Rendered canvas of a page
    fn raster(&self, page: PageNumber) -> Option<&Self::Raster>;

    /// Scroll so that the PDF point `dest` on `page` is at the top of the view
    fn scroll_page_into_view(&mut self, page: PageNumber, dest: (f64, f64));

    fn set_current_scale(&mut self, scale: ScaleValue);

    /// Enable or disable native text selection over the pages
    fn set_text_selection_enabled(&mut self, enabled: bool);

    /// Drop the document's native text selection
    fn clear_native_selection(&mut self);
}

/// Convert a client-space point to container space
pub fn client_to_container<V: DocumentViewer + ?Sized>(viewer: &V, x: f64, y: f64) -> (f64, f64) {
    let container = viewer.container_rect();
    let (scroll_left, scroll_top) = viewer.scroll_offset();
    (x - container.left + scroll_left, y - container.top + scroll_top)
}

/// Page box in client space
pub fn page_client_rect<V: DocumentViewer + ?Sized>(viewer: &V, page: PageNumber) -> Option<Rect> {
    let page_box = viewer.page_box(page)?;
    let container = viewer.container_rect();
    let (scroll_left, scroll_top) = viewer.scroll_offset();
    Some(page_box.translate(container.left - scroll_left, container.top - scroll_top))
}
