//! The rendering seam
//!
//! The highlighter decides what goes on each page; a `HighlightRenderer`
//! decides what it looks like. Each render pass hands the renderer one
//! `HighlightContext` per highlight on the page, already in pixel space.

use pdf_highlighter_core::{
    to_normalized, NormalizedRect, PageNumber, PageRect, PageViewport, ViewportHighlight,
};

use crate::raster::{screenshot, RasterSurface, ScreenshotError};
use crate::tip::{Tip, TipPlacement, TipSize};
use crate::viewer::NodeId;

/// Render target attached to a page's text layer
///
/// Invalid once the viewer detaches `text_layer`; a new binding is created
/// when the page comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBinding {
    pub page_number: PageNumber,
    /// Highlight layer the renderer draws into
    pub render_target: NodeId,
    /// Text layer the render target lives in
    pub text_layer: NodeId,
}

/// One highlight prepared for drawing, with helpers bound to its page
pub struct HighlightContext<'a> {
    /// The highlight in pixels for this pass (the ghost has no id)
    pub highlight: ViewportHighlight,
    /// Whether this is the highlight last scrolled to
    pub is_scrolled_to: bool,
    viewport: &'a dyn PageViewport,
    raster: Option<&'a dyn RasterSurface>,
}

impl<'a> HighlightContext<'a> {
    pub(crate) fn new(
        highlight: ViewportHighlight,
        is_scrolled_to: bool,
        viewport: &'a dyn PageViewport,
        raster: Option<&'a dyn RasterSurface>,
    ) -> Self {
        Self {
            highlight,
            is_scrolled_to,
            viewport,
            raster,
        }
    }

    /// Normalize a rect on this page, e.g. after an area highlight was moved
    /// or resized
    pub fn viewport_to_normalized(&self, rect: &PageRect) -> NormalizedRect {
        to_normalized(rect, self.viewport, false)
    }

    /// PNG data URL of a region of this page
    pub fn screenshot(&self, rect: &PageRect) -> Result<String, ScreenshotError> {
        match self.raster {
            Some(raster) => screenshot(raster, &rect.rect()),
            None => Err(ScreenshotError::RasterUnavailable),
        }
    }
}

/// Draws highlight layers and tips
pub trait HighlightRenderer {
    /// Host-defined tip body
    type TipContent: Clone;

    /// Redraw one page's highlight layer. An empty slice clears it.
    fn render_layer(&mut self, binding: &PageBinding, highlights: &[HighlightContext<'_>]);

    /// Draw the tip at `placement` and report its rendered size.
    /// `None` means the size is not known yet.
    fn render_tip(
        &mut self,
        tip: &Tip<Self::TipContent>,
        placement: &TipPlacement,
    ) -> Option<TipSize>;

    fn hide_tip(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_highlighter_core::{Content, PdfViewport, Rotation, ViewportPosition};

    fn highlight() -> ViewportHighlight {
        ViewportHighlight {
            id: None,
            content: Content::Text("ghost".into()),
            comment: None,
            position: ViewportPosition::new(PageRect::new(10.0, 10.0, 40.0, 12.0, 1), Vec::new()),
        }
    }

    #[test]
    fn test_screenshot_without_raster_reports_missing_raster() {
        let viewport = PdfViewport::letter(1.0, Rotation::None);
        let context = HighlightContext::new(highlight(), false, &viewport, None);

        let result = context.screenshot(&PageRect::new(10.0, 10.0, 40.0, 12.0, 1));
        assert!(matches!(result, Err(ScreenshotError::RasterUnavailable)));
    }

    #[test]
    fn test_viewport_to_normalized_uses_page_extent() {
        let viewport = PdfViewport::letter(2.0, Rotation::None);
        let context = HighlightContext::new(highlight(), false, &viewport, None);

        let normalized = context.viewport_to_normalized(&PageRect::new(20.0, 40.0, 60.0, 20.0, 1));
        assert_eq!((normalized.x1, normalized.y2), (20.0, 60.0));
        assert_eq!((normalized.width, normalized.height), (1224.0, 1584.0));
    }
}
