//! Tip (popup) placement
//!
//! Tips sit above the highlight they belong to, centred horizontally. When
//! there is no room above the visible area they flip below. The tip's size
//! is only known after it has been rendered once, so placement runs twice:
//! first with a zero size, then with the measured one.
//!
//! All coordinates here are container space.

use pdf_highlighter_core::{HighlightId, PageRect, Rect, ViewportPosition};

/// A tip anchored to a viewport position. The content is opaque to the
/// highlighter and handed back to the renderer untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Tip<C> {
    pub position: ViewportPosition,
    pub content: C,
}

impl<C> Tip<C> {
    pub fn new(position: ViewportPosition, content: C) -> Self {
        Self { position, content }
    }
}

/// Measured size of a rendered tip
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TipSize {
    pub width: f64,
    pub height: f64,
}

impl TipSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which side of the highlight the tip ended up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipSide {
    Above,
    Below,
}

/// Highlight edges a tip is placed against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipAnchor {
    pub center_x: f64,
    pub top: f64,
    pub bottom: f64,
}

impl TipAnchor {
    /// Anchor for a page-relative rect on a page at `page_box`
    pub fn new(rect: &PageRect, page_box: &Rect) -> Self {
        let top = page_box.top + rect.top;
        Self {
            center_x: page_box.left + rect.left + rect.width / 2.0,
            top,
            bottom: top + rect.height,
        }
    }
}

/// Final position of a tip's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipPlacement {
    pub left: f64,
    pub top: f64,
    pub side: TipSide,
}

impl TipPlacement {
    /// Box covered by a tip of `size` at this placement
    pub fn bounds(&self, size: TipSize) -> Rect {
        Rect::new(self.left, self.top, size.width, size.height)
    }
}

/// Computes tip placements
#[derive(Debug, Clone, Copy)]
pub struct TipPlacer {
    /// Gap between the highlight edge and the tip
    padding: f64,
}

impl TipPlacer {
    pub fn new(padding: f64) -> Self {
        Self { padding }
    }

    /// Place a tip of `size` against `anchor`
    ///
    /// Flips below when the tip would start above `scroll_top`. The left edge
    /// is clamped so the tip never starts before the container edge nor ends
    /// past the right edge of the page; when the tip is wider than the page
    /// the right bound wins.
    pub fn place(
        &self,
        anchor: &TipAnchor,
        size: TipSize,
        scroll_top: f64,
        page_box: &Rect,
    ) -> TipPlacement {
        let above = anchor.top - size.height - self.padding;

        let (top, side) = if above < scroll_top {
            (anchor.bottom + self.padding, TipSide::Below)
        } else {
            (above, TipSide::Above)
        };

        let left = (anchor.center_x - size.width / 2.0)
            .max(0.0)
            .min(page_box.right() - size.width);

        TipPlacement { left, top, side }
    }
}

/// Dismisses a hover tip once the pointer leaves both the highlight and the
/// tip's padded box
#[derive(Debug, Clone, PartialEq)]
pub struct HoverMonitor {
    highlight: Option<HighlightId>,
    padding_x: f64,
    padding_y: f64,
}

impl HoverMonitor {
    pub fn new(highlight: Option<HighlightId>, padding_x: f64, padding_y: f64) -> Self {
        Self {
            highlight,
            padding_x,
            padding_y,
        }
    }

    /// Whether the pointer hovering over `target` belongs to the monitored highlight
    pub fn is_over_highlight(&self, target: Option<&HighlightId>) -> bool {
        self.highlight.is_some() && self.highlight.as_ref() == target
    }

    /// Whether the tip should go away for a pointer at `point`
    pub fn should_dismiss(&self, point: (f64, f64), over_highlight: bool, tip_bounds: &Rect) -> bool {
        if over_highlight {
            return false;
        }

        let (x, y) = point;
        let in_x = x > tip_bounds.left - self.padding_x && x < tip_bounds.right() + self.padding_x;
        let in_y = y > tip_bounds.top - self.padding_y && y < tip_bounds.bottom() + self.padding_y;
        !(in_x && in_y)
    }
}

/// The tip currently shown, with what is known about its layout
#[derive(Debug, Clone)]
pub(crate) struct ActiveTip<C> {
    pub tip: Tip<C>,
    pub size: TipSize,
    pub placement: Option<TipPlacement>,
    pub hover: Option<HoverMonitor>,
}

impl<C> ActiveTip<C> {
    pub fn new(tip: Tip<C>, hover: Option<HoverMonitor>) -> Self {
        Self {
            tip,
            size: TipSize::default(),
            placement: None,
            hover,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_box() -> Rect {
        Rect::new(0.0, 0.0, 600.0, 800.0)
    }

    fn anchor(top: f64) -> TipAnchor {
        TipAnchor::new(&PageRect::new(200.0, top, 100.0, 20.0, 1), &page_box())
    }

    #[test]
    fn test_tip_prefers_above() {
        let placement =
            TipPlacer::new(5.0).place(&anchor(400.0), TipSize::new(100.0, 50.0), 0.0, &page_box());
        assert_eq!(placement.side, TipSide::Above);
        assert_eq!(placement.top, 345.0);
        assert_eq!(placement.left, 200.0);
    }

    #[test]
    fn test_tip_flips_below_near_scroll_top() {
        // 400 - 50 - 5 = 345 < 360
        let placement =
            TipPlacer::new(5.0).place(&anchor(400.0), TipSize::new(100.0, 50.0), 360.0, &page_box());
        assert_eq!(placement.side, TipSide::Below);
        assert_eq!(placement.top, 425.0);
    }

    #[test]
    fn test_tip_clamped_to_page() {
        let placer = TipPlacer::new(5.0);
        let near_left = TipAnchor {
            center_x: 10.0,
            top: 400.0,
            bottom: 420.0,
        };
        let placement = placer.place(&near_left, TipSize::new(100.0, 50.0), 0.0, &page_box());
        assert_eq!(placement.left, 0.0);

        let near_right = TipAnchor {
            center_x: 590.0,
            ..near_left
        };
        let placement = placer.place(&near_right, TipSize::new(100.0, 50.0), 0.0, &page_box());
        assert_eq!(placement.left, 500.0);

        // Wider than the page: the right bound still holds
        let placement = placer.place(&near_right, TipSize::new(700.0, 50.0), 0.0, &page_box());
        assert!(placement.left + 700.0 <= page_box().right());
    }

    #[test]
    fn test_unmeasured_tip_hugs_anchor() {
        let placement =
            TipPlacer::new(5.0).place(&anchor(400.0), TipSize::default(), 0.0, &page_box());
        assert_eq!(placement.top, 395.0);
        assert_eq!(placement.left, 250.0);
    }

    #[test]
    fn test_hover_monitor() {
        let id = HighlightId::new("h");
        let monitor = HoverMonitor::new(Some(id.clone()), 60.0, 30.0);
        let tip = Rect::new(100.0, 100.0, 200.0, 50.0);

        assert!(monitor.is_over_highlight(Some(&id)));
        assert!(!monitor.is_over_highlight(None));
        assert!(!monitor.should_dismiss((50.0, 90.0), false, &tip));
        assert!(monitor.should_dismiss((30.0, 90.0), false, &tip));
        assert!(!monitor.should_dismiss((30.0, 90.0), true, &tip));
        assert!(monitor.should_dismiss((150.0, 190.0), false, &tip));
    }
}
