//! Rectangle types shared by every layer of the highlighter
//!
//! Pixel-space rectangles (`Rect`, `PageRect`) are only meaningful for the
//! viewport snapshot they were measured against. `NormalizedRect` is the
//! zoom-independent form that gets stored with a highlight.
//!
//! Pixel space uses the viewer's convention:
//! - Origin (0, 0) at the top-left of the page
//! - X increases to the right
//! - Y increases downward
//! - Units are CSS pixels at the current scale

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 1-indexed page number, matching the document viewer's numbering
pub type PageNumber = u32;

/// Minimum extent (in pixels) for a rectangle to count as having an area
pub const MIN_SELECTION_EXTENT: f64 = 1.0;

/// Axis-aligned rectangle in pixel space, relative to a page or container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle spanned by two arbitrary corner points (e.g. drag start and end)
    pub fn from_corners(start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            left: start.0.min(end.0),
            top: start.1.min(end.1),
            width: (end.0 - start.0).abs(),
            height: (end.1 - start.1).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Whether the rectangle is large enough to be a selection
    ///
    /// Both sides must be at least one pixel; a click without a drag
    /// produces a zero-area rectangle and is rejected here.
    pub fn has_area(&self) -> bool {
        self.width >= MIN_SELECTION_EXTENT && self.height >= MIN_SELECTION_EXTENT
    }

    /// Inclusive point containment test
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Whether `other` lies entirely within this rectangle (edges may touch)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shift the rectangle by the given offsets
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    /// Grow the rectangle on every side by the given paddings
    pub fn inflate(&self, pad_x: f64, pad_y: f64) -> Self {
        Self {
            left: self.left - pad_x,
            top: self.top - pad_y,
            width: self.width + pad_x * 2.0,
            height: self.height + pad_y * 2.0,
        }
    }

    /// Attach a page number to this rectangle
    pub fn on_page(&self, page_number: PageNumber) -> PageRect {
        PageRect {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
            page_number,
        }
    }
}

/// Pixel-space rectangle relative to the top-left corner of a page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub page_number: PageNumber,
}

impl PageRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64, page_number: PageNumber) -> Self {
        Self {
            left,
            top,
            width,
            height,
            page_number,
        }
    }

    /// Drop the page number
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn has_extent(&self) -> bool {
        self.left > 0.0 || self.right() > 0.0 || self.top > 0.0 || self.bottom() > 0.0
    }

    /// Strict containment, used to drop fragments nested in a larger one
    fn is_inside(&self, other: &PageRect) -> bool {
        self.page_number == other.page_number
            && self.top > other.top
            && self.left > other.left
            && self.bottom() < other.bottom()
            && self.right() < other.right()
    }

    fn is_same_line(&self, other: &PageRect, y_margin: f64) -> bool {
        self.page_number == other.page_number
            && (self.top - other.top).abs() < y_margin
            && (self.height - other.height).abs() < y_margin
    }

    /// `other` starts inside this rectangle's horizontal span
    fn overlaps_start_of(&self, other: &PageRect) -> bool {
        self.page_number == other.page_number
            && self.left <= other.left
            && other.left <= self.right()
    }

    fn is_followed_by(&self, other: &PageRect, x_margin: f64) -> bool {
        self.page_number == other.page_number
            && self.left <= other.left
            && self.right() <= other.right()
            && other.left - self.right() <= x_margin
    }

    fn extend_to(&mut self, other: &PageRect) {
        self.width = (other.right() - self.left).max(self.width);
    }
}

/// Zoom-independent rectangle stored with a highlight
///
/// `(x1, y1)-(x2, y2)` are the corners. `width`/`height` record the extent of
/// the space the corners were captured in, so a consumer can recompute
/// ratios without assuming an origin convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
    pub page_number: PageNumber,
}

/// Current pixel-space shape of a highlight
///
/// Text highlights carry one rect per visual line; area highlights carry only
/// the bounding rect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportPosition {
    pub bounding_rect: PageRect,
    pub rects: Vec<PageRect>,
}

impl ViewportPosition {
    pub fn new(bounding_rect: PageRect, rects: Vec<PageRect>) -> Self {
        Self {
            bounding_rect,
            rects,
        }
    }

    /// Home page of the position
    pub fn page_number(&self) -> PageNumber {
        self.bounding_rect.page_number
    }
}

/// Persisted shape of a highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPosition {
    pub bounding_rect: NormalizedRect,
    pub rects: Vec<NormalizedRect>,
    /// Selects the bottom-up PDF coordinate convention. Stored exactly as
    /// received (including absence) and never inferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_pdf_coordinates: Option<bool>,
}

impl NormalizedPosition {
    /// Home page of the position
    pub fn page_number(&self) -> PageNumber {
        self.bounding_rect.page_number
    }

    pub fn uses_pdf_coordinates(&self) -> bool {
        self.use_pdf_coordinates.unwrap_or(false)
    }

    /// Every page this position touches: the home page plus the page of each rect
    pub fn pages(&self) -> BTreeSet<PageNumber> {
        let mut pages = BTreeSet::new();
        pages.insert(self.page_number());
        pages.extend(self.rects.iter().map(|rect| rect.page_number));
        pages
    }

    /// Shallow copy keeping only the rects that belong to `page_number`
    pub fn project_onto(&self, page_number: PageNumber) -> Self {
        Self {
            bounding_rect: self.bounding_rect,
            rects: self
                .rects
                .iter()
                .filter(|rect| rect.page_number == page_number)
                .copied()
                .collect(),
            use_pdf_coordinates: self.use_pdf_coordinates,
        }
    }
}

/// Tolerances used when merging per-character fragments into line boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMergeMargins {
    /// Maximum top/height difference for two fragments to share a line
    pub y: f64,
    /// Maximum horizontal gap between two fragments that get joined
    pub x: f64,
}

impl Default for LineMergeMargins {
    fn default() -> Self {
        Self { y: 5.0, x: 10.0 }
    }
}

/// Union of the fragments on the first page of a selection
///
/// Only rects on the lowest page number with a non-zero extent contribute.
/// Returns `None` when no rect qualifies.
pub fn bounding_rect(rects: &[PageRect]) -> Option<PageRect> {
    let first_page = rects.iter().map(|rect| rect.page_number).min()?;

    let mut on_first_page = rects
        .iter()
        .filter(|rect| rect.page_number == first_page && rect.has_extent());

    let first = on_first_page.next()?;
    let (mut x0, mut y0, mut x1, mut y1) = (first.left, first.top, first.right(), first.bottom());
    for rect in on_first_page {
        x0 = x0.min(rect.left);
        y0 = y0.min(rect.top);
        x1 = x1.max(rect.right());
        y1 = y1.max(rect.bottom());
    }

    Some(PageRect::new(x0, y0, x1 - x0, y1 - y0, first_page))
}

/// Merge per-fragment rectangles into one rectangle per visual line
///
/// Fragments are ordered by page, then top, then left. Fragments nested in a
/// larger fragment are dropped; fragments on the same line that overlap or sit
/// within `margins.x` of each other are joined. Three passes are made so that
/// chains of fragments collapse fully.
pub fn merge_line_fragments(mut rects: Vec<PageRect>, margins: LineMergeMargins) -> Vec<PageRect> {
    rects.sort_by(|a, b| {
        a.page_number
            .cmp(&b.page_number)
            .then(a.top.total_cmp(&b.top))
            .then(a.left.total_cmp(&b.left))
    });

    let mut lines: Vec<PageRect> = rects
        .iter()
        .filter(|rect| !rects.iter().any(|other| rect.is_inside(other)))
        .copied()
        .collect();
    let mut removed = vec![false; lines.len()];

    for _ in 0..3 {
        for i in 0..lines.len() {
            for j in 0..lines.len() {
                if i == j || removed[i] || removed[j] {
                    continue;
                }

                let (a, b) = (lines[i], lines[j]);
                if !a.is_same_line(&b, margins.y) {
                    continue;
                }

                if a.overlaps_start_of(&b) {
                    lines[i].extend_to(&b);
                    lines[i].height = a.height.max(b.height);
                    removed[j] = true;
                } else if a.is_followed_by(&b, margins.x) {
                    lines[i].extend_to(&b);
                    removed[j] = true;
                }
            }
        }
    }

    lines
        .into_iter()
        .zip(removed)
        .filter_map(|(rect, removed)| (!removed).then_some(rect))
        .collect()
}
