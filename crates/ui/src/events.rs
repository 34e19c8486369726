//! Events the host forwards from its viewer and window

use pdf_highlighter_core::{HighlightId, PageNumber, Rect};

/// Keyboard modifiers held during a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

/// What the pointer was over when the event fired
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerTarget {
    /// Page under the pointer, if any
    pub page: Option<PageNumber>,
    /// Whether the target is inside the viewer container
    pub in_container: bool,
    /// Whether the target is inside the tip container
    pub in_tip: bool,
    /// Highlight under the pointer, if any
    pub highlight: Option<HighlightId>,
}

impl PointerTarget {
    /// Target on a page inside the container
    pub fn page(page: PageNumber) -> Self {
        Self {
            page: Some(page),
            in_container: true,
            ..Self::default()
        }
    }

    /// Target inside the container but not on a page (e.g. the gap between pages)
    pub fn container() -> Self {
        Self {
            in_container: true,
            ..Self::default()
        }
    }

    /// Target outside the viewer entirely
    pub fn outside() -> Self {
        Self::default()
    }

    /// Target inside the tip container
    pub fn tip() -> Self {
        Self {
            in_container: true,
            in_tip: true,
            ..Self::default()
        }
    }
}

/// Pointer position in client space plus its target
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub target: PointerTarget,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64, target: PointerTarget) -> Self {
        Self {
            client_x,
            client_y,
            target,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// The document's native text selection as reported on `selectionchange`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeSelection {
    pub is_collapsed: bool,
    /// Whether the range's common ancestor is inside the viewer container
    pub within_container: bool,
    /// Selected text as the document reports it, line breaks included
    pub text: String,
    /// Page holding the start of the range
    pub start_page: Option<PageNumber>,
    /// Page holding the end of the range
    pub end_page: Option<PageNumber>,
    /// Fragment rectangles of the range in client space
    pub client_rects: Vec<Rect>,
}

impl NativeSelection {
    /// A collapsed (empty) selection
    pub fn collapsed() -> Self {
        Self {
            is_collapsed: true,
            ..Self::default()
        }
    }

    /// Pages spanned by the range, in document order
    pub fn pages(&self) -> Vec<PageNumber> {
        match (self.start_page, self.end_page) {
            (Some(start), Some(end)) => (start.min(end)..=start.max(end)).collect(),
            (Some(page), None) | (None, Some(page)) => vec![page],
            (None, None) => Vec::new(),
        }
    }
}

/// Input to the page layer manager
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// The viewer laid out the document's pages
    PagesInitialized,
    /// A page's text layer finished rendering
    TextLayerRendered { page: PageNumber },
    /// The viewer applied a new zoom
    ScaleChanged,
    /// The container was resized
    Resized,
    /// The container scrolled
    Scroll,
    KeyDown(Key),
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    SelectionChange(NativeSelection),
}
