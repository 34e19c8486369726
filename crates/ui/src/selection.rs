//! Selection capture
//!
//! Turns user gestures into candidate highlights. There are two paths:
//!
//! 1. **Area drag**: pointer-down on a page (when the host's predicate
//!    allows it), pointer-move, pointer-up. The dragged rectangle is
//!    normalized and a PNG snapshot of the region becomes the content.
//! 2. **Text selection**: the document's native selection is watched and,
//!    once it stops changing for the debounce window, its fragment
//!    rectangles are merged into line boxes.
//!
//! Either path yields a `PendingSelection`. At most one is live; the host
//! commits it into a ghost highlight or lets it be discarded.

use std::collections::BTreeMap;
use std::time::Instant;

use log::{debug, trace, warn};
use pdf_highlighter_core::{
    bounding_rect, merge_line_fragments, position_to_normalized, Content, DocumentStateError,
    GeometryError, GhostHighlight, HighlighterConfig, HighlighterResult, IntegrationError,
    LineMergeMargins, NormalizedPosition, PageNumber, PageRect, Rect, ViewportPosition,
};
use pdf_highlighter_scheduler::Debouncer;

use crate::events::{NativeSelection, PointerEvent};
use crate::raster::screenshot;
use crate::viewer::{client_to_container, page_client_rect, DocumentViewer};

/// Decides whether a pointer-down starts an area drag
pub type AreaSelectionPredicate = Box<dyn Fn(&PointerEvent) -> bool>;

/// Identifies one candidate; stale ids are rejected on commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionId(u64);

/// A finished gesture waiting for the host's decision
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSelection {
    pub id: SelectionId,
    pub content: Content,
    /// Zoom-independent position, ready to be stored
    pub position: NormalizedPosition,
    /// Position at the zoom the gesture was made at (anchors the selection tip)
    pub viewport_position: ViewportPosition,
}

impl PendingSelection {
    /// Freeze into a ghost highlight
    pub fn to_ghost(&self) -> GhostHighlight {
        GhostHighlight {
            content: self.content.clone(),
            position: self.position.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AreaDrag {
    Idle,
    /// Pointer is down; `start`/`end` are container coordinates
    Dragging {
        start: (f64, f64),
        end: Option<(f64, f64)>,
        page: PageNumber,
    },
    /// Pointer released on a valid rectangle; kept until reset
    Locked { rect: Rect, page: PageNumber },
}

pub struct SelectionCapture {
    area: AreaDrag,
    area_predicate: Option<AreaSelectionPredicate>,

    /// Latest non-collapsed native selection inside the container
    native: Option<NativeSelection>,
    text_active: bool,
    text_debounce: Debouncer,

    pending: Option<PendingSelection>,
    next_id: u64,

    margins: LineMergeMargins,
    edit_in_progress: bool,
}

impl SelectionCapture {
    pub fn new(config: &HighlighterConfig) -> Self {
        Self {
            area: AreaDrag::Idle,
            area_predicate: None,
            native: None,
            text_active: false,
            text_debounce: Debouncer::new(config.selection_debounce),
            pending: None,
            next_id: 1,
            margins: config.line_merge_margins(),
            edit_in_progress: false,
        }
    }

    /// Enable area drags for pointer-downs the predicate accepts.
    /// `None` disables area selection.
    pub fn set_area_predicate(&mut self, predicate: Option<AreaSelectionPredicate>) {
        self.area_predicate = predicate;
    }

    pub fn set_edit_in_progress(&mut self, editing: bool) {
        self.edit_in_progress = editing;
    }

    pub fn is_edit_in_progress(&self) -> bool {
        self.edit_in_progress
    }

    /// The live candidate, if any
    pub fn current(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    /// Whether a drag has a visible rectangle (moving or locked)
    pub fn is_area_selection_in_progress(&self) -> bool {
        matches!(
            self.area,
            AreaDrag::Dragging { end: Some(_), .. } | AreaDrag::Locked { .. }
        )
    }

    /// Whether the native selection is non-empty
    pub fn is_text_selection_active(&self) -> bool {
        self.text_active
    }

    pub fn is_in_progress(&self) -> bool {
        self.pending.is_some() || self.text_active || self.is_area_selection_in_progress()
    }

    /// Deadline of the pending text debounce, for hosts that schedule wake-ups
    pub fn next_deadline(&self) -> Option<Instant> {
        self.text_debounce.deadline()
    }

    /// Handle a pointer-down inside the container
    ///
    /// Returns `true` when an area drag starts. Any other pointer-down
    /// abandons an unfinished drag.
    pub fn pointer_down<V: DocumentViewer>(&mut self, event: &PointerEvent, viewer: &mut V) -> bool {
        let page = match event.target.page {
            Some(page) if self.should_start_area(event) => page,
            _ => {
                self.reset_area(viewer);
                return false;
            }
        };

        // A new gesture replaces whatever was pending
        self.pending = None;

        let start = client_to_container(viewer, event.client_x, event.client_y);
        viewer.set_text_selection_enabled(false);
        self.area = AreaDrag::Dragging {
            start,
            end: None,
            page,
        };
        debug!("area drag started on page {} at {:?}", page, start);
        true
    }

    pub fn pointer_move<V: DocumentViewer>(&mut self, event: &PointerEvent, viewer: &V) {
        if let AreaDrag::Dragging { end, .. } = &mut self.area {
            *end = Some(client_to_container(viewer, event.client_x, event.client_y));
        }
    }

    /// Finish an area drag
    ///
    /// `Ok(None)` when no drag was active. Geometry errors (zero area,
    /// released outside the container) reset the drag.
    pub fn pointer_up<V: DocumentViewer>(
        &mut self,
        event: &PointerEvent,
        viewer: &mut V,
    ) -> HighlighterResult<Option<PendingSelection>> {
        let AreaDrag::Dragging { start, page, .. } = self.area else {
            return Ok(None);
        };

        let end = client_to_container(viewer, event.client_x, event.client_y);
        let rect = Rect::from_corners(start, end);

        if !event.target.in_container {
            self.reset_area(viewer);
            return Err(GeometryError::OutsideContainer.into());
        }
        if !rect.has_area() {
            self.reset_area(viewer);
            return Err(GeometryError::ZeroArea {
                width: rect.width,
                height: rect.height,
            }
            .into());
        }

        self.area = AreaDrag::Locked { rect, page };
        viewer.set_text_selection_enabled(true);

        match self.capture_area(viewer, rect, page) {
            Ok(pending) => {
                debug!(
                    "area selection on page {}: {:?}",
                    page, pending.viewport_position.bounding_rect
                );
                self.pending = Some(pending.clone());
                Ok(Some(pending))
            }
            Err(err) => {
                self.reset_area(viewer);
                Err(err)
            }
        }
    }

    /// Record a native selection change
    pub fn selection_change(&mut self, selection: NativeSelection, now: Instant) {
        if selection.is_collapsed {
            self.text_active = false;
            return;
        }
        if !selection.within_container {
            trace!("ignoring selection outside the viewer container");
            return;
        }

        self.text_active = true;
        self.native = Some(selection);
        self.text_debounce.trigger(now);
    }

    /// Produce a text candidate once the selection has settled
    pub fn poll<V: DocumentViewer>(
        &mut self,
        now: Instant,
        viewer: &V,
    ) -> HighlighterResult<Option<PendingSelection>> {
        if !self.text_debounce.poll(now) {
            return Ok(None);
        }
        if !self.text_active || self.edit_in_progress || self.is_area_selection_in_progress() {
            return Ok(None);
        }
        let Some(native) = self.native.as_ref() else {
            return Ok(None);
        };

        let pages = native.pages();
        if pages.is_empty() {
            return Err(GeometryError::NoPage.into());
        }

        let fragments = page_fragments(viewer, &native.client_rects, &pages);
        let rects = merge_line_fragments(fragments, self.margins);
        let bounds = bounding_rect(&rects).ok_or(GeometryError::NoPage)?;
        let viewport_position = ViewportPosition::new(bounds, rects);

        let viewports: BTreeMap<PageNumber, V::Viewport> = pages
            .iter()
            .filter_map(|&page| viewer.viewport(page).map(|viewport| (page, viewport)))
            .collect();
        let position =
            position_to_normalized(&viewport_position, |page| viewports.get(&page), false)?;

        let content = Content::Text(collapse_line_breaks(&native.text));
        let pending = self.make_pending(content, position, viewport_position);
        debug!(
            "text selection over pages {:?} with {} line(s)",
            pages,
            pending.viewport_position.rects.len()
        );
        self.pending = Some(pending.clone());
        Ok(Some(pending))
    }

    /// Freeze the live candidate into a ghost and clear the live selection
    pub fn commit<V: DocumentViewer>(
        &mut self,
        id: SelectionId,
        viewer: &mut V,
    ) -> Result<GhostHighlight, IntegrationError> {
        let pending = match self.pending.take() {
            Some(pending) if pending.id == id => pending,
            other => {
                self.pending = other;
                return Err(IntegrationError::StaleSelection);
            }
        };

        self.clear_text(viewer);
        self.reset_area(viewer);
        Ok(pending.to_ghost())
    }

    /// Drop the live candidate and any area drag, returning to idle
    ///
    /// The native text selection is left to the viewer.
    pub fn discard<V: DocumentViewer>(&mut self, viewer: &mut V) -> Option<PendingSelection> {
        self.reset_area(viewer);
        self.pending.take()
    }

    /// Return to idle: no candidate, no drag, no native selection
    pub fn reset<V: DocumentViewer>(&mut self, viewer: &mut V) {
        self.pending = None;
        self.clear_text(viewer);
        self.reset_area(viewer);
    }

    /// Whether a container-space point lies inside the locked drag rectangle
    pub fn locked_area_contains(&self, point: (f64, f64)) -> bool {
        match self.area {
            AreaDrag::Locked { rect, .. } => rect.contains_point(point.0, point.1),
            _ => false,
        }
    }

    fn should_start_area(&self, event: &PointerEvent) -> bool {
        !self.edit_in_progress
            && self
                .area_predicate
                .as_ref()
                .is_some_and(|predicate| predicate(event))
    }

    fn reset_area<V: DocumentViewer>(&mut self, viewer: &mut V) {
        if let AreaDrag::Dragging { .. } = self.area {
            viewer.set_text_selection_enabled(true);
        }
        if self.area != AreaDrag::Idle {
            trace!("area drag reset");
        }
        self.area = AreaDrag::Idle;
    }

    fn clear_text<V: DocumentViewer>(&mut self, viewer: &mut V) {
        if self.text_active {
            viewer.clear_native_selection();
        }
        self.text_active = false;
        self.native = None;
        self.text_debounce.cancel();
    }

    fn capture_area<V: DocumentViewer>(
        &mut self,
        viewer: &V,
        rect: Rect,
        page: PageNumber,
    ) -> HighlighterResult<PendingSelection> {
        let page_box = viewer.page_box(page).ok_or(GeometryError::PageNotReady(page))?;
        let page_rect = rect.translate(-page_box.left, -page_box.top).on_page(page);
        let viewport = viewer.viewport(page).ok_or(GeometryError::PageNotReady(page))?;

        let viewport_position = ViewportPosition::new(page_rect, Vec::new());
        let position = position_to_normalized(
            &viewport_position,
            |candidate| (candidate == page).then_some(&viewport),
            false,
        )?;

        let raster = viewer
            .raster(page)
            .ok_or(DocumentStateError::RasterUnavailable(page))?;
        let image = screenshot(raster, &page_rect.rect()).map_err(|err| {
            warn!("failed to capture page {} region: {}", page, err);
            DocumentStateError::RasterUnavailable(page)
        })?;

        Ok(self.make_pending(Content::Area(image), position, viewport_position))
    }

    fn make_pending(
        &mut self,
        content: Content,
        position: NormalizedPosition,
        viewport_position: ViewportPosition,
    ) -> PendingSelection {
        let id = SelectionId(self.next_id);
        self.next_id += 1;
        PendingSelection {
            id,
            content,
            position,
            viewport_position,
        }
    }
}

/// Translate client-space fragments onto the pages that contain them
///
/// A fragment is kept only if it lies within a page's client box, has a
/// positive size and is not as large as the page itself (text layers report
/// whole-page boxes for some ranges).
fn page_fragments<V: DocumentViewer>(
    viewer: &V,
    client_rects: &[Rect],
    pages: &[PageNumber],
) -> Vec<PageRect> {
    let page_rects: Vec<(PageNumber, Rect)> = pages
        .iter()
        .filter_map(|&page| page_client_rect(viewer, page).map(|rect| (page, rect)))
        .collect();

    let mut fragments = Vec::new();
    for client in client_rects {
        for (page, page_rect) in &page_rects {
            let usable = page_rect.contains_rect(client)
                && client.top >= 0.0
                && client.bottom() >= 0.0
                && client.width > 0.0
                && client.height > 0.0
                && client.width != page_rect.width
                && client.height != page_rect.height;

            if usable {
                fragments.push(
                    client
                        .translate(-page_rect.left, -page_rect.top)
                        .on_page(*page),
                );
            }
        }
    }
    fragments
}

/// Replace each run of line breaks with a single space
fn collapse_line_breaks(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
