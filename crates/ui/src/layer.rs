//! Page layer manager
//!
//! Owns everything that lives across render passes: the highlight list, the
//! ghost slot, per-page bindings into the viewer, the active tip and the
//! autoscroll tracker. The host forwards viewer events through `handle`,
//! calls `tick` from its event loop and reacts to the returned
//! `HostNotification`s.
//!
//! Pages may be unloaded by the viewer at any time. A binding whose text
//! layer is no longer connected is dropped and recreated the next time the
//! page has a text layer.

use std::collections::BTreeMap;
use std::time::Instant;

use log::{debug, trace};
use pdf_highlighter_core::{
    group_by_page, position_to_viewport, to_viewport, DocumentStateError, GhostHighlight,
    GhostSlot, Highlight, HighlightId, HighlighterConfig, HighlighterError, IntegrationError,
    LayerHighlight, PageNumber, PageViewport, ViewportHighlight,
};
use pdf_highlighter_scheduler::Debouncer;

use crate::autoscroll::Autoscroll;
use crate::events::{Key, PointerEvent, ViewerEvent};
use crate::raster::RasterSurface;
use crate::renderer::{HighlightContext, HighlightRenderer, PageBinding};
use crate::selection::{AreaSelectionPredicate, PendingSelection, SelectionCapture, SelectionId};
use crate::tip::{ActiveTip, HoverMonitor, Tip, TipAnchor, TipPlacement, TipPlacer};
use crate::viewer::{client_to_container, DocumentViewer};

/// Something the host may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum HostNotification {
    /// A gesture produced a candidate; commit it with
    /// `PageLayerManager::commit_selection`
    SelectionFinished(PendingSelection),
    GhostHighlightCreated(GhostHighlight),
    GhostHighlightRemoved,
    /// The user scrolled away from the highlight last scrolled to
    ScrolledAway(HighlightId),
    TipDismissed,
}

pub struct PageLayerManager<V: DocumentViewer, R: HighlightRenderer> {
    config: HighlighterConfig,
    viewer: Option<V>,
    renderer: R,

    bindings: BTreeMap<PageNumber, PageBinding>,
    highlights: Vec<Highlight>,
    ghost: GhostSlot,

    selection: SelectionCapture,
    /// Tip shown for every new candidate, if enabled
    selection_tip: Option<R::TipContent>,

    tip: Option<ActiveTip<R::TipContent>>,
    placer: TipPlacer,

    autoscroll: Autoscroll,
    scale_debounce: Debouncer,
}

impl<V: DocumentViewer, R: HighlightRenderer> PageLayerManager<V, R> {
    /// Create a manager with no viewer attached
    pub fn new(config: HighlighterConfig, renderer: R) -> Result<Self, IntegrationError> {
        config.validate()?;

        Ok(Self {
            selection: SelectionCapture::new(&config),
            placer: TipPlacer::new(config.tip_padding),
            autoscroll: Autoscroll::new(config.autoscroll_settle),
            scale_debounce: Debouncer::new(config.scale_debounce),
            config,
            viewer: None,
            renderer,
            bindings: BTreeMap::new(),
            highlights: Vec::new(),
            ghost: GhostSlot::new(),
            selection_tip: None,
            tip: None,
        })
    }

    /// Attach the document viewer and render whatever is already known
    pub fn attach_viewer(&mut self, viewer: V) {
        debug!("viewer attached with {} page(s)", viewer.page_count());
        self.viewer = Some(viewer);
        self.bindings.clear();
        self.render_pass();
    }

    /// Detach the viewer, dropping every binding and the tip
    pub fn detach_viewer(&mut self) -> Option<V> {
        self.bindings.clear();
        self.hide_tip();
        self.viewer.take()
    }

    pub fn viewer(&self) -> Option<&V> {
        self.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut V> {
        self.viewer.as_mut()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config(&self) -> &HighlighterConfig {
        &self.config
    }

    /// Binding for a page, if its layer is currently mounted
    pub fn binding(&self, page: PageNumber) -> Option<&PageBinding> {
        self.bindings.get(&page)
    }

    /// Enable area selection for pointer-downs the predicate accepts
    pub fn set_area_selection(&mut self, predicate: Option<AreaSelectionPredicate>) {
        self.selection.set_area_predicate(predicate);
    }

    /// Tip content shown above every new candidate. `None` disables it.
    pub fn set_selection_tip(&mut self, content: Option<R::TipContent>) {
        self.selection_tip = content;
    }

    /// Replace the persistent highlights and re-render
    pub fn set_highlights(&mut self, highlights: Vec<Highlight>) {
        self.highlights = highlights;
        self.render_pass();
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Process one viewer event
    ///
    /// Timers are advanced to `now` first, so an event that arrives after a
    /// deadline sees the state the deadline produced.
    pub fn handle(
        &mut self,
        event: ViewerEvent,
        now: Instant,
    ) -> Result<Vec<HostNotification>, IntegrationError> {
        self.require_viewer()?;
        let mut notifications = self.advance_timers(now);

        match event {
            ViewerEvent::PagesInitialized => {
                self.apply_scale();
                self.render_pass();
            }
            ViewerEvent::TextLayerRendered { page } => {
                trace!("text layer rendered for page {}", page);
                self.render_pass();
            }
            ViewerEvent::ScaleChanged => self.render_pass(),
            ViewerEvent::Resized => self.scale_debounce.trigger(now),
            ViewerEvent::Scroll => {
                if let Some(id) = self.autoscroll.on_scroll() {
                    notifications.push(HostNotification::ScrolledAway(id));
                    self.render_pass();
                }
            }
            ViewerEvent::KeyDown(Key::Escape) => {
                notifications.extend(self.hide_tip_and_ghost());
                if let Some(viewer) = self.viewer.as_mut() {
                    self.selection.reset(viewer);
                }
            }
            ViewerEvent::KeyDown(Key::Other) => {}
            ViewerEvent::PointerDown(pointer) => self.pointer_down(&pointer, &mut notifications),
            ViewerEvent::PointerMove(pointer) => self.pointer_move(&pointer, &mut notifications),
            ViewerEvent::PointerUp(pointer) => self.pointer_up(&pointer, &mut notifications),
            ViewerEvent::SelectionChange(selection) => {
                self.selection.selection_change(selection, now)
            }
        }

        Ok(notifications)
    }

    /// Advance timers without an event
    pub fn tick(&mut self, now: Instant) -> Result<Vec<HostNotification>, IntegrationError> {
        self.require_viewer()?;
        Ok(self.advance_timers(now))
    }

    /// Earliest pending timer deadline, for hosts that schedule wake-ups
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.selection.next_deadline(),
            self.scale_debounce.deadline(),
            self.autoscroll.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Scroll the viewer to a highlight and mark it as scrolled-to
    ///
    /// The marker is cleared, and `ScrolledAway` reported, on the first
    /// scroll after the settle window.
    pub fn scroll_to_highlight(
        &mut self,
        highlight: &Highlight,
        now: Instant,
    ) -> Result<(), IntegrationError> {
        let viewer = self
            .viewer
            .as_mut()
            .ok_or(IntegrationError::ViewerNotAttached)?;

        let page = highlight.position.page_number();
        let Some(viewport) = viewer.viewport(page) else {
            debug!("cannot scroll to {}: page {} not laid out", highlight.id, page);
            return Ok(());
        };

        let rect = match to_viewport(
            &highlight.position.bounding_rect,
            &viewport,
            highlight.position.uses_pdf_coordinates(),
        ) {
            Ok(rect) => rect,
            Err(err) => {
                debug!("cannot scroll to {}: {}", highlight.id, err);
                return Ok(());
            }
        };

        let dest = viewport.convert_to_pdf_point(0.0, rect.top - self.config.scroll_margin);
        viewer.scroll_page_into_view(page, dest);

        self.autoscroll.request(highlight.id.clone(), now);
        self.render_pass();
        Ok(())
    }

    /// Highlight currently marked as scrolled-to
    pub fn scrolled_to(&self) -> Option<&HighlightId> {
        self.autoscroll.scrolled_to()
    }

    /// Turn the live candidate into the ghost highlight
    pub fn commit_selection(
        &mut self,
        id: SelectionId,
    ) -> Result<Vec<HostNotification>, IntegrationError> {
        let viewer = self
            .viewer
            .as_mut()
            .ok_or(IntegrationError::ViewerNotAttached)?;

        let ghost = self.selection.commit(id, viewer)?;
        self.ghost.create(ghost.clone());
        self.render_pass();
        Ok(vec![HostNotification::GhostHighlightCreated(ghost)])
    }

    /// Drop the live candidate without creating a ghost and release any
    /// area drag
    pub fn discard_selection(&mut self) -> Result<Option<PendingSelection>, IntegrationError> {
        let viewer = self
            .viewer
            .as_mut()
            .ok_or(IntegrationError::ViewerNotAttached)?;
        Ok(self.selection.discard(viewer))
    }

    pub fn remove_ghost_highlight(&mut self) -> Result<Vec<HostNotification>, IntegrationError> {
        self.require_viewer()?;
        if self.ghost.remove().is_none() {
            return Ok(Vec::new());
        }
        self.render_pass();
        Ok(vec![HostNotification::GhostHighlightRemoved])
    }

    pub fn ghost_highlight(&self) -> Option<&GhostHighlight> {
        self.ghost.get()
    }

    pub fn current_selection(&self) -> Option<&PendingSelection> {
        self.selection.current()
    }

    /// A candidate, a native text selection or an area drag is live
    pub fn is_selection_in_progress(&self) -> bool {
        self.selection.is_in_progress()
    }

    /// Set the edit flag, or flip it when `flag` is `None`. Returns the new value.
    pub fn toggle_edit_in_progress(&mut self, flag: Option<bool>) -> bool {
        let editing = flag.unwrap_or(!self.selection.is_edit_in_progress());
        debug!("edit in progress: {}", editing);
        self.selection.set_edit_in_progress(editing);
        editing
    }

    pub fn is_edit_in_progress(&self) -> bool {
        self.selection.is_edit_in_progress()
    }

    /// Show a hover tip for a highlight
    ///
    /// Ignored (returns `false`) while a text selection is active, a ghost
    /// exists, an area drag is visible or an edit is in progress. The tip
    /// goes away once the pointer leaves the highlight and the padded tip.
    pub fn show_highlight_tip(
        &mut self,
        highlight: &ViewportHighlight,
        content: R::TipContent,
    ) -> Result<bool, IntegrationError> {
        self.require_viewer()?;

        if self.selection.is_text_selection_active()
            || !self.ghost.is_empty()
            || self.selection.is_area_selection_in_progress()
            || self.selection.is_edit_in_progress()
        {
            trace!("highlight tip suppressed");
            return Ok(false);
        }

        let hover = HoverMonitor::new(
            highlight.id.clone(),
            self.config.hover_padding_x,
            self.config.hover_padding_y,
        );
        self.show_tip(Tip::new(highlight.position.clone(), content), Some(hover));
        Ok(true)
    }

    /// Show or clear a tip unconditionally
    pub fn set_tip(&mut self, tip: Option<Tip<R::TipContent>>) -> Result<(), IntegrationError> {
        self.require_viewer()?;
        match tip {
            Some(tip) => self.show_tip(tip, None),
            None => {
                self.hide_tip();
            }
        }
        Ok(())
    }

    /// Hide the tip; returns whether one was shown
    pub fn hide_tip(&mut self) -> bool {
        if self.tip.take().is_some() {
            self.renderer.hide_tip();
            true
        } else {
            false
        }
    }

    pub fn current_tip(&self) -> Option<&Tip<R::TipContent>> {
        self.tip.as_ref().map(|active| &active.tip)
    }

    pub fn tip_placement(&self) -> Option<TipPlacement> {
        self.tip.as_ref().and_then(|active| active.placement)
    }

    /// Re-measure and re-place the tip after its content changed size
    pub fn request_tip_reposition(&mut self) -> Result<(), IntegrationError> {
        self.require_viewer()?;
        self.render_tip();
        Ok(())
    }

    fn require_viewer(&self) -> Result<(), IntegrationError> {
        match self.viewer {
            Some(_) => Ok(()),
            None => Err(IntegrationError::ViewerNotAttached),
        }
    }

    fn advance_timers(&mut self, now: Instant) -> Vec<HostNotification> {
        let mut notifications = Vec::new();
        let mut dirty = false;

        if self.scale_debounce.poll(now) {
            self.apply_scale();
            dirty = true;
        }

        if let Some(viewer) = self.viewer.as_ref() {
            match self.selection.poll(now, viewer) {
                Ok(Some(pending)) => self.on_candidate(pending, &mut notifications),
                Ok(None) => {}
                Err(err) => log_swallowed(&err),
            }
        }

        if self.autoscroll.poll(now) {
            dirty = true;
        }

        if dirty {
            self.render_pass();
        }
        notifications
    }

    fn apply_scale(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            debug!("applying scale {}", self.config.scale_value);
            viewer.set_current_scale(self.config.scale_value);
        }
    }

    fn pointer_down(&mut self, pointer: &PointerEvent, notifications: &mut Vec<HostNotification>) {
        if pointer.target.in_tip {
            return;
        }

        let Some(viewer) = self.viewer.as_ref() else {
            return;
        };
        let point = client_to_container(viewer, pointer.client_x, pointer.client_y);
        let inside_selection = self.selection.locked_area_contains(point);

        notifications.extend(self.hide_tip_and_ghost());

        if inside_selection {
            return;
        }
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        if pointer.target.in_container {
            self.selection.discard(viewer);
            self.selection.pointer_down(pointer, viewer);
        } else {
            self.selection.reset(viewer);
        }
    }

    fn pointer_move(&mut self, pointer: &PointerEvent, notifications: &mut Vec<HostNotification>) {
        let Some(viewer) = self.viewer.as_ref() else {
            return;
        };
        self.selection.pointer_move(pointer, viewer);

        let point = client_to_container(viewer, pointer.client_x, pointer.client_y);
        let dismiss = self.tip.as_ref().is_some_and(|active| match (&active.hover, active.placement) {
            (Some(hover), Some(placement)) => {
                let over = hover.is_over_highlight(pointer.target.highlight.as_ref());
                hover.should_dismiss(point, over, &placement.bounds(active.size))
            }
            _ => false,
        });

        if dismiss && self.hide_tip() {
            notifications.push(HostNotification::TipDismissed);
        }
    }

    fn pointer_up(&mut self, pointer: &PointerEvent, notifications: &mut Vec<HostNotification>) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        match self.selection.pointer_up(pointer, viewer) {
            Ok(Some(pending)) => self.on_candidate(pending, notifications),
            Ok(None) => {}
            Err(err) => log_swallowed(&err),
        }
    }

    fn on_candidate(&mut self, pending: PendingSelection, notifications: &mut Vec<HostNotification>) {
        if let Some(content) = self.selection_tip.clone() {
            self.show_tip(Tip::new(pending.viewport_position.clone(), content), None);
        }
        notifications.push(HostNotification::SelectionFinished(pending));
    }

    fn hide_tip_and_ghost(&mut self) -> Vec<HostNotification> {
        let mut notifications = Vec::new();
        if self.hide_tip() {
            notifications.push(HostNotification::TipDismissed);
        }
        if self.ghost.remove().is_some() {
            notifications.push(HostNotification::GhostHighlightRemoved);
            self.render_pass();
        }
        notifications
    }

    fn show_tip(&mut self, tip: Tip<R::TipContent>, hover: Option<HoverMonitor>) {
        self.tip = Some(ActiveTip::new(tip, hover));
        self.render_tip();
    }

    /// Place and draw the tip, re-placing once if its measured size changed
    fn render_tip(&mut self) {
        let Some(viewer) = self.viewer.as_ref() else {
            return;
        };
        let Some(active) = self.tip.as_mut() else {
            return;
        };

        let page = active.tip.position.page_number();
        let Some(page_box) = viewer.page_box(page) else {
            trace!("tip page {} not laid out", page);
            return;
        };
        let anchor = TipAnchor::new(&active.tip.position.bounding_rect, &page_box);
        let (_, scroll_top) = viewer.scroll_offset();

        for _ in 0..2 {
            let placement = self.placer.place(&anchor, active.size, scroll_top, &page_box);
            active.placement = Some(placement);
            match self.renderer.render_tip(&active.tip, &placement) {
                Some(size) if size != active.size => active.size = size,
                _ => break,
            }
        }
    }

    /// Redraw every mounted page from one viewport snapshot per page
    fn render_pass(&mut self) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        let page_count = viewer.page_count();
        self.bindings.retain(|&page, _| page <= page_count);

        for page in 1..=page_count {
            let connected = self.bindings.get(&page).is_some_and(|binding| {
                viewer.is_connected(binding.text_layer) && viewer.is_connected(binding.render_target)
            });
            if connected {
                continue;
            }
            if self.bindings.remove(&page).is_some() {
                debug!("page {} layer detached", page);
            }
            match bind_page(viewer, page) {
                Ok(binding) => {
                    trace!("page {} bound to {:?}", page, binding.render_target);
                    self.bindings.insert(page, binding);
                }
                Err(err) => trace!("skipping page {}: {}", page, err),
            }
        }

        let viewer: &V = viewer;
        let viewports: BTreeMap<PageNumber, V::Viewport> = (1..=page_count)
            .filter_map(|page| viewer.viewport(page).map(|viewport| (page, viewport)))
            .collect();

        let mut layer_highlights: Vec<LayerHighlight> =
            self.highlights.iter().map(LayerHighlight::from).collect();
        if let Some(ghost) = self.ghost.get() {
            layer_highlights.push(LayerHighlight::from(ghost));
        }
        let buckets = group_by_page(&layer_highlights);
        let scrolled_to = self.autoscroll.scrolled_to();

        for (page, binding) in &self.bindings {
            let Some(viewport) = viewports.get(page) else {
                trace!("page {} has no viewport yet", page);
                continue;
            };
            let raster = viewer
                .raster(*page)
                .map(|raster| raster as &dyn RasterSurface);

            let bucket = buckets.get(page).map(Vec::as_slice).unwrap_or_default();
            let contexts: Vec<HighlightContext<'_>> = bucket
                .iter()
                .filter_map(|highlight| {
                    let position =
                        match position_to_viewport(&highlight.position, |p| viewports.get(&p)) {
                            Ok(position) => position,
                            Err(err) => {
                                debug!("skipping highlight on page {}: {}", page, err);
                                return None;
                            }
                        };
                    let is_scrolled_to =
                        highlight.id.is_some() && highlight.id.as_ref() == scrolled_to;
                    Some(HighlightContext::new(
                        ViewportHighlight {
                            id: highlight.id.clone(),
                            content: highlight.content.clone(),
                            comment: highlight.comment.clone(),
                            position,
                        },
                        is_scrolled_to,
                        viewport as &dyn PageViewport,
                        raster,
                    ))
                })
                .collect();

            self.renderer.render_layer(binding, &contexts);
        }

        self.render_tip();
    }
}

fn bind_page<V: DocumentViewer>(
    viewer: &mut V,
    page: PageNumber,
) -> Result<PageBinding, DocumentStateError> {
    let text_layer = viewer
        .text_layer(page)
        .ok_or(DocumentStateError::TextLayerMissing(page))?;
    let render_target = viewer
        .find_or_create_highlight_layer(page, text_layer)
        .ok_or(DocumentStateError::LayerUnavailable(page))?;

    Ok(PageBinding {
        page_number: page,
        render_target,
        text_layer,
    })
}

fn log_swallowed(err: &HighlighterError) {
    debug!("selection ignored: {}", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeViewer;
    use crate::tip::TipSize;
    use pdf_highlighter_core::{
        Comment, Content, NormalizedPosition, NormalizedRect, PageRect, ViewportPosition,
    };

    #[derive(Default)]
    struct CountingRenderer {
        layers: BTreeMap<PageNumber, usize>,
        tips: usize,
    }

    impl HighlightRenderer for CountingRenderer {
        type TipContent = String;

        fn render_layer(&mut self, binding: &PageBinding, highlights: &[HighlightContext<'_>]) {
            self.layers.insert(binding.page_number, highlights.len());
        }

        fn render_tip(&mut self, _tip: &Tip<String>, _placement: &TipPlacement) -> Option<TipSize> {
            self.tips += 1;
            Some(TipSize::new(120.0, 40.0))
        }

        fn hide_tip(&mut self) {}
    }

    fn highlight(id: &str, page: PageNumber) -> Highlight {
        let rect = NormalizedRect {
            x1: 100.0,
            y1: 300.0,
            x2: 200.0,
            y2: 312.0,
            width: 612.0,
            height: 792.0,
            page_number: page,
        };
        Highlight {
            id: HighlightId::new(id),
            content: Content::Text(id.to_string()),
            comment: Comment::default(),
            position: NormalizedPosition {
                bounding_rect: rect,
                rects: vec![rect],
                use_pdf_coordinates: None,
            },
        }
    }

    fn manager(pages: u32) -> PageLayerManager<FakeViewer, CountingRenderer> {
        let mut manager =
            PageLayerManager::new(HighlighterConfig::default(), CountingRenderer::default())
                .unwrap();
        manager.attach_viewer(FakeViewer::new(pages));
        manager
    }

    #[test]
    fn test_api_without_viewer_is_an_integration_error() {
        let mut manager: PageLayerManager<FakeViewer, CountingRenderer> =
            PageLayerManager::new(HighlighterConfig::default(), CountingRenderer::default())
                .unwrap();

        assert_eq!(
            manager.handle(ViewerEvent::Scroll, Instant::now()),
            Err(IntegrationError::ViewerNotAttached)
        );
        assert_eq!(
            manager.scroll_to_highlight(&highlight("h", 1), Instant::now()),
            Err(IntegrationError::ViewerNotAttached)
        );
        assert!(manager.remove_ghost_highlight().is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = HighlighterConfig::default().with_tip_padding(f64::NAN);
        assert!(PageLayerManager::<FakeViewer, CountingRenderer>::new(
            config,
            CountingRenderer::default()
        )
        .is_err());
    }

    #[test]
    fn test_every_mounted_page_is_rendered() {
        let mut manager = manager(3);
        manager.set_highlights(vec![highlight("a", 2), highlight("b", 2)]);

        let layers = &manager.renderer().layers;
        assert_eq!(layers.get(&1), Some(&0));
        assert_eq!(layers.get(&2), Some(&2));
        assert_eq!(layers.get(&3), Some(&0));
    }

    #[test]
    fn test_detached_page_is_rebound_when_remounted() {
        let mut manager = manager(2);
        let now = Instant::now();
        let original = *manager.binding(2).unwrap();

        let viewer = manager.viewer_mut().unwrap();
        viewer.mounted.remove(&2);
        viewer.detached.insert(original.text_layer);
        manager.handle(ViewerEvent::ScaleChanged, now).unwrap();
        assert!(manager.binding(2).is_none());

        let viewer = manager.viewer_mut().unwrap();
        viewer.mounted.insert(2);
        viewer.detached.clear();
        manager
            .handle(ViewerEvent::TextLayerRendered { page: 2 }, now)
            .unwrap();
        assert_eq!(manager.binding(2), Some(&original));
    }

    #[test]
    fn test_tip_is_measured_then_replaced() {
        let mut manager = manager(1);
        let position = ViewportPosition::new(
            PageRect::new(200.0, 300.0, 100.0, 12.0, 1),
            Vec::new(),
        );
        manager
            .set_tip(Some(Tip::new(position, "note".to_string())))
            .unwrap();

        // Unmeasured pass, then one pass with the measured size
        assert_eq!(manager.renderer().tips, 2);
        let placement = manager.tip_placement().unwrap();
        assert_eq!(placement.top, 300.0 - 40.0 - 5.0);
        assert_eq!(placement.left, 250.0 - 60.0);
    }

    #[test]
    fn test_highlight_tip_is_gated_by_edit_mode() {
        let mut manager = manager(1);
        let highlight = ViewportHighlight {
            id: Some(HighlightId::new("h")),
            content: Content::Text("h".into()),
            comment: None,
            position: ViewportPosition::new(PageRect::new(10.0, 300.0, 50.0, 12.0, 1), Vec::new()),
        };

        assert!(manager.toggle_edit_in_progress(None));
        assert!(!manager
            .show_highlight_tip(&highlight, "tip".to_string())
            .unwrap());

        assert!(!manager.toggle_edit_in_progress(Some(false)));
        assert!(manager
            .show_highlight_tip(&highlight, "tip".to_string())
            .unwrap());
        assert!(manager.current_tip().is_some());
    }

    #[test]
    fn test_resize_applies_scale_after_debounce() {
        let mut manager = manager(1);
        let start = Instant::now();

        manager.handle(ViewerEvent::Resized, start).unwrap();
        manager
            .handle(ViewerEvent::Resized, start + std::time::Duration::from_millis(300))
            .unwrap();
        manager
            .tick(start + std::time::Duration::from_millis(700))
            .unwrap();
        assert!(manager.viewer().unwrap().applied_scales.is_empty());

        manager
            .tick(start + std::time::Duration::from_millis(800))
            .unwrap();
        assert_eq!(manager.viewer().unwrap().applied_scales.len(), 1);
    }
}
