#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use image::{Rgba, RgbaImage};
use pdf_highlighter_core::{
    Comment, Content, Highlight, HighlightId, HighlighterConfig, NormalizedPosition,
    NormalizedRect, PageNumber, PageViewport, PdfViewport, Rect, Rotation, ScaleValue,
    ViewportPosition,
};
use pdf_highlighter_ui::{
    CanvasSnapshot, DocumentViewer, HighlightContext, HighlightRenderer, HostNotification,
    Modifiers, NodeId, PageBinding, PageLayerManager, PointerEvent, PointerTarget, Tip,
    TipPlacement, TipSize, ViewerEvent,
};

/// Vertical gap between stacked pages
pub const PAGE_GAP: f64 = 10.0;

/// Viewer with letter-sized pages stacked top to bottom
pub struct FakeViewer {
    pub pages: u32,
    pub scale: f64,
    pub scroll: (f64, f64),
    /// Mount generation per page; absent means unloaded
    pub mounted: BTreeMap<PageNumber, u64>,
    pub text_selection_enabled: bool,
    pub native_selection_cleared: u32,
    pub scroll_requests: Vec<(PageNumber, (f64, f64))>,
    pub applied_scales: Vec<ScaleValue>,
    raster: CanvasSnapshot,
}

impl FakeViewer {
    pub fn new(pages: u32) -> Self {
        let mut image = RgbaImage::from_pixel(612, 792, Rgba([255, 255, 255, 255]));
        for x in 100..250 {
            for y in 100..180 {
                image.put_pixel(x, y, Rgba([200, 30, 30, 255]));
            }
        }

        Self {
            pages,
            scale: 1.0,
            scroll: (0.0, 0.0),
            mounted: (1..=pages).map(|page| (page, 0)).collect(),
            text_selection_enabled: true,
            native_selection_cleared: 0,
            scroll_requests: Vec::new(),
            applied_scales: Vec::new(),
            raster: CanvasSnapshot::new(image, 1.0),
        }
    }

    pub fn unload(&mut self, page: PageNumber) {
        self.mounted.remove(&page);
    }

    pub fn reload(&mut self, page: PageNumber, generation: u64) {
        self.mounted.insert(page, generation);
    }

    fn text_layer_id(page: PageNumber, generation: u64) -> NodeId {
        NodeId(u64::from(page) * 1_000 + generation)
    }

    fn page_top(&self, page: PageNumber) -> f64 {
        f64::from(page - 1) * (792.0 * self.scale + PAGE_GAP)
    }
}

impl DocumentViewer for FakeViewer {
    type Viewport = PdfViewport;
    type Raster = CanvasSnapshot;

    fn page_count(&self) -> u32 {
        self.pages
    }

    fn viewport(&self, page: PageNumber) -> Option<PdfViewport> {
        (1..=self.pages)
            .contains(&page)
            .then(|| PdfViewport::letter(self.scale, Rotation::None))
    }

    fn text_layer(&self, page: PageNumber) -> Option<NodeId> {
        self.mounted
            .get(&page)
            .map(|&generation| Self::text_layer_id(page, generation))
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let page = (node.0 / 1_000) as PageNumber;
        let generation = node.0 % 1_000;
        self.mounted.get(&page) == Some(&generation)
    }

    fn find_or_create_highlight_layer(
        &mut self,
        _page: PageNumber,
        text_layer: NodeId,
    ) -> Option<NodeId> {
        // The highlight layer lives inside the text layer
        Some(text_layer)
    }

    fn page_box(&self, page: PageNumber) -> Option<Rect> {
        let viewport = self.viewport(page)?;
        Some(Rect::new(
            0.0,
            self.page_top(page),
            viewport.width(),
            viewport.height(),
        ))
    }

    fn container_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn scroll_offset(&self) -> (f64, f64) {
        self.scroll
    }

    fn raster(&self, page: PageNumber) -> Option<&CanvasSnapshot> {
        self.mounted.contains_key(&page).then_some(&self.raster)
    }

    fn scroll_page_into_view(&mut self, page: PageNumber, dest: (f64, f64)) {
        self.scroll_requests.push((page, dest));
    }

    fn set_current_scale(&mut self, scale: ScaleValue) {
        self.applied_scales.push(scale);
    }

    fn set_text_selection_enabled(&mut self, enabled: bool) {
        self.text_selection_enabled = enabled;
    }

    fn clear_native_selection(&mut self) {
        self.native_selection_cleared += 1;
    }
}

/// What the renderer saw for one highlight
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub id: Option<HighlightId>,
    pub position: ViewportPosition,
    pub is_scrolled_to: bool,
    pub normalized_bounds: NormalizedRect,
    pub screenshot_available: bool,
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub layers: BTreeMap<PageNumber, Vec<Rendered>>,
    pub layer_targets: BTreeSet<NodeId>,
    pub tip_size: Option<TipSize>,
    pub tip_renders: Vec<TipPlacement>,
    pub tips_hidden: usize,
}

impl HighlightRenderer for RecordingRenderer {
    type TipContent = String;

    fn render_layer(&mut self, binding: &PageBinding, highlights: &[HighlightContext<'_>]) {
        self.layer_targets.insert(binding.render_target);
        let rendered = highlights
            .iter()
            .map(|context| Rendered {
                id: context.highlight.id.clone(),
                position: context.highlight.position.clone(),
                is_scrolled_to: context.is_scrolled_to,
                normalized_bounds: context
                    .viewport_to_normalized(&context.highlight.position.bounding_rect),
                screenshot_available: context
                    .screenshot(&context.highlight.position.bounding_rect)
                    .is_ok(),
            })
            .collect();
        self.layers.insert(binding.page_number, rendered);
    }

    fn render_tip(&mut self, _tip: &Tip<String>, placement: &TipPlacement) -> Option<TipSize> {
        self.tip_renders.push(*placement);
        self.tip_size
    }

    fn hide_tip(&mut self) {
        self.tips_hidden += 1;
    }
}

pub type Manager = PageLayerManager<FakeViewer, RecordingRenderer>;

pub fn manager(pages: u32) -> Manager {
    manager_with(pages, HighlighterConfig::default())
}

pub fn manager_with(pages: u32, config: HighlighterConfig) -> Manager {
    let mut manager = PageLayerManager::new(config, RecordingRenderer::default())
        .expect("default config is valid");
    manager.set_area_selection(Some(Box::new(|event: &PointerEvent| event.modifiers.alt)));
    manager.attach_viewer(FakeViewer::new(pages));
    manager
        .handle(ViewerEvent::PagesInitialized, Instant::now())
        .expect("viewer attached");
    manager
}

pub fn pointer(x: f64, y: f64, target: PointerTarget) -> PointerEvent {
    PointerEvent::new(x, y, target)
}

pub fn alt_pointer(x: f64, y: f64, target: PointerTarget) -> PointerEvent {
    PointerEvent::new(x, y, target).with_modifiers(Modifiers {
        alt: true,
        ..Modifiers::default()
    })
}

/// Stored text highlight covering `(left, top)-(right, bottom)` at scale 1
pub fn text_highlight(id: &str, page: PageNumber, left: f64, top: f64, right: f64, bottom: f64) -> Highlight {
    let rect = NormalizedRect {
        x1: left,
        y1: top,
        x2: right,
        y2: bottom,
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

pub fn selection_finished(notifications: &[HostNotification]) -> Option<&pdf_highlighter_ui::PendingSelection> {
    notifications.iter().find_map(|notification| match notification {
        HostNotification::SelectionFinished(pending) => Some(pending),
        _ => None,
    })
}
