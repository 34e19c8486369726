//! In-memory viewer used by unit tests

use std::collections::BTreeSet;

use image::{Rgba, RgbaImage};
use pdf_highlighter_core::{PageNumber, PageViewport, PdfViewport, Rect, Rotation, ScaleValue};

use crate::raster::CanvasSnapshot;
use crate::viewer::{DocumentViewer, NodeId};

pub const PAGE_GAP: f64 = 10.0;

pub struct FakeViewer {
    pub pages: u32,
    pub scale: f64,
    pub scroll: (f64, f64),
    pub mounted: BTreeSet<PageNumber>,
    pub detached: BTreeSet<NodeId>,
    pub text_selection_enabled: bool,
    pub native_selection_cleared: u32,
    pub scroll_requests: Vec<(PageNumber, (f64, f64))>,
    pub applied_scales: Vec<ScaleValue>,
    raster: CanvasSnapshot,
}

impl FakeViewer {
    /// Letter-sized pages stacked vertically, all mounted
    pub fn new(pages: u32) -> Self {
        Self {
            pages,
            scale: 1.0,
            scroll: (0.0, 0.0),
            mounted: (1..=pages).collect(),
            detached: BTreeSet::new(),
            text_selection_enabled: true,
            native_selection_cleared: 0,
            scroll_requests: Vec::new(),
            applied_scales: Vec::new(),
            raster: CanvasSnapshot::new(
                RgbaImage::from_pixel(612, 792, Rgba([255, 255, 255, 255])),
                1.0,
            ),
        }
    }

    fn page_viewport(&self) -> PdfViewport {
        PdfViewport::letter(self.scale, Rotation::None)
    }
}

impl DocumentViewer for FakeViewer {
    type Viewport = PdfViewport;
    type Raster = CanvasSnapshot;

    fn page_count(&self) -> u32 {
        self.pages
    }

    fn viewport(&self, page: PageNumber) -> Option<PdfViewport> {
        (page >= 1 && page <= self.pages).then(|| self.page_viewport())
    }

    fn text_layer(&self, page: PageNumber) -> Option<NodeId> {
        self.mounted
            .contains(&page)
            .then_some(NodeId(u64::from(page)))
    }

    fn is_connected(&self, node: NodeId) -> bool {
        !self.detached.contains(&node)
    }

    fn find_or_create_highlight_layer(
        &mut self,
        page: PageNumber,
        _text_layer: NodeId,
    ) -> Option<NodeId> {
        Some(NodeId(1_000 + u64::from(page)))
    }

    fn page_box(&self, page: PageNumber) -> Option<Rect> {
        let viewport = self.viewport(page)?;
        let top = f64::from(page - 1) * (viewport.height() + PAGE_GAP);
        Some(Rect::new(0.0, top, viewport.width(), viewport.height()))
    }

    fn container_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn scroll_offset(&self) -> (f64, f64) {
        self.scroll
    }

    fn raster(&self, page: PageNumber) -> Option<&CanvasSnapshot> {
        (page >= 1 && page <= self.pages).then_some(&self.raster)
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
