//! Page viewport transforms
//!
//! A viewport maps PDF user space (origin bottom-left, units of 1/72 inch)
//! onto the rendered page in pixels (origin top-left). The document viewer
//! owns the real viewport objects; `PageViewport` is the slice of behaviour
//! the highlighter relies on. `PdfViewport` implements the standard affine
//! transform for a view box, a zoom factor and a quarter-turn rotation.

/// Read-only view of one page's current viewport
pub trait PageViewport {
    /// Rendered width in pixels
    fn width(&self) -> f64;

    /// Rendered height in pixels
    fn height(&self) -> f64;

    /// Convert a pixel position on the page to PDF user space
    fn convert_to_pdf_point(&self, x: f64, y: f64) -> (f64, f64);

    /// Convert a PDF user space point to a pixel position on the page
    fn convert_to_viewport_point(&self, x: f64, y: f64) -> (f64, f64);

    /// Convert the corners `[x1, y1, x2, y2]` of a PDF rectangle to pixel space
    ///
    /// The result is not normalized: corners may come back swapped.
    fn convert_to_viewport_rectangle(&self, rect: [f64; 4]) -> [f64; 4] {
        let (x1, y1) = self.convert_to_viewport_point(rect[0], rect[1]);
        let (x2, y2) = self.convert_to_viewport_point(rect[2], rect[3]);
        [x1, y1, x2, y2]
    }
}

/// Page rotation in quarter turns, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Parse a rotation in degrees. Anything but a multiple of 90 is rejected.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Clockwise90),
            180 => Some(Rotation::Clockwise180),
            270 => Some(Rotation::Clockwise270),
            _ => None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Unit rotation matrix `(a, b, c, d)` including the y-axis flip
    fn matrix(self) -> (f64, f64, f64, f64) {
        match self {
            Rotation::None => (1.0, 0.0, 0.0, -1.0),
            Rotation::Clockwise90 => (0.0, 1.0, 1.0, 0.0),
            Rotation::Clockwise180 => (-1.0, 0.0, 0.0, 1.0),
            Rotation::Clockwise270 => (0.0, -1.0, -1.0, 0.0),
        }
    }
}

/// Affine viewport for a page view box at a given scale and rotation
#[derive(Debug, Clone, PartialEq)]
pub struct PdfViewport {
    view_box: [f64; 4],
    scale: f64,
    rotation: Rotation,
    transform: [f64; 6],
    width: f64,
    height: f64,
}

impl PdfViewport {
    /// Create a viewport for `view_box` (`[x0, y0, x1, y1]` in PDF units)
    pub fn new(view_box: [f64; 4], scale: f64, rotation: Rotation) -> Self {
        let center_x = (view_box[2] + view_box[0]) / 2.0;
        let center_y = (view_box[3] + view_box[1]) / 2.0;
        let (a, b, c, d) = rotation.matrix();

        let (offset_x, offset_y, width, height) = if a == 0.0 {
            (
                (center_y - view_box[1]).abs() * scale,
                (center_x - view_box[0]).abs() * scale,
                (view_box[3] - view_box[1]).abs() * scale,
                (view_box[2] - view_box[0]).abs() * scale,
            )
        } else {
            (
                (center_x - view_box[0]).abs() * scale,
                (center_y - view_box[1]).abs() * scale,
                (view_box[2] - view_box[0]).abs() * scale,
                (view_box[3] - view_box[1]).abs() * scale,
            )
        };

        let transform = [
            a * scale,
            b * scale,
            c * scale,
            d * scale,
            offset_x - a * scale * center_x - c * scale * center_y,
            offset_y - b * scale * center_x - d * scale * center_y,
        ];

        Self {
            view_box,
            scale,
            rotation,
            transform,
            width,
            height,
        }
    }

    /// US Letter page at the given scale, handy for hosts and tests
    pub fn letter(scale: f64, rotation: Rotation) -> Self {
        Self::new([0.0, 0.0, 612.0, 792.0], scale, rotation)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn view_box(&self) -> [f64; 4] {
        self.view_box
    }

    /// Same page at a different zoom
    pub fn with_scale(&self, scale: f64) -> Self {
        Self::new(self.view_box, scale, self.rotation)
    }
}

impl PageViewport for PdfViewport {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn convert_to_pdf_point(&self, x: f64, y: f64) -> (f64, f64) {
        let t = &self.transform;
        let det = t[0] * t[3] - t[1] * t[2];
        (
            (x * t[3] - y * t[2] + t[2] * t[5] - t[4] * t[3]) / det,
            (-x * t[1] + y * t[0] + t[4] * t[1] - t[5] * t[0]) / det,
        )
    }

    fn convert_to_viewport_point(&self, x: f64, y: f64) -> (f64, f64) {
        let t = &self.transform;
        (x * t[0] + y * t[2] + t[4], x * t[1] + y * t[3] + t[5])
    }
}
