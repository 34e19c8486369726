//! Capturing rendered page regions as PNG data URLs
//!
//! Area highlights store a snapshot of the dragged region. The region is
//! given in page pixels; the backing canvas may be denser than that by the
//! device pixel ratio, so the crop is scaled back down to page pixels.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::imageops::{self, FilterType};
use image::RgbaImage;

use pdf_highlighter_core::Rect;

/// Prefix of every snapshot produced here
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Rendered pixels of one page
pub trait RasterSurface {
    /// Backing pixels per page pixel
    fn device_pixel_ratio(&self) -> f64;

    /// Full backing image of the page
    fn pixels(&self) -> &RgbaImage;
}

/// Errors that can occur while taking a snapshot
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("region {0:?} does not overlap the page raster")]
    EmptyRegion(Rect),
    #[error("page raster is unavailable")]
    RasterUnavailable,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// A rendered page held in memory
#[derive(Debug, Clone)]
pub struct CanvasSnapshot {
    image: RgbaImage,
    device_pixel_ratio: f64,
}

impl CanvasSnapshot {
    pub fn new(image: RgbaImage, device_pixel_ratio: f64) -> Self {
        Self {
            image,
            device_pixel_ratio,
        }
    }
}

impl RasterSurface for CanvasSnapshot {
    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn pixels(&self) -> &RgbaImage {
        &self.image
    }
}

/// Capture `rect` (page pixels) as a `data:image/png;base64,...` URL
///
/// Only the part of `rect` that overlaps the raster is copied; the rest of
/// the output stays transparent, so pixels keep their position when the
/// region hangs over a page edge. The output image is `rect.width` x
/// `rect.height` pixels regardless of the device pixel ratio.
pub fn screenshot<S: RasterSurface + ?Sized>(
    surface: &S,
    rect: &Rect,
) -> Result<String, ScreenshotError> {
    let pixels = surface.pixels();
    let ratio = surface.device_pixel_ratio();

    let left = (rect.left * ratio).round() as i64;
    let top = (rect.top * ratio).round() as i64;
    let width = (rect.width * ratio).round() as u32;
    let height = (rect.height * ratio).round() as u32;

    let target_width = rect.width.round() as u32;
    let target_height = rect.height.round() as u32;

    if width == 0 || height == 0 || target_width == 0 || target_height == 0 {
        return Err(ScreenshotError::EmptyRegion(*rect));
    }

    let (raster_width, raster_height) = (i64::from(pixels.width()), i64::from(pixels.height()));
    let src_left = left.clamp(0, raster_width);
    let src_top = top.clamp(0, raster_height);
    let src_right = (left + i64::from(width)).clamp(0, raster_width);
    let src_bottom = (top + i64::from(height)).clamp(0, raster_height);

    if src_right <= src_left || src_bottom <= src_top {
        return Err(ScreenshotError::EmptyRegion(*rect));
    }

    let visible = imageops::crop_imm(
        pixels,
        src_left as u32,
        src_top as u32,
        (src_right - src_left) as u32,
        (src_bottom - src_top) as u32,
    )
    .to_image();

    let region = if visible.dimensions() == (width, height) {
        visible
    } else {
        let mut canvas = RgbaImage::new(width, height);
        imageops::replace(&mut canvas, &visible, src_left - left, src_top - top);
        canvas
    };

    let scaled = if (width, height) == (target_width, target_height) {
        region
    } else {
        imageops::resize(&region, target_width, target_height, FilterType::Triangle)
    };

    let mut png_bytes = Vec::new();
    scaled.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)?;

    Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(&png_bytes)))
}
