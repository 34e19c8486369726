//! Conversion between normalized and viewport geometry
//!
//! Two conventions are supported:
//! - Ratio form (default): the rect is stored top-down in pixels together
//!   with the viewport size it was captured at, and rescaled by ratio.
//! - PDF form (`use_pdf_coordinates`): corners are PDF user-space points,
//!   and conversion delegates to the viewport's own transform so that
//!   rotation and zoom come from the viewer.
//!
//! For a single viewport snapshot `to_viewport(to_normalized(r)) == r` up to
//! floating point error, in both forms.

use crate::error::GeometryError;
use crate::geometry::{
    NormalizedPosition, NormalizedRect, PageNumber, PageRect, ViewportPosition,
};
use crate::viewport::PageViewport;

/// Convert a page-relative pixel rect to its normalized form
pub fn to_normalized<V: PageViewport + ?Sized>(
    rect: &PageRect,
    viewport: &V,
    use_pdf_coordinates: bool,
) -> NormalizedRect {
    let (x1, y1, x2, y2) = if use_pdf_coordinates {
        let (x1, y1) = viewport.convert_to_pdf_point(rect.left, rect.top);
        let (x2, y2) = viewport.convert_to_pdf_point(rect.right(), rect.bottom());
        (x1, y1, x2, y2)
    } else {
        (rect.left, rect.top, rect.right(), rect.bottom())
    };

    NormalizedRect {
        x1,
        y1,
        x2,
        y2,
        width: viewport.width(),
        height: viewport.height(),
        page_number: rect.page_number,
    }
}

/// Convert a normalized rect to pixels for the given viewport
///
/// In ratio form a zero reference extent cannot be rescaled and yields
/// `GeometryError::DegenerateExtent`.
pub fn to_viewport<V: PageViewport + ?Sized>(
    rect: &NormalizedRect,
    viewport: &V,
    use_pdf_coordinates: bool,
) -> Result<PageRect, GeometryError> {
    if use_pdf_coordinates {
        let [x1, y1, x2, y2] =
            viewport.convert_to_viewport_rectangle([rect.x1, rect.y1, rect.x2, rect.y2]);
        return Ok(PageRect::new(
            x1.min(x2),
            y1.min(y2),
            (x2 - x1).abs(),
            (y2 - y1).abs(),
            rect.page_number,
        ));
    }

    if rect.width == 0.0 || rect.height == 0.0 {
        return Err(GeometryError::DegenerateExtent(rect.page_number));
    }

    let x1 = viewport.width() * rect.x1 / rect.width;
    let y1 = viewport.height() * rect.y1 / rect.height;
    let x2 = viewport.width() * rect.x2 / rect.width;
    let y2 = viewport.height() * rect.y2 / rect.height;

    Ok(PageRect::new(x1, y1, x2 - x1, y2 - y1, rect.page_number))
}

/// Normalize a whole viewport position
///
/// Each rect is converted with the viewport of its own page; `viewport_for`
/// returns `None` for pages the viewer has not laid out yet.
pub fn position_to_normalized<'a, V, F>(
    position: &ViewportPosition,
    viewport_for: F,
    use_pdf_coordinates: bool,
) -> Result<NormalizedPosition, GeometryError>
where
    V: PageViewport + ?Sized + 'a,
    F: Fn(PageNumber) -> Option<&'a V>,
{
    let convert = |rect: &PageRect| {
        viewport_for(rect.page_number)
            .map(|viewport| to_normalized(rect, viewport, use_pdf_coordinates))
            .ok_or(GeometryError::PageNotReady(rect.page_number))
    };

    Ok(NormalizedPosition {
        bounding_rect: convert(&position.bounding_rect)?,
        rects: position
            .rects
            .iter()
            .map(convert)
            .collect::<Result<_, _>>()?,
        use_pdf_coordinates: Some(use_pdf_coordinates),
    })
}

/// Convert a stored position to pixels, honouring its stored coordinate flag
pub fn position_to_viewport<'a, V, F>(
    position: &NormalizedPosition,
    viewport_for: F,
) -> Result<ViewportPosition, GeometryError>
where
    V: PageViewport + ?Sized + 'a,
    F: Fn(PageNumber) -> Option<&'a V>,
{
    let use_pdf_coordinates = position.uses_pdf_coordinates();
    let convert = |rect: &NormalizedRect| {
        let viewport =
            viewport_for(rect.page_number).ok_or(GeometryError::PageNotReady(rect.page_number))?;
        to_viewport(rect, viewport, use_pdf_coordinates)
    };

    Ok(ViewportPosition {
        bounding_rect: convert(&position.bounding_rect)?,
        rects: position
            .rects
            .iter()
            .map(convert)
            .collect::<Result<_, _>>()?,
    })
}
