//! Splitting highlights into per-page buckets
//!
//! A highlight that spans pages is rendered once per page it touches. Each
//! page gets a shallow copy whose `rects` are filtered to that page; the
//! bounding rect is left untouched so the home page stays identifiable.

use std::collections::BTreeMap;

use crate::geometry::PageNumber;
use crate::highlight::HasPosition;

/// Group highlights by every page they touch
///
/// The home page (`bounding_rect.page_number`) always gets an entry, even
/// when none of the rects are on it. Input order is preserved within each
/// bucket.
pub fn group_by_page<T: HasPosition>(highlights: &[T]) -> BTreeMap<PageNumber, Vec<T>> {
    let mut buckets: BTreeMap<PageNumber, Vec<T>> = BTreeMap::new();

    for highlight in highlights {
        for page in highlight.position().pages() {
            let projected = highlight.with_position(highlight.position().project_onto(page));
            buckets.entry(page).or_default().push(projected);
        }
    }

    buckets
}
