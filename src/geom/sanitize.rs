use geo::orient::Direction;
use geo::{BooleanOps, MultiPolygon, Orient, Polygon};

use super::area::part_area;

/// Normalize an arbitrary Polygon/MultiPolygon into simple, non-degenerate
/// parts suitable for area and intersection arithmetic.
///
/// 1) Rewind rings to the canonical orientation (exterior CCW, holes CW).
/// 2) Union against an empty set: boolean-ops self-normalization dissolves
///    self-intersecting rings and overlapping sibling parts into simple
///    polygons covering the same total area. If the union collapses a
///    geometry that had area, fall back to the oriented input as-is.
/// 3) Flatten into constituent parts, holes preserved.
/// 4) Drop parts whose planar area is zero or non-finite.
///
/// Empty input yields an empty vector, never an error.
pub fn sanitize(geometry: &MultiPolygon<f64>) -> Vec<Polygon<f64>> {
    if geometry.0.is_empty() {
        return Vec::new();
    }

    let oriented = geometry.orient(Direction::Default);

    let unioned = oriented.union(&MultiPolygon::<f64>::new(Vec::new()));
    let cleaned = if unioned.0.is_empty() { oriented } else { unioned };

    cleaned.0.into_iter()
        .filter(|part| {
            let area = part_area(part);
            if !(area.is_finite() && area > 0.0) {
                log::debug!("discarding degenerate polygon part (area = {area})");
                return false;
            }
            true
        })
        .collect()
}
