use geo::{LineString, MultiPolygon, Polygon};

/// Signed planar shoelace area of a closed ring (positive for CCW winding).
pub fn ring_area(ring: &LineString<f64>) -> f64 {
    let mut a = 0.0;
    for w in ring.0.windows(2) {
        a += w[0].x * w[1].y - w[1].x * w[0].y;
    }
    a / 2.0
}

/// Planar area of a single polygon part: |outer| minus the sum of |holes|.
/// A hole set larger than its outer ring means broken input; clamp to zero
/// so the part gets discarded rather than subtracting from a running total.
pub fn part_area(part: &Polygon<f64>) -> f64 {
    let outer = ring_area(part.exterior()).abs();
    let holes: f64 = part.interiors().iter().map(|ring| ring_area(ring).abs()).sum();
    (outer - holes).max(0.0)
}

/// Total planar area of a MultiPolygon, part by part.
pub fn multi_area(mp: &MultiPolygon<f64>) -> f64 {
    mp.0.iter().map(part_area).sum()
}
