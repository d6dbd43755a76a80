use geo::{BoundingRect, Centroid, Contains, Coord, Point, Polygon, Rect};
use rstar::{AABB, RTree};

use super::area::part_area;
use super::bbox::BoundingBox;

/// A sanitized collection of simple polygon parts with an R-tree over part
/// bounding boxes, used for both the precinct boundary and each zone.
///
/// Parts are expected to come out of `sanitize` (simple, non-zero area) and
/// `to_mercator` (projected meters); nothing enforces that here, but area
/// figures are only meaningful in the projected frame.
#[derive(Debug, Clone)]
pub struct PolygonSet {
    parts: Vec<Polygon<f64>>,
    rtree: RTree<BoundingBox>,
}

impl PolygonSet {
    /// Construct a PolygonSet, indexing each part's bounding box.
    pub fn new(parts: Vec<Polygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                parts.iter().enumerate()
                    .filter_map(|(i, part)| part.bounding_rect().map(|bbox| BoundingBox::new(i, bbox)))
                    .collect(),
            ),
            parts,
        }
    }

    #[inline] pub fn len(&self) -> usize { self.parts.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.parts.is_empty() }

    #[inline] pub fn parts(&self) -> &[Polygon<f64>] { &self.parts }

    /// Total planar area of all parts (m² once projected).
    pub fn area(&self) -> f64 {
        self.parts.iter().map(part_area).sum()
    }

    /// Query the R-tree for part bounding boxes intersecting the envelope.
    #[inline]
    pub(crate) fn query(&self, envelope: &AABB<[f64; 2]>) -> impl Iterator<Item = &BoundingBox> {
        self.rtree.locate_in_envelope_intersecting(envelope)
    }

    /// Compute the bounding rectangle of all parts.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.parts.iter()
            .filter_map(|part| part.bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }

    /// Area-weighted centroid across all parts.
    pub fn centroid(&self) -> Option<Point<f64>> {
        let total = self.area();
        if !(total > 0.0) {
            return None;
        }
        let (mut x, mut y) = (0.0, 0.0);
        for part in &self.parts {
            let centroid = part.centroid()?;
            let weight = part_area(part);
            x += centroid.x() * weight;
            y += centroid.y() * weight;
        }
        Some(Point::new(x / total, y / total))
    }

    /// Test whether any part contains the point (bbox prefilter + ray cast).
    pub fn contains(&self, point: Coord<f64>) -> bool {
        let envelope = AABB::from_point([point.x, point.y]);
        self.query(&envelope)
            .any(|bb| self.parts[bb.idx()].contains(&Point::new(point.x, point.y)))
    }
}
