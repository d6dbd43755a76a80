mod area;
mod bbox;
mod parts;
mod proj;
mod sanitize;

use anyhow::Result;
use geo::MultiPolygon;

pub(crate) use bbox::BoundingBox;

pub use area::{multi_area, part_area, ring_area};
pub use parts::PolygonSet;
pub use proj::to_mercator;
pub use sanitize::sanitize;

/// Run the full geometry pipeline on a raw lon/lat geometry: sanitize into
/// simple parts, project to spherical Web-Mercator meters, and index the
/// parts for overlay queries.
///
/// Null or fully degenerate input produces an empty `PolygonSet`; callers
/// decide whether that is an error (it is for precincts, not for zones).
pub fn prepare_parts(geometry: &MultiPolygon<f64>) -> Result<PolygonSet> {
    let parts = sanitize(geometry);
    let projected = to_mercator(&parts)?;
    Ok(PolygonSet::new(projected))
}
