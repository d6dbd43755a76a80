use anyhow::{Context, Result, anyhow};
use geo::{Coord, MapCoords, Polygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};

/// Source CRS: geographic lon/lat on the authalic sphere (degrees → radians
/// handled in code). Web-Mercator takes geodetic latitudes as spherical
/// directly, so both CRSs sit on the same sphere and no datum shift applies.
const LONLAT_PROJ4: &str = "+proj=longlat +a=6378137 +b=6378137 +no_defs +type=crs";

/// Target CRS: spherical Web-Mercator on the equatorial radius R = 6378137 m,
/// i.e. x = R·λ, y = R·ln(tan(π/4 + φ/2)).
const MERCATOR_PROJ4: &str =
    "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs";

/// Reproject polygon parts from lon/lat degrees to spherical Web-Mercator
/// meters, coordinate-wise. Ring and hole structure is preserved.
///
/// The frame is locally planar: adequate for area and intersection work at
/// urban scale, with the usual Mercator distortion growing toward the poles.
pub fn to_mercator(parts: &[Polygon<f64>]) -> Result<Vec<Polygon<f64>>> {
    let from = Proj4::from_proj_string(LONLAT_PROJ4)
        .with_context(|| anyhow!("failed to build source PROJ.4: {LONLAT_PROJ4}"))?;
    let to = Proj4::from_proj_string(MERCATOR_PROJ4)
        .with_context(|| anyhow!("failed to build target PROJ.4: {MERCATOR_PROJ4}"))?;

    parts.iter()
        .map(|part| part.try_map_coords(|coord: Coord<f64>| {
            // Map coords → radians in, meters out.
            let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
            transform(&from, &to, &mut point)
                .map_err(|err| anyhow!("CRS transform failed at ({}, {}): {err}", coord.x, coord.y))?;
            Ok(Coord { x: point.0, y: point.1 })
        }))
        .collect()
}
