#![doc = "Area-weighted precinct/zone overlay engine for urban indicator dashboards"]
mod aggregate;
mod class;
mod geom;
mod indicator;
mod io;
mod overlay;

#[doc(inline)]
pub use aggregate::{ClassBucket, aggregate};

#[doc(inline)]
pub use class::{Breaks, IndicatorClass};

#[doc(inline)]
pub use geom::{PolygonSet, multi_area, part_area, prepare_parts, ring_area, sanitize, to_mercator};

#[doc(inline)]
pub use indicator::{BreakPolicy, Indicator, SpatialUnit};

#[doc(inline)]
pub use io::geojson::{parse_geometry, precinct_from_features, zones_from_features};

#[doc(inline)]
pub use overlay::{OverlayResult, ZoneFeature, ZoneRecord, overlay, zone_at_point};
