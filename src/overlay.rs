use anyhow::{Result, bail};
use geo::{BooleanOps, BoundingRect, Coord, Intersects};
use rstar::AABB;
use serde::Serialize;

use crate::aggregate::{ClassBucket, aggregate};
use crate::class::{Breaks, IndicatorClass};
use crate::geom::{PolygonSet, multi_area};

/// One zone of the active indicator layer: identifying code, raw indicator
/// value, and sanitized projected parts.
#[derive(Debug, Clone)]
pub struct ZoneFeature {
    pub code: String,
    pub value: f64,
    pub parts: PolygonSet,
}

/// Per-zone overlay outcome, ordered by descending share of the precinct.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub code: String,
    /// Raw indicator value (non-finite inputs are normalized to 0).
    pub value: f64,
    pub class: IndicatorClass,
    /// Intersection with the precinct, m².
    pub intersection_area: f64,
    /// The zone's own planar area, m².
    pub zone_area: f64,
    /// intersection_area / precinct area, in [0, 1].
    pub share_of_precinct: f64,
    /// intersection_area / zone_area, in [0, 1].
    pub share_of_zone: f64,
}

/// Everything the narrative builder and legend renderer need for one
/// (precinct, year, indicator) request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayResult {
    /// Precinct planar area, m². Always > 0 for a successful overlay.
    pub precinct_area: f64,
    pub zone_records: Vec<ZoneRecord>,
    pub class_buckets: Vec<ClassBucket>,
}

impl OverlayResult {
    /// Number of zones that meaningfully intersect the precinct.
    #[inline] pub fn intersect_count(&self) -> usize { self.zone_records.len() }
}

/// Area-weighted overlay of an indicator zone layer against a precinct.
///
/// For each zone, every (precinct part, zone part) pair is screened with the
/// precinct R-tree (bounding boxes), then an exact `Intersects` predicate,
/// and only then clipped; planar intersection areas accumulate per zone.
/// Zones whose accumulated area is <= 0 are dropped, which also absorbs
/// floating-point noise from near-tangent geometries. Failures local to one
/// pair are logged and contribute zero area; only a precinct that sanitized
/// to zero area fails the whole call, since shares would be undefined.
pub fn overlay(precinct: &PolygonSet, zones: &[ZoneFeature], breaks: &Breaks) -> Result<OverlayResult> {
    let precinct_area = precinct.area();
    if !precinct_area.is_finite() || precinct_area <= 0.0 {
        bail!("precinct sanitized to zero area; overlay shares are undefined");
    }

    let mut records = Vec::new();
    for zone in zones {
        let area = intersection_area(precinct, &zone.parts);
        if area <= 0.0 {
            continue;
        }

        let value = if zone.value.is_finite() {
            zone.value
        } else {
            log::debug!("zone {}: non-finite indicator value, treating as 0", zone.code);
            0.0
        };

        let zone_area = zone.parts.area();
        records.push(ZoneRecord {
            code: zone.code.clone(),
            value,
            class: breaks.classify(value),
            intersection_area: area,
            zone_area,
            share_of_precinct: area / precinct_area,
            share_of_zone: if zone_area > 0.0 { area / zone_area } else { 0.0 },
        });
    }

    records.sort_by(|a, b| b.share_of_precinct.total_cmp(&a.share_of_precinct));
    let class_buckets = aggregate(&records, precinct_area);

    Ok(OverlayResult { precinct_area, zone_records: records, class_buckets })
}

/// Accumulated planar intersection area over every (precinct part, zone part)
/// pair that survives the bbox prefilter and the intersection predicate.
fn intersection_area(precinct: &PolygonSet, zone: &PolygonSet) -> f64 {
    let mut total = 0.0;
    for zone_part in zone.parts() {
        let Some(rect) = zone_part.bounding_rect() else { continue };
        let envelope = AABB::from_corners(rect.min().into(), rect.max().into());

        for candidate in precinct.query(&envelope) {
            let precinct_part = &precinct.parts()[candidate.idx()];
            if !precinct_part.intersects(zone_part) {
                continue;
            }

            let area = multi_area(&precinct_part.intersection(zone_part));
            if area.is_finite() {
                total += area;
            } else {
                log::warn!("dropping non-finite intersection area for a part pair");
            }
        }
    }
    total
}

/// Find the zone whose geometry contains the (projected) point. Zone layers
/// tile the study region without overlap, so the first match wins.
pub fn zone_at_point<'a>(zones: &'a [ZoneFeature], point: Coord<f64>) -> Option<&'a ZoneFeature> {
    zones.iter().find(|zone| zone.parts.contains(point))
}
