use serde::Serialize;

use crate::class::IndicatorClass;
use crate::overlay::ZoneRecord;

/// Per-class rollup of zone records for one precinct + indicator + year.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassBucket {
    pub class: IndicatorClass,
    /// Fraction of the precinct's area covered by member zones, in [0, 1].
    pub area_share: f64,
    /// Number of zones classified into this bucket.
    pub zone_count: usize,
}

/// Group zone records by class, summing intersection area and counting
/// members per class. Classes with zero share are dropped; buckets come
/// back sorted by descending area share.
///
/// For a valid overlay the shares total at most 1 (+ float tolerance);
/// anything beyond that means intersection area was double-counted upstream.
pub fn aggregate(records: &[ZoneRecord], precinct_area: f64) -> Vec<ClassBucket> {
    let mut areas = [0.0f64; IndicatorClass::COUNT];
    let mut counts = [0usize; IndicatorClass::COUNT];

    for record in records {
        areas[record.class.index()] += record.intersection_area;
        counts[record.class.index()] += 1;
    }

    let mut buckets: Vec<ClassBucket> = (0..IndicatorClass::COUNT)
        .filter(|&i| areas[i] > 0.0)
        .map(|i| ClassBucket {
            class: IndicatorClass::from_index(i),
            area_share: areas[i] / precinct_area,
            zone_count: counts[i],
        })
        .collect();

    buckets.sort_by(|a, b| b.area_share.total_cmp(&a.area_share));
    buckets
}
