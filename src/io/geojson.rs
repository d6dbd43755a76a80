use anyhow::{Result, anyhow, bail};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use crate::geom::{PolygonSet, prepare_parts};
use crate::overlay::ZoneFeature;

/// Parse a GeoJSON Polygon or MultiPolygon geometry object into a
/// MultiPolygon. Coordinates are [lon, lat] in WGS84 degrees (standard
/// GeoJSON convention; no alternate CRS support).
pub fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let coords = geometry["coordinates"].as_array()
        .ok_or_else(|| anyhow!("geometry has no coordinates array"))?;

    match geometry["type"].as_str() {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon_coords(coords)?])),
        Some("MultiPolygon") => {
            let polygons = coords.iter()
                .map(|rings| rings.as_array()
                    .ok_or_else(|| anyhow!("MultiPolygon member is not a ring array"))
                    .and_then(|rings| parse_polygon_coords(rings)))
                .collect::<Result<Vec<_>>>()?;
            Ok(MultiPolygon(polygons))
        }
        other => bail!("unsupported geometry type: {other:?}"),
    }
}

/// Parse one polygon's ring set: rings[0] is the exterior, the rest holes.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior = rings.first()
        .and_then(|ring| ring.as_array())
        .ok_or_else(|| anyhow!("polygon has no exterior ring"))?;

    let mut interiors = Vec::new();
    for ring in &rings[1..] {
        if let Some(ring_array) = ring.as_array() {
            interiors.push(parse_ring_coords(ring_array)?);
        }
    }

    Ok(Polygon::new(parse_ring_coords(exterior)?, interiors))
}

/// Parse a ring from GeoJSON coordinates: [[x, y], [x, y], ...]
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for pair in coords {
        if let Some(pair) = pair.as_array() {
            if pair.len() >= 2 {
                let x = pair[0].as_f64()
                    .ok_or_else(|| anyhow!("invalid coordinate: x must be a number"))?;
                let y = pair[1].as_f64()
                    .ok_or_else(|| anyhow!("invalid coordinate: y must be a number"))?;
                points.push(Coord { x, y });
            }
        }
    }

    // Ensure the ring is closed (first point == last point).
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

/// Select every feature in the precinct collection whose `properties.name`
/// matches, merge their parts, and run the full geometry pipeline on the
/// result. Precinct boundaries occasionally ship as several features per
/// name; the self-union inside `sanitize` dissolves them into one cover.
pub fn precinct_from_features(collection: &Value, name: &str) -> Result<PolygonSet> {
    let features = collection["features"].as_array()
        .ok_or_else(|| anyhow!("not a FeatureCollection: missing features array"))?;

    let mut polygons = Vec::new();
    for feature in features {
        if feature["properties"]["name"].as_str() != Some(name) {
            continue;
        }
        match parse_geometry(&feature["geometry"]) {
            Ok(mp) => polygons.extend(mp.0),
            Err(err) => log::warn!("skipping unreadable geometry for precinct {name}: {err}"),
        }
    }

    if polygons.is_empty() {
        bail!("precinct {name} not found in collection");
    }
    prepare_parts(&MultiPolygon(polygons))
}

/// Extract {code, value, parts} zone triples from an indicator layer.
/// Features with no usable geometry are skipped; a missing or non-numeric
/// indicator value becomes 0.0 (absent data, not an error).
pub fn zones_from_features(collection: &Value, code_prop: &str, value_prop: &str) -> Result<Vec<ZoneFeature>> {
    let features = collection["features"].as_array()
        .ok_or_else(|| anyhow!("not a FeatureCollection: missing features array"))?;

    let mut zones = Vec::with_capacity(features.len());
    for feature in features {
        let properties = &feature["properties"];
        let code = property_string(&properties[code_prop]);

        let geometry = &feature["geometry"];
        if geometry.is_null() {
            continue;
        }
        let parsed = match parse_geometry(geometry) {
            Ok(mp) => mp,
            Err(err) => {
                log::debug!("skipping zone {code}: unreadable geometry: {err}");
                continue;
            }
        };
        let parts = match prepare_parts(&parsed) {
            Ok(parts) if !parts.is_empty() => parts,
            Ok(_) => {
                log::debug!("skipping zone {code}: no usable geometry after sanitization");
                continue;
            }
            Err(err) => {
                log::warn!("skipping zone {code}: projection failed: {err}");
                continue;
            }
        };

        zones.push(ZoneFeature {
            code,
            value: property_number(&properties[value_prop]),
            parts,
        });
    }

    Ok(zones)
}

/// Zone codes arrive as strings or bare numbers depending on the dataset.
fn property_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Indicator values arrive as numbers or numeric strings; anything else
/// (null, missing, text) counts as 0.
fn property_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;
    use crate::geom::multi_area;

    #[test]
    fn parses_a_polygon_with_a_hole() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                [[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [3.0, 1.0], [1.0, 1.0]],
            ],
        });
        let mp = parse_geometry(&geometry).unwrap();
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
        assert_relative_eq!(multi_area(&mp), 12.0);
    }

    #[test]
    fn parses_a_multipolygon() {
        let geometry = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]],
                [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 6.0], [5.0, 5.0]]],
            ],
        });
        let mp = parse_geometry(&geometry).unwrap();
        assert_eq!(mp.0.len(), 2);
        assert_relative_eq!(multi_area(&mp), 2.0);
    }

    #[test]
    fn closes_an_unclosed_ring() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
        });
        let mp = parse_geometry(&geometry).unwrap();
        let ring = mp.0[0].exterior();
        assert_eq!(ring.0.first(), ring.0.last());
    }

    #[test]
    fn rejects_non_areal_geometry() {
        let geometry = json!({ "type": "Point", "coordinates": [1.0, 2.0] });
        assert!(parse_geometry(&geometry).is_err());
    }

    #[test]
    fn extracts_zone_triples_with_value_coercion() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [0.01, 0.0], [0.01, 0.01], [0.0, 0.01], [0.0, 0.0]]],
                    },
                    "properties": { "SA1_CODE_2": "20601110101", "LUM_21": 0.42 },
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.02, 0.0], [0.03, 0.0], [0.03, 0.01], [0.02, 0.01], [0.02, 0.0]]],
                    },
                    "properties": { "SA1_CODE_2": 20601110102i64, "LUM_21": "0.7" },
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.04, 0.0], [0.05, 0.0], [0.05, 0.01], [0.04, 0.01], [0.04, 0.0]]],
                    },
                    "properties": { "SA1_CODE_2": "20601110103" },
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": { "SA1_CODE_2": "20601110104", "LUM_21": 0.9 },
                },
            ],
        });

        let zones = zones_from_features(&collection, "SA1_CODE_2", "LUM_21").unwrap();
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[0].code, "20601110101");
        assert_relative_eq!(zones[0].value, 0.42);
        assert_eq!(zones[1].code, "20601110102");
        assert_relative_eq!(zones[1].value, 0.7);
        // Missing value column counts as 0, not an error.
        assert_relative_eq!(zones[2].value, 0.0);
    }

    #[test]
    fn precinct_lookup_merges_same_named_features() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [0.01, 0.0], [0.01, 0.01], [0.0, 0.01], [0.0, 0.0]]],
                    },
                    "properties": { "name": "North" },
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.05, 0.0], [0.06, 0.0], [0.06, 0.01], [0.05, 0.01], [0.05, 0.0]]],
                    },
                    "properties": { "name": "North" },
                },
            ],
        });

        let precinct = precinct_from_features(&collection, "North").unwrap();
        assert_eq!(precinct.len(), 2);
        assert!(precinct.area() > 0.0);
    }

    #[test]
    fn missing_precinct_is_an_error() {
        let collection = json!({ "type": "FeatureCollection", "features": [] });
        assert!(precinct_from_features(&collection, "South").is_err());
    }
}
