//! Common test fixtures for region-mask tests.
//!
//! GeoJSON documents are returned as strings so that tests exercise the same
//! parsing path as files read from disk.

use serde_json::{json, Value};

/// Common geographic extents, as `[west, east, south, north]`.
pub mod extents {
    /// United Kingdom, the default concentration map view
    pub const UK: [f64; 4] = [-8.5, 2.5, 49.5, 60.0];

    /// The SHERPA Europe grid domain
    pub const SHERPA_EUROPE: [f64; 4] = [-15.05, 36.95, 32.475, 70.975];
}

/// A closed ring from `(lon, lat)` corners of an axis-aligned rectangle.
pub fn rectangle_ring(west: f64, south: f64, east: f64, north: f64) -> Vec<[f64; 2]> {
    vec![
        [west, south],
        [east, south],
        [east, north],
        [west, north],
        [west, south],
    ]
}

/// A GeoJSON Feature with a single-ring polygon geometry.
pub fn polygon_feature(ring: &[[f64; 2]], properties: Value) -> Value {
    json!({
        "type": "Feature",
        "properties": properties,
        "geometry": { "type": "Polygon", "coordinates": [ring] }
    })
}

/// Wrap features into a FeatureCollection document.
pub fn feature_collection(features: Vec<Value>) -> String {
    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

/// Same as [`feature_collection`] with a legacy named `crs` member.
pub fn feature_collection_with_crs(features: Vec<Value>, crs_name: &str) -> String {
    json!({
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": crs_name } },
        "features": features
    })
    .to_string()
}

pub mod geojson {
    use super::*;

    /// A square covering exactly SHERPA Europe cells at longitude index
    /// 100..105 and latitude index 50..52 (10 cells).
    pub fn sherpa_square() -> String {
        let ring = rectangle_ring(-5.05, 34.975, -4.55, 35.075);
        feature_collection(vec![polygon_feature(&ring, json!({ "name": "square" }))])
    }

    /// A self-intersecting "bowtie" polygon over southern England.
    pub fn bowtie() -> String {
        let ring = vec![
            [-1.0, 50.0],
            [1.0, 52.0],
            [1.0, 50.0],
            [-1.0, 52.0],
            [-1.0, 50.0],
        ];
        feature_collection(vec![polygon_feature(&ring, json!({ "name": "bowtie" }))])
    }

    /// A 2 x 2 degree square whose ring loops back through itself, enclosing
    /// a 1 x 1 inner square and cutting off a 0.5 x 0.5 corner.
    pub fn notched_square() -> String {
        let ring = vec![
            [-1.0, 50.0],
            [1.0, 50.0],
            [1.0, 52.0],
            [-1.0, 52.0],
            [-1.0, 50.5],
            [0.5, 50.5],
            [0.5, 51.5],
            [-0.5, 51.5],
            [-0.5, 50.0],
            [-1.0, 50.0],
        ];
        feature_collection(vec![polygon_feature(&ring, json!({ "name": "notched" }))])
    }

    /// One MultiPolygon feature with two disjoint parts plus one Polygon feature.
    pub fn multipolygon_with_properties() -> String {
        let a = rectangle_ring(0.0, 50.0, 1.0, 51.0);
        let b = rectangle_ring(2.0, 50.0, 3.0, 51.0);
        let c = rectangle_ring(5.0, 45.0, 6.0, 46.0);
        feature_collection(vec![
            json!({
                "type": "Feature",
                "properties": { "name": "islands", "code": 7 },
                "geometry": { "type": "MultiPolygon", "coordinates": [[a], [b]] }
            }),
            polygon_feature(&c, json!({ "name": "alpine" })),
        ])
    }

    /// A null-geometry feature next to a valid square.
    pub fn with_null_geometry() -> String {
        let ring = rectangle_ring(10.0, 45.0, 11.0, 46.0);
        feature_collection(vec![
            json!({ "type": "Feature", "properties": { "name": "empty" }, "geometry": null }),
            polygon_feature(&ring, json!({ "name": "square" })),
        ])
    }

    /// A square with a square hole in the middle.
    pub fn square_with_hole() -> String {
        let shell = rectangle_ring(0.0, 40.0, 2.0, 42.0);
        let hole = rectangle_ring(0.5, 40.5, 1.5, 41.5);
        feature_collection(vec![json!({
            "type": "Feature",
            "properties": { "name": "ring" },
            "geometry": { "type": "Polygon", "coordinates": [shell, hole] }
        })])
    }

    /// A square in British National Grid metres around central London.
    pub fn bng_square() -> String {
        let ring = rectangle_ring(520_000.0, 170_000.0, 540_000.0, 190_000.0);
        feature_collection_with_crs(
            vec![polygon_feature(&ring, json!({ "name": "london" }))],
            "urn:ogc:def:crs:EPSG::27700",
        )
    }

    /// A document declaring a CRS with no known transformation (Lambert-93).
    pub fn unsupported_crs() -> String {
        let ring = rectangle_ring(600_000.0, 6_800_000.0, 700_000.0, 6_900_000.0);
        feature_collection_with_crs(
            vec![polygon_feature(&ring, json!({ "name": "paris" }))],
            "EPSG:2154",
        )
    }

    /// A degenerate polygon with zero area.
    pub fn zero_area() -> String {
        let ring = vec![[0.0, 50.0], [1.0, 50.0], [2.0, 50.0], [0.0, 50.0]];
        feature_collection(vec![polygon_feature(&ring, json!({ "name": "flat" }))])
    }

    /// Line features for coastline/border overlays across the UK extent.
    pub fn overlay_lines() -> String {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-6.0, 50.0], [-3.0, 55.0], [0.0, 58.0]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[-20.0, 40.0], [-18.0, 40.0], [-18.0, 42.0], [-20.0, 40.0]]]
                    }
                }
            ]
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_ring_is_closed() {
        let ring = rectangle_ring(0.0, 0.0, 1.0, 1.0);
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_fixtures_are_valid_json() {
        for doc in [
            geojson::sherpa_square(),
            geojson::bowtie(),
            geojson::multipolygon_with_properties(),
            geojson::with_null_geometry(),
            geojson::bng_square(),
        ] {
            let value: Value = serde_json::from_str(&doc).unwrap();
            assert_eq!(value["type"], "FeatureCollection");
        }
    }
}
