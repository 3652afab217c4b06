//! Integration tests for boundary loading.

use boundary_loader::{
    is_valid, load_boundaries, load_boundaries_str, write_geojson, BoundaryError,
};
use geo::Area;
use mask_common::Crs;
use test_utils::fixtures::geojson as fixtures;
use test_utils::{assert_approx_eq, temp_test_dir, write_test_file};

// ============================================================================
// Repair and explosion
// ============================================================================

#[test]
fn test_bowtie_is_repaired_not_dropped() {
    let set = load_boundaries_str(&fixtures::bowtie()).unwrap();

    assert!(!set.is_empty(), "bowtie must survive repair");
    assert!(set.polygons().all(is_valid));
    assert_eq!(set.report().dropped_invalid, 0);
    assert_eq!(set.report().repaired, 1);

    // Two triangles of 1 x 2 degrees / 2 each
    let area: f64 = set.polygons().map(|p| p.unsigned_area()).sum();
    assert_approx_eq!(area, 2.0, 1e-6);
}

#[test]
fn test_ring_looping_through_itself_is_kept() {
    let set = load_boundaries_str(&fixtures::notched_square()).unwrap();

    assert!(!set.is_empty());
    assert!(set.polygons().all(is_valid));
    assert_eq!(set.report().dropped_invalid, 0);
    assert_eq!(set.report().repaired, 1);

    // 4 square degrees less the inner square and the cut-off corner
    let area: f64 = set.polygons().map(|p| p.unsigned_area()).sum();
    assert_approx_eq!(area, 2.75, 1e-6);
}

#[test]
fn test_multipolygon_exploded_with_properties() {
    let set = load_boundaries_str(&fixtures::multipolygon_with_properties()).unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(set.report().exploded_parts, 2);

    let islands: Vec<_> = set
        .features()
        .iter()
        .filter(|f| f.properties["name"] == "islands")
        .collect();
    assert_eq!(islands.len(), 2);
    assert!(islands.iter().all(|f| f.source_index == 0));
    assert!(islands.iter().all(|f| f.properties["code"] == 7));

    assert_eq!(set.features()[2].properties["name"], "alpine");
    assert_eq!(set.features()[2].source_index, 1);
}

#[test]
fn test_null_geometry_is_filtered() {
    let set = load_boundaries_str(&fixtures::with_null_geometry()).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.report().features, 2);
    assert_eq!(set.report().null_geometries, 1);
    assert_eq!(set.features()[0].source_index, 1);
}

#[test]
fn test_zero_area_polygon_dropped() {
    let set = load_boundaries_str(&fixtures::zero_area()).unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_hole_is_kept() {
    let set = load_boundaries_str(&fixtures::square_with_hole()).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.features()[0].geometry.interiors().len(), 1);
    assert_approx_eq!(set.features()[0].geometry.unsigned_area(), 3.0, 1e-12);
}

#[test]
fn test_loading_is_idempotent() {
    let doc = fixtures::bowtie();
    let first = load_boundaries_str(&doc).unwrap();
    let second = load_boundaries_str(&doc).unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(first.features(), second.features());
    assert_eq!(first.report(), second.report());
}

// ============================================================================
// CRS handling
// ============================================================================

#[test]
fn test_missing_crs_assumes_wgs84() {
    let set = load_boundaries_str(&fixtures::sherpa_square()).unwrap();
    assert_eq!(set.source_crs(), Crs::WGS84);

    let bbox = set.bbox().unwrap();
    assert_approx_eq!(bbox.min_x, -5.05, 1e-12);
    assert_approx_eq!(bbox.max_y, 35.075, 1e-12);
}

#[test]
fn test_british_national_grid_reprojected() {
    let set = load_boundaries_str(&fixtures::bng_square()).unwrap();
    assert_eq!(set.source_crs(), Crs::from_epsg(27700));
    assert_eq!(set.crs(), Crs::WGS84);

    // 520-540 km E, 170-190 km N is central London
    let bbox = set.bbox().unwrap();
    assert!(bbox.min_x > -0.5 && bbox.max_x < 0.2, "{:?}", bbox);
    assert!(bbox.min_y > 51.3 && bbox.max_y < 51.7, "{:?}", bbox);
}

#[test]
fn test_unsupported_crs_fails() {
    let err = load_boundaries_str(&fixtures::unsupported_crs()).unwrap_err();
    assert!(matches!(err, BoundaryError::Projection(_)), "{:?}", err);
}

// ============================================================================
// I/O
// ============================================================================

#[test]
fn test_unparseable_file_fails() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "broken.geojson", "{ not json");
    assert!(matches!(load_boundaries(&path), Err(BoundaryError::Parse(_))));
}

#[test]
fn test_missing_file_fails() {
    let dir = temp_test_dir();
    let err = load_boundaries(dir.path().join("absent.geojson")).unwrap_err();
    assert!(matches!(err, BoundaryError::Io { .. }));
}

#[test]
fn test_cleaned_export_reloads() {
    let dir = temp_test_dir();
    let set = load_boundaries_str(&fixtures::multipolygon_with_properties()).unwrap();
    let path = dir.path().join("cleaned.geojson");
    write_geojson(&set, &path).unwrap();

    let reloaded = load_boundaries(&path).unwrap();
    assert_eq!(reloaded.len(), set.len());
    assert_eq!(reloaded.report().repaired, 0);
    assert_eq!(reloaded.features()[1].properties["source_index"], 0);
}
