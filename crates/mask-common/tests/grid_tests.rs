//! Tests for grid declaration, affine mapping and labeled arrays.

use mask_common::grid::{presets, GridSpec, RowOrder};
use mask_common::{BoundingBox, LabeledArray, Mask};
use ndarray::Array2;
use test_utils::fixtures::extents;
use test_utils::{assert_approx_eq, assert_coords_approx_eq};

// ============================================================================
// Grid declaration
// ============================================================================

#[test]
fn test_axes_are_deterministic() {
    let a = presets::sherpa_europe();
    let b = presets::sherpa_europe();
    assert_eq!(a.longitudes(), b.longitudes());
    assert_eq!(a.latitudes(), b.latitudes());
}

#[test]
fn test_axes_evenly_spaced() {
    let grid = presets::sherpa_europe();
    let lon = grid.longitudes();
    for pair in lon.windows(2) {
        assert_approx_eq!(pair[1] - pair[0], 0.1, 1e-9);
    }
    let lat = grid.latitudes();
    for pair in lat.windows(2) {
        assert_approx_eq!(pair[1] - pair[0], 0.05, 1e-9);
    }
}

#[test]
fn test_sherpa_axes_span_domain() {
    let grid = presets::sherpa_europe();
    let [west, east, south, north] = extents::SHERPA_EUROPE;
    let lon = grid.longitudes();
    let lat = grid.latitudes();
    assert_approx_eq!(lon[0], west, 1e-12);
    assert_approx_eq!(lon[lon.len() - 1], east, 1e-9);
    assert_approx_eq!(lat[0], south, 1e-12);
    assert_approx_eq!(lat[lat.len() - 1], north, 1e-9);
}

#[test]
fn test_custom_region_grid() {
    let grid = GridSpec::from_extent(-8.0, 2.0, 0.5, 50.0, 60.0, 0.25, RowOrder::SouthToNorth)
        .unwrap();
    assert_eq!(grid.nx, 21);
    assert_eq!(grid.ny, 41);
    assert_eq!(grid.shape(), (41, 21));
    assert_eq!(grid.len(), 41 * 21);
}

#[test]
fn test_grid_bbox_covers_cells() {
    let grid = GridSpec::new(10, 5, 1.0, 2.0, -5.0, 40.0, RowOrder::SouthToNorth).unwrap();
    assert_eq!(grid.bbox(), BoundingBox::new(-5.0, 40.0, 5.0, 50.0));
}

// ============================================================================
// Pixel mapping
// ============================================================================

#[test]
fn test_pixel_center_roundtrip() {
    let grid = presets::sherpa_europe();
    for &(col, row) in &[(0, 0), (100, 50), (520, 770), (260, 385)] {
        let c = grid.pixel_center(col, row).unwrap();
        assert_eq!(grid.coord_to_index(c.x, c.y), Some((col, row)));
    }
    assert!(grid.pixel_center(521, 0).is_none());
}

#[test]
fn test_first_pixel_center() {
    let grid = presets::sherpa_europe();
    let c = grid.pixel_center(0, 0).unwrap();
    assert_coords_approx_eq!((c.x, c.y), (-15.0, 32.5), 1e-9);
}

#[test]
fn test_north_to_south_transform_flips_rows() {
    let grid = GridSpec::new(3, 4, 1.0, 1.0, 0.0, 0.0, RowOrder::NorthToSouth).unwrap();
    let top = grid.pixel_center(0, 0).unwrap();
    let bottom = grid.pixel_center(0, 3).unwrap();
    assert_approx_eq!(top.y, 3.5, 1e-12);
    assert_approx_eq!(bottom.y, 0.5, 1e-12);
}

// ============================================================================
// Labeled arrays
// ============================================================================

#[test]
fn test_from_mask_binds_grid_axes() {
    let grid = GridSpec::new(5, 8, 1.0, 1.0, 0.0, 0.0, RowOrder::SouthToNorth).unwrap();
    let mask = Mask::zeros(grid.shape());
    let labeled = LabeledArray::from_mask("AREA", &grid, &mask).unwrap();

    assert_eq!(labeled.name(), "AREA");
    assert_eq!(labeled.latitude(), grid.latitudes().as_slice());
    assert_eq!(labeled.longitude(), grid.longitudes().as_slice());
    assert_eq!(labeled.shape(), (8, 5));
}

#[test]
fn test_to_f64_preserves_values() {
    let values = Array2::from_shape_vec((2, 2), vec![0u8, 1, 1, 0]).unwrap();
    let labeled = LabeledArray::new("AREA", vec![1.0, 2.0], vec![3.0, 4.0], values).unwrap();
    let as_f64 = labeled.to_f64();
    assert_eq!(as_f64.values()[[0, 1]], 1.0);
    assert_eq!(as_f64.values()[[1, 1]], 0.0);
    assert_eq!(as_f64.latitude(), labeled.latitude());
}
