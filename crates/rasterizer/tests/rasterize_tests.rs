//! Integration tests for mask rasterization on model grids.

use geo::{Contains, LineString, Point, Polygon};
use mask_common::{presets, GridSpec, RowOrder};
use rasterizer::rasterize_mask;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        vec![],
    )
}

// ============================================================================
// SHERPA Europe grid
// ============================================================================

#[test]
fn test_square_covers_exact_cell_block() {
    let grid = presets::sherpa_europe();
    // Cell edges of longitude index 100..105 and latitude index 50..52
    let square = rect(-5.05, 34.975, -4.55, 35.075);

    let mask = rasterize_mask([&square], &grid).unwrap();

    assert_eq!(mask.shape(), (771, 521));
    assert_eq!(mask.count_nonzero(), 10);
    for (row, col) in mask.nonzero_indices() {
        assert!((50..52).contains(&row), "row {} outside block", row);
        assert!((100..105).contains(&col), "col {} outside block", col);
    }
}

#[test]
fn test_geometry_outside_grid_is_ignored() {
    let grid = presets::sherpa_europe();
    let far_away = rect(-80.0, 10.0, -70.0, 20.0);
    let mask = rasterize_mask([&far_away], &grid).unwrap();
    assert_eq!(mask.count_nonzero(), 0);
}

#[test]
fn test_partially_outside_geometry_is_clipped() {
    let grid = GridSpec::new(10, 10, 1.0, 1.0, 0.0, 0.0, RowOrder::SouthToNorth).unwrap();
    let overhang = rect(-5.0, -5.0, 2.0, 2.0);
    let mask = rasterize_mask([&overhang], &grid).unwrap();
    assert_eq!(mask.count_nonzero(), 4);
}

#[test]
fn test_rasterization_is_deterministic() {
    let grid = presets::sherpa_europe();
    let polygons = vec![
        rect(-3.0, 50.0, 1.5, 53.0),
        rect(0.0, 52.0, 4.0, 55.0),
        rect(10.0, 45.0, 12.0, 46.0),
    ];
    let first = rasterize_mask(&polygons, &grid).unwrap();
    let second = rasterize_mask(polygons.iter().rev(), &grid).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Pixel-centre semantics
// ============================================================================

#[test]
fn test_hole_excluded() {
    let grid = GridSpec::new(10, 10, 1.0, 1.0, 0.0, 0.0, RowOrder::SouthToNorth).unwrap();
    let with_hole = Polygon::new(
        LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
        vec![LineString::from(vec![
            (3.0, 3.0),
            (7.0, 3.0),
            (7.0, 7.0),
            (3.0, 7.0),
            (3.0, 3.0),
        ])],
    );
    let mask = rasterize_mask([&with_hole], &grid).unwrap();
    assert_eq!(mask.count_nonzero(), 100 - 16);
    assert_eq!(mask.get(5, 5), Some(0));
    assert_eq!(mask.get(0, 0), Some(1));
}

#[test]
fn test_every_strictly_inside_centre_is_burned() {
    let grid = GridSpec::new(40, 30, 0.25, 0.2, -5.0, 48.0, RowOrder::SouthToNorth).unwrap();
    let triangle = Polygon::new(
        LineString::from(vec![(-4.3, 48.7), (3.1, 49.9), (-1.2, 53.6), (-4.3, 48.7)]),
        vec![],
    );
    let mask = rasterize_mask([&triangle], &grid).unwrap();

    let mut intersecting_upper_bound = 0;
    for row in 0..grid.ny {
        for col in 0..grid.nx {
            let centre = grid.pixel_center(col, row).unwrap();
            if triangle.contains(&Point::from(centre)) {
                assert_eq!(mask.get(row, col), Some(1), "centre ({}, {}) missed", col, row);
            }
            // Cells whose box overlaps the triangle's bbox
            let x0 = grid.origin_lon + col as f64 * grid.dx;
            let y0 = grid.origin_lat + row as f64 * grid.dy;
            if x0 + grid.dx > -4.3 && x0 < 3.1 && y0 + grid.dy > 48.7 && y0 < 53.6 {
                intersecting_upper_bound += 1;
            }
        }
    }
    assert!(mask.count_nonzero() > 0);
    assert!(mask.count_nonzero() <= intersecting_upper_bound);
}

#[test]
fn test_north_to_south_flips_rows() {
    let south_up = GridSpec::new(20, 16, 0.5, 0.5, 0.0, 40.0, RowOrder::SouthToNorth).unwrap();
    let north_up = GridSpec::new(20, 16, 0.5, 0.5, 0.0, 40.0, RowOrder::NorthToSouth).unwrap();
    let polygon = Polygon::new(
        LineString::from(vec![(1.2, 41.1), (7.7, 42.3), (4.4, 46.9), (1.2, 41.1)]),
        vec![],
    );

    let a = rasterize_mask([&polygon], &south_up).unwrap();
    let b = rasterize_mask([&polygon], &north_up).unwrap();

    assert_eq!(a.count_nonzero(), b.count_nonzero());
    for row in 0..16 {
        for col in 0..20 {
            assert_eq!(a.get(row, col), b.get(15 - row, col));
        }
    }
}
