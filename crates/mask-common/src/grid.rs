//! Regular longitude/latitude grids and their affine pixel mapping.
//!
//! A grid is declared by its origin (the smallest longitude and latitude
//! coordinate values), a positive step along each axis and the number of
//! points on each axis. Coordinate values are computed as `origin + i * step`
//! so that two grids declared from the same constants always produce
//! bit-identical axes.
//!
//! The affine transform maps a pixel position `(col, row)` to the geographic
//! coordinate of the pixel's origin corner. With [`RowOrder::SouthToNorth`]
//! the y-scale is positive and row 0 is the southernmost row, which keeps
//! mask row `j` aligned with `latitudes()[j]`.

use geo::{AffineTransform, Coord};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::BoundingBox;

/// Orientation of mask rows relative to latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    /// Row 0 holds the minimum latitude; the latitude axis is ascending.
    #[default]
    SouthToNorth,
    /// Row 0 holds the maximum latitude; the latitude axis is descending.
    NorthToSouth,
}

/// Specification of a regular lat/lon grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of points in X (longitude) direction
    pub nx: usize,
    /// Number of points in Y (latitude) direction
    pub ny: usize,
    /// Longitude step in degrees
    pub dx: f64,
    /// Latitude step in degrees
    pub dy: f64,
    /// Smallest longitude coordinate value
    pub origin_lon: f64,
    /// Smallest latitude coordinate value
    pub origin_lat: f64,
    #[serde(default)]
    pub row_order: RowOrder,
}

impl GridSpec {
    /// Create a new grid specification.
    pub fn new(
        nx: usize,
        ny: usize,
        dx: f64,
        dy: f64,
        origin_lon: f64,
        origin_lat: f64,
        row_order: RowOrder,
    ) -> GridResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(GridError::InvalidDimension(format!(
                "grid must have at least one point per axis, got {}x{}",
                nx, ny
            )));
        }
        if !(dx.is_finite() && dx > 0.0 && dy.is_finite() && dy > 0.0) {
            return Err(GridError::InvalidStep(format!(
                "steps must be positive and finite, got dx={} dy={}",
                dx, dy
            )));
        }
        if !(origin_lon.is_finite() && origin_lat.is_finite()) {
            return Err(GridError::InvalidExtent(format!(
                "origin must be finite, got ({}, {})",
                origin_lon, origin_lat
            )));
        }

        Ok(Self {
            nx,
            ny,
            dx,
            dy,
            origin_lon,
            origin_lat,
            row_order,
        })
    }

    /// Create a grid covering `[min_lon, max_lon] x [min_lat, max_lat]`, both
    /// ends inclusive.
    pub fn from_extent(
        min_lon: f64,
        max_lon: f64,
        dx: f64,
        min_lat: f64,
        max_lat: f64,
        dy: f64,
        row_order: RowOrder,
    ) -> GridResult<Self> {
        if !(max_lon >= min_lon && max_lat >= min_lat) {
            return Err(GridError::InvalidExtent(format!(
                "lon [{}, {}] lat [{}, {}] is not ordered",
                min_lon, max_lon, min_lat, max_lat
            )));
        }
        if !(dx > 0.0 && dy > 0.0) {
            return Err(GridError::InvalidStep(format!(
                "steps must be positive, got dx={} dy={}",
                dx, dy
            )));
        }

        let nx = ((max_lon - min_lon) / dx).round() as usize + 1;
        let ny = ((max_lat - min_lat) / dy).round() as usize + 1;

        Self::new(nx, ny, dx, dy, min_lon, min_lat, row_order)
    }

    /// Longitude coordinate values, ascending.
    pub fn longitudes(&self) -> Vec<f64> {
        (0..self.nx)
            .map(|i| self.origin_lon + i as f64 * self.dx)
            .collect()
    }

    /// Latitude coordinate values in mask row order.
    pub fn latitudes(&self) -> Vec<f64> {
        let ascending = (0..self.ny).map(|j| self.origin_lat + j as f64 * self.dy);
        match self.row_order {
            RowOrder::SouthToNorth => ascending.collect(),
            RowOrder::NorthToSouth => {
                let mut values: Vec<f64> = ascending.collect();
                values.reverse();
                values
            }
        }
    }

    /// Mask shape as `(rows, cols)` = `(latitudes, longitudes)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Affine transform from pixel `(col, row)` to `(lon, lat)` of the pixel origin.
    pub fn transform(&self) -> AffineTransform<f64> {
        match self.row_order {
            RowOrder::SouthToNorth => {
                AffineTransform::new(self.dx, 0.0, self.origin_lon, 0.0, self.dy, self.origin_lat)
            }
            RowOrder::NorthToSouth => AffineTransform::new(
                self.dx,
                0.0,
                self.origin_lon,
                0.0,
                -self.dy,
                self.origin_lat + self.ny as f64 * self.dy,
            ),
        }
    }

    /// Geographic coordinate of the centre of pixel `(col, row)`.
    pub fn pixel_center(&self, col: usize, row: usize) -> Option<Coord<f64>> {
        if col >= self.nx || row >= self.ny {
            return None;
        }
        Some(self.transform().apply(Coord {
            x: col as f64 + 0.5,
            y: row as f64 + 0.5,
        }))
    }

    /// Pixel `(col, row)` whose cell contains the given coordinate.
    pub fn coord_to_index(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        let col = ((lon - self.origin_lon) / self.dx).floor();
        let row_from_south = ((lat - self.origin_lat) / self.dy).floor();

        if col < 0.0 || row_from_south < 0.0 {
            return None;
        }
        let col = col as usize;
        let row_from_south = row_from_south as usize;
        if col >= self.nx || row_from_south >= self.ny {
            return None;
        }

        let row = match self.row_order {
            RowOrder::SouthToNorth => row_from_south,
            RowOrder::NorthToSouth => self.ny - 1 - row_from_south,
        };
        Some((col, row))
    }

    /// Geographic extent covered by the grid's cells.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(
            self.origin_lon,
            self.origin_lat,
            self.origin_lon + self.nx as f64 * self.dx,
            self.origin_lat + self.ny as f64 * self.dy,
        )
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }
}

/// Grid definitions for known model domains.
pub mod presets {
    use super::*;

    /// SHERPA Europe-wide emission grid: 0.1° x 0.05°,
    /// longitude -15.05..36.95, latitude 32.475..70.975.
    pub fn sherpa_europe() -> GridSpec {
        GridSpec {
            nx: 521,
            ny: 771,
            dx: 0.1,
            dy: 0.05,
            origin_lon: -15.05,
            origin_lat: 32.475,
            row_order: RowOrder::SouthToNorth,
        }
    }

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Option<GridSpec> {
        match name.to_lowercase().as_str() {
            "sherpa_europe" | "sherpa-europe" | "europe" => Some(sherpa_europe()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sherpa_axes() {
        let grid = presets::sherpa_europe();
        let lon = grid.longitudes();
        let lat = grid.latitudes();

        assert_eq!(lon.len(), 521);
        assert_eq!(lat.len(), 771);
        assert_eq!(lon[0], -15.05);
        assert_eq!(lat[0], 32.475);
        assert!((lon[520] - 36.95).abs() < 1e-9);
        assert!((lat[770] - 70.975).abs() < 1e-9);
        assert_eq!(grid.shape(), (771, 521));
    }

    #[test]
    fn test_from_extent_matches_preset() {
        let grid = GridSpec::from_extent(
            -15.05,
            36.95,
            0.1,
            32.475,
            70.975,
            0.05,
            RowOrder::SouthToNorth,
        )
        .unwrap();
        assert_eq!(grid, presets::sherpa_europe());
    }

    #[test]
    fn test_transform_origin_and_scale() {
        let grid = presets::sherpa_europe();
        let t = grid.transform();

        let origin = t.apply(Coord { x: 0.0, y: 0.0 });
        assert!((origin.x + 15.05).abs() < 1e-12);
        assert!((origin.y - 32.475).abs() < 1e-12);

        let p = t.apply(Coord { x: 10.0, y: 20.0 });
        assert!((p.x - (-15.05 + 1.0)).abs() < 1e-9);
        assert!((p.y - (32.475 + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_row_order_alignment() {
        let south_up = GridSpec::new(4, 3, 1.0, 1.0, 0.0, 10.0, RowOrder::SouthToNorth).unwrap();
        let north_up = GridSpec::new(4, 3, 1.0, 1.0, 0.0, 10.0, RowOrder::NorthToSouth).unwrap();

        assert_eq!(south_up.latitudes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(north_up.latitudes(), vec![12.0, 11.0, 10.0]);

        // Row 0 centre sits half a step above the row's latitude value in both orders.
        let c = south_up.pixel_center(0, 0).unwrap();
        assert!((c.y - 10.5).abs() < 1e-12);
        let c = north_up.pixel_center(0, 0).unwrap();
        assert!((c.y - 12.5).abs() < 1e-12);

        assert_eq!(south_up.coord_to_index(1.5, 10.2), Some((1, 0)));
        assert_eq!(north_up.coord_to_index(1.5, 10.2), Some((1, 2)));
        assert_eq!(north_up.coord_to_index(-0.5, 10.2), None);
    }

    #[test]
    fn test_invalid_grids() {
        assert!(GridSpec::new(0, 3, 1.0, 1.0, 0.0, 0.0, RowOrder::SouthToNorth).is_err());
        assert!(GridSpec::new(3, 3, -1.0, 1.0, 0.0, 0.0, RowOrder::SouthToNorth).is_err());
        assert!(
            GridSpec::from_extent(10.0, 0.0, 1.0, 0.0, 1.0, 1.0, RowOrder::SouthToNorth).is_err()
        );
    }

    #[test]
    fn test_preset_lookup() {
        assert!(presets::by_name("SHERPA-Europe").is_some());
        assert!(presets::by_name("conus").is_none());
    }
}
