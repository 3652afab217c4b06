//! Polygon rasterization onto regular lat/lon grids.
//!
//! [`rasterize_shapes`] is the general burn-list entry: `(polygon, value)`
//! pairs are burned in order onto a raster of a given shape, later shapes
//! overwriting earlier ones, and untouched pixels keep the `fill` value.
//! [`rasterize_mask`] burns a polygon set onto a [`GridSpec`] as a 0/1 mask.
//!
//! Geometries outside the raster are ignored; the result depends only on the
//! inputs.

pub mod error;
pub mod scanline;

use geo::{AffineTransform, Polygon};
use mask_common::{GridSpec, Mask};
use ndarray::Array2;
use tracing::debug;

pub use error::{RasterError, RasterResult};

/// Value burned for pixels inside the region.
pub const INSIDE: u8 = 1;

/// Background value of a mask.
pub const OUTSIDE: u8 = 0;

/// Burn `(polygon, value)` pairs onto a `(rows, cols)` raster.
///
/// `transform` maps pixel `(col, row)` to world coordinates of the pixel
/// origin, the same convention as [`GridSpec::transform`].
pub fn rasterize_shapes<'a, I>(
    shapes: I,
    shape: (usize, usize),
    transform: &AffineTransform<f64>,
    fill: u8,
) -> RasterResult<Array2<u8>>
where
    I: IntoIterator<Item = (&'a Polygon<f64>, u8)>,
{
    let (rows, cols) = shape;
    if rows == 0 || cols == 0 {
        return Err(RasterError::InvalidShape(shape));
    }
    let inverse = transform
        .inverse()
        .ok_or(RasterError::NonInvertibleTransform)?;

    let mut out = Array2::from_elem(shape, fill);
    let mut burned_shapes = 0usize;
    let mut burned_pixels = 0usize;

    for (polygon, value) in shapes {
        let rings = scanline::to_pixel_rings(polygon, &inverse);
        let written = scanline::fill_rings(&mut out, &rings, value);
        if written > 0 {
            burned_shapes += 1;
        }
        burned_pixels += written;
    }

    debug!(
        rows = rows,
        cols = cols,
        shapes = burned_shapes,
        pixels = burned_pixels,
        "Rasterized shapes"
    );
    Ok(out)
}

/// Rasterize polygons onto `grid`: 1 inside any polygon, 0 elsewhere.
pub fn rasterize_mask<'a, I>(polygons: I, grid: &GridSpec) -> RasterResult<Mask>
where
    I: IntoIterator<Item = &'a Polygon<f64>>,
{
    let shapes = polygons.into_iter().map(|p| (p, INSIDE));
    let values = rasterize_shapes(shapes, grid.shape(), &grid.transform(), OUTSIDE)?;
    Ok(Mask::from_array(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;
    use mask_common::RowOrder;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
            vec![],
        )
    }

    #[test]
    fn test_later_shapes_overwrite() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(2.0, 2.0, 4.0, 4.0);
        let out = rasterize_shapes(
            vec![(&a, 1), (&b, 2)],
            (4, 4),
            &AffineTransform::identity(),
            0,
        )
        .unwrap();

        assert_eq!(out[[0, 0]], 1);
        assert_eq!(out[[3, 3]], 2);
        assert_eq!(out.iter().filter(|v| **v == 2).count(), 4);
    }

    #[test]
    fn test_fill_value_for_untouched_pixels() {
        let out =
            rasterize_shapes(Vec::<(&Polygon<f64>, u8)>::new(), (2, 3), &AffineTransform::identity(), 9).unwrap();
        assert!(out.iter().all(|v| *v == 9));
    }

    #[test]
    fn test_invalid_inputs() {
        let t = AffineTransform::identity();
        assert!(matches!(
            rasterize_shapes(Vec::<(&Polygon<f64>, u8)>::new(), (0, 3), &t, 0),
            Err(RasterError::InvalidShape((0, 3)))
        ));

        let singular = AffineTransform::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        assert!(matches!(
            rasterize_shapes(Vec::<(&Polygon<f64>, u8)>::new(), (2, 2), &singular, 0),
            Err(RasterError::NonInvertibleTransform)
        ));
    }

    #[test]
    fn test_mask_on_grid_with_offset_origin() {
        let grid = GridSpec::new(10, 10, 1.0, 1.0, 100.0, -20.0, RowOrder::SouthToNorth).unwrap();
        let square = rect(102.0, -18.0, 104.0, -17.0);
        let mask = rasterize_mask([&square], &grid).unwrap();

        assert_eq!(mask.count_nonzero(), 2);
        assert_eq!(mask.get(2, 2), Some(1));
        assert_eq!(mask.get(2, 3), Some(1));
    }
}
