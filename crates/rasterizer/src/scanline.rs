//! Scanline polygon fill with pixel-centre sampling.
//!
//! Polygons are first mapped into pixel space with the inverse of the grid's
//! affine transform. A pixel `(col, row)` is inside when its centre
//! `(col + 0.5, row + 0.5)` is inside the polygon under the even-odd rule,
//! so holes are excluded. Edges are half-open: a centre exactly on a left or
//! bottom edge is inside, on a right or top edge outside.

use geo::{AffineTransform, Coord, Polygon};
use ndarray::Array2;

/// A polygon ring in pixel coordinates.
type PixelRing = Vec<Coord<f64>>;

/// Map every ring of `polygon` into pixel space.
pub fn to_pixel_rings(polygon: &Polygon<f64>, inverse: &AffineTransform<f64>) -> Vec<PixelRing> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.coords().map(|c| inverse.apply(*c)).collect())
        .collect()
}

/// Burn `value` into every pixel of `out` whose centre lies inside `rings`.
///
/// Returns the number of pixels written.
pub fn fill_rings(out: &mut Array2<u8>, rings: &[PixelRing], value: u8) -> usize {
    let (height, width) = out.dim();

    let (min_y, max_y) = rings
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.y), hi.max(c.y))
        });
    if !(min_y.is_finite() && max_y.is_finite()) {
        return 0;
    }

    // Rows whose centre satisfies min_y <= row + 0.5 < max_y
    let first_row = first_index(min_y, height);
    let end_row = first_index(max_y, height);

    let mut crossings: Vec<f64> = Vec::new();
    let mut written = 0;

    for row in first_row..end_row {
        let y = row as f64 + 0.5;

        crossings.clear();
        for ring in rings {
            for edge in ring.windows(2) {
                let (a, b) = (edge[0], edge[1]);
                if (a.y <= y) != (b.y <= y) {
                    crossings.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
        }
        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            let start = first_index(span[0], width);
            let end = first_index(span[1], width);
            for col in start..end {
                out[[row, col]] = value;
            }
            written += end.saturating_sub(start);
        }
    }

    written
}

/// First pixel index whose centre is at or beyond `coord`, clamped to `0..=len`.
fn first_index(coord: f64, len: usize) -> usize {
    let index = (coord - 0.5).ceil();
    if index <= 0.0 {
        0
    } else if index >= len as f64 {
        len
    } else {
        index as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;

    fn unit_grid_inverse() -> AffineTransform<f64> {
        AffineTransform::identity()
    }

    #[test]
    fn test_first_index() {
        assert_eq!(first_index(0.5, 10), 0);
        assert_eq!(first_index(0.51, 10), 1);
        assert_eq!(first_index(-3.0, 10), 0);
        assert_eq!(first_index(42.0, 10), 10);
        assert_eq!(first_index(3.0, 10), 3);
    }

    #[test]
    fn test_square_fill() {
        let square = Polygon::new(
            LineString::from(vec![(1.0, 2.0), (4.0, 2.0), (4.0, 3.0), (1.0, 3.0), (1.0, 2.0)]),
            vec![],
        );
        let mut out = Array2::<u8>::zeros((5, 5));
        let written = fill_rings(&mut out, &to_pixel_rings(&square, &unit_grid_inverse()), 1);

        assert_eq!(written, 3);
        assert_eq!(out[[2, 1]], 1);
        assert_eq!(out[[2, 3]], 1);
        assert_eq!(out[[2, 4]], 0);
        assert_eq!(out[[3, 1]], 0);
    }

    #[test]
    fn test_centre_on_edges_is_half_open() {
        // Left edge through centres of column 1, right edge through centres of column 3
        let square = Polygon::new(
            LineString::from(vec![(1.5, 0.5), (3.5, 0.5), (3.5, 2.5), (1.5, 2.5), (1.5, 0.5)]),
            vec![],
        );
        let mut out = Array2::<u8>::zeros((4, 5));
        fill_rings(&mut out, &to_pixel_rings(&square, &unit_grid_inverse()), 1);

        // Rows 0 and 1 (bottom edge inclusive, top exclusive), columns 1 and 2
        assert_eq!(out.sum(), 4);
        assert_eq!(out[[0, 1]], 1);
        assert_eq!(out[[1, 2]], 1);
        assert_eq!(out[[0, 3]], 0);
        assert_eq!(out[[2, 1]], 0);
    }
}
