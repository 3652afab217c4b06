//! Nearest-cell mesh drawing of lat/lon fields.
//!
//! Every figure pixel inside the plot area takes the colour of the grid cell
//! whose centre is nearest along each axis. Cell edges sit halfway between
//! neighbouring coordinates and the outer cells extend half a spacing past
//! the first and last coordinate. Pixels outside the field, or over NaN
//! cells, keep the background.

use mask_common::LabeledArray;
use rayon::prelude::*;

use crate::colormap::Colormap;
use crate::figure::Figure;
use crate::scale::ValueScale;
use crate::viewport::Viewport;

/// Index of the cell containing `value` on a monotonic coordinate axis.
pub fn nearest_index(axis: &[f64], value: f64) -> Option<usize> {
    if value.is_nan() {
        return None;
    }
    match axis.len() {
        0 => None,
        1 => Some(0),
        n => {
            let ascending = axis[n - 1] >= axis[0];
            // Position along an ascending view of the axis
            let key = |i: usize| if ascending { axis[i] } else { -axis[i] };
            let v = if ascending { value } else { -value };

            let first_half = (key(1) - key(0)) / 2.0;
            let last_half = (key(n - 1) - key(n - 2)) / 2.0;
            if v < key(0) - first_half || v > key(n - 1) + last_half {
                return None;
            }

            // First index whose coordinate is >= v
            let (mut lo, mut hi) = (0, n);
            while lo < hi {
                let mid = (lo + hi) / 2;
                if key(mid) < v {
                    lo = mid + 1;
                } else {
                    hi = mid;
                }
            }
            let upper = lo;
            Some(match upper {
                0 => 0,
                u if u >= n => n - 1,
                u => {
                    if v - key(u - 1) <= key(u) - v {
                        u - 1
                    } else {
                        u
                    }
                }
            })
        }
    }
}

/// Draw `field` into the figure through `viewport`.
///
/// Returns the number of figure pixels coloured.
pub fn draw_mesh(
    figure: &mut Figure,
    viewport: &Viewport,
    field: &LabeledArray<f64>,
    colormap: &Colormap,
    scale: &ValueScale,
) -> usize {
    let area = viewport.area;
    let columns: Vec<Option<usize>> = (area.x..area.right())
        .map(|px| nearest_index(field.longitude(), viewport.x_to_lon(px)))
        .collect();
    let rows: Vec<Option<usize>> = (area.y..area.bottom())
        .map(|py| nearest_index(field.latitude(), viewport.y_to_lat(py)))
        .collect();

    let values = field.values();
    let stride = figure.width() as usize * 4;
    let x0 = area.x as usize;

    let buffer: &mut [u8] = figure.image_mut();
    buffer
        .par_chunks_mut(stride)
        .skip(area.y as usize)
        .take(rows.len())
        .zip(rows.par_iter())
        .map(|(line, row)| {
            let Some(row) = *row else {
                return 0;
            };
            let mut painted = 0;
            for (i, col) in columns.iter().enumerate() {
                let Some(col) = *col else { continue };
                let Some(t) = scale.normalize(values[[row, col]]) else {
                    continue;
                };
                let c = colormap.color_at(t);
                let offset = (x0 + i) * 4;
                line[offset..offset + 4].copy_from_slice(&[c.r, c.g, c.b, c.a]);
                painted += 1;
            }
            painted
        })
        .sum()
}
