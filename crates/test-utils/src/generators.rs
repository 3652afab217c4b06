//! Test data generators for masks and concentration fields.
//!
//! All generators return row-major data with `rows` latitude rows of `cols`
//! longitude cells, matching the `(latitude, longitude)` array layout.

/// Creates a 0/1 mask with ones in the half-open block
/// `rows_range.0..rows_range.1` x `cols_range.0..cols_range.1`.
///
/// # Example
///
/// ```
/// use test_utils::create_block_mask;
///
/// let mask = create_block_mask(4, 5, (1, 3), (2, 4));
/// assert_eq!(mask.iter().filter(|&&v| v == 1).count(), 4);
/// assert_eq!(mask[1 * 5 + 2], 1);
/// ```
pub fn create_block_mask(
    rows: usize,
    cols: usize,
    rows_range: (usize, usize),
    cols_range: (usize, usize),
) -> Vec<u8> {
    let mut data = vec![0u8; rows * cols];
    for row in rows_range.0..rows_range.1.min(rows) {
        for col in cols_range.0..cols_range.1.min(cols) {
            data[row * cols + col] = 1;
        }
    }
    data
}

/// Creates a diverging field in roughly `[-amplitude, amplitude]`.
///
/// Negative in the south-west, positive in the north-east, similar to an
/// emission-reduction concentration delta.
pub fn create_delta_field(rows: usize, cols: usize, amplitude: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let x = col as f64 / (cols.max(2) - 1) as f64;
            let y = row as f64 / (rows.max(2) - 1) as f64;
            data.push(amplitude * (x + y - 1.0));
        }
    }
    data
}

/// Creates a strictly positive field increasing with the flat index.
pub fn create_positive_field(rows: usize, cols: usize) -> Vec<f64> {
    (0..rows * cols).map(|i| 1.0 + i as f64).collect()
}

/// Replaces every `stride`-th value with NaN (missing data).
pub fn with_missing_values(mut data: Vec<f64>, stride: usize) -> Vec<f64> {
    if stride == 0 {
        return data;
    }
    for value in data.iter_mut().step_by(stride) {
        *value = f64::NAN;
    }
    data
}

/// Evenly spaced axis `start + i * step`.
pub fn create_axis(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + i as f64 * step).collect()
}
