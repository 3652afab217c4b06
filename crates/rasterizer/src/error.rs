//! Error types for rasterization.

use thiserror::Error;

/// Result type for rasterizer operations.
pub type RasterResult<T> = Result<T, RasterError>;

#[derive(Error, Debug)]
pub enum RasterError {
    /// Output raster has a zero-length axis
    #[error("invalid output shape {0:?}")]
    InvalidShape((usize, usize)),

    /// Pixel-to-world transform has no inverse
    #[error("affine transform is not invertible")]
    NonInvertibleTransform,
}
