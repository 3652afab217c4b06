//! 2D arrays indexed by named latitude/longitude coordinate axes.

use ndarray::Array2;

use crate::error::{GridError, GridResult};
use crate::{BoundingBox, GridSpec, Mask};

/// A named 2D variable with shape `(latitude.len(), longitude.len())`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray<T> {
    name: String,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    values: Array2<T>,
}

impl<T> LabeledArray<T> {
    /// Bind values to coordinate axes, rejecting mismatched shapes.
    pub fn new(
        name: impl Into<String>,
        latitude: Vec<f64>,
        longitude: Vec<f64>,
        values: Array2<T>,
    ) -> GridResult<Self> {
        let expected = (latitude.len(), longitude.len());
        let actual = values.dim();
        if expected != actual {
            return Err(GridError::ShapeMismatch { expected, actual });
        }

        Ok(Self {
            name: name.into(),
            latitude,
            longitude,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> &[f64] {
        &self.latitude
    }

    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    pub fn values(&self) -> &Array2<T> {
        &self.values
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
}

impl LabeledArray<u8> {
    /// Bind a rasterized mask to the axes of the grid it was burned on.
    pub fn from_mask(name: impl Into<String>, grid: &GridSpec, mask: &Mask) -> GridResult<Self> {
        Self::new(
            name,
            grid.latitudes(),
            grid.longitudes(),
            mask.values().clone(),
        )
    }
}

impl<T: Copy + Into<f64>> LabeledArray<T> {
    /// Convert cell values to `f64`, keeping name and axes.
    pub fn to_f64(&self) -> LabeledArray<f64> {
        LabeledArray {
            name: self.name.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            values: self.values.mapv(Into::into),
        }
    }

    /// Coordinate bounding box of every cell whose value is nonzero.
    ///
    /// NaN cells are not counted as nonzero. Returns `None` when nothing is set.
    pub fn nonzero_extent(&self) -> Option<BoundingBox> {
        let points = self
            .values
            .indexed_iter()
            .filter(|(_, v)| {
                let v: f64 = (**v).into();
                v != 0.0 && !v.is_nan()
            })
            .map(|((row, col), _)| (self.longitude[col], self.latitude[row]));

        BoundingBox::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_shape_mismatch_rejected() {
        let values: Array2<u8> = Array2::zeros((10, 5));
        let result = LabeledArray::new("AREA", vec![0.0; 8], vec![0.0; 5], values);
        match result {
            Err(GridError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, (8, 5));
                assert_eq!(actual, (10, 5));
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_nonzero_extent() {
        let arr = LabeledArray::new(
            "AREA",
            vec![50.0, 51.0, 52.0],
            vec![-2.0, -1.0, 0.0, 1.0],
            array![[0u8, 0, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0]],
        )
        .unwrap();

        let extent = arr.nonzero_extent().unwrap();
        assert_eq!(extent, BoundingBox::new(-1.0, 51.0, 0.0, 52.0));
    }

    #[test]
    fn test_nonzero_extent_ignores_nan() {
        let arr = LabeledArray::new(
            "field",
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            array![[f64::NAN, 0.0], [0.0, 0.0]],
        )
        .unwrap();
        assert!(arr.nonzero_extent().is_none());
    }
}
