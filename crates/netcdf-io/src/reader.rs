//! Reading lat/lon labeled arrays back from NetCDF files.

use std::path::Path;

use mask_common::{LabeledArray, Mask, LATITUDE, LONGITUDE};
use ndarray::Array2;
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{get_string_attr, silence_hdf5_errors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

/// Identify a dimension as latitude or longitude.
///
/// Dimension names are checked first (`latitude`/`lat`, `longitude`/`lon`),
/// then the `standard_name` and `units` of a coordinate variable of the same
/// name.
fn classify_dimension(file: &netcdf::File, dim: &str) -> Option<Axis> {
    match dim {
        LATITUDE | "lat" => return Some(Axis::Latitude),
        LONGITUDE | "lon" => return Some(Axis::Longitude),
        _ => {}
    }

    let var = file.variable(dim)?;
    let standard_name = get_string_attr(&var, "standard_name");
    let units = get_string_attr(&var, "units");
    match (standard_name.as_deref(), units.as_deref()) {
        (Some("latitude"), _) | (_, Some("degrees_north")) => Some(Axis::Latitude),
        (Some("longitude"), _) | (_, Some("degrees_east")) => Some(Axis::Longitude),
        _ => None,
    }
}

fn read_coordinate(file: &netcdf::File, path: &Path, dim: &str) -> NetCdfResult<Vec<f64>> {
    let var = file
        .variable(dim)
        .ok_or_else(|| NetCdfError::MissingData(format!("coordinate variable '{}'", dim)))?;
    var.get_values::<f64, _>(..)
        .map_err(NetCdfError::library(path))
}

/// Read a 2D variable and its latitude/longitude axes.
///
/// The result is always laid out as `(latitude, longitude)`; a variable
/// stored as `(longitude, latitude)` is transposed.
pub fn read_labeled_array(
    path: impl AsRef<Path>,
    variable: &str,
) -> NetCdfResult<LabeledArray<f64>> {
    let path = path.as_ref();
    silence_hdf5_errors();

    let file = netcdf::open(path).map_err(NetCdfError::library(path))?;
    let var = file
        .variable(variable)
        .ok_or_else(|| NetCdfError::MissingData(format!("variable '{}'", variable)))?;

    let dims: Vec<(String, usize)> = var
        .dimensions()
        .iter()
        .map(|d| (d.name(), d.len()))
        .collect();
    if dims.len() != 2 {
        return Err(NetCdfError::InvalidFormat(format!(
            "variable '{}' has {} dimensions, expected 2",
            variable,
            dims.len()
        )));
    }

    let first = classify_dimension(&file, &dims[0].0);
    let second = classify_dimension(&file, &dims[1].0);
    let transposed = match (first, second) {
        (Some(Axis::Latitude), Some(Axis::Longitude)) => false,
        (Some(Axis::Longitude), Some(Axis::Latitude)) => true,
        _ => {
            return Err(NetCdfError::InvalidFormat(format!(
                "cannot identify latitude/longitude among dimensions ({}, {})",
                dims[0].0, dims[1].0
            )))
        }
    };
    let (lat_dim, lon_dim) = if transposed {
        (&dims[1].0, &dims[0].0)
    } else {
        (&dims[0].0, &dims[1].0)
    };

    let latitude = read_coordinate(&file, path, lat_dim)?;
    let longitude = read_coordinate(&file, path, lon_dim)?;

    let raw = var
        .get_values::<f64, _>(..)
        .map_err(NetCdfError::library(path))?;
    let stored = Array2::from_shape_vec((dims[0].1, dims[1].1), raw)
        .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))?;
    let values = if transposed {
        stored.reversed_axes().as_standard_layout().into_owned()
    } else {
        stored
    };

    debug!(
        path = %path.display(),
        variable,
        transposed,
        ny = latitude.len(),
        nx = longitude.len(),
        "Read labeled array"
    );

    Ok(LabeledArray::new(variable, latitude, longitude, values)?)
}

/// Read a mask variable as 0/1 cells.
///
/// Any nonzero, non-NaN value becomes 1.
pub fn read_mask(path: impl AsRef<Path>, variable: &str) -> NetCdfResult<Mask> {
    let array = read_labeled_array(path, variable)?;
    let cells = array
        .values()
        .mapv(|v| u8::from(v != 0.0 && !v.is_nan()));
    Ok(Mask::from_array(cells))
}
