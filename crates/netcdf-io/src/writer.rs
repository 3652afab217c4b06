//! Writing masks as CF-style NetCDF-4 datasets.
//!
//! Layout of a written file:
//!
//! ```text
//! dimensions:
//!     latitude = <ny> ;
//!     longitude = <nx> ;
//! variables:
//!     double latitude(latitude) ;   units = "degrees_north", axis = "Y"
//!     double longitude(longitude) ; units = "degrees_east",  axis = "X"
//!     ubyte AREA(latitude, longitude) ;
//! ```

use std::path::Path;

use chrono::Utc;
use mask_common::{LabeledArray, Mask, LATITUDE, LONGITUDE};
use tracing::{debug, info};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::silence_hdf5_errors;

/// Global attributes written to every dataset.
#[derive(Debug, Clone)]
pub struct DatasetMetadata {
    pub title: String,
    pub source: String,
}

impl Default for DatasetMetadata {
    fn default() -> Self {
        Self {
            title: "Region mask".to_string(),
            source: format!("region-mask {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

struct AxisAttributes {
    name: &'static str,
    units: &'static str,
    axis: &'static str,
}

const LATITUDE_AXIS: AxisAttributes = AxisAttributes {
    name: LATITUDE,
    units: "degrees_north",
    axis: "Y",
};

const LONGITUDE_AXIS: AxisAttributes = AxisAttributes {
    name: LONGITUDE,
    units: "degrees_east",
    axis: "X",
};

/// Bind `mask` to the given axes under `name` and write it to `path`.
///
/// The shape is checked before the filesystem is touched; an existing file
/// at `path` is replaced.
pub fn write_mask(
    path: impl AsRef<Path>,
    name: &str,
    latitude: &[f64],
    longitude: &[f64],
    mask: &Mask,
    metadata: &DatasetMetadata,
) -> NetCdfResult<()> {
    let labeled = LabeledArray::new(
        name,
        latitude.to_vec(),
        longitude.to_vec(),
        mask.values().clone(),
    )?;
    write_labeled_mask(path, &labeled, metadata)
}

/// Write a labeled 0/1 array to `path`, replacing any existing file.
pub fn write_labeled_mask(
    path: impl AsRef<Path>,
    array: &LabeledArray<u8>,
    metadata: &DatasetMetadata,
) -> NetCdfResult<()> {
    let path = path.as_ref();
    silence_hdf5_errors();

    let (ny, nx) = array.shape();
    debug!(path = %path.display(), variable = array.name(), ny, nx, "Writing dataset");

    let mut file = netcdf::create(path).map_err(NetCdfError::library(path))?;

    file.add_dimension(LATITUDE, ny)
        .map_err(NetCdfError::library(path))?;
    file.add_dimension(LONGITUDE, nx)
        .map_err(NetCdfError::library(path))?;

    for (axis, values) in [
        (&LATITUDE_AXIS, array.latitude()),
        (&LONGITUDE_AXIS, array.longitude()),
    ] {
        let mut var = file
            .add_variable::<f64>(axis.name, &[axis.name])
            .map_err(NetCdfError::library(path))?;
        var.put_attribute("units", axis.units)
            .map_err(NetCdfError::library(path))?;
        var.put_attribute("standard_name", axis.name)
            .map_err(NetCdfError::library(path))?;
        var.put_attribute("long_name", axis.name)
            .map_err(NetCdfError::library(path))?;
        var.put_attribute("axis", axis.axis)
            .map_err(NetCdfError::library(path))?;
        var.put_values(values, ..)
            .map_err(NetCdfError::library(path))?;
    }

    // Row-major (latitude, longitude), matching the dimension order
    let cells: Vec<u8> = array.values().iter().copied().collect();
    let mut var = file
        .add_variable::<u8>(array.name(), &[LATITUDE, LONGITUDE])
        .map_err(NetCdfError::library(path))?;
    var.put_attribute("long_name", format!("{} region mask", array.name()))
        .map_err(NetCdfError::library(path))?;
    var.put_attribute("units", "1")
        .map_err(NetCdfError::library(path))?;
    var.put_values(&cells, ..)
        .map_err(NetCdfError::library(path))?;

    file.add_attribute("Conventions", "CF-1.8")
        .map_err(NetCdfError::library(path))?;
    file.add_attribute("title", metadata.title.as_str())
        .map_err(NetCdfError::library(path))?;
    file.add_attribute("source", metadata.source.as_str())
        .map_err(NetCdfError::library(path))?;
    file.add_attribute(
        "history",
        format!("{} created by region-mask", Utc::now().format("%Y-%m-%dT%H:%M:%SZ")),
    )
    .map_err(NetCdfError::library(path))?;

    info!(
        path = %path.display(),
        variable = array.name(),
        cells = cells.iter().filter(|v| **v != 0).count(),
        "Wrote mask dataset"
    );
    Ok(())
}
