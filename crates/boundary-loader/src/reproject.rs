//! Reprojection of cleaned polygons to geographic WGS84.

use geo::{Coord, MapCoords, Polygon};
use projection::{CrsTransform, ProjectionError};

/// Transform every vertex of `polygon` into WGS84 lon/lat.
pub fn to_wgs84(
    polygon: &Polygon<f64>,
    transform: &CrsTransform,
) -> Result<Polygon<f64>, ProjectionError> {
    if transform.is_identity() {
        return Ok(polygon.clone());
    }
    polygon.try_map_coords(|c: Coord<f64>| -> Result<Coord<f64>, ProjectionError> {
        let (x, y) = transform.to_wgs84(c.x, c.y)?;
        Ok(Coord { x, y })
    })
}
