//! Dispatch from EPSG codes to a transformation into geographic WGS84.

use crate::datum::{shift_datum, Helmert};
use crate::ellipsoid::Ellipsoid;
use crate::error::{ProjectionError, ProjectionResult};
use crate::lambert::LambertConformal;
use crate::laea::LambertAzimuthalEqualArea;
use crate::mercator;
use crate::transverse_mercator::TransverseMercator;

/// A transformation from a source CRS to WGS84 longitude/latitude.
#[derive(Debug, Clone)]
pub enum CrsTransform {
    /// Geographic coordinates already compatible with WGS84 (4326, 4258)
    Identity,
    /// Spherical Web Mercator (3857, 900913)
    WebMercator,
    /// Transverse Mercator grid, optionally on a local datum
    TransverseMercator {
        projection: TransverseMercator,
        datum_shift: Option<Helmert>,
    },
    /// ETRS89-LAEA (3035)
    LambertAzimuthal(LambertAzimuthalEqualArea),
    /// ETRS89-LCC (3034)
    LambertConformal(LambertConformal),
}

impl CrsTransform {
    /// Resolve the transformation for an EPSG code.
    pub fn from_epsg(epsg: u32) -> ProjectionResult<Self> {
        let transform = match epsg {
            // ETRS89 and WGS84 agree to well below a grid cell
            4326 | 4258 => Self::Identity,
            3857 | 900913 => Self::WebMercator,
            27700 => Self::TransverseMercator {
                projection: TransverseMercator::british_national_grid(),
                datum_shift: Some(Helmert::osgb36_to_wgs84()),
            },
            29903 => Self::TransverseMercator {
                projection: TransverseMercator::irish_grid(),
                datum_shift: Some(Helmert::tm75_to_wgs84()),
            },
            32601..=32660 => Self::TransverseMercator {
                projection: TransverseMercator::utm(epsg - 32600, true, Ellipsoid::WGS84),
                datum_shift: None,
            },
            32701..=32760 => Self::TransverseMercator {
                projection: TransverseMercator::utm(epsg - 32700, false, Ellipsoid::WGS84),
                datum_shift: None,
            },
            25828..=25838 => Self::TransverseMercator {
                projection: TransverseMercator::utm(epsg - 25800, true, Ellipsoid::GRS80),
                datum_shift: None,
            },
            3035 => Self::LambertAzimuthal(LambertAzimuthalEqualArea::etrs89_laea()),
            3034 => Self::LambertConformal(LambertConformal::etrs89_lcc()),
            other => return Err(ProjectionError::UnsupportedCrs(other)),
        };
        Ok(transform)
    }

    /// Whether coordinates pass through unchanged.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Transform a source coordinate `(x, y)` to WGS84 `(lon, lat)` in degrees.
    pub fn to_wgs84(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(ProjectionError::InvalidCoordinate {
                x,
                y,
                reason: "non-finite input".to_string(),
            });
        }

        let (lat, lon) = match self {
            Self::Identity => return Ok((x, y)),
            Self::WebMercator => mercator::inverse(x, y),
            Self::TransverseMercator {
                projection,
                datum_shift,
            } => {
                let (lat, lon) = projection.inverse(x, y);
                match datum_shift {
                    Some(helmert) => {
                        shift_datum(&projection.ellipsoid, &Ellipsoid::WGS84, helmert, lat, lon)
                    }
                    None => (lat, lon),
                }
            }
            Self::LambertAzimuthal(projection) => projection.inverse(x, y),
            Self::LambertConformal(projection) => projection.inverse(x, y),
        };

        if !(lat.is_finite() && lon.is_finite()) || lat.abs() > 90.0 {
            return Err(ProjectionError::InvalidCoordinate {
                x,
                y,
                reason: "outside projection domain".to_string(),
            });
        }
        Ok((lon, lat))
    }
}
