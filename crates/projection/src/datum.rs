//! Datum shifts via seven-parameter Helmert transformations.
//!
//! Geodetic coordinates are lifted to earth-centred cartesian (ECEF)
//! coordinates on the source ellipsoid, shifted with a Helmert
//! transformation (position-vector convention), and projected back onto the
//! target ellipsoid.

use nalgebra::{Matrix3, Vector3};

use crate::ellipsoid::Ellipsoid;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Seven-parameter Helmert transformation (position-vector rotation convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmert {
    /// Translations (meters)
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    /// Rotations (arc-seconds)
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    /// Scale (parts per million)
    pub s: f64,
}

impl Helmert {
    /// OSGB36 to WGS84 (Ordnance Survey, ~5 m accuracy).
    pub fn osgb36_to_wgs84() -> Self {
        Self {
            tx: 446.448,
            ty: -125.157,
            tz: 542.060,
            rx: 0.1502,
            ry: 0.2470,
            rz: 0.8421,
            s: -20.4894,
        }
    }

    /// TM75 (Ireland 1965) to WGS84.
    pub fn tm75_to_wgs84() -> Self {
        Self {
            tx: 482.5,
            ty: -130.6,
            tz: 564.6,
            rx: 1.042,
            ry: 0.214,
            rz: 0.631,
            s: 8.15,
        }
    }

    /// The reverse transformation (small-angle approximation).
    pub fn inverse(&self) -> Self {
        Self {
            tx: -self.tx,
            ty: -self.ty,
            tz: -self.tz,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
            s: -self.s,
        }
    }

    /// Apply the transformation to an ECEF position.
    pub fn apply(&self, p: Vector3<f64>) -> Vector3<f64> {
        let s1 = 1.0 + self.s * 1e-6;
        let rx = self.rx * ARCSEC_TO_RAD;
        let ry = self.ry * ARCSEC_TO_RAD;
        let rz = self.rz * ARCSEC_TO_RAD;

        #[rustfmt::skip]
        let rotation = Matrix3::new(
            s1,  -rz,  ry,
            rz,   s1, -rx,
            -ry,  rx,  s1,
        );

        Vector3::new(self.tx, self.ty, self.tz) + rotation * p
    }
}

/// Geodetic latitude/longitude (degrees) and height (meters) to ECEF.
pub fn geodetic_to_ecef(ellipsoid: &Ellipsoid, lat_deg: f64, lon_deg: f64, h: f64) -> Vector3<f64> {
    let e2 = ellipsoid.e2();
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let nu = ellipsoid.a / (1.0 - e2 * lat.sin().powi(2)).sqrt();

    Vector3::new(
        (nu + h) * lat.cos() * lon.cos(),
        (nu + h) * lat.cos() * lon.sin(),
        ((1.0 - e2) * nu + h) * lat.sin(),
    )
}

/// ECEF to geodetic latitude/longitude in degrees (height discarded).
pub fn ecef_to_geodetic(ellipsoid: &Ellipsoid, p: Vector3<f64>) -> (f64, f64) {
    let e2 = ellipsoid.e2();
    let lon = p.y.atan2(p.x);
    let horizontal = p.x.hypot(p.y);

    let mut lat = p.z.atan2(horizontal * (1.0 - e2));
    for _ in 0..10 {
        let nu = ellipsoid.a / (1.0 - e2 * lat.sin().powi(2)).sqrt();
        let next = (p.z + e2 * nu * lat.sin()).atan2(horizontal);
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }

    (lat.to_degrees(), lon.to_degrees())
}

/// Shift geodetic coordinates from one datum to another.
///
/// Returns `(lat, lon)` in degrees on the target ellipsoid.
pub fn shift_datum(
    from: &Ellipsoid,
    to: &Ellipsoid,
    helmert: &Helmert,
    lat_deg: f64,
    lon_deg: f64,
) -> (f64, f64) {
    let source = geodetic_to_ecef(from, lat_deg, lon_deg, 0.0);
    let target = helmert.apply(source);
    ecef_to_geodetic(to, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecef_roundtrip() {
        let e = Ellipsoid::WGS84;
        let p = geodetic_to_ecef(&e, 53.5, -2.25, 0.0);
        let (lat, lon) = ecef_to_geodetic(&e, p);
        assert!((lat - 53.5).abs() < 1e-10);
        assert!((lon + 2.25).abs() < 1e-10);
    }

    #[test]
    fn test_osgb36_shift_magnitude() {
        let helmert = Helmert::osgb36_to_wgs84();
        let (lat, lon) = shift_datum(
            &Ellipsoid::AIRY_1830,
            &Ellipsoid::WGS84,
            &helmert,
            52.657570,
            1.717922,
        );

        // OSGB36 and WGS84 differ by roughly 100 m across Great Britain
        let dy = (lat - 52.657570) * 111_320.0;
        let dx = (lon - 1.717922) * 111_320.0 * 52.657570_f64.to_radians().cos();
        let shift = dx.hypot(dy);
        assert!(shift > 50.0 && shift < 200.0, "shift was {} m", shift);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let forward = Helmert::osgb36_to_wgs84();
        let (lat, lon) = shift_datum(
            &Ellipsoid::AIRY_1830,
            &Ellipsoid::WGS84,
            &forward,
            54.0,
            -3.0,
        );
        let (lat2, lon2) = shift_datum(
            &Ellipsoid::WGS84,
            &Ellipsoid::AIRY_1830,
            &forward.inverse(),
            lat,
            lon,
        );
        assert!((lat2 - 54.0).abs() < 1e-6);
        assert!((lon2 + 3.0).abs() < 1e-6);
    }
}
