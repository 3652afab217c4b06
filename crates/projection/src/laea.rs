//! Lambert Azimuthal Equal Area projection (ellipsoidal, oblique aspect).
//!
//! Formulas follow EPSG Guidance Note 7-2, method 9820. The pan-European
//! statistical grid ETRS89-LAEA (EPSG:3035) is the only preset; most
//! administrative boundary datasets for Europe are distributed in it.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;

/// Lambert Azimuthal Equal Area projection parameters.
#[derive(Debug, Clone)]
pub struct LambertAzimuthalEqualArea {
    pub ellipsoid: Ellipsoid,
    /// Latitude of natural origin in radians
    pub lat0: f64,
    /// Longitude of natural origin in radians
    pub lon0: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    // Precomputed constants
    qp: f64,
    beta0: f64,
    rq: f64,
    d: f64,
}

impl LambertAzimuthalEqualArea {
    pub fn new(
        ellipsoid: Ellipsoid,
        lat0_deg: f64,
        lon0_deg: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let lat0 = lat0_deg.to_radians();
        let lon0 = lon0_deg.to_radians();
        let e = ellipsoid.e();

        let qp = authalic_q(FRAC_PI_2, e);
        let q0 = authalic_q(lat0, e);
        let beta0 = (q0 / qp).clamp(-1.0, 1.0).asin();
        let rq = ellipsoid.a * (qp / 2.0).sqrt();
        let d = ellipsoid.a * (lat0.cos() / (1.0 - ellipsoid.e2() * lat0.sin().powi(2)).sqrt())
            / (rq * beta0.cos());

        Self {
            ellipsoid,
            lat0,
            lon0,
            false_easting,
            false_northing,
            qp,
            beta0,
            rq,
            d,
        }
    }

    /// ETRS89 / LAEA Europe (EPSG:3035).
    pub fn etrs89_laea() -> Self {
        Self::new(Ellipsoid::GRS80, 52.0, 10.0, 4_321_000.0, 3_210_000.0)
    }

    /// Geographic `(lat, lon)` in degrees to `(easting, northing)` in meters.
    pub fn forward(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();
        let dlon = lon_deg.to_radians() - self.lon0;
        let e = self.ellipsoid.e();

        let q = authalic_q(lat, e);
        let beta = (q / self.qp).clamp(-1.0, 1.0).asin();
        let b = self.rq
            * (2.0
                / (1.0
                    + self.beta0.sin() * beta.sin()
                    + self.beta0.cos() * beta.cos() * dlon.cos()))
            .sqrt();

        let easting = self.false_easting + b * self.d * beta.cos() * dlon.sin();
        let northing = self.false_northing
            + (b / self.d)
                * (self.beta0.cos() * beta.sin() - self.beta0.sin() * beta.cos() * dlon.cos());
        (easting, northing)
    }

    /// `(easting, northing)` in meters to geographic `(lat, lon)` in degrees.
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let dx = easting - self.false_easting;
        let dy = northing - self.false_northing;
        let rho = ((dx / self.d).powi(2) + (self.d * dy).powi(2)).sqrt();

        if rho < 1e-9 {
            return (self.lat0.to_degrees(), self.lon0.to_degrees());
        }

        let c = 2.0 * (rho / (2.0 * self.rq)).clamp(-1.0, 1.0).asin();
        let beta = (c.cos() * self.beta0.sin() + self.d * dy * c.sin() * self.beta0.cos() / rho)
            .clamp(-1.0, 1.0)
            .asin();

        let e2 = self.ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let lat = beta
            + (e2 / 3.0 + 31.0 * e4 / 180.0 + 517.0 * e6 / 5040.0) * (2.0 * beta).sin()
            + (23.0 * e4 / 360.0 + 251.0 * e6 / 3780.0) * (4.0 * beta).sin()
            + (761.0 * e6 / 45360.0) * (6.0 * beta).sin();

        let lon = self.lon0
            + (dx * c.sin()).atan2(
                self.d * rho * self.beta0.cos() * c.cos()
                    - self.d * self.d * dy * self.beta0.sin() * c.sin(),
            );

        (lat.to_degrees(), lon.to_degrees())
    }
}

/// Authalic `q` function.
fn authalic_q(lat: f64, e: f64) -> f64 {
    let e2 = e * e;
    let sin = lat.sin();
    let es = e * sin;
    (1.0 - e2) * (sin / (1.0 - es * es) - (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsg_guidance_example() {
        let proj = LambertAzimuthalEqualArea::etrs89_laea();
        let (e, n) = proj.forward(50.0, 5.0);
        assert!((e - 3_962_799.45).abs() < 0.01, "easting {}", e);
        assert!((n - 2_999_718.85).abs() < 0.01, "northing {}", n);
    }

    #[test]
    fn test_inverse_of_guidance_example() {
        let proj = LambertAzimuthalEqualArea::etrs89_laea();
        let (lat, lon) = proj.inverse(3_962_799.45, 2_999_718.85);
        assert!((lat - 50.0).abs() < 1e-6, "lat {}", lat);
        assert!((lon - 5.0).abs() < 1e-6, "lon {}", lon);
    }

    #[test]
    fn test_natural_origin() {
        let proj = LambertAzimuthalEqualArea::etrs89_laea();
        let (lat, lon) = proj.inverse(4_321_000.0, 3_210_000.0);
        assert!((lat - 52.0).abs() < 1e-12);
        assert!((lon - 10.0).abs() < 1e-12);
    }
}
