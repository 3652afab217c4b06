//! Transverse Mercator projection.
//!
//! Uses the series expansions published by the Ordnance Survey ("A guide to
//! coordinate systems in Great Britain", annex C). They are accurate to
//! millimetres within a few degrees of the central meridian, which covers
//! the national grids and UTM zones boundary files are usually delivered in.

use crate::ellipsoid::Ellipsoid;

/// Transverse Mercator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    pub ellipsoid: Ellipsoid,
    /// Scale factor on the central meridian
    pub k0: f64,
    /// Latitude of true origin (degrees)
    pub lat0: f64,
    /// Longitude of the central meridian (degrees)
    pub lon0: f64,
    /// False easting (meters)
    pub false_easting: f64,
    /// False northing (meters)
    pub false_northing: f64,
}

impl TransverseMercator {
    /// British National Grid (EPSG:27700) on the OSGB36 datum.
    pub fn british_national_grid() -> Self {
        Self {
            ellipsoid: Ellipsoid::AIRY_1830,
            k0: 0.9996012717,
            lat0: 49.0,
            lon0: -2.0,
            false_easting: 400_000.0,
            false_northing: -100_000.0,
        }
    }

    /// Irish Grid (EPSG:29903) on the TM75 datum.
    pub fn irish_grid() -> Self {
        Self {
            ellipsoid: Ellipsoid::AIRY_MODIFIED,
            k0: 1.000035,
            lat0: 53.5,
            lon0: -8.0,
            false_easting: 200_000.0,
            false_northing: 250_000.0,
        }
    }

    /// Universal Transverse Mercator zone (1-60) on the given ellipsoid.
    pub fn utm(zone: u32, north: bool, ellipsoid: Ellipsoid) -> Self {
        Self {
            ellipsoid,
            k0: 0.9996,
            lat0: 0.0,
            lon0: zone as f64 * 6.0 - 183.0,
            false_easting: 500_000.0,
            false_northing: if north { 0.0 } else { 10_000_000.0 },
        }
    }

    fn third_flattening(&self) -> f64 {
        let a = self.ellipsoid.a;
        let b = self.ellipsoid.b();
        (a - b) / (a + b)
    }

    /// Meridional arc from the true origin to `lat` (radians), scaled by k0.
    fn meridional_arc(&self, lat: f64) -> f64 {
        let n = self.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let lat0 = self.lat0.to_radians();
        let d = lat - lat0;
        let s = lat + lat0;

        let ma = (1.0 + n + 1.25 * n2 + 1.25 * n3) * d;
        let mb = (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * d.sin() * s.cos();
        let mc = (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * d).sin() * (2.0 * s).cos();
        let md = 35.0 / 24.0 * n3 * (3.0 * d).sin() * (3.0 * s).cos();

        self.ellipsoid.b() * self.k0 * (ma - mb + mc - md)
    }

    /// Radii of curvature `(nu, rho, eta2)` at latitude `lat` (radians), scaled by k0.
    fn curvature(&self, lat: f64) -> (f64, f64, f64) {
        let e2 = self.ellipsoid.e2();
        let af0 = self.ellipsoid.a * self.k0;
        let sin2 = lat.sin().powi(2);
        let nu = af0 / (1.0 - e2 * sin2).sqrt();
        let rho = af0 * (1.0 - e2) / (1.0 - e2 * sin2).powf(1.5);
        (nu, rho, nu / rho - 1.0)
    }

    /// Geographic `(lat, lon)` in degrees to `(easting, northing)` in meters.
    pub fn forward(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();
        let dlon = (lon_deg - self.lon0).to_radians();
        let (nu, rho, eta2) = self.curvature(lat);

        let sin = lat.sin();
        let cos = lat.cos();
        let tan2 = lat.tan().powi(2);
        let tan4 = tan2 * tan2;

        let i = self.meridional_arc(lat) + self.false_northing;
        let ii = nu / 2.0 * sin * cos;
        let iii = nu / 24.0 * sin * cos.powi(3) * (5.0 - tan2 + 9.0 * eta2);
        let iiia = nu / 720.0 * sin * cos.powi(5) * (61.0 - 58.0 * tan2 + tan4);
        let iv = nu * cos;
        let v = nu / 6.0 * cos.powi(3) * (nu / rho - tan2);
        let vi = nu / 120.0
            * cos.powi(5)
            * (5.0 - 18.0 * tan2 + tan4 + 14.0 * eta2 - 58.0 * tan2 * eta2);

        let northing = i + ii * dlon.powi(2) + iii * dlon.powi(4) + iiia * dlon.powi(6);
        let easting = self.false_easting + iv * dlon + v * dlon.powi(3) + vi * dlon.powi(5);

        (easting, northing)
    }

    /// `(easting, northing)` in meters to geographic `(lat, lon)` in degrees.
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let af0 = self.ellipsoid.a * self.k0;
        let dn = northing - self.false_northing;

        let mut lat = dn / af0 + self.lat0.to_radians();
        let mut m = self.meridional_arc(lat);
        for _ in 0..20 {
            if (dn - m).abs() < 1e-5 {
                break;
            }
            lat += (dn - m) / af0;
            m = self.meridional_arc(lat);
        }

        let (nu, rho, eta2) = self.curvature(lat);
        let tan = lat.tan();
        let tan2 = tan * tan;
        let tan4 = tan2 * tan2;
        let tan6 = tan4 * tan2;
        let sec = 1.0 / lat.cos();

        let vii = tan / (2.0 * rho * nu);
        let viii = tan / (24.0 * rho * nu.powi(3)) * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
        let ix = tan / (720.0 * rho * nu.powi(5)) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
        let x = sec / nu;
        let xi = sec / (6.0 * nu.powi(3)) * (nu / rho + 2.0 * tan2);
        let xii = sec / (120.0 * nu.powi(5)) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
        let xiia = sec / (5040.0 * nu.powi(7)) * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

        let de = easting - self.false_easting;
        let lat_out = lat - vii * de.powi(2) + viii * de.powi(4) - ix * de.powi(6);
        let lon_out = self.lon0.to_radians() + x * de - xi * de.powi(3) + xii * de.powi(5)
            - xiia * de.powi(7);

        (lat_out.to_degrees(), lon_out.to_degrees())
    }
}
