//! Auxiliary latitudes, Snyder (1987) pp. 15-18 and Karney (2011).

use crate::{Error, Ellipsoid, ThisOrThat, constants::TOL, utility::{clip_lat, GeoMath}};

const MAXIT: usize = 20;

/// The auxiliary latitudes, each convertible to and from geodetic latitude
/// on a given [`Ellipsoid`].
///
/// On a sphere every conversion is the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuxLatitude {
    /// Latitude on the sphere of equal surface area
    Authalic,
    /// Latitude of the conformal sphere, used by stereographic and
    /// Mercator projections
    Conformal,
    /// Angle between the equator and the radius to the point
    Geocentric,
    /// Mercator ordinate, in degrees, unbounded towards the poles
    Isometric,
    /// Parametric or reduced latitude
    Parametric,
    /// Latitude on the sphere with equal meridian length
    Rectifying,
}

impl AuxLatitude {
    pub const ALL: [AuxLatitude; 6] = [
        AuxLatitude::Authalic,
        AuxLatitude::Conformal,
        AuxLatitude::Geocentric,
        AuxLatitude::Isometric,
        AuxLatitude::Parametric,
        AuxLatitude::Rectifying,
    ];

    /// Geodetic to auxiliary latitude, both in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled, otherwise `lat` is clipped first.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{AuxLatitude, EllipsoidRegistry};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let chi = AuxLatitude::Conformal.forward(&wgs84, 30.0).unwrap();
    ///
    /// assert!((chi - 29.833_682_042_480_98).abs() < 1e-12);
    /// assert!((AuxLatitude::Conformal.inverse(&wgs84, chi).unwrap() - 30.0).abs() < 1e-12);
    /// ```
    pub fn forward(&self, ellipsoid: &Ellipsoid, lat: f64) -> Result<f64, Error> {
        let lat = clip_lat(lat)?;
        if ellipsoid.is_spherical() {
            return Ok(lat);
        }

        Ok(match self {
            AuxLatitude::Authalic => authalic(ellipsoid, lat),
            AuxLatitude::Conformal => ellipsoid.es_taupf(lat.to_radians().tan()).atand(),
            AuxLatitude::Geocentric => scale_tan(ellipsoid.b2_a2(), lat),
            AuxLatitude::Isometric => isometric(ellipsoid, lat),
            AuxLatitude::Parametric => scale_tan(ellipsoid.b_a(), lat),
            AuxLatitude::Rectifying => rectifying(ellipsoid, lat)?,
        })
    }

    /// Auxiliary to geodetic latitude, both in degrees.
    ///
    /// # Errors
    ///
    /// As [`AuxLatitude::forward`]. Isometric latitudes are not range checked.
    pub fn inverse(&self, ellipsoid: &Ellipsoid, aux: f64) -> Result<f64, Error> {
        let aux = match self {
            AuxLatitude::Isometric => aux,
            _ => clip_lat(aux)?,
        };
        if ellipsoid.is_spherical() {
            return Ok(aux);
        }

        Ok(match self {
            AuxLatitude::Authalic => authalic_inverse(ellipsoid, aux),
            AuxLatitude::Conformal => ellipsoid.es_tauf(aux.to_radians().tan()).atand(),
            AuxLatitude::Geocentric => scale_tan(ellipsoid.a2_b2(), aux),
            AuxLatitude::Isometric => ellipsoid.es_tauf(aux.to_radians().sinh()).atand(),
            AuxLatitude::Parametric => scale_tan(ellipsoid.a_b(), aux),
            AuxLatitude::Rectifying => rectifying_inverse(ellipsoid, aux),
        })
    }
}

impl Ellipsoid {
    /// Isometric latitude in degrees without clipping `lat` to `[-90, 90]`.
    ///
    /// Outside that range the result is the analytic continuation of the
    /// formula, and NaN where it has none.
    pub fn isometric_raw(&self, lat: f64) -> f64 {
        if self.is_spherical() {
            lat
        } else {
            isometric(self, lat)
        }
    }
}

/// `atan(r * tan(lat))`, exact at the poles
fn scale_tan(r: f64, lat: f64) -> f64 {
    let (s, c) = lat.sincosd();
    (r * s).atan2(c).to_degrees()
}

fn isometric(ellipsoid: &Ellipsoid, lat: f64) -> f64 {
    ellipsoid.es_taupf(lat.to_radians().tan()).asinh().to_degrees()
}

#[allow(clippy::float_cmp)]
fn rectifying(ellipsoid: &Ellipsoid, lat: f64) -> Result<f64, Error> {
    if lat == 0. || lat.abs() >= 90. {
        return Ok(lat);
    }
    Ok(90. * ellipsoid.llat(lat)? / ellipsoid.L())
}

#[allow(clippy::float_cmp)]
fn rectifying_inverse(ellipsoid: &Ellipsoid, mu: f64) -> f64 {
    if mu == 0. || mu.abs() >= 90. {
        return mu;
    }
    let elliptic = ellipsoid.elliptic();
    let beta = elliptic.inverse_e(elliptic.complete_e() * mu / 90.).to_degrees();
    scale_tan(ellipsoid.a_b(), beta)
}

/// `atanh(e * x) / e`, continued to `atan(|e| * x) / |e|` when prolate.
fn atanhee(ellipsoid: &Ellipsoid, x: f64) -> f64 {
    ellipsoid.es_atanh(x) / ellipsoid.e2()
}

/// Divided difference `(atanhee(x) - atanhee(y)) / (x - y)`.
#[allow(clippy::float_cmp)]
fn datanhee(ellipsoid: &Ellipsoid, x: f64, y: f64) -> f64 {
    let t = x - y;
    let d = 1. - ellipsoid.e2() * x * y;
    if t == 0. {
        1. / d
    } else if x * y < 0. {
        (atanhee(ellipsoid, x) - atanhee(ellipsoid, y)) / t
    } else {
        atanhee(ellipsoid, t / d) / t
    }
}

/// Tangent of the authalic latitude from the tangent of the geodetic one,
/// in the form of the Albers equal-area projection. With `q` the authalic
/// ratio, `tan(xi) = q / sqrt((1 - q) * (1 + q))` where both factors are
/// divided differences scaled by `cos(phi)^2`, so nothing cancels near the
/// poles.
fn txif(ellipsoid: &Ellipsoid, tphi: f64) -> f64 {
    let (e2, e12) = (ellipsoid.e2(), ellipsoid.e12());
    let sign = (tphi < 0.).ternary(-1., 1.);
    let tphi = tphi.abs();

    let cphi = 1. / tphi.hypot1();
    let sphi = tphi * cphi;
    let es2m1 = 1. - e2 * sphi * sphi;
    let es2m1a = e12 * es2m1;
    let lower = (1. + e2 * sphi) / es2m1a + datanhee(ellipsoid, 1., sphi);
    let upper = (1. - e2 * sphi) / es2m1a + datanhee(ellipsoid, 1., -sphi);

    sign * (sphi / es2m1 + atanhee(ellipsoid, sphi)) / (cphi * (lower * upper).sqrt())
}

/// Inverse of [`txif`] by Newton's method in `tan(phi)`.
fn tphif(ellipsoid: &Ellipsoid, txi: f64) -> f64 {
    let e2 = ellipsoid.e2();
    let e12 = ellipsoid.e12();
    let qx = (1. + e12 * atanhee(ellipsoid, 1.)) / (2. * e12);
    let stol = txi.abs().max(1.) * *TOL;

    let mut tphi = txi;
    for _ in 0..MAXIT {
        let txia = txif(ellipsoid, tphi);
        let tphi2 = tphi * tphi;
        let scphi2 = 1. + tphi2;
        let scterm = scphi2 / txia.mul_add(txia, 1.);
        let dtphi = (txi - txia) * scterm * scterm.sqrt() * qx * (1. - e2 * tphi2 / scphi2).powi(2);
        tphi += dtphi;
        if !(dtphi.abs() >= stol) {
            break;
        }
    }

    tphi
}

fn authalic(ellipsoid: &Ellipsoid, lat: f64) -> f64 {
    if lat.abs() >= 90. {
        return lat;
    }
    let (s, c) = lat.sincosd();
    txif(ellipsoid, s / c).atand()
}

fn authalic_inverse(ellipsoid: &Ellipsoid, xi: f64) -> f64 {
    if xi.abs() >= 90. {
        return xi;
    }
    let (s, c) = xi.sincosd();
    tphif(ellipsoid, s / c).atand()
}
