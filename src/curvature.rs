//! Radii of curvature, see
//! <https://en.wikipedia.org/wiki/Earth_radius#Radii_of_curvature>.

use std::f64::consts::FRAC_PI_2;

use crate::{Error, Ellipsoid, ThisOrThat, utility::{clip_lat, GeoMath}};

/// Meridional and prime-vertical radius of curvature at one latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curvature2 {
    pub meridional: f64,
    pub prime_vertical: f64,
}

impl Ellipsoid {
    /// Prime-vertical radius of curvature from the sine of the latitude and,
    /// optionally, its cosine.
    ///
    /// # Errors
    ///
    /// Fails as [`Ellipsoid::e2s2`] when `sa` is not a sine.
    #[allow(clippy::float_cmp)]
    pub fn roc1_(&self, sa: f64, ca: Option<f64>) -> Result<f64, Error> {
        if self.is_spherical() {
            return Ok(self.a());
        }

        let n = match ca {
            None => {
                let r = self.e2s2(sa)?;
                (r < f64::EPSILON).ternary_lazy(|| 0., || self.a() / r.sqrt())
            }
            Some(ca) if ca != 0. => {
                let h = if sa == 0. { ca.abs() } else { ca.hypot(self.b_a() * sa) };
                self.a() / h
            }
            Some(_) if sa != 0. => self.a2_b() / sa.abs(),
            Some(_) => self.a(),
        };

        Ok(n)
    }

    /// Meridional and prime-vertical radii of curvature at `lat` degrees.
    /// With `scaled` the prime-vertical radius is multiplied by `cos(lat)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::EllipsoidRegistry;
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let equator = wgs84.roc2(0.0, false).unwrap();
    ///
    /// assert!(equator.meridional < equator.prime_vertical);
    /// assert_eq!(equator.prime_vertical, wgs84.a());
    /// ```
    pub fn roc2(&self, lat: f64, scaled: bool) -> Result<Curvature2, Error> {
        self.roc2_(clip_lat(lat)?.to_radians(), scaled)
    }

    /// As [`Ellipsoid::roc2`] with `phi` in radians.
    ///
    /// # Errors
    ///
    /// Fails as [`Ellipsoid::e2s2`].
    pub fn roc2_(&self, phi: f64, scaled: bool) -> Result<Curvature2, Error> {
        let a = phi.abs();
        let r = self.e2s2((a < FRAC_PI_2).ternary_lazy(|| a.sin(), || 1.))?;

        let (m, mut n) = if r < f64::EPSILON {
            (0., 0.)
        } else {
            let n = self.a() / r.sqrt();
            (n * self.e12() / r, n)
        };

        if scaled {
            n *= (a < FRAC_PI_2).ternary_lazy(|| a.cos(), || 0.);
        }

        Ok(Curvature2 {
            meridional: m,
            prime_vertical: n,
        })
    }

    /// Directional radius of curvature at `lat` towards compass `bearing`,
    /// both in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled.
    pub fn roc_bearing(&self, lat: f64, bearing: f64) -> Result<f64, Error> {
        let (s, c) = bearing.sincosd();
        let (mut s2, mut c2) = (s * s, c * c);
        let Curvature2 { meridional: m, prime_vertical: mut n } = self.roc2(lat, false)?;

        // 1 / (c2 / m + s2 / n) without dividing by either
        if n < m {
            c2 *= n / m;
        } else if m < n {
            s2 *= m / n;
            n = m;
        }

        Ok(n / (c2 + s2))
    }

    /// Gaussian radius of curvature `sqrt(m n)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled.
    pub fn roc_gauss(&self, lat: f64) -> Result<f64, Error> {
        let (s, c) = clip_lat(lat)?.sincosd();
        Ok(self.b() / (c * c + self.b2_a2() * s * s))
    }

    /// Mean radius of curvature `2 m n / (m + n)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled.
    pub fn roc_mean(&self, lat: f64) -> Result<f64, Error> {
        let Curvature2 { meridional: m, prime_vertical: n } = self.roc2(lat, false)?;
        Ok(2. * m * n / (m + n))
    }

    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled.
    pub fn roc_meridional(&self, lat: f64) -> Result<f64, Error> {
        Ok(self.roc2(lat, false)?.meridional)
    }

    /// Prime-vertical, or transverse, radius of curvature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled.
    pub fn roc_prime_vertical(&self, lat: f64) -> Result<f64, Error> {
        Ok(self.roc2(lat, false)?.prime_vertical)
    }

    /// Polar radius of curvature `a^2 / b`
    pub fn roc_polar(&self) -> f64 {
        self.a2_b()
    }
}
