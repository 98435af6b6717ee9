use crate::{
    Ellipsoid, Error, ThisOrThat,
    constants::{TOL, UPS_K0},
    utility::{GeoMath, dms},
};

/// Polar stereographic projection of an ellipsoid, Karney (2011) eqs. 7-9
/// and 19-21 for the conformal latitude.
///
/// Coordinates are unfalsed, relative to the pole.
#[derive(Clone, Copy, Debug)]
pub struct PolarStereographic<'a> {
    ellipsoid: &'a Ellipsoid,
    k0: f64,
}

impl<'a> PolarStereographic<'a> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`] unless `k0` is finite and positive.
    pub fn new(ellipsoid: &'a Ellipsoid, k0: f64) -> Result<PolarStereographic<'a>, Error> {
        if !(k0.is_finite() && k0 > 0.) {
            return Err(Error::InvalidScale(format!("k0 {k0} must be positive")));
        }

        Ok(Self { ellipsoid, k0 })
    }

    /// Internal-only constructor that doesn't check `k0`
    pub(crate) fn with_scale(ellipsoid: &'a Ellipsoid, k0: f64) -> PolarStereographic<'a> {
        Self { ellipsoid, k0 }
    }

    /// Projection with the UPS central scale `0.994`
    pub fn ups(ellipsoid: &'a Ellipsoid) -> PolarStereographic<'a> {
        Self { ellipsoid, k0: UPS_K0 }
    }

    pub fn k0(&self) -> f64 {
        self.k0
    }

    // Distance from the pole per unit of conformal co-latitude
    fn rho_scale(&self) -> f64 {
        2. * self.k0 * self.ellipsoid.a() / self.ellipsoid.es_c()
    }

    // Point scale at distance `rho` from the pole and latitude `atan(tau)`
    fn point_scale(&self, rho: f64, tau: f64) -> f64 {
        let t = tau.hypot1();
        let e = self.ellipsoid;
        (rho / e.a()) * t * (e.e12() + e.e2() / t.powi(2)).sqrt()
    }

    /// Projects `(lat, lon)` in degrees about the north pole, or about the
    /// south pole unless `northp`.
    ///
    /// Returns `(x, y, gamma, k)`, the meridian convergence `gamma` in
    /// degrees and the point scale `k`.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{EllipsoidRegistry, projections::PolarStereographic};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let (x, y, gamma, k) = PolarStereographic::ups(&wgs84).forward(true, 90.0, 45.0);
    ///
    /// assert_eq!((x, y, gamma, k), (0.0, 0.0, 45.0, 0.994));
    /// ```
    pub fn forward(&self, northp: bool, lat: f64, lon: f64) -> (f64, f64, f64, f64) {
        let lat = northp.ternary(lat, -lat);
        let at_pole = (lat - f64::from(dms::QD)).abs() < *TOL;

        let tau = lat.to_radians().tan();
        let taup = self.ellipsoid.es_taupf(tau);
        let mut rho = taup.hypot1() + taup.abs();
        if taup >= 0. {
            rho = at_pole.ternary_lazy(|| 0., || 1. / rho);
        }
        rho *= self.rho_scale();

        let k = at_pole.ternary_lazy(|| self.k0, || self.point_scale(rho, tau));

        let (x, y) = lon.sincosd();
        let (x, y) = (x * rho, y * rho);

        if northp {
            (x, -y, lon, k)
        } else {
            (x, y, -lon, k)
        }
    }

    /// Inverse of [`PolarStereographic::forward`], returns
    /// `(lat, lon, gamma, k)`.
    pub fn reverse(&self, northp: bool, x: f64, y: f64) -> (f64, f64, f64, f64) {
        let rho = x.hypot(y);
        let t = (rho > 0.)
            .ternary_lazy(
                || rho / self.rho_scale(),
                || f64::EPSILON.powi(2)
            );
        let tau = self.ellipsoid.es_tauf((1. / t - t) / 2.);

        let lat = northp.ternary(1., -1.) * tau.atand();
        let lon = x.atan2(northp.ternary(-y, y)).to_degrees().wrap180();
        let k = (rho > 0.).ternary_lazy(|| self.point_scale(rho, tau), || self.k0);

        (lat, lon, northp.ternary(lon, -lon), k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EllipsoidRegistry;

    #[test]
    fn forward_reference_point() {
        let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
        let ps = PolarStereographic::ups(&wgs84);

        let (x, y, gamma, k) = ps.forward(true, 85., 0.);
        assert!(x.abs() < 1e-9);
        assert!((y + 555_457.391_382_678).abs() < 1e-6);
        assert_eq!(gamma, 0.);
        assert!((k - 0.995_894_791_674_974_6).abs() < 1e-12);
    }

    #[test]
    fn reverse_at_pole() {
        let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
        let (lat, lon, _, k) = PolarStereographic::ups(&wgs84).reverse(false, 0., 0.);
        assert!((lat + 90.).abs() < 1e-12);
        assert_eq!(lon, 0.);
        assert_eq!(k, 0.994);
    }

    #[test]
    fn rejects_bad_scale() {
        let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
        assert!(PolarStereographic::new(&wgs84, 0.).is_err());
        assert!(PolarStereographic::new(&wgs84, f64::NAN).is_err());
        assert!(PolarStereographic::new(&wgs84, 1.).is_ok());
    }
}
