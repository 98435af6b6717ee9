use std::f64::consts::{FRAC_PI_2, PI};

use num::Complex;

use crate::{Ellipsoid, Error, ThisOrThat, utility::{GeoMath, dms}};

/// Transverse Mercator projection using the Krüger series of an
/// [`Ellipsoid`], after Karney (2011), "Transverse Mercator with an accuracy
/// of a few nanometers".
///
/// The series order follows [`Ellipsoid::ks_order`]. There is no zone
/// logic, the central meridian is an argument of each call.
#[derive(Clone, Debug)]
pub struct TransverseMercator<'a> {
    ellipsoid: &'a Ellipsoid,
    k0: f64,
    /// Equivalent radius for the circumference of the meridian
    a1: f64,
    b1: f64,
    c: f64,
    // 1-based, [0] is unused
    alp: Vec<f64>,
    bet: Vec<f64>,
}

/// One Clenshaw pass over `coeff[1..]` at `(xi, eta)`, returning the
/// series sum and its derivative. `sign` is `1` for the forward series and
/// `-1` for the reverse.
fn clenshaw(coeff: &[f64], sign: f64, xi: f64, eta: f64) -> (Complex<f64>, Complex<f64>) {
    let c0 = (2. * xi).cos();
    let ch0 = (2. * eta).cosh();
    let s0 = (2. * xi).sin();
    let sh0 = (2. * eta).sinh();

    let mut a = Complex::new(2. * c0 * ch0, -2. * s0 * sh0);
    let mut n = coeff.len() - 1;

    #[allow(clippy::cast_precision_loss)]
    let term = |n: usize| (sign * coeff[n], sign * 2. * (n as f64) * coeff[n]);

    let odd = n % 2 == 1;
    let mut y0 = Complex::new(odd.ternary(term(n).0, 0.), 0.);
    let mut y1 = Complex::default();
    let mut z0 = Complex::new(odd.ternary(term(n).1, 0.), 0.);
    let mut z1 = Complex::default();

    if odd {
        n -= 1;
    }

    while n > 0 {
        let (y, z) = term(n);
        y1 = a * y0 - y1 + y;
        z1 = a * z0 - z1 + z;
        n -= 1;

        let (y, z) = term(n);
        y0 = a * y1 - y0 + y;
        z0 = a * z1 - z0 + z;
        n -= 1;
    }

    a /= 2.;
    z1 = 1. - z1 + a * z0;
    a = Complex::new(s0 * ch0, c0 * sh0);
    y1 = Complex::new(xi, eta) + a * y0;

    (y1, z1)
}

impl<'a> TransverseMercator<'a> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`] unless `k0` is finite and positive.
    pub fn new(ellipsoid: &'a Ellipsoid, k0: f64) -> Result<TransverseMercator<'a>, Error> {
        if !(k0.is_finite() && k0 > 0.) {
            return Err(Error::InvalidScale(format!("k0 {k0} must be positive")));
        }

        let a1 = ellipsoid.A();
        let with_zero = |ks: &[f64]| -> Vec<f64> { std::iter::once(0.).chain(ks.iter().copied()).collect() };

        Ok(Self {
            ellipsoid,
            k0,
            a1,
            b1: a1 / ellipsoid.a(),
            c: ellipsoid.es_c(),
            alp: with_zero(ellipsoid.alpha_ks()),
            bet: with_zero(ellipsoid.beta_ks()),
        })
    }

    pub fn k0(&self) -> f64 {
        self.k0
    }

    /// Projects `(lat, lon)` about central meridian `lon0`, all in degrees.
    ///
    /// Returns `(x, y, gamma, k)`, the meridian convergence `gamma` in
    /// degrees and the point scale `k`.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{EllipsoidRegistry, projections::TransverseMercator};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let tm = TransverseMercator::new(&wgs84, 0.9996).unwrap();
    /// let (x, y, _, k) = tm.forward(-75.0, 40.748333, -73.985278);
    ///
    /// // UTM zone 18 without the false easting
    /// assert!((x - 85_664.121).abs() < 1e-3);
    /// assert!((y - 4_511_315.422).abs() < 1e-3);
    /// assert!(k > 0.9996);
    /// ```
    pub fn forward(&self, lon0: f64, lat: f64, lon: f64) -> (f64, f64, f64, f64) {
        let e = self.ellipsoid;
        let mut lat = lat;
        let mut lon = lon0.ang_diff(lon);

        let mut latsign = lat.is_sign_negative().ternary(-1., 1.);
        let lonsign = lon.is_sign_negative().ternary(-1., 1.);
        lat *= latsign;
        lon *= lonsign;

        let hd = f64::from(dms::HD);
        let backside = lon > f64::from(dms::QD);
        if backside {
            if lat.is_zero() {
                latsign = -1.;
            }
            lon = hd - lon;
        }

        let (sphi, cphi) = lat.sincosd();
        let (slam, clam) = lon.sincosd();

        let (xip, etap, mut gamma, mut k) = if cphi > 0. {
            let tau = sphi / cphi;
            let taup = e.es_taupf(tau);
            (
                taup.atan2(clam),
                (slam / taup.hypot(clam)).asinh(),
                (slam * taup).atan2(clam * taup.hypot1()).to_degrees(),
                (e.e12() + e.e2() * cphi.powi(2)).sqrt() * tau.hypot1() / taup.hypot(clam),
            )
        } else {
            (FRAC_PI_2, 0., lon, self.c)
        };

        let (y1, z1) = clenshaw(&self.alp, 1., xip, etap);

        gamma -= z1.im.atan2(z1.re).to_degrees();
        k *= self.b1 * z1.norm();

        let (xi, eta) = (y1.re, y1.im);
        let y = self.a1 * self.k0 * backside.ternary(PI - xi, xi) * latsign;
        let x = self.a1 * self.k0 * eta * lonsign;

        if backside {
            gamma = hd - gamma;
        }
        gamma = (gamma * latsign * lonsign).ang_normalize();

        (x, y, gamma, k * self.k0)
    }

    /// Inverse of [`TransverseMercator::forward`], returns
    /// `(lat, lon, gamma, k)`.
    pub fn reverse(&self, lon0: f64, x: f64, y: f64) -> (f64, f64, f64, f64) {
        let e = self.ellipsoid;
        let mut xi = y / (self.a1 * self.k0);
        let mut eta = x / (self.a1 * self.k0);

        let xi_sign = (!xi.is_sign_positive()).ternary(-1., 1.);
        let eta_sign = (!eta.is_sign_positive()).ternary(-1., 1.);

        xi *= xi_sign;
        eta *= eta_sign;

        let backside = xi > FRAC_PI_2;
        if backside {
            xi = PI - xi;
        }

        let (y1, z1) = clenshaw(&self.bet, -1., xi, eta);

        let mut gamma = z1.im.atan2(z1.re).to_degrees();
        let mut k = self.b1 / z1.norm();

        let xip = y1.re;
        let etap = y1.im;
        let s = etap.sinh();
        let c = 0_f64.max(xip.cos());
        let r = s.hypot(c);

        let (mut lat, mut lon) = if r.is_zero() {
            k *= self.c;
            (f64::from(dms::QD), 0.)
        } else {
            let lon = s.atan2(c).to_degrees();
            let sxip = xip.sin();
            let tau = e.es_tauf(sxip / r);
            gamma += (sxip * etap.tanh()).atan2(c).to_degrees();
            k *= (e.e12() + e.e2() / tau.hypot1().powi(2)).sqrt() * tau.hypot1() * r;

            (tau.atand(), lon)
        };

        let hd = f64::from(dms::HD);
        lat *= xi_sign;
        if backside {
            lon = hd - lon;
            gamma = hd - gamma;
        }
        lon *= eta_sign;
        lon = (lon + lon0).ang_normalize();
        gamma = (gamma * xi_sign * eta_sign).ang_normalize();

        (lat, lon, gamma, k * self.k0)
    }
}
