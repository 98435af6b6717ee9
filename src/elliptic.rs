//! Elliptic integrals of the second kind, complete, incomplete and the
//! inverse of the incomplete one, built on Carlson's symmetric forms.
//!
//! The parameter is `k2` (the modulus squared, `m`), which may be negative.
//! The ellipsoid uses `k2 = -e'^2` so that `b * E(beta, k2)` is the length of
//! the meridian arc from the equator to parametric latitude `beta`.

use std::f64::consts::{FRAC_PI_2, PI};

const MAXIT: usize = 20;

/// Carlson's symmetric integral of the first kind `R_F(x, y, z)`.
///
/// <https://dlmf.nist.gov/19.16.E1>, algorithm from Carlson (1995), eq. 2.2-2.4
#[allow(clippy::many_single_char_names)]
pub fn rf(x: f64, y: f64, z: f64) -> f64 {
    let tol = (3. * f64::EPSILON * 0.01).powf(1. / 8.);

    let a0 = (x + y + z) / 3.;
    let q = (a0 - x).abs().max((a0 - y).abs()).max((a0 - z).abs()) / tol;

    let (mut x0, mut y0, mut z0) = (x, y, z);
    let mut an = a0;
    let mut mul = 1.;
    while q >= mul * an.abs() {
        let lam = x0.sqrt() * y0.sqrt() + y0.sqrt() * z0.sqrt() + z0.sqrt() * x0.sqrt();
        an = (an + lam) / 4.;
        x0 = (x0 + lam) / 4.;
        y0 = (y0 + lam) / 4.;
        z0 = (z0 + lam) / 4.;
        mul *= 4.;
    }

    let xx = (a0 - x) / (mul * an);
    let yy = (a0 - y) / (mul * an);
    let zz = -(xx + yy);
    let e2 = xx * yy - zz * zz;
    let e3 = xx * yy * zz;

    (e3 * (6930. * e3 + e2 * (15015. * e2 - 16380.) + 17160.)
        + e2 * ((10010. - 5775. * e2) * e2 - 24024.)
        + 240_240.)
        / (240_240. * an.sqrt())
}

/// Carlson's degenerate symmetric integral of the third kind `R_D(x, y, z)`.
///
/// <https://dlmf.nist.gov/19.16.E5>, algorithm from Carlson (1995), eq. 2.28-2.34
pub fn rd(x: f64, y: f64, z: f64) -> f64 {
    let tol = (0.2 * f64::EPSILON * 0.01).powf(1. / 8.);

    let a0 = (x + y + 3. * z) / 5.;
    let q = (a0 - x).abs().max((a0 - y).abs()).max((a0 - z).abs()) / tol;

    let (mut x0, mut y0, mut z0) = (x, y, z);
    let mut an = a0;
    let mut mul = 1.;
    let mut s = 0.;
    while q >= mul * an.abs() {
        let lam = x0.sqrt() * y0.sqrt() + y0.sqrt() * z0.sqrt() + z0.sqrt() * x0.sqrt();
        s += 1. / (mul * z0.sqrt() * (z0 + lam));
        an = (an + lam) / 4.;
        x0 = (x0 + lam) / 4.;
        y0 = (y0 + lam) / 4.;
        z0 = (z0 + lam) / 4.;
        mul *= 4.;
    }

    let xx = (a0 - x) / (mul * an);
    let yy = (a0 - y) / (mul * an);
    let zz = -(xx + yy) / 3.;
    let e2 = xx * yy - 6. * zz * zz;
    let e3 = (3. * xx * yy - 8. * zz * zz) * zz;
    let e4 = 3. * (xx * yy - zz * zz) * zz * zz;
    let e5 = xx * yy * zz * zz * zz;

    ((471_240. - 540_540. * e2) * e5
        + (612_612. * e2 - 540_540. * e3 - 556_920.) * e4
        + e3 * (306_306. * e3 + e2 * (675_675. * e2 - 706_860.) + 680_680.)
        + e2 * ((417_690. - 255_255. * e2) * e2 - 875_160.)
        + 4_084_080.)
        / (4_084_080. * mul * an * an.sqrt())
        + 3. * s
}

/// Elliptic integrals of the second kind for a fixed parameter `k2`.
#[derive(Clone, Copy, Debug)]
pub struct Elliptic {
    k2: f64,
    e: f64,
}

impl Elliptic {
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::elliptic::Elliptic;
    ///
    /// let ell = Elliptic::new(0.5);
    /// assert!((ell.complete_e() - 1.350_643_881_047_675_5).abs() < 1e-15);
    /// ```
    pub fn new(k2: f64) -> Elliptic {
        #[allow(clippy::float_cmp)]
        let e = if k2 == 0. {
            FRAC_PI_2
        } else {
            let kp2 = 1. - k2;
            rf(0., kp2, 1.) - k2 / 3. * rd(0., kp2, 1.)
        };

        Self { k2, e }
    }

    pub fn k2(&self) -> f64 {
        self.k2
    }

    /// Complete integral `E(k)`
    pub fn complete_e(&self) -> f64 {
        self.e
    }

    fn delta(&self, phi: f64) -> f64 {
        (1. - self.k2 * phi.sin().powi(2)).sqrt()
    }

    /// Incomplete integral `E(phi, k)`, `phi` in radians, any value.
    pub fn incomplete_e(&self, phi: f64) -> f64 {
        // E(phi + n pi) = E(phi) + 2 n E
        let n = (phi / PI + 0.5).floor();
        let phi = phi - n * PI;

        #[allow(clippy::float_cmp)]
        let e = if self.k2 == 0. {
            phi
        } else {
            let (sn, cn) = phi.sin_cos();
            let cn2 = cn * cn;
            let dn2 = 1. - self.k2 * sn * sn;
            sn * rf(cn2, dn2, 1.) - self.k2 / 3. * sn.powi(3) * rd(cn2, dn2, 1.)
        };

        e + 2. * n * self.e
    }

    /// Inverse of [`Elliptic::incomplete_e`], returns `phi` in radians such
    /// that `E(phi, k) == x`.
    pub fn inverse_e(&self, x: f64) -> f64 {
        let e2 = 2. * self.e;
        let n = (x / e2 + 0.5).floor();
        let x = x - n * e2;

        let mut phi = PI * x / e2;
        for _ in 0..MAXIT {
            let dphi = (self.incomplete_e(phi) - x) / self.delta(phi);
            phi -= dphi;
            if dphi.abs() <= f64::EPSILON {
                break;
            }
        }

        phi + n * PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_e_reference_values() {
        let cases: &[(f64, f64)] = &[
            (0.0, FRAC_PI_2),
            (0.1, 1.530_757_636_897_763_3),
            (0.5, 1.350_643_881_047_675_5),
            (0.9, 1.104_774_732_704_073_3),
            (0.99, 1.015_993_545_025_224),
        ];
        for &(m, expected) in cases {
            let got = Elliptic::new(m).complete_e();
            assert!((got - expected).abs() < 1e-14, "E({m}) = {got}, expected {expected}");
        }
    }

    #[test]
    fn incomplete_matches_complete_at_quarter() {
        for k2 in [-0.006_739_496_742_276_434, 0.3, 0.8] {
            let ell = Elliptic::new(k2);
            assert!((ell.incomplete_e(FRAC_PI_2) - ell.complete_e()).abs() < 1e-14);
            assert!((ell.incomplete_e(PI) - 2. * ell.complete_e()).abs() < 1e-14);
            assert!(ell.incomplete_e(0.).abs() < 1e-15);
        }
    }

    #[test]
    fn inverse_round_trip() {
        let ell = Elliptic::new(-0.006_739_496_742_276_434);
        for deg in [-89., -45., -0.5, 0., 10., 60., 89.9, 135.] {
            let phi = f64::to_radians(deg);
            let back = ell.inverse_e(ell.incomplete_e(phi));
            assert!((back - phi).abs() < 1e-14, "{deg}: {back} vs {phi}");
        }
    }

    #[test]
    fn carlson_special_values() {
        // R_F(x, x, x) = 1 / sqrt(x), R_D(x, x, x) = x^(-3/2)
        assert!((rf(4., 4., 4.) - 0.5).abs() < 1e-15);
        assert!((rd(4., 4., 4.) - 0.125).abs() < 1e-15);
        // R_F(0, 1, 1) = pi / 2
        assert!((rf(0., 1., 1.) - FRAC_PI_2).abs() < 1e-15);
    }
}
