use std::{f64::consts::{FRAC_PI_2, PI}, fmt::Display, sync::OnceLock};

use crate::{
    Error,
    ThisOrThat,
    constants::{EPS1, TOL},
    elliptic::Elliptic,
    kruger::{self, ALPHA, BETA},
    utility::{clip_lat, fstr, Fsum, GeoMath},
};

const EPS: f64 = f64::EPSILON;

/// Krüger series orders supported by [`Ellipsoid::set_ks_order`]
pub const KS_ORDERS: [usize; 3] = [4, 6, 8];

/// Maximum number of Newton steps in [`Ellipsoid::tauf_solve`]
const TAUF_MAXIT: usize = 9;

/// Derived values, each computed on first use.
#[derive(Clone, Debug, Default)]
struct Memo {
    e: OnceLock<f64>,
    e2: OnceLock<f64>,
    e22: OnceLock<f64>,
    e32: OnceLock<f64>,
    e12: OnceLock<f64>,
    f2: OnceLock<f64>,
    n: OnceLock<f64>,
    es_c: OnceLock<f64>,
    meridional_radius: OnceLock<f64>,
    quarter_meridian: OnceLock<f64>,
    r1: OnceLock<f64>,
    r2: OnceLock<f64>,
    r3: OnceLock<f64>,
    area: OnceLock<f64>,
    volume: OnceLock<f64>,
    elliptic: OnceLock<Elliptic>,
    alpha_ks: OnceLock<Vec<f64>>,
    beta_ks: OnceLock<Vec<f64>>,
    mabcd: OnceLock<[f64; 4]>,
}

/// A reference ellipsoid of revolution, spherical, oblate or prolate.
///
/// Only the equatorial radius `a`, the polar radius `b`, the flattening `f`
/// and its inverse `f_` are stored, everything else is derived on first
/// access and kept for the lifetime of the value.
#[derive(Clone, Debug)]
pub struct Ellipsoid {
    name: String,
    a: f64,
    b: f64,
    f: f64,
    f_: f64,
    ks_order: usize,
    memo: Memo,
}

/// Outcome of the Newton iteration inverting [`Ellipsoid::es_taupf`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaufSolution {
    pub tau: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// An `(a, f)` pair, equatorial radius and flattening.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AF {
    pub a: f64,
    pub f: f64,
}

impl AF {
    pub fn b(&self) -> f64 {
        a_f2b(self.a, self.f)
    }

    pub fn f_(&self) -> f64 {
        f2f_(self.f)
    }
}

fn check_radius(name: &str, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value >= EPS {
        Ok(value)
    } else {
        Err(Error::InvalidEllipsoid(format!("{name} {value} is not a positive radius")))
    }
}

fn check_eq(name: &str, value: f64, expected: f64, eps: f64) -> Result<(), Error> {
    if (value - expected).abs() > eps {
        Err(Error::Inconsistent {
            name: name.to_string(),
            value,
            expected,
            eps,
        })
    } else {
        Ok(())
    }
}

impl Ellipsoid {
    fn build(name: String, a: f64, b: Option<f64>, f_: Option<f64>) -> Result<Ellipsoid, Error> {
        let a = check_radius("a", a)?;

        let (mut b, mut f, mut f_) = match (b, f_) {
            (Some(b), f_) => {
                let b = check_radius("b", b)?;
                let f = a_b2f(a, b);
                (b, f, f_.unwrap_or_else(|| f2f_(f)))
            }
            (_, Some(f_)) if f_ != 0. => {
                if !f_.is_finite() {
                    return Err(Error::InvalidEllipsoid(format!("f_ {f_} is not finite")));
                }
                let b = check_radius("b", a_f_2b(a, f_))?;
                (b, a_b2f(a, b), f_)
            }
            _ => (a, 0., 0.),
        };

        #[allow(clippy::float_cmp)]
        let collapse = f.abs() < EPS || a == b || f_ == 0.;
        if collapse {
            b = a;
            f = 0.;
            f_ = 0.;
        } else if f > EPS1 {
            return Err(Error::InvalidEllipsoid(format!("flattening {f} not below 1")));
        }

        let ellipsoid = Self {
            name,
            a,
            b,
            f,
            f_,
            ks_order: kruger::MAX_ORDER,
            memo: Memo::default(),
        };

        if f != 0. && f_ != 0. {
            check_eq("f_", f_, 1. / f, *TOL)?;
            check_eq("f", f, 1. / f_, *TOL)?;
        }
        check_eq("b2_a2", ellipsoid.b2_a2(), ellipsoid.e12(), EPS)?;

        Ok(ellipsoid)
    }

    /// Ellipsoid from equatorial and polar radius.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEllipsoid`] for a non-positive radius or a
    /// degenerate flattening.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::Ellipsoid;
    ///
    /// let sphere = Ellipsoid::new("Round", 6_371_000.0, 6_371_000.0).unwrap();
    /// assert!(sphere.is_spherical());
    /// assert_eq!(sphere.f(), 0.0);
    ///
    /// assert!(Ellipsoid::new("Flat", 6_371_000.0, -1.0).is_err());
    /// assert!(Ellipsoid::new("Flat", 6_371_000.0, 0.0).is_err());
    /// ```
    pub fn new<S: Into<String>>(name: S, a: f64, b: f64) -> Result<Ellipsoid, Error> {
        Self::build(name.into(), a, Some(b), None)
    }

    /// Ellipsoid from equatorial radius and inverse flattening, `f_ = 0` is a
    /// sphere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEllipsoid`] for a non-positive radius or a
    /// degenerate flattening.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::Ellipsoid;
    ///
    /// let wgs84 = Ellipsoid::from_inverse_flattening("WGS84", 6_378_137.0, 298.257_223_563).unwrap();
    ///
    /// assert!((wgs84.b() - 6_356_752.314_245).abs() < 1e-6);
    /// assert!((wgs84.e2() - 0.006_694_38).abs() < 1e-8);
    /// ```
    pub fn from_inverse_flattening<S: Into<String>>(name: S, a: f64, f_: f64) -> Result<Ellipsoid, Error> {
        Self::build(name.into(), a, None, Some(f_))
    }

    /// Ellipsoid from equatorial radius and flattening, negative for prolate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEllipsoid`] if `a` is not positive or `f` is
    /// not below 1.
    pub fn from_flattening<S: Into<String>>(name: S, a: f64, f: f64) -> Result<Ellipsoid, Error> {
        let a = check_radius("a", a)?;
        if !f.is_finite() || f > EPS1 {
            return Err(Error::InvalidEllipsoid(format!("flattening {f} not below 1")));
        }
        Self::build(name.into(), a, Some(a_f2b(a, f)), None)
    }

    /// Ellipsoid from all of `a`, `b` and `f_`, which must agree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Inconsistent`] if `1 / f` and `f_` differ by more
    /// than the tolerance, or [`Error::InvalidEllipsoid`] as [`Ellipsoid::new`].
    pub fn checked<S: Into<String>>(name: S, a: f64, b: f64, f_: f64) -> Result<Ellipsoid, Error> {
        Self::build(name.into(), a, Some(b), Some(f_))
    }

    /// Sphere of radius `r`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEllipsoid`] if `r` is not positive.
    pub fn sphere<S: Into<String>>(name: S, r: f64) -> Result<Ellipsoid, Error> {
        Self::build(name.into(), r, None, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Equatorial radius
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Polar radius
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Flattening `(a - b) / a`, `0` for a sphere, negative for prolate
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Inverse flattening, `0` for a sphere
    pub fn f_(&self) -> f64 {
        self.f_
    }

    pub fn a_f(&self) -> AF {
        AF { a: self.a, f: self.f }
    }

    pub fn a2(&self) -> f64 {
        self.a * self.a
    }

    pub fn b2(&self) -> f64 {
        self.b * self.b
    }

    pub fn a_b(&self) -> f64 {
        self.a / self.b
    }

    pub fn b_a(&self) -> f64 {
        self.b / self.a
    }

    pub fn a2_b2(&self) -> f64 {
        self.a_b().powi(2)
    }

    pub fn b2_a2(&self) -> f64 {
        self.b_a().powi(2)
    }

    /// Polar radius of curvature `a^2 / b`
    pub fn a2_b(&self) -> f64 {
        self.a2() / self.b
    }

    /// Equatorial meridional radius of curvature `b^2 / a`
    pub fn b2_a(&self) -> f64 {
        self.b2() / self.a
    }

    /// Second flattening `(a - b) / b`
    pub fn f2(&self) -> f64 {
        *self.memo.f2.get_or_init(|| f2f2(self.f))
    }

    /// Third flattening `(a - b) / (a + b)`
    pub fn n(&self) -> f64 {
        *self.memo.n.get_or_init(|| f2n(self.f))
    }

    /// First eccentricity, never negative
    pub fn e(&self) -> f64 {
        *self.memo.e.get_or_init(|| self.e2abs().sqrt())
    }

    /// Eccentricity carrying the sign of the flattening
    pub fn es(&self) -> f64 {
        self.e().copysign(self.f)
    }

    pub fn e2(&self) -> f64 {
        *self.memo.e2.get_or_init(|| f2e2(self.f))
    }

    pub fn e2abs(&self) -> f64 {
        self.e2().abs()
    }

    /// Second eccentricity squared `e2 / (1 - e2)`
    pub fn e22(&self) -> f64 {
        *self.memo.e22.get_or_init(|| f2e22(self.f))
    }

    /// Third eccentricity squared `e2 / (2 - e2)`
    pub fn e32(&self) -> f64 {
        *self.memo.e32.get_or_init(|| f2e32(self.f))
    }

    /// `1 - e2 == (1 - f)^2`
    pub fn e12(&self) -> f64 {
        *self.memo.e12.get_or_init(|| (1. - self.f).powi(2))
    }

    pub fn e4(&self) -> f64 {
        self.e2().powi(2)
    }

    /// `(1 - f) * exp(es_atanh(1))`, `1` for a sphere
    pub fn es_c(&self) -> f64 {
        *self.memo.es_c.get_or_init(|| {
            self.is_ellipsoidal()
                .ternary_lazy(|| self.b_a() * self.es_atanh(1.).exp(), || 1.)
        })
    }

    /// `es * atanh(es * x)` for the signed eccentricity, `atan` for prolate.
    pub fn es_atanh(&self, x: f64) -> f64 {
        if self.is_spherical() {
            0.
        } else {
            x.eatanhe(self.es())
        }
    }

    /// Tangent of the conformal latitude from the tangent of the geodetic
    /// latitude, Karney (2011) eqs. 7-9.
    pub fn es_taupf(&self, tau: f64) -> f64 {
        let tau1 = tau.hypot1();
        let sig = self.es_atanh(tau / tau1).sinh();

        sig.hypot1() * tau - sig * tau1
    }

    /// Inverse of [`Ellipsoid::es_taupf`], Karney (2011) eqs. 19-21.
    pub fn es_tauf(&self, taup: f64) -> f64 {
        self.tauf_solve(taup).tau
    }

    /// Newton solve for [`Ellipsoid::es_tauf`], reporting whether the step
    /// size dropped below tolerance within the iteration cap. The last
    /// estimate is returned either way.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::EllipsoidRegistry;
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let taup = wgs84.es_taupf(1.0);
    /// let solution = wgs84.tauf_solve(taup);
    ///
    /// assert!(solution.converged);
    /// assert!((solution.tau - 1.0).abs() < 1e-15);
    /// ```
    pub fn tauf_solve(&self, taup: f64) -> TaufSolution {
        let tmax = 2. / EPS.sqrt();
        let stol = taup.abs().max(1.) * *TOL;
        let e2m = self.a2_b2();
        // To first order taup = (1 - e2) * tau
        let mut tau = (taup.abs() > 70.)
            .ternary_lazy(|| taup * self.es_atanh(1.).exp(), || taup * e2m);

        // Infinite, NaN or beyond where the iteration can improve on it
        if !(tau.abs() < tmax) {
            return TaufSolution { tau, iterations: 0, converged: !tau.is_nan() };
        }

        let mut sum = Fsum::new(tau);
        for i in 0..TAUF_MAXIT {
            let taupa = self.es_taupf(tau);
            let dtau = (taup - taupa) * (e2m + tau.powi(2)) / (tau.hypot1() * taupa.hypot1());
            tau = sum.add(dtau);
            if dtau.abs() < stol {
                return TaufSolution { tau, iterations: i + 1, converged: true };
            }
        }

        TaufSolution { tau, iterations: TAUF_MAXIT, converged: false }
    }

    /// `1 - e2 * s^2`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the result would be negative.
    pub fn e2s2(&self, s: f64) -> Result<f64, Error> {
        let r = 1. - self.e2() * s * s;
        if r < 0. {
            let limit = 1. / self.e();
            return Err(Error::OutOfRange { name: "Sine", value: s, low: -limit, high: limit });
        }
        Ok(r)
    }

    /// `sqrt(1 - e2 * s^2)`
    ///
    /// # Errors
    ///
    /// See [`Ellipsoid::e2s2`].
    pub fn e2s(&self, s: f64) -> Result<f64, Error> {
        Ok(self.e2s2(s)?.sqrt())
    }

    pub fn is_ellipsoidal(&self) -> bool {
        self.f != 0.
    }

    pub fn is_spherical(&self) -> bool {
        self.f == 0.
    }

    pub fn is_oblate(&self) -> bool {
        self.f > 0.
    }

    pub fn is_prolate(&self) -> bool {
        self.f < 0.
    }

    /// Applies `fun` with the larger radius first, `a` for a sphere.
    fn f_late<F: Fn(f64, f64) -> f64>(&self, fun: F) -> f64 {
        if self.is_oblate() {
            fun(self.a, self.b)
        } else if self.is_prolate() {
            fun(self.b, self.a)
        } else {
            self.a
        }
    }

    /// UTM meridional radius
    #[allow(non_snake_case)]
    pub fn A(&self) -> f64 {
        *self.memo.meridional_radius.get_or_init(|| {
            self.is_ellipsoidal()
                .ternary_lazy(|| kruger::meridional_radius(self.a, self.n()), || self.a)
        })
    }

    /// Elliptic integrals with parameter `-e22`, scaled by `b` these give
    /// meridian arc lengths as a function of parametric latitude.
    pub(crate) fn elliptic(&self) -> &Elliptic {
        self.memo.elliptic.get_or_init(|| Elliptic::new(-self.e22()))
    }

    /// Quarter meridian, the distance from the equator to a pole.
    #[allow(non_snake_case)]
    pub fn L(&self) -> f64 {
        *self.memo.quarter_meridian.get_or_init(|| {
            self.is_ellipsoidal()
                .ternary_lazy(|| self.b * self.elliptic().complete_e(), || self.a * FRAC_PI_2)
        })
    }

    /// Distance along the meridian from the equator to `lat`, negative in
    /// the southern hemisphere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled.
    pub fn llat(&self, lat: f64) -> Result<f64, Error> {
        let lat = clip_lat(lat)?;
        if self.is_spherical() {
            return Ok(self.a * lat.to_radians());
        }

        let (s, c) = lat.sincosd();
        let beta = (self.b_a() * s).atan2(c);
        Ok(self.b * self.elliptic().incomplete_e(beta))
    }

    /// IUGG mean radius `(2a + b) / 3`
    #[allow(non_snake_case)]
    pub fn R1(&self) -> f64 {
        *self.memo.r1.get_or_init(|| self.f_late(|a, b| (2. * a + b) / 3.))
    }

    /// Authalic radius, of the sphere with the same surface area
    #[allow(non_snake_case)]
    pub fn R2(&self) -> f64 {
        *self.memo.r2.get_or_init(|| {
            self.f_late(|a, b| {
                let r = (b / a).powi(2);
                if EPS < r && r < EPS1 {
                    let e = (1. - r).sqrt();
                    a * ((1. + r * e.atanh() / e) / 2.).sqrt()
                } else {
                    a
                }
            })
        })
    }

    /// Volumetric radius `(a^2 b)^(1/3)`
    #[allow(non_snake_case)]
    pub fn R3(&self) -> f64 {
        *self.memo.r3.get_or_init(|| self.f_late(|a, b| (a * a * b).cbrt()))
    }

    /// Biaxial quadratic mean radius `sqrt((a^2 + b^2) / 2)`
    pub fn r_biaxial(&self) -> f64 {
        self.is_ellipsoidal()
            .ternary_lazy(|| ((self.a2() + self.b2()) / 2.).sqrt(), || self.a)
    }

    /// Geometric mean radius `sqrt(a b)`
    pub fn r_geometric(&self) -> f64 {
        self.f_late(|a, b| (a * b).sqrt())
    }

    /// Rectifying radius `((a^(3/2) + b^(3/2)) / 2)^(2/3)`
    pub fn r_rectifying(&self) -> f64 {
        self.f_late(|a, b| ((a.powf(1.5) + b.powf(1.5)) / 2.).powf(2. / 3.))
    }

    /// Geocentric radius at `lat`, the distance from the center to the
    /// surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
    /// range errors are enabled.
    pub fn rgeocentric(&self, lat: f64) -> Result<f64, Error> {
        let lat = clip_lat(lat)?;
        if self.is_spherical() {
            return Ok(self.a);
        }

        let (s, c) = lat.sincosd();
        let (s2, c2) = (s * s, c * c);
        let b2_a2_s2 = self.b2_a2() * s2;

        Ok(((c2 + b2_a2_s2 * self.b2_a2()) / (c2 + b2_a2_s2)).sqrt() * self.a)
    }

    /// Radius at `lat` by linear interpolation between `a` and `b`.
    pub fn rlat(&self, lat: f64) -> f64 {
        let lat = lat.abs().min(90.);
        self.a - (self.a - self.b) * lat / 90.
    }

    /// Surface area
    pub fn area(&self) -> f64 {
        *self.memo.area.get_or_init(|| {
            let r = self.is_ellipsoidal().ternary_lazy(|| self.R2(), || self.a);
            4. * PI * r * r
        })
    }

    pub fn volume(&self) -> f64 {
        *self.memo.volume.get_or_init(|| {
            let v = self.is_oblate().ternary_lazy(|| self.a2() * self.b, || self.b2() * self.a);
            v * 4. * PI / 3.
        })
    }

    /// Order of the Krüger series, one of [`KS_ORDERS`]
    pub fn ks_order(&self) -> usize {
        self.ks_order
    }

    /// Sets the Krüger series order, discarding the cached series if it
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKsOrder`] if `order` is not 4, 6 or 8.
    pub fn set_ks_order(&mut self, order: usize) -> Result<(), Error> {
        if !KS_ORDERS.contains(&order) {
            return Err(Error::InvalidKsOrder(order));
        }
        if order != self.ks_order {
            self.memo.alpha_ks.take();
            self.memo.beta_ks.take();
            self.ks_order = order;
        }
        Ok(())
    }

    /// Krüger Alpha series `alpha[1..=ks_order]`
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::EllipsoidRegistry;
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let alpha = wgs84.alpha_ks();
    ///
    /// assert_eq!(alpha.len(), 8);
    /// assert!((alpha[0] - 8.377_318_206_244_698e-4).abs() < 1e-16);
    /// ```
    pub fn alpha_ks(&self) -> &[f64] {
        self.memo.alpha_ks.get_or_init(|| kruger::kseries(&ALPHA, self.n(), self.ks_order))
    }

    /// Krüger Beta series `beta[1..=ks_order]`
    pub fn beta_ks(&self) -> &[f64] {
        self.memo.beta_ks.get_or_init(|| kruger::kseries(&BETA, self.n(), self.ks_order))
    }

    /// OSGR meridional coefficients
    pub fn mabcd(&self) -> [f64; 4] {
        *self.memo.mabcd.get_or_init(|| kruger::mabcd(self.n()))
    }

    /// Recomputes the shape parameters from `(a, b)` and checks each against
    /// its value derived from `f`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Inconsistent`] naming the first mismatch.
    pub fn validate(&self) -> Result<(), Error> {
        let (a, b, f) = (self.a, self.b, self.f);
        let tol = *TOL;

        if self.is_ellipsoidal() {
            check_eq("b_a", self.b_a(), 1. - f, tol)?;
            check_eq("e2", a_b2e2(a, b), self.e2(), tol)?;
            check_eq("e22", a_b2e22(a, b), self.e22(), tol)?;
            check_eq("e32", a_b2e32(a, b), self.e32(), tol)?;
            check_eq("n", a_b2n(a, b), self.n(), tol)?;
            check_eq("f2", self.a_b() - 1., self.f2(), tol)?;
            check_eq("e12", 1. - self.e2(), self.e12(), tol)?;
            check_eq("e", a_b2e(a, b), self.e(), tol)?;
            if self.f_ != 0. {
                check_eq("f_", self.f_, 1. / f, tol)?;
            }
        } else {
            check_eq("b", b, a, 0.)?;
            check_eq("f_", self.f_, 0., 0.)?;
        }
        check_eq("b2_a2", self.b2_a2(), self.e12(), EPS)
    }
}

impl PartialEq for Ellipsoid {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && (self.b == other.b || self.f == other.f)
    }
}

impl Display for Ellipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = [
            ("a", self.a),
            ("b", self.b),
            ("f_", self.f_),
            ("f", self.f),
            ("f2", self.f2()),
            ("n", self.n()),
            ("e", self.e()),
            ("e2", self.e2()),
            ("e22", self.e22()),
            ("e32", self.e32()),
            ("L", self.L()),
            ("R1", self.R1()),
            ("R2", self.R2()),
            ("R3", self.R3()),
        ];

        write!(f, "name='{}'", self.name)?;
        for (name, value) in fields {
            write!(f, ", {name}={}", fstr(value, 8))?;
        }
        Ok(())
    }
}

// ================================
// Conversions between shape parameters, 0 when (near-)spherical
// ================================

fn spherical(f: f64) -> bool {
    f.abs() < EPS || f > EPS1
}

fn spherical_(f_: f64) -> bool {
    f_.abs() < EPS || f_.abs() > 1. / EPS
}

fn spherical_a_b(a: f64, b: f64) -> bool {
    a < EPS || b < EPS || (a - b).abs() < EPS
}

/// Eccentricity from equatorial and polar radius
pub fn a_b2e(a: f64, b: f64) -> f64 {
    a_b2e2(a, b).abs().sqrt()
}

/// Eccentricity squared `1 - (b / a)^2`
pub fn a_b2e2(a: f64, b: f64) -> f64 {
    spherical_a_b(a, b).ternary_lazy(|| 0., || 1. - (b / a).powi(2))
}

/// Second eccentricity squared `(a / b)^2 - 1`
pub fn a_b2e22(a: f64, b: f64) -> f64 {
    spherical_a_b(a, b).ternary_lazy(|| 0., || (a / b).powi(2) - 1.)
}

/// Third eccentricity squared `(a^2 - b^2) / (a^2 + b^2)`
pub fn a_b2e32(a: f64, b: f64) -> f64 {
    let (a2, b2) = (a * a, b * b);
    spherical_a_b(a2, b2).ternary_lazy(|| 0., || (a2 - b2) / (a2 + b2))
}

/// Flattening `(a - b) / a`
pub fn a_b2f(a: f64, b: f64) -> f64 {
    let f = spherical_a_b(a, b).ternary_lazy(|| 0., || (a - b) / a);
    spherical(f).ternary(0., f)
}

/// Inverse flattening `a / (a - b)`
pub fn a_b2f_(a: f64, b: f64) -> f64 {
    let f_ = spherical_a_b(a, b).ternary_lazy(|| 0., || a / (a - b));
    spherical_(f_).ternary(0., f_)
}

/// Second flattening `(a - b) / b`
pub fn a_b2f2(a: f64, b: f64) -> f64 {
    let t = spherical_a_b(a, b).ternary(0., a - b);
    (t.abs() < EPS).ternary_lazy(|| 0., || t / b)
}

/// Third flattening `(a - b) / (a + b)`
pub fn a_b2n(a: f64, b: f64) -> f64 {
    let t = spherical_a_b(a, b).ternary(0., a - b);
    (t.abs() < EPS).ternary_lazy(|| 0., || t / (a + b))
}

/// Polar radius from equatorial radius and flattening
pub fn a_f2b(a: f64, f: f64) -> f64 {
    spherical(f).ternary_lazy(|| a, || a * (1. - f))
}

/// Polar radius from equatorial radius and inverse flattening
pub fn a_f_2b(a: f64, f_: f64) -> f64 {
    spherical_(f_).ternary_lazy(|| a, || a * (f_ - 1.) / f_)
}

/// Equatorial radius from polar radius and flattening
pub fn b_f2a(b: f64, f: f64) -> f64 {
    let t = 1. - f;
    (spherical(f) || t.abs() < EPS).ternary_lazy(|| b, || b / t)
}

/// Equatorial radius from polar radius and inverse flattening
pub fn b_f_2a(b: f64, f_: f64) -> f64 {
    let t = f_ - 1.;
    (spherical_(f_) || t.abs() < EPS || (t - f_).abs() < EPS).ternary_lazy(|| b, || b * f_ / t)
}

/// Eccentricity squared `f (2 - f)`
pub fn f2e2(f: f64) -> f64 {
    spherical(f).ternary_lazy(|| 0., || f * (2. - f))
}

/// Second eccentricity squared `f (2 - f) / (1 - f)^2`
pub fn f2e22(f: f64) -> f64 {
    let t = (1. - f).powi(2);
    (t < EPS).ternary_lazy(|| f64::INFINITY, || f2e2(f) / t)
}

/// Third eccentricity squared `e2 / (2 - e2)`
pub fn f2e32(f: f64) -> f64 {
    let e2 = f2e2(f);
    e2 / (2. - e2)
}

/// Flattening from inverse flattening
pub fn f_2f(f_: f64) -> f64 {
    let f = spherical_(f_).ternary_lazy(|| 0., || 1. / f_);
    spherical(f).ternary(0., f)
}

/// Inverse flattening from flattening
pub fn f2f_(f: f64) -> f64 {
    let f_ = spherical(f).ternary_lazy(|| 0., || 1. / f);
    spherical_(f_).ternary(0., f_)
}

/// Second flattening `f / (1 - f)`
pub fn f2f2(f: f64) -> f64 {
    let t = 1. - f;
    if spherical(f) {
        0.
    } else if t.abs() < EPS {
        f64::INFINITY
    } else {
        f / t
    }
}

/// Third flattening `f / (2 - f)`
pub fn f2n(f: f64) -> f64 {
    spherical(f).ternary_lazy(|| 0., || f / (2. - f))
}

/// Eccentricity squared from third flattening `4n / (1 + n)^2`
pub fn n2e2(n: f64) -> f64 {
    let t = (1. + n).powi(2);
    if n.abs() < EPS {
        0.
    } else if t < EPS {
        f64::NEG_INFINITY
    } else {
        4. * n / t
    }
}

/// Flattening from third flattening `2n / (1 + n)`
pub fn n2f(n: f64) -> f64 {
    let t = n + 1.;
    let f = if n.abs() < EPS {
        0.
    } else if t < EPS {
        f64::NEG_INFINITY
    } else {
        2. * n / t
    };
    spherical(f).ternary(0., f)
}
