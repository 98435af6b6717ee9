use std::sync::atomic::{AtomicBool, Ordering};

use crate::{ThisOrThat, Error};

#[allow(dead_code)]
pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: i32 = 90;
    /// Minutes per degree
    pub const DM: i32 = 60;
    /// Seconds per minute
    pub const MS: i32 = 60;
    /// Degrees per half turn
    pub const HD: i32 = 2 * QD;
    /// Degrees per turn
    pub const TD: i32 = 2 * HD;
    /// Seconds per degree
    pub const DS: i32 = DM * MS;
}

static RANGE_ERRORS: AtomicBool = AtomicBool::new(true);

/// Gets and optionally sets the process-wide range error policy.
///
/// With `true` (the default) latitudes outside their valid range fail with
/// [`Error::OutOfRange`], with `false` they are silently clipped. Returns the
/// previous setting.
///
/// Set this once, during start-up.
///
/// # Usage
///
/// ```
/// use ellipsoid_ups::range_errors;
///
/// // Query without changing
/// assert!(range_errors(None));
/// ```
pub fn range_errors(raiser: Option<bool>) -> bool {
    match raiser {
        Some(raise) => RANGE_ERRORS.swap(raise, Ordering::SeqCst),
        None => RANGE_ERRORS.load(Ordering::SeqCst),
    }
}

/// Clip `value` to `[-limit, limit]`, failing instead if range errors are
/// enabled. A `limit` of zero disables clipping.
pub(crate) fn clip(value: f64, limit: f64, name: &'static str) -> Result<f64, Error> {
    if limit > 0. && value.abs() > limit {
        if range_errors(None) {
            return Err(Error::OutOfRange {
                name,
                value,
                low: -limit,
                high: limit,
            });
        }
        return Ok(limit.copysign(value));
    }
    Ok(value)
}

/// Clip a latitude in degrees to `[-90, 90]`.
pub(crate) fn clip_lat(lat: f64) -> Result<f64, Error> {
    clip(lat, f64::from(dms::QD), "Latitude")
}

/// Error-free transformation of a sum, returns `(s, t)` with `s + t == u + v`.
pub(crate) fn special_sum(u: f64, v: f64) -> (f64, f64) {
    let s = u + v;
    let up = s - v;
    let vpp = s - up;

    let up = up - u;
    let vpp = vpp - v;

    // An exact zero keeps its sign, anything else carries the error
    #[allow(clippy::float_cmp)]
    let t = (s == 0.).ternary_lazy(|| s, || -(up + vpp));

    (s, t)
}

/// Running sum which tracks its own rounding error.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fsum {
    sum: f64,
    residual: f64,
}

impl Fsum {
    pub fn new(x: f64) -> Fsum {
        Self {
            sum: x,
            residual: 0.,
        }
    }

    /// Adds `x` and returns the updated total.
    pub fn add(&mut self, x: f64) -> f64 {
        let (s, t) = special_sum(self.sum, x);
        self.sum = s;
        self.residual += t;
        self.value()
    }

    /// Adds the exact product `x * y`, including its rounding error.
    pub fn add_product(&mut self, x: f64, y: f64) -> f64 {
        let p = x * y;
        self.add(p);
        self.add(x.mul_add(y, -p))
    }

    pub fn value(&self) -> f64 {
        self.sum + self.residual
    }
}

impl FromIterator<f64> for Fsum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Fsum::default();
        for x in iter {
            sum.add(x);
        }
        sum
    }
}

/// Accurate sum of a sequence of values
pub(crate) fn fsum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().collect::<Fsum>().value()
}

/// Accurate dot product of two sequences
pub(crate) fn fdot(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = Fsum::default();
    for (x, y) in a.iter().zip(b) {
        sum.add_product(*x, *y);
    }
    sum.value()
}

/// `[x, x^2, ..., x^n]`
pub(crate) fn fpowers(x: f64, n: usize) -> Vec<f64> {
    let mut powers = Vec::with_capacity(n);
    let mut p = x;
    for _ in 0..n {
        powers.push(p);
        p *= x;
    }
    powers
}

/// Fixed point format with trailing zeros stripped.
pub(crate) fn fstr(value: f64, prec: usize) -> String {
    let s = format!("{value:.prec$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Format an angle in either degrees, minutes or seconds, whichever is
/// the largest non-zero unit.
pub(crate) fn deg_dms(deg: f64, prec: usize) -> String {
    let d = deg.abs();
    let sign = (deg < 0.).ternary("-", "");
    if d >= 1. {
        format!("{sign}{d:.prec$}°")
    } else if d * f64::from(dms::DM) >= 1. {
        format!("{sign}{:.prec$}′", d * f64::from(dms::DM))
    } else {
        format!("{sign}{:.prec$}″", d * f64::from(dms::DS))
    }
}

pub(crate) trait GeoMath {
    fn is_zero(&self) -> bool;
    fn eps_eq(&self, other: Self) -> bool;
    fn hypot1(&self) -> Self;
    fn ang_normalize(&self) -> Self;
    fn ang_diff(&self, other: Self) -> Self;
    fn wrap180(&self) -> Self;
    fn eatanhe(&self, es: Self) -> Self;
    fn remainder(&self, denom: Self) -> Self;
    fn sincosd(&self) -> (Self, Self) where Self: Sized;
    fn atand(&self) -> Self;
}

impl GeoMath for f64 {
    fn is_zero(&self) -> bool {
        self.abs() < f64::EPSILON
    }

    fn eps_eq(&self, other: f64) -> bool {
        (*self - other).abs() < f64::EPSILON
    }

    fn hypot1(&self) -> f64 {
        1_f64.hypot(*self)
    }

    fn ang_normalize(&self) -> f64 {
        let value = self.remainder(f64::from(dms::TD));
        let hd = f64::from(dms::HD);

        if value.abs().eps_eq(hd) {
            hd.copysign(*self)
        }
        else {
            value
        }
    }

    fn ang_diff(&self, other: f64) -> f64 {
        let td = f64::from(dms::TD);
        // Use remainder instead of AngNormalize, since we treat boundary cases
        // later taking account of the error
        let (diff, err) = special_sum((-*self).remainder(td), other % td);
        // This second sum can only change d if abs(d) < 128, so don't need to
        // apply remainder yet again.
        let (diff, err) = special_sum(diff.remainder(td), err);

        let hd = f64::from(dms::HD);
        // Fix the sign if d = -180, 0, 180.
        if diff.is_zero() || diff.abs().eps_eq(hd) {
            // If e == 0, take sign from y - x
            // else (e != 0, implies d = +/-180), d and e must have opposite signs
            let sign = if err.is_zero() { other - *self } else { -err };
            diff.copysign(sign)
        }
        else {
            diff
        }
    }

    // [-180, 180)
    fn wrap180(&self) -> f64 {
        let value = self.remainder(f64::from(dms::TD));
        let hd = f64::from(dms::HD);
        (value >= hd).ternary(value - f64::from(dms::TD), value)
    }

    fn eatanhe(&self, es: f64) -> f64 {
        if es.is_sign_positive() {
            es * (es * *self).atanh()
        } else {
            -es * (es * *self).atan()
        }
    }

    fn remainder(&self, denom: Self) -> Self {
        *self - (*self / denom).round() * denom
    }

    fn sincosd(&self) -> (f64, f64) {
        // Reduce to [-45, 45] first so that multiples of 90 come out exact
        let r = self.remainder(f64::from(dms::TD));
        let q = (r / f64::from(dms::QD)).round();
        let (s, c) = (r - q * f64::from(dms::QD)).to_radians().sin_cos();

        #[allow(clippy::cast_possible_truncation)]
        let (s, c) = match (q as i32).rem_euclid(4) {
            0 => (s, c),
            1 => (c, -s),
            2 => (-s, -c),
            _ => (-c, s),
        };
        // Avoid -0 results
        (s + 0., c + 0.)
    }

    fn atand(&self) -> f64 {
        self.atan().to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fsum_recovers_lost_bits() {
        let naive = 1e16 + 1. - 1e16;
        assert_eq!(naive, 0.);
        assert_eq!(fsum([1e16, 1., -1e16]), 1.);
    }

    #[test]
    fn sincosd_exact_at_quadrants() {
        assert_eq!(90_f64.sincosd(), (1., 0.));
        assert_eq!(180_f64.sincosd(), (0., -1.));
        assert_eq!((-90_f64).sincosd(), (-1., 0.));
        assert_eq!(360_f64.sincosd(), (0., 1.));
    }

    #[test]
    fn wrap180_half_open() {
        assert_eq!(180_f64.wrap180(), -180.);
        assert_eq!((-180_f64).wrap180(), -180.);
        assert_eq!(270_f64.wrap180(), -90.);
        assert_eq!(45_f64.wrap180(), 45.);
    }

    #[test]
    fn fstr_strips_zeros() {
        assert_eq!(fstr(298.257_223_563, 8), "298.25722356");
        assert_eq!(fstr(6_378_137., 8), "6378137");
        assert_eq!(fstr(-0.000_000_001, 3), "0");
    }

    #[test]
    fn deg_dms_picks_unit() {
        assert_eq!(deg_dms(12.5, 1), "12.5°");
        assert_eq!(deg_dms(-0.5, 1), "-30.0′");
        assert_eq!(deg_dms(0.005, 1), "18.0″");
    }

    #[test]
    fn fpowers_sequence() {
        assert_eq!(fpowers(2., 4), vec![2., 4., 8., 16.]);
    }
}
