use lazy_static::lazy_static;

// Mean earth radius, IUGG R1 of WGS84
pub(crate) const R_M: f64 = 6_371_008.771_415;
// Equatorial earth radius, WGS84, EPSG:3785
pub(crate) const R_MA: f64 = 6_378_137.;
// Former FAI sphere earth radius
pub(crate) const R_FM: f64 = 6_371_000.;

// UPS central scale factor
pub(crate) const UPS_K0: f64 = 994.0 / 1000.;
// UPS false easting and northing
pub(crate) const UPS_FALSING: f64 = 2_000_000.;
// UPS pseudo zone
pub(crate) const UPS_ZONE: i32 = 0;
// UPS latitude limits, including the 30' overlap with UTM
pub(crate) const UPS_LAT_MIN: f64 = -79.5;
pub(crate) const UPS_LAT_MAX: f64 = 83.5;

// Upper bound for a valid flattening
pub(crate) const EPS1: f64 = 1. - f64::EPSILON;

lazy_static! {
    /// Tolerance for cross-checks and the conformal latitude Newton solve
    pub(crate) static ref TOL: f64 = (0.1 * f64::EPSILON).sqrt();
}
