#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::many_single_char_names,
    clippy::similar_names
)]

//! Reference ellipsoids, auxiliary latitudes, radii of curvature and the
//! [UPS](https://en.wikipedia.org/wiki/Universal_polar_stereographic_coordinate_system)
//! projection built on top of them.
//!
//! ```
//! use ellipsoid_ups::{EllipsoidRegistry, ups::{to_ups, UpsOptions}};
//!
//! let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
//! let coord = to_ups(85.0, 0.0, &wgs84, UpsOptions::default()).unwrap();
//!
//! assert_eq!(coord.to_string(), "00Z N 2000000 1444543");
//! ```

use thiserror::Error;

pub mod auxlat;
pub mod curvature;
pub mod elliptic;
pub mod ellipsoid;
pub mod kruger;
pub mod latlon;
pub mod registry;
pub mod ups;
pub mod utility;

pub use auxlat::AuxLatitude;
pub use curvature::Curvature2;
pub use ellipsoid::Ellipsoid;
pub use latlon::LatLon;
pub use registry::EllipsoidRegistry;
pub use ups::{Band, Pole, Ups};
pub use utility::range_errors;

pub mod projections {
    pub mod polar_stereographic;
    pub mod transverse_mercator;

    pub use polar_stereographic::PolarStereographic;
    pub use transverse_mercator::TransverseMercator;
}

pub(crate) mod constants;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Ellipsoid parameters are not valid: {0}")]
    InvalidEllipsoid(String),
    #[error("Kruger series order {0} not in (4, 6, 8)")]
    InvalidKsOrder(usize),
    #[error("Scale factor is not valid: {0}")]
    InvalidScale(String),
    #[error("{name} {value} outside of valid range [{low}, {high}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },
    #[error("Latitude not in UPS range: {0}")]
    OutsideUps(String),
    #[error("UPS coordinate is invalid: {0}")]
    InvalidUps(String),
    #[error("Ellipsoid named {0:?} already exists")]
    DuplicateName(String),
    #[error("No ellipsoid named {0:?}")]
    UnknownEllipsoid(String),
    #[error("Pole {0:?} is not N[orth] or S[outh]")]
    InvalidPole(String),
    #[error("{name} = {value:e} vs {expected:e} exceeds eps {eps:e}")]
    Inconsistent {
        name: String,
        value: f64,
        expected: f64,
        eps: f64,
    },
}

pub trait ParseCoord {
    /// Parses a coordinate string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not describe a valid coordinate.
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses any [`ParseCoord`] type from a string.
///
/// # Errors
///
/// Propagates the error of the target type's parser.
pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }

    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T,
    {
        if *self { r#true() } else { r#false() }
    }
}
