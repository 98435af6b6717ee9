use std::{fmt::Display, sync::Arc};

use crate::{Error, Ellipsoid, ups::{to_ups, Ups, UpsOptions}};

/// Representation of a geodetic Latitude/Longitude point. Can be projected
/// to [`Ups`] on any [`Ellipsoid`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range [-90,90]
    /// * Longitude must be in range [-180,180)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::LatLon;
    ///
    /// let coord = LatLon::create(-84.5, 135.25).unwrap();
    ///
    /// assert_eq!(coord.latitude(), -84.5);
    /// assert_eq!(coord.longitude(), 135.25);
    ///
    /// assert!(LatLon::create(100.0, 0.0).is_err());
    /// assert!(LatLon::create(0.0, 180.0).is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        if !(-90_f64..=90_f64).contains(&lat) {
            Err(Error::OutOfRange { name: "Latitude", value: lat, low: -90., high: 90. })
        } else if !(-180_f64..180_f64).contains(&lon) {
            Err(Error::OutOfRange { name: "Longitude", value: lon, low: -180., high: 180. })
        } else {
            Ok(LatLon::new(lat, lon))
        }
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether the current point is in the northern hemisphere.
    ///
    /// # Example
    ///
    /// ```
    /// use ellipsoid_ups::LatLon;
    ///
    /// assert!(LatLon::create(88.0, 10.0).unwrap().is_north());
    /// assert!(!LatLon::create(-88.0, 10.0).unwrap().is_north());
    /// ```
    pub fn is_north(&self) -> bool {
        self.latitude.is_sign_positive()
    }

    /// Projects this point to [`Ups`] on `ellipsoid`.
    ///
    /// # Errors
    ///
    /// As [`to_ups`].
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{EllipsoidRegistry, LatLon, Band, ups::UpsOptions};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let coord = LatLon::create(-80.0, -45.0).unwrap();
    /// let ups = coord.to_ups(&wgs84, UpsOptions::default()).unwrap();
    ///
    /// assert_eq!(ups.band(), Band::A);
    /// assert!((ups.easting() - 1_213_024.703_929_908).abs() < 1e-6);
    /// ```
    pub fn to_ups(&self, ellipsoid: &Arc<Ellipsoid>, options: UpsOptions) -> Result<Ups, Error> {
        to_ups(self.latitude, self.longitude, ellipsoid, options)
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_bounds() {
        assert!(LatLon::create(90., -180.).is_ok());
        assert!(LatLon::create(-90., 179.999).is_ok());
        assert_eq!(
            LatLon::create(-90.5, 0.).unwrap_err(),
            Error::OutOfRange { name: "Latitude", value: -90.5, low: -90., high: 90. }
        );
    }

    #[test]
    fn display_shortest() {
        assert_eq!(LatLon::new(84.5, -0.25).to_string(), "84.5 -0.25");
    }
}
