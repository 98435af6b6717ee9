//! [Universal Polar Stereographic](https://en.wikipedia.org/wiki/Universal_polar_stereographic_coordinate_system)
//! coordinates on any [`Ellipsoid`].

use std::{fmt::Display, str::FromStr, sync::{Arc, OnceLock}};

use crate::{
    Ellipsoid, Error, LatLon, ParseCoord, ThisOrThat,
    constants::{UPS_FALSING, UPS_K0, UPS_LAT_MAX, UPS_LAT_MIN, UPS_ZONE},
    projections::PolarStereographic,
    registry::EllipsoidRegistry,
    utility::{clip_lat, deg_dms, fstr, GeoMath},
};

/// Center of the projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pole {
    #[cfg_attr(feature = "serde", serde(alias = "North"))]
    N,
    #[cfg_attr(feature = "serde", serde(alias = "South"))]
    S,
}

impl Pole {
    pub fn is_north(&self) -> bool {
        *self == Pole::N
    }

    /// Hemisphere of a latitude, `0` counts as north.
    pub fn from_lat(lat: f64) -> Pole {
        (lat < 0.).ternary(Pole::S, Pole::N)
    }
}

impl FromStr for Pole {
    type Err = Error;

    /// Any non-empty prefix of `NORTH` or `SOUTH`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if upper.is_empty() {
            Err(Error::InvalidPole(s.to_string()))
        } else if "NORTH".starts_with(&upper) {
            Ok(Pole::N)
        } else if "SOUTH".starts_with(&upper) {
            Ok(Pole::S)
        } else {
            Err(Error::InvalidPole(s.to_string()))
        }
    }
}

impl Display for Pole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.is_north().ternary("N", "S"))
    }
}

/// Polar band letter, the quadrant of a point around its pole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Band {
    /// South, western longitudes
    A,
    /// South, eastern longitudes
    B,
    /// North, western longitudes
    Y,
    /// North, eastern longitudes
    Z,
}

impl Band {
    const ALL: [Band; 4] = [Band::A, Band::B, Band::Y, Band::Z];

    /// Band of `(lat, lon)` in degrees, longitude `0` counts as east.
    pub fn from_latlon(lat: f64, lon: f64) -> Band {
        Self::around(Pole::from_lat(lat), lon)
    }

    /// Band around `pole` on the side of longitude `lon`.
    pub fn around(pole: Pole, lon: f64) -> Band {
        Self::ALL[pole.is_north().ternary(2, 0) + (lon < 0.).ternary(0, 1)]
    }

    /// The pole this band lies around.
    pub fn pole(&self) -> Pole {
        match self {
            Band::A | Band::B => Pole::S,
            Band::Y | Band::Z => Pole::N,
        }
    }
}

impl FromStr for Band {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Band::A),
            "B" => Ok(Band::B),
            "Y" => Ok(Band::Y),
            "Z" => Ok(Band::Z),
            _ => Err(Error::InvalidUps(format!("band {s:?} not in A, B, Y or Z"))),
        }
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Band::A => "A",
            Band::B => "B",
            Band::Y => "Y",
            Band::Z => "Z",
        };
        write!(f, "{letter}")
    }
}

/// Result of [`ups_zone_band`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpsZoneBand {
    pub zone: i32,
    /// `None` for a latitude between the UPS limits
    pub band: Option<Band>,
    pub pole: Pole,
    pub lat: f64,
    /// Longitude in `[-180, 180)`
    pub lon: f64,
}

/// Classify `(lat, lon)` in degrees for UPS.
///
/// Latitudes at or below `-79.5` belong to the south pole, at or above
/// `83.5` to the north pole. These limits include the 30' overlap with UTM.
///
/// # Errors
///
/// Returns [`Error::OutsideUps`] for a latitude between the limits when
/// `strict`, and [`Error::OutOfRange`] if `lat` is outside `[-90, 90]` and
/// range errors are enabled.
///
/// # Usage
///
/// ```
/// use ellipsoid_ups::{Band, Pole, ups::ups_zone_band};
///
/// let zb = ups_zone_band(-80.0, 190.0, true).unwrap();
///
/// assert_eq!(zb.band, Some(Band::A));
/// assert_eq!(zb.pole, Pole::S);
/// assert_eq!(zb.lon, -170.0);
///
/// assert!(ups_zone_band(45.0, 0.0, true).is_err());
/// assert_eq!(ups_zone_band(45.0, 0.0, false).unwrap().band, None);
/// ```
pub fn ups_zone_band(lat: f64, lon: f64, strict: bool) -> Result<UpsZoneBand, Error> {
    let lat = clip_lat(lat)?;
    let lon = lon.wrap180();

    let (band, pole) = if lat <= UPS_LAT_MIN {
        (Some(Band::from_latlon(lat, lon)), Pole::S)
    } else if lat >= UPS_LAT_MAX {
        (Some(Band::from_latlon(lat, lon)), Pole::N)
    } else if strict {
        return Err(Error::OutsideUps(format!(
            "{} inside UTM range ({UPS_LAT_MIN}, {UPS_LAT_MAX})",
            deg_dms(lat, 6)
        )));
    } else {
        (None, Pole::from_lat(lat))
    };

    Ok(UpsZoneBand {
        zone: UPS_ZONE,
        band,
        pole,
        lat,
        lon,
    })
}

/// Options for [`to_ups`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpsOptions {
    /// Projection center, by default the pole of the point's hemisphere
    pub pole: Option<Pole>,
    /// Offset easting and northing by the 2,000 km false origin
    pub falsed: bool,
    /// Fail for latitudes between the UPS limits
    pub strict: bool,
}

impl Default for UpsOptions {
    fn default() -> Self {
        Self {
            pole: None,
            falsed: true,
            strict: true,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Geodetic {
    latlon: LatLon,
    convergence: f64,
    scale: f64,
}

/// A UPS coordinate bound to an ellipsoid.
///
/// The geodetic position, meridian convergence and point scale are
/// computed from easting and northing on first use and kept.
#[derive(Clone, Debug)]
pub struct Ups {
    pole: Pole,
    easting: f64,
    northing: f64,
    band: Option<Band>,
    falsed: bool,
    scale0: f64,
    ellipsoid: Arc<Ellipsoid>,
    geodetic: OnceLock<Geodetic>,
}

impl Ups {
    /// Internal-only constructor that doesn't check the band
    pub(crate) fn new(
        pole: Pole,
        easting: f64,
        northing: f64,
        band: Option<Band>,
        ellipsoid: Arc<Ellipsoid>,
        falsed: bool,
    ) -> Ups {
        Self {
            pole,
            easting,
            northing,
            band,
            falsed,
            scale0: UPS_K0,
            ellipsoid,
            geodetic: OnceLock::new(),
        }
    }

    /// Tries to create a UPS coordinate. `falsed` tells whether easting and
    /// northing include the false origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUps`] if easting or northing are not finite
    /// or `band` lies around the other pole.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{Band, EllipsoidRegistry, Pole, Ups};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    ///
    /// assert!(Ups::create(Pole::N, 2.0e6, 1.5e6, Some(Band::Z), &wgs84, true).is_ok());
    /// assert!(Ups::create(Pole::N, 2.0e6, 1.5e6, Some(Band::A), &wgs84, true).is_err());
    /// ```
    pub fn create(
        pole: Pole,
        easting: f64,
        northing: f64,
        band: Option<Band>,
        ellipsoid: &Arc<Ellipsoid>,
        falsed: bool,
    ) -> Result<Ups, Error> {
        if !(easting.is_finite() && northing.is_finite()) {
            return Err(Error::InvalidUps(format!("easting {easting} or northing {northing} not finite")));
        }
        if let Some(band) = band {
            if band.pole() != pole {
                return Err(Error::InvalidUps(format!("band {band} not around pole {pole}")));
            }
        }

        Ok(Ups::new(pole, easting, northing, band, Arc::clone(ellipsoid), falsed))
    }

    /// Parses a string like this coordinate's, on the same ellipsoid and
    /// with the same falsing.
    ///
    /// # Errors
    ///
    /// As [`parse_ups`].
    pub fn parse(&self, value: &str) -> Result<Ups, Error> {
        parse_ups(value, &self.ellipsoid, self.falsed)
    }

    /// Always `0`, UPS has no real zones.
    pub fn zone(&self) -> i32 {
        UPS_ZONE
    }

    pub fn pole(&self) -> Pole {
        self.pole
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Whether easting and northing include the false origin.
    pub fn is_falsed(&self) -> bool {
        self.falsed
    }

    /// Central scale factor, `0.994` unless rescaled.
    pub fn scale0(&self) -> f64 {
        self.scale0
    }

    pub fn ellipsoid(&self) -> &Arc<Ellipsoid> {
        &self.ellipsoid
    }

    /// False easting and northing included in this coordinate, zero when
    /// unfalsed.
    pub fn falsed2(&self) -> (f64, f64) {
        let f = self.falsed.ternary(UPS_FALSING, 0.);
        (f, f)
    }

    /// Easting and northing, with or without the false origin regardless of
    /// how they are stored.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{EllipsoidRegistry, Pole, Ups};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let ups = Ups::create(Pole::S, 2.0e6, 2.5e6, None, &wgs84, true).unwrap();
    ///
    /// assert_eq!(ups.easting_northing(false), (0.0, 500_000.0));
    /// assert_eq!(ups.easting_northing(true), (2.0e6, 2.5e6));
    /// ```
    pub fn easting_northing(&self, falsed: bool) -> (f64, f64) {
        let offset = match (self.falsed, falsed) {
            (true, false) => -UPS_FALSING,
            (false, true) => UPS_FALSING,
            _ => 0.,
        };
        (self.easting + offset, self.northing + offset)
    }

    fn geodetic(&self) -> &Geodetic {
        self.geodetic.get_or_init(|| {
            let (x, y) = self.easting_northing(false);
            let (lat, lon, convergence, scale) = PolarStereographic::with_scale(&self.ellipsoid, self.scale0)
                .reverse(self.pole.is_north(), x, y);

            Geodetic {
                latlon: LatLon::new(lat, lon),
                convergence,
                scale,
            }
        })
    }

    /// Converts from [`Ups`] to [`LatLon`]
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{EllipsoidRegistry, Pole, Ups};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let ups = Ups::create(Pole::N, 2.0e6, 1_444_542.608_617_322, None, &wgs84, true).unwrap();
    /// let coord = ups.to_latlon();
    ///
    /// assert!((coord.latitude() - 85.0).abs() < 1e-12);
    /// assert_eq!(coord.longitude(), 0.0);
    /// ```
    pub fn to_latlon(&self) -> LatLon {
        self.geodetic().latlon
    }

    /// Polar band around [`Ups::pole`], from the longitude of the point
    /// unless it was given one.
    pub fn band(&self) -> Band {
        self.band
            .unwrap_or_else(|| Band::around(self.pole, self.to_latlon().longitude))
    }

    /// Hemisphere of the point, which differs from [`Ups::pole`] for a
    /// point projected about the other pole.
    pub fn hemisphere(&self) -> Pole {
        Pole::from_lat(self.to_latlon().latitude)
    }

    /// Meridian convergence in degrees.
    pub fn convergence(&self) -> f64 {
        self.geodetic().convergence
    }

    /// Point scale factor.
    pub fn scale(&self) -> f64 {
        self.geodetic().scale
    }

    /// Copy of this coordinate, optionally checking its pole.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUps`] if `pole` is not this coordinate's
    /// pole, coordinates are not transferred between poles.
    pub fn to_ups_pole(&self, pole: Option<Pole>) -> Result<Ups, Error> {
        match pole {
            Some(pole) if pole != self.pole => Err(Error::InvalidUps(format!(
                "no transfer from pole {} to pole {pole}",
                self.pole
            ))),
            _ => Ok(self.clone()),
        }
    }

    /// Sets the central scale factor so the point scale at latitude `|lat|`
    /// equals `scale0`. Changing it discards the computed geodetic position
    /// and band.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`] if `scale0` is not finite or below
    /// machine epsilon, [`Error::OutOfRange`] as [`ups_zone_band`].
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{EllipsoidRegistry, Pole, Ups};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let mut ups = Ups::create(Pole::N, 2.0e6, 2.0e6, None, &wgs84, true).unwrap();
    /// ups.rescale0(90.0, 1.0).unwrap();
    ///
    /// assert_eq!(ups.scale0(), 1.0);
    /// assert_eq!(ups.scale(), 1.0);
    /// ```
    pub fn rescale0(&mut self, lat: f64, scale0: f64) -> Result<(), Error> {
        if !(scale0.is_finite() && scale0 >= f64::EPSILON) {
            return Err(Error::InvalidScale(format!("scale0 {scale0} not in [{}, inf)", f64::EPSILON)));
        }

        let zb = ups_zone_band(lat.abs(), 0., false)?;
        let (_, _, _, k1) = PolarStereographic::with_scale(&self.ellipsoid, 1.).forward(true, zb.lat, 0.);
        let k0 = scale0 / k1;

        #[allow(clippy::float_cmp)]
        let unchanged = k0 == self.scale0;
        if !unchanged {
            self.scale0 = k0;
            self.band = None;
            self.geodetic = OnceLock::new();
        }
        Ok(())
    }

    fn fields(&self, prec: usize, band: bool) -> [String; 4] {
        let band = band.ternary_lazy(|| self.band().to_string(), String::new);
        [
            format!("{UPS_ZONE:02}{band}"),
            self.pole.to_string(),
            fstr(self.easting, prec),
            fstr(self.northing, prec),
        ]
    }

    /// Bracketed form `[Z:00B, P:S, E:2000000, N:2000000]`, easting and
    /// northing with `prec` decimals. Adds the polar band with `band`, and
    /// convergence `C` and scale `S` with `cs`.
    pub fn to_repr(&self, prec: usize, band: bool, cs: bool) -> String {
        let [z, p, e, n] = self.fields(prec, band);
        let mut repr = format!("[Z:{z}, P:{p}, E:{e}, N:{n}");
        if cs {
            repr += &format!(", C:{}, S:{}", deg_dms(self.convergence(), 8), fstr(self.scale(), 8));
        }
        repr + "]"
    }

    /// Space separated form `00B S 2000000 2000000`, see
    /// [`Ups::to_repr`].
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::{EllipsoidRegistry, ups::{to_ups, UpsOptions}};
    ///
    /// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    /// let ups = to_ups(85.0, 0.0, &wgs84, UpsOptions::default()).unwrap();
    ///
    /// assert_eq!(ups.to_str(0, false, false), "00 N 2000000 1444543");
    /// assert_eq!(ups.to_str(2, true, true), "00Z N 2000000 1444542.61 0.00000000″ 0.99589479");
    /// ```
    pub fn to_str(&self, prec: usize, band: bool, cs: bool) -> String {
        let mut fields = self.fields(prec, band).join(" ");
        if cs {
            fields += &format!(" {} {}", deg_dms(self.convergence(), 8), fstr(self.scale(), 8));
        }
        fields
    }
}

impl PartialEq for Ups {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.pole == other.pole
            && self.easting_northing(true) == other.easting_northing(true)
            && self.band() == other.band()
            && self.ellipsoid == other.ellipsoid
    }
}

impl Display for Ups {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str(0, true, false))
    }
}

impl ParseCoord for Ups {
    /// Parses a falsed WGS84 coordinate, see [`parse_ups`].
    fn parse_coord(value: &str) -> Result<Ups, Error> {
        let wgs84 = EllipsoidRegistry::standard().lookup("WGS84")?;
        parse_ups(value, &wgs84, true)
    }
}

/// Parses `"[zone][band] pole easting northing"` where zone is `00`, `0` or
/// empty and band is `A`, `B`, `Y`, `Z` or empty. Commas count as spaces.
///
/// # Errors
///
/// Returns [`Error::InvalidUps`] for a malformed string or a band around the
/// other pole, [`Error::InvalidPole`] for an unknown pole.
///
/// # Usage
///
/// ```
/// use ellipsoid_ups::{Band, EllipsoidRegistry, Pole, ups::parse_ups};
///
/// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
/// let ups = parse_ups("00B S 2000000 2000000", &wgs84, true).unwrap();
///
/// assert_eq!(ups.pole(), Pole::S);
/// assert_eq!(ups.band(), Band::B);
/// assert_eq!(ups.easting_northing(false), (0.0, 0.0));
/// assert!((ups.to_latlon().latitude() + 90.0).abs() < 1e-12);
/// ```
pub fn parse_ups(value: &str, ellipsoid: &Arc<Ellipsoid>, falsed: bool) -> Result<Ups, Error> {
    let invalid = || Error::InvalidUps(value.to_string());

    let normalized = value.replace(',', " ");
    let pieces: Vec<&str> = normalized.split_whitespace().collect();
    let (zone_band, pole, easting, northing) = match pieces[..] {
        [zb, p, e, n] => (zb, p, e, n),
        [p, e, n] => ("", p, e, n),
        _ => return Err(invalid()),
    };

    let split = zone_band
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(zone_band.len());
    let (zone, band) = zone_band.split_at(split);

    if zone.len() > 2 || (!zone.is_empty() && zone.parse::<i32>() != Ok(UPS_ZONE)) {
        return Err(invalid());
    }
    let band = (!band.is_empty())
        .then(|| band.parse::<Band>())
        .transpose()?;

    let pole = pole.parse::<Pole>()?;
    let easting = easting.parse::<f64>().map_err(|_| invalid())?;
    let northing = northing.parse::<f64>().map_err(|_| invalid())?;

    Ups::create(pole, easting, northing, band, ellipsoid, falsed)
}

/// Converts `(lat, lon)` in degrees to [`Ups`] on `ellipsoid`.
///
/// # Errors
///
/// As [`ups_zone_band`] with `options.strict`.
///
/// # Usage
///
/// ```
/// use ellipsoid_ups::{Band, EllipsoidRegistry, Pole, ups::{to_ups, UpsOptions}};
///
/// let wgs84 = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
/// let ups = to_ups(85.0, 0.0, &wgs84, UpsOptions::default()).unwrap();
///
/// assert_eq!(ups.pole(), Pole::N);
/// assert_eq!(ups.band(), Band::Z);
/// assert_eq!(ups.easting(), 2_000_000.0);
/// assert!((ups.northing() - 1_444_542.608_617_322).abs() < 1e-6);
/// assert!((ups.scale() - 0.995_894_791_674_974_6).abs() < 1e-12);
/// ```
pub fn to_ups(lat: f64, lon: f64, ellipsoid: &Arc<Ellipsoid>, options: UpsOptions) -> Result<Ups, Error> {
    let zb = ups_zone_band(lat, lon, options.strict)?;
    let pole = options.pole.unwrap_or(zb.pole);

    let (mut x, mut y, convergence, scale) = PolarStereographic::ups(ellipsoid)
        .forward(pole.is_north(), zb.lat, zb.lon);
    if options.falsed {
        x += UPS_FALSING;
        y += UPS_FALSING;
    }

    // A point projected about the other pole gets the band of that pole
    let band = zb.band.filter(|band| band.pole() == pole);
    let mut ups = Ups::new(pole, x, y, band, Arc::clone(ellipsoid), options.falsed);
    ups.geodetic = OnceLock::from(Geodetic {
        latlon: LatLon::new(zb.lat, zb.lon),
        convergence,
        scale,
    });

    Ok(ups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wgs84() -> Arc<Ellipsoid> {
        EllipsoidRegistry::standard().lookup("WGS84").unwrap()
    }

    #[test]
    fn pole_prefixes() {
        assert_eq!("n".parse::<Pole>().unwrap(), Pole::N);
        assert_eq!("Nor".parse::<Pole>().unwrap(), Pole::N);
        assert_eq!(" south ".parse::<Pole>().unwrap(), Pole::S);
        assert!("".parse::<Pole>().is_err());
        assert!("NE".parse::<Pole>().is_err());
        assert!("Southern".parse::<Pole>().is_err());
    }

    #[test]
    fn band_quadrants() {
        assert_eq!(Band::from_latlon(-85., -1.), Band::A);
        assert_eq!(Band::from_latlon(-85., 0.), Band::B);
        assert_eq!(Band::from_latlon(85., -179.), Band::Y);
        assert_eq!(Band::from_latlon(85., 179.), Band::Z);
        assert_eq!(Band::Y.pole(), Pole::N);
        assert_eq!(Band::around(Pole::S, 30.), Band::B);
        assert_eq!(Band::around(Pole::N, -0.5), Band::Y);
    }

    #[test]
    fn limits_are_inclusive() {
        assert_eq!(ups_zone_band(-79.5, 0., true).unwrap().pole, Pole::S);
        assert_eq!(ups_zone_band(83.5, 0., true).unwrap().pole, Pole::N);
        assert!(matches!(ups_zone_band(83.49, 0., true), Err(Error::OutsideUps(_))));
        assert!(matches!(ups_zone_band(-79.49, 0., true), Err(Error::OutsideUps(_))));
    }

    #[test]
    fn forward_fills_cache() {
        let ups = to_ups(-80., -45., &wgs84(), UpsOptions::default()).unwrap();
        assert!(ups.geodetic.get().is_some());
        assert_eq!(ups.convergence(), 45.);
        assert_eq!(ups.to_latlon(), LatLon::new(-80., -45.));
    }

    #[test]
    fn unfalsed_view_is_an_offset() {
        let falsed = to_ups(84., 120., &wgs84(), UpsOptions::default()).unwrap();
        let options = UpsOptions { falsed: false, ..UpsOptions::default() };
        let unfalsed = to_ups(84., 120., &wgs84(), options).unwrap();

        assert_eq!(falsed.falsed2(), (UPS_FALSING, UPS_FALSING));
        assert_eq!(unfalsed.falsed2(), (0., 0.));
        assert_eq!(falsed.easting_northing(false), (unfalsed.easting(), unfalsed.northing()));
        assert_eq!(falsed, unfalsed);
    }

    #[test]
    fn no_pole_transfer() {
        let ups = to_ups(88., 10., &wgs84(), UpsOptions::default()).unwrap();
        assert_eq!(ups.to_ups_pole(None).unwrap(), ups);
        assert_eq!(ups.to_ups_pole(Some(Pole::N)).unwrap(), ups);
        assert!(matches!(ups.to_ups_pole(Some(Pole::S)), Err(Error::InvalidUps(_))));
    }

    #[test]
    fn rescale_rejects_tiny_scale() {
        let mut ups = to_ups(88., 10., &wgs84(), UpsOptions::default()).unwrap();
        assert!(matches!(ups.rescale0(88., 0.), Err(Error::InvalidScale(_))));
        assert!(matches!(ups.rescale0(88., f64::NAN), Err(Error::InvalidScale(_))));
        assert_eq!(ups.scale0(), UPS_K0);
    }

    #[test]
    fn parse_rejects_bad_strings() {
        let e = wgs84();
        for bad in ["", "00B S", "01B S 2000000 2000000", "000 S 1 2", "00C S 1 2", "00 S east 2"] {
            assert!(matches!(parse_ups(bad, &e, true), Err(Error::InvalidUps(_))), "{bad:?}");
        }
        assert!(matches!(parse_ups("00 X 1 2", &e, true), Err(Error::InvalidPole(_))));
        assert!(matches!(parse_ups("00A N 1 2", &e, true), Err(Error::InvalidUps(_))));
        assert!(parse_ups("N 2000000, 2000000", &e, true).is_ok());
        assert!(parse_ups("0Y N 1 2", &e, true).is_ok());
    }
}
