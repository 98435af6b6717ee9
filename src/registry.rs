use std::{collections::HashMap, sync::Arc};

use lazy_static::lazy_static;

use crate::{Error, Ellipsoid, constants::{R_FM, R_M, R_MA}};

/// Standard bodies as `(name, a, b, f_)`. Without `b` the body is defined
/// by `a` and `f_` alone, `f_ == 0` is a sphere.
#[allow(clippy::unreadable_literal)]
const STANDARD: [(&str, f64, Option<f64>, f64); 41] = [
    ("Airy1830", 6377563.396, None, 299.3249646),
    ("AiryModified", 6377340.189, None, 299.3249646),
    ("Australia1966", 6378160.0, None, 298.25),
    ("Bessel1841", 6377397.155, Some(6356078.962818), 299.1528128),
    ("Clarke1866", 6378206.4, Some(6356583.8), 294.978698214),
    ("Clarke1880", 6378249.145, Some(6356514.86954978), 293.465),
    ("Clarke1880IGN", 6378249.2, Some(6356515.0), 293.466021294),
    ("Clarke1880Mod", 6378249.145, Some(6356514.96582849), 293.4663),
    ("CPM1799", 6375738.7, Some(6356671.92557493), 334.39),
    ("Delambre1810", 6376428.0, Some(6355957.92616372), 311.5),
    ("Engelis1985", 6378136.05, Some(6356751.32272154), 298.2566),
    ("Everest1969", 6377295.664, Some(6356094.667915), 300.8017),
    ("Fisher1968", 6378150.0, Some(6356768.33724438), 298.3),
    ("GEM10C", 6378137.0, Some(6356752.31424783), 298.2572236),
    ("GRS67", 6378160.0, None, 298.247167427),
    ("GRS80", 6378137.0, Some(6356752.314140347), 298.257222101),
    ("Helmert1906", 6378200.0, Some(6356818.16962789), 298.3),
    ("IERS1989", 6378136.0, None, 298.257),
    ("IERS1992TOPEX", 6378136.3, Some(6356751.61659215), 298.257223563),
    ("IERS2003", 6378136.6, Some(6356751.85797165), 298.25642),
    ("Intl1924", 6378388.0, None, 297.0),
    ("Intl1967", 6378157.5, Some(6356772.2), 298.24961539),
    ("Krassovski1940", 6378245.0, Some(6356863.01877305), 298.3),
    ("Krassowsky1940", 6378245.0, Some(6356863.01877305), 298.3),
    ("Maupertuis1738", 6397300.0, Some(6363806.28272251), 191.0),
    ("Mercury1960", 6378166.0, Some(6356784.28360711), 298.3),
    ("Mercury1968Mod", 6378150.0, Some(6356768.33724438), 298.3),
    ("NWL1965", 6378145.0, Some(6356759.76948868), 298.25),
    ("OSU86F", 6378136.2, Some(6356751.51693008), 298.2572236),
    ("OSU91A", 6378136.3, Some(6356751.6165948), 298.2572236),
    ("Plessis1817", 6376523.0, Some(6355862.93325557), 308.64),
    ("SGS85", 6378136.0, Some(6356751.30156878), 298.257),
    ("SoAmerican1969", 6378160.0, Some(6356774.71919531), 298.25),
    ("Struve1860", 6378298.3, Some(6356657.14266956), 294.73),
    ("WGS60", 6378165.0, Some(6356783.28695944), 298.3),
    ("WGS66", 6378145.0, Some(6356759.76948868), 298.25),
    ("WGS72", 6378135.0, None, 298.26),
    ("WGS84", R_MA, None, 298.257223563),
    ("Sphere", R_M, None, 0.),
    ("SphereAuthalic", R_FM, None, 0.),
    ("SpherePopular", R_MA, None, 0.),
];

lazy_static! {
    static ref STANDARD_REGISTRY: EllipsoidRegistry = EllipsoidRegistry::with_standard()
        .expect("standard ellipsoid table is inconsistent");
}

/// Name-unique collection of ellipsoids, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct EllipsoidRegistry {
    entries: Vec<Arc<Ellipsoid>>,
    index: HashMap<String, usize>,
}

impl EllipsoidRegistry {
    pub fn new() -> EllipsoidRegistry {
        Self::default()
    }

    /// Registry holding the standard bodies, see [`EllipsoidRegistry::standard`].
    ///
    /// # Errors
    ///
    /// Fails if any table entry does not pass [`Ellipsoid::validate`].
    pub fn with_standard() -> Result<EllipsoidRegistry, Error> {
        let mut registry = Self::new();
        for (name, a, b, f_) in STANDARD {
            let ellipsoid = match b {
                Some(b) => Ellipsoid::checked(name, a, b, f_)?,
                None => Ellipsoid::from_inverse_flattening(name, a, f_)?,
            };
            registry.register(ellipsoid)?;
        }
        registry.validate()?;

        Ok(registry)
    }

    /// The standard bodies, WGS84, GRS80, Sphere and others, built once.
    ///
    /// # Usage
    ///
    /// ```
    /// use ellipsoid_ups::EllipsoidRegistry;
    ///
    /// let registry = EllipsoidRegistry::standard();
    ///
    /// assert_eq!(registry.len(), 41);
    /// assert!(registry.get("GRS80").is_some());
    /// assert!(registry.get("Sphere").unwrap().is_spherical());
    /// assert!(registry.lookup("Mars2000").is_err());
    /// ```
    pub fn standard() -> &'static EllipsoidRegistry {
        &STANDARD_REGISTRY
    }

    /// Adds an ellipsoid under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if the name is already taken.
    pub fn register(&mut self, ellipsoid: Ellipsoid) -> Result<Arc<Ellipsoid>, Error> {
        if self.index.contains_key(ellipsoid.name()) {
            return Err(Error::DuplicateName(ellipsoid.name().to_string()));
        }

        let ellipsoid = Arc::new(ellipsoid);
        self.index.insert(ellipsoid.name().to_string(), self.entries.len());
        self.entries.push(Arc::clone(&ellipsoid));

        Ok(ellipsoid)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Ellipsoid>> {
        self.index.get(name).map(|&i| Arc::clone(&self.entries[i]))
    }

    /// Like [`EllipsoidRegistry::get`], failing for unknown names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEllipsoid`] if nothing is registered as `name`.
    pub fn lookup(&self, name: &str) -> Result<Arc<Ellipsoid>, Error> {
        self.get(name).ok_or_else(|| Error::UnknownEllipsoid(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Ellipsoid>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs [`Ellipsoid::validate`] on every entry.
    ///
    /// # Errors
    ///
    /// Returns the first failure, with the ellipsoid name prefixed to the
    /// inconsistent quantity.
    pub fn validate(&self) -> Result<(), Error> {
        for ellipsoid in &self.entries {
            ellipsoid.validate().map_err(|err| match err {
                Error::Inconsistent { name, value, expected, eps } => Error::Inconsistent {
                    name: format!("{}.{name}", ellipsoid.name()),
                    value,
                    expected,
                    eps,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a EllipsoidRegistry {
    type Item = &'a Arc<Ellipsoid>;
    type IntoIter = std::slice::Iter<'a, Arc<Ellipsoid>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order_and_lookup() {
        let registry = EllipsoidRegistry::standard();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names.first(), Some(&"Airy1830"));
        assert_eq!(names.last(), Some(&"SpherePopular"));

        let wgs84 = registry.lookup("WGS84").unwrap();
        assert_eq!(wgs84.a(), 6_378_137.);
        assert!(matches!(registry.lookup("wgs84"), Err(Error::UnknownEllipsoid(_))));
    }

    #[test]
    fn duplicate_rejected() {
        let mut registry = EllipsoidRegistry::new();
        registry.register(Ellipsoid::sphere("Ball", 1.).unwrap()).unwrap();
        let err = registry.register(Ellipsoid::sphere("Ball", 2.).unwrap()).unwrap_err();
        assert_eq!(err, Error::DuplicateName("Ball".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Ball").unwrap().a(), 1.);
    }

    #[test]
    fn every_entry_validates() {
        EllipsoidRegistry::standard().validate().unwrap();
        for e in EllipsoidRegistry::standard() {
            assert!(e.is_spherical() || e.is_oblate(), "{}", e.name());
        }
    }
}
