use ellipsoid_ups::{AuxLatitude, Ellipsoid, EllipsoidRegistry, Error};

#[test]
fn wgs84_scenario() {
    let e = Ellipsoid::from_inverse_flattening("WGS84", 6_378_137.0, 298.257_223_563).unwrap();

    assert!((e.b() - 6_356_752.314_245).abs() < 1e-3);
    assert!((e.f() - 0.003_352_810_7).abs() < 1e-10);
    assert!((e.e2() - 0.006_694_38).abs() < 1e-8);
    assert_eq!(&e, EllipsoidRegistry::standard().lookup("WGS84").unwrap().as_ref());
}

#[test]
fn b_over_a_across_flattenings() {
    for a in [1., 6_378_137., 3_396_190.] {
        for f in [-0.5, -0.01, 1e-9, 0.003_352_810_664_747_48, 0.2, 0.75] {
            let e = Ellipsoid::from_flattening("x", a, f).unwrap();
            assert!((e.b() / e.a() - (1. - f)).abs() / (1. - f) < 1e-12, "a = {a}, f = {f}");
        }
    }
}

#[test]
fn spherical_collapse() {
    let e = Ellipsoid::from_flattening("Ball", 6_371_000., 0.).unwrap();
    assert_eq!(e.e2(), 0.);
    assert!(e.is_spherical());

    let e = Ellipsoid::new("Ball", 6_371_000., 6_371_000.).unwrap();
    assert_eq!(e.f(), 0.);
    assert!(!e.is_ellipsoidal());
}

#[test]
fn kruger_series_published_values() {
    // Karney (2011), Table 1 for WGS84
    let alpha = [
        8.377_318_206_244_698e-4,
        7.608_527_773_572_489e-7,
        1.197_645_503_242_491_9e-9,
        2.429_170_680_397_090_4e-12,
    ];
    let beta = [
        8.377_321_640_579_486e-4,
        5.905_870_152_220_365e-8,
        1.673_482_665_343_824_7e-10,
        2.164_798_110_490_642e-13,
    ];

    let e = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    assert_eq!(e.ks_order(), 8);
    for (got, expected) in e.alpha_ks().iter().zip(alpha) {
        assert!(((got - expected) / expected).abs() < 1e-10, "{got} vs {expected}");
    }
    for (got, expected) in e.beta_ks().iter().zip(beta) {
        assert!(((got - expected) / expected).abs() < 1e-10, "{got} vs {expected}");
    }
}

#[test]
fn ks_order_recomputes_series() {
    let mut e = Ellipsoid::from_inverse_flattening("WGS84", 6_378_137., 298.257_223_563).unwrap();
    let full = e.alpha_ks().to_vec();

    e.set_ks_order(6).unwrap();
    assert_eq!(e.alpha_ks().len(), 6);
    assert!((e.alpha_ks()[0] - full[0]).abs() < 1e-15);

    assert_eq!(e.set_ks_order(7), Err(Error::InvalidKsOrder(7)));
    assert_eq!(e.ks_order(), 6);
}

#[test]
fn curvature_extremes() {
    let e = EllipsoidRegistry::standard().lookup("GRS80").unwrap();

    let equator = e.roc2(0., false).unwrap();
    assert!(equator.meridional < equator.prime_vertical);

    let pole = e.roc2(90., false).unwrap();
    let a2_b = e.a().powi(2) / e.b();
    assert!((pole.meridional - a2_b).abs() < 1e-6);
    assert!((pole.prime_vertical - a2_b).abs() < 1e-6);
    assert!((e.roc_polar() - a2_b).abs() < 1e-6);
}

#[test]
fn registry_owns_names() {
    let mut registry = EllipsoidRegistry::new();
    assert!(registry.is_empty());

    let mars = registry
        .register(Ellipsoid::new("Mars2000", 3_396_190., 3_376_200.).unwrap())
        .unwrap();
    assert_eq!(registry.lookup("Mars2000").unwrap().a(), mars.a());

    let again = registry.register(Ellipsoid::sphere("Mars2000", 3_389_500.).unwrap());
    assert_eq!(again.unwrap_err(), Error::DuplicateName("Mars2000".to_string()));
    assert!(matches!(registry.lookup("Venus"), Err(Error::UnknownEllipsoid(_))));
    registry.validate().unwrap();
}

#[test]
fn standard_registry() {
    let registry = EllipsoidRegistry::standard();
    assert_eq!(registry.len(), 41);
    assert_eq!(registry.iter().filter(|e| e.is_spherical()).count(), 3);
    assert!(registry.names().any(|name| name == "IERS2003"));
}

#[test]
fn display_lists_parameters() {
    let e = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    let shown = e.to_string();

    assert!(shown.starts_with("name='WGS84', a=6378137, b=6356752.31424518, f_=298.25722356, "));
    assert!(shown.contains(", L=10001965.7293127"));
}

#[test]
fn auxiliary_latitudes_on_prolate() {
    let p = Ellipsoid::from_flattening("Prolate", 6_356_752.314_245, -0.003_364_089_820_976_418_6).unwrap();
    assert!(p.is_prolate());

    for kind in AuxLatitude::ALL {
        for lat in [-75., -10., 20., 60.] {
            let aux = kind.forward(&p, lat).unwrap();
            let back = kind.inverse(&p, aux).unwrap();
            assert!((back - lat).abs() < 1e-9, "{kind:?}: {lat} -> {aux} -> {back}");
        }
    }

    // On a prolate body geocentric latitude exceeds geodetic latitude
    assert!(AuxLatitude::Geocentric.forward(&p, 45.).unwrap() > 45.);
}
