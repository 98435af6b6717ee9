use std::sync::Arc;

use ellipsoid_ups::{
    Band, Ellipsoid, EllipsoidRegistry, Error, Pole, Ups,
    projections::PolarStereographic,
    ups::{parse_ups, to_ups, UpsOptions},
};

fn wgs84() -> Arc<Ellipsoid> {
    EllipsoidRegistry::standard().lookup("WGS84").unwrap()
}

fn close(got: f64, expected: f64, tol: f64) {
    assert!((got - expected).abs() < tol, "{got} vs {expected}");
}

#[test]
fn forward_reference_points() {
    let e = wgs84();

    let ups = to_ups(85., 0., &e, UpsOptions::default()).unwrap();
    assert_eq!((ups.zone(), ups.pole(), ups.band()), (0, Pole::N, Band::Z));
    assert_eq!(ups.easting(), 2_000_000.);
    close(ups.northing(), 1_444_542.608_617_322, 1e-6);
    assert_eq!(ups.convergence(), 0.);
    close(ups.scale(), 0.995_894_791_674_974_6, 1e-12);

    let ups = to_ups(-80., -45., &e, UpsOptions::default()).unwrap();
    assert_eq!((ups.pole(), ups.band()), (Pole::S, Band::A));
    close(ups.easting(), 1_213_024.703_929_908, 1e-6);
    close(ups.northing(), 2_786_975.296_070_092_4, 1e-6);
    assert_eq!(ups.convergence(), 45.);
    close(ups.scale(), 1.001_607_561_750_571_8, 1e-12);

    let ups = to_ups(84., 120., &e, UpsOptions::default()).unwrap();
    assert_eq!(ups.band(), Band::Z);
    close(ups.easting(), 2_577_403.128_797_189, 1e-6);
    close(ups.northing(), 2_333_363.851_841_989, 1e-6);
    assert_eq!(ups.convergence(), 120.);
    close(ups.scale(), 0.996_729_995_088_125_8, 1e-12);
}

#[test]
fn pole_is_the_false_origin() {
    let ups = to_ups(90., 17., &wgs84(), UpsOptions::default()).unwrap();
    assert_eq!((ups.easting(), ups.northing()), (2_000_000., 2_000_000.));
    assert_eq!(ups.scale(), 0.994);
}

#[test]
fn parse_south_pole() {
    let ups = parse_ups("00B S 2000000 2000000", &wgs84(), true).unwrap();

    assert_eq!(ups.zone(), 0);
    assert_eq!(ups.pole(), Pole::S);
    assert_eq!(ups.band(), Band::B);
    assert_eq!((ups.easting(), ups.northing()), (2_000_000., 2_000_000.));
    assert_eq!(ups.easting_northing(false), (0., 0.));

    let coord = ups.to_latlon();
    close(coord.latitude(), -90., 1e-12);
    assert_eq!(coord.longitude(), 0.);
    assert_eq!(ups.scale(), 0.994);
}

#[test]
fn band_pole_mismatch_fails() {
    for bad in ["00Y S 2000000 2000000", "00A N 2000000 2000000", "Z S 1 1"] {
        assert!(matches!(parse_ups(bad, &wgs84(), true), Err(Error::InvalidUps(_))), "{bad}");
    }
}

#[test]
fn display_and_repr() {
    let ups = to_ups(85., 0., &wgs84(), UpsOptions::default()).unwrap();

    assert_eq!(ups.to_string(), "00Z N 2000000 1444543");
    assert_eq!(ups.to_repr(0, true, false), "[Z:00Z, P:N, E:2000000, N:1444543]");
    assert_eq!(ups.to_repr(1, false, false), "[Z:00, P:N, E:2000000, N:1444542.6]");
    assert_eq!(
        ups.to_repr(0, false, true),
        "[Z:00, P:N, E:2000000, N:1444543, C:0.00000000″, S:0.99589479]"
    );
}

#[test]
fn string_round_trip() {
    let e = wgs84();
    let ups = to_ups(-86.25, 101.5, &e, UpsOptions::default()).unwrap();
    let parsed = ups.parse(&ups.to_str(9, true, false)).unwrap();

    assert_eq!(parsed.band(), Band::B);
    close(parsed.easting(), ups.easting(), 1e-9);
    close(parsed.northing(), ups.northing(), 1e-9);
    close(parsed.to_latlon().latitude(), -86.25, 1e-11);
    close(parsed.to_latlon().longitude(), 101.5, 1e-11);

    let parsed: Ups = ellipsoid_ups::from_str("00Z N 2000000 1444543").unwrap();
    close(parsed.to_latlon().latitude(), 85., 1e-5);
}

#[test]
fn strict_mode() {
    let e = wgs84();
    assert!(matches!(to_ups(45., 10., &e, UpsOptions::default()), Err(Error::OutsideUps(_))));

    let lax = UpsOptions { strict: false, ..UpsOptions::default() };
    let ups = to_ups(45., 10., &e, lax).unwrap();
    assert_eq!(ups.pole(), Pole::N);
    assert_eq!(ups.band(), Band::Z);
    close(ups.to_latlon().latitude(), 45., 1e-12);
}

#[test]
fn projection_about_the_other_pole() {
    let e = wgs84();
    let options = UpsOptions { pole: Some(Pole::S), ..UpsOptions::default() };
    let ups = to_ups(85., 30., &e, options).unwrap();

    assert_eq!(ups.pole(), Pole::S);
    assert_eq!(ups.hemisphere(), Pole::N);

    // Recompute from easting and northing alone
    let fresh = Ups::create(Pole::S, ups.easting(), ups.northing(), None, &e, true).unwrap();
    close(fresh.to_latlon().latitude(), 85., 1e-9);
    close(fresh.to_latlon().longitude(), 30., 1e-9);
    close(fresh.convergence(), -30., 1e-9);
}

#[test]
fn other_pole_string_round_trip() {
    let e = wgs84();
    let options = UpsOptions { pole: Some(Pole::S), ..UpsOptions::default() };
    let ups = to_ups(85., 30., &e, options).unwrap();

    assert_eq!(ups.band(), Band::B);
    let shown = ups.to_string();
    assert!(shown.starts_with("00B S "), "{shown}");

    let parsed = parse_ups(&shown, &e, true).unwrap();
    assert_eq!(parsed.pole(), Pole::S);
    assert_eq!(parsed.band(), Band::B);

    let parsed = parse_ups(&ups.to_str(9, true, false), &e, true).unwrap();
    close(parsed.to_latlon().latitude(), 85., 1e-9);
    close(parsed.to_latlon().longitude(), 30., 1e-9);
}

#[test]
fn rescale_central_scale() {
    let e = wgs84();
    let mut ups = to_ups(87., 30., &e, UpsOptions::default()).unwrap();
    ups.rescale0(-87., 1.).unwrap();

    assert!(ups.scale0() < 1.);
    let (_, _, _, k) = PolarStereographic::new(&e, ups.scale0()).unwrap().forward(true, 87., 0.);
    close(k, 1., 1e-14);

    // The stored easting and northing now describe a different point
    assert!((ups.to_latlon().latitude() - 87.).abs() > 1e-6);
}

#[test]
fn equality_ignores_falsing() {
    let e = wgs84();
    let a = to_ups(-85., 10., &e, UpsOptions::default()).unwrap();
    let (x, y) = a.easting_northing(false);
    let b = Ups::create(Pole::S, x, y, Some(Band::B), &e, false).unwrap();
    assert_eq!(a, b);

    let intl = EllipsoidRegistry::standard().lookup("Intl1924").unwrap();
    let c = Ups::create(Pole::S, x, y, Some(Band::B), &intl, false).unwrap();
    assert_ne!(a, c);
}
