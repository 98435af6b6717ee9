use ellipsoid_ups::{
    AuxLatitude, EllipsoidRegistry, Ups,
    projections::TransverseMercator,
    ups::{to_ups, UpsOptions},
};

const UPS_LATS: [f64; 10] = [-90., -89.999_9, -88.5, -84., -79.5, 83.5, 85.25, 87., 89.99, 90.];
const LONS: [f64; 7] = [-180., -135.5, -45., -0.001, 0., 44.25, 179.9];

fn lon_diff(a: f64, b: f64) -> f64 {
    ((a - b + 540.) % 360. - 180.).abs()
}

#[test]
fn ups_round_trip_every_ellipsoid() {
    for e in EllipsoidRegistry::standard() {
        for lat in UPS_LATS {
            for lon in LONS {
                let ups = to_ups(lat, lon, e, UpsOptions::default()).unwrap();
                // Drop the cached position so it is recomputed
                let fresh = Ups::create(ups.pole(), ups.easting(), ups.northing(), Some(ups.band()), e, true)
                    .unwrap();
                let coord = fresh.to_latlon();

                assert!(
                    (coord.latitude() - lat).abs() < 1e-7,
                    "{}: lat {lat} -> {}", e.name(), coord.latitude()
                );
                if lat.abs() < 90. {
                    assert!(
                        lon_diff(coord.longitude(), lon) < 1e-7,
                        "{}: lon {lon} -> {}", e.name(), coord.longitude()
                    );
                }
                assert!((fresh.scale() - ups.scale()).abs() < 1e-12, "{}", e.name());
                assert!(lon_diff(fresh.convergence(), ups.convergence()) < 1e-7 || lat.abs() == 90.);
            }
        }
    }
}

#[test]
fn ups_round_trip_is_nanometer_level() {
    let e = EllipsoidRegistry::standard().lookup("WGS84").unwrap();
    for lat in [-89.5, -81., 84., 88.8] {
        for lon in [-170., -20., 65.] {
            let ups = to_ups(lat, lon, &e, UpsOptions::default()).unwrap();
            let fresh = Ups::create(ups.pole(), ups.easting(), ups.northing(), None, &e, true).unwrap();
            let coord = fresh.to_latlon();
            let again = to_ups(coord.latitude(), coord.longitude(), &e, UpsOptions::default()).unwrap();

            assert!((again.easting() - ups.easting()).abs() < 1e-8);
            assert!((again.northing() - ups.northing()).abs() < 1e-8);
        }
    }
}

#[test]
fn conformal_round_trip_every_ellipsoid() {
    for e in EllipsoidRegistry::standard() {
        for lat in [-89.999, -60., -0.5, 0., 1e-6, 33.3, 72., 89.9] {
            let chi = AuxLatitude::Conformal.forward(e, lat).unwrap();
            let back = AuxLatitude::Conformal.inverse(e, chi).unwrap();
            assert!((back - lat).abs() < 1e-9, "{}: {lat} -> {back}", e.name());
        }
    }
}

#[test]
fn transverse_mercator_round_trip() {
    for name in ["WGS84", "Clarke1866", "Maupertuis1738", "Sphere"] {
        let e = EllipsoidRegistry::standard().lookup(name).unwrap();
        let tm = TransverseMercator::new(&e, 0.9996).unwrap();

        for lat in [-80., -45., -1., 0.5, 30., 60., 84.] {
            for dlon in [-3.5, -0.25, 0., 1., 3.] {
                let lon = 9. + dlon;
                let (x, y, _, _) = tm.forward(9., lat, lon);
                let (lat2, lon2, _, _) = tm.reverse(9., x, y);
                assert!((lat2 - lat).abs() < 1e-10, "{name}: {lat} -> {lat2}");
                assert!((lon2 - lon).abs() < 1e-10, "{name}: {lon} -> {lon2}");
            }
        }
    }
}
