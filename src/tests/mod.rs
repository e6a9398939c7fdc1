use std::{
    borrow::Cow,
    f64::consts::{PI, TAU},
};

use glam::DVec2;

use crate::{
    angular_distance, body_presets,
    integrator::{Rk4, ScalarOde, TrueAnomalyRate},
    solvers, Body, CompactOrbit, ConvergenceError, InvalidElementsError, InvariantCheck,
    InvariantTolerances, Orbit, OrbitError, OrbitTrait, OrbitalElements, Quantity, Roster,
    RosterEntry, RosterError, SeedStrategy, SolverConfig,
};

// Even, so that T/2 is one of the polled times
const ORBIT_POLL_TIMES: usize = 64;


use assertions::*;
use polling::*;
use seeders::*;

/// A config whose Kepler solutions are exact to rounding.
fn tight_config() -> SolverConfig {
    SolverConfig::default().with_kepler_tolerance(1e-12)
}

fn tight(orbit: CompactOrbit) -> CompactOrbit {
    CompactOrbit {
        config: tight_config(),
        ..orbit
    }
}

fn earth() -> Body {
    body_presets::earth(SolverConfig::default())
}

fn mercury() -> Body {
    body_presets::mercury(SolverConfig::default())
}

#[test]
fn elements_validation() {
    use InvalidElementsError::*;

    let cases = [
        ((-0.1, 1.0, 1.0), EccentricityOutOfRange(-0.1)),
        ((1.0, 1.0, 1.0), EccentricityOutOfRange(1.0)),
        ((2.5, 1.0, 1.0), EccentricityOutOfRange(2.5)),
        ((0.5, 0.0, 1.0), NonPositiveSemiMajorAxis(0.0)),
        ((0.5, -3.0, 1.0), NonPositiveSemiMajorAxis(-3.0)),
        ((0.5, f64::INFINITY, 1.0), NonPositiveSemiMajorAxis(f64::INFINITY)),
        ((0.5, 1.0, 0.0), NonPositivePeriod(0.0)),
        ((0.5, 1.0, -2.0), NonPositivePeriod(-2.0)),
        ((0.5, 1.0, f64::INFINITY), NonPositivePeriod(f64::INFINITY)),
    ];

    for ((e, a, period), expected) in cases {
        assert_eq!(
            OrbitalElements::new(e, a, period),
            Err(expected),
            "e = {e}, a = {a}, T = {period}"
        );
    }

    assert!(matches!(
        OrbitalElements::new(f64::NAN, 1.0, 1.0),
        Err(EccentricityOutOfRange(_))
    ));
    assert!(matches!(
        OrbitalElements::new(0.5, f64::NAN, 1.0),
        Err(NonPositiveSemiMajorAxis(_))
    ));
    assert!(matches!(
        OrbitalElements::new(0.5, 1.0, f64::NAN),
        Err(NonPositivePeriod(_))
    ));

    assert!(OrbitalElements::new(0.0, 1.0, 1.0).is_ok());
    assert!(OrbitalElements::new(0.999, 1e-9, 1e12).is_ok());
}

#[test]
fn derived_constants() {
    let earth = earth();
    let orbit = &earth.orbit;

    let mu = 4.0 * PI * PI / (365.26 * 365.26);
    let c = (mu * (1.0 - 0.017 * 0.017)).sqrt();

    assert_almost_eq_rel(orbit.get_gravitational_parameter(), mu, 1e-14, "Earth mu");
    assert_almost_eq_rel(orbit.get_angular_momentum(), c, 1e-14, "Earth c");
    assert_almost_eq_rel(orbit.get_mean_motion(), TAU / 365.26, 1e-14, "Earth n");

    let orbit = Orbit::new(0.5, 2.0, 10.0).unwrap();
    assert_eq!(orbit.get_periapsis(), 1.0);
    assert_eq!(orbit.get_apoapsis(), 3.0);
    assert_almost_eq(orbit.get_semi_minor_axis(), 3.0_f64.sqrt(), "semi-minor axis");
    assert_almost_eq(orbit.get_semi_latus_rectum(), 1.5, "semi-latus rectum");
}

#[test]
fn time_reduction() {
    let orbit = Orbit::default();

    assert_eq!(orbit.reduce_time(2.5), 0.5);
    assert_eq!(orbit.reduce_time(-0.25), 0.75);
    assert_eq!(orbit.reduce_time(-1e-20), 0.0);
    assert_eq!(orbit.reduce_time(3.0), 0.0);

    for orbit in random_any_iter(1000) {
        let t = random_time(&orbit);
        let reduced = orbit.reduce_time(t);
        let mean_anomaly = orbit.get_mean_anomaly_at_time(t);

        assert!((0.0..orbit.get_orbital_period()).contains(&reduced), "{reduced}");
        assert!((0.0..=TAU).contains(&mean_anomaly), "{mean_anomaly}");
    }
}

#[test]
fn keplers_equation_residual() {
    for orbit in random_any_iter(2000) {
        let t = random_time(&orbit);
        let e = orbit.get_eccentricity();
        let mean_anomaly = orbit.get_mean_anomaly_at_time(t);

        let solution = orbit
            .solve_eccentric_anomaly_at_time(t)
            .unwrap_or_else(|err| panic!("{err}"));
        let u = solution.eccentric_anomaly;

        assert!((0.0..TAU).contains(&u), "u = {u} out of range");

        // Angular distance, since M close to tau may wrap to 0
        let residual = angular_distance(keplers_equation(mean_anomaly, u, e), 0.0);
        assert!(
            residual < orbit.get_config().kepler.tolerance,
            "residual {residual} for e = {e}, M = {mean_anomaly}, u = {u}"
        );
    }
}

#[test]
fn eccentric_anomaly_increases_over_a_period() {
    for orbit in random_any_iter(100) {
        let anomalies = poll_eccentric_anomaly(&orbit);

        assert_eq!(anomalies[0], 0.0);
        for pair in anomalies.windows(2) {
            assert!(
                pair[1] > pair[0],
                "eccentric anomaly went from {} to {} on {orbit:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn half_period_converges() {
    for e in [0.0, 0.2, 0.5, 0.9, 0.99, 0.999] {
        for period in [1.0, 87.97, 365.26, 60784.0] {
            let orbit = CompactOrbit::new(e, 1.0, period).unwrap();
            let half = 0.5 * period;

            let u = orbit
                .get_eccentric_anomaly_at_time(half)
                .unwrap_or_else(|err| panic!("e = {e}, T = {period}: {err}"));
            assert_almost_eq_angle(u, PI, 1e-9, "u(T/2)");

            let theta = orbit.get_true_anomaly_from_eccentric_at_time(half).unwrap();
            assert_almost_eq_angle(theta, PI, 1e-6, "θ(T/2) from eccentric");
        }
    }

    for e in [0.0, 0.2, 0.5, 0.9] {
        let orbit = CompactOrbit::new(e, 1.0, 10.0).unwrap();
        assert_almost_eq_angle(
            orbit.get_true_anomaly_at_time(5.0),
            PI,
            1e-6,
            "θ(T/2) integrated",
        );
    }
}

#[test]
fn uniform_seeding_recovers_near_half_period() {
    let config = SolverConfig::default().with_seed_strategy(SeedStrategy::Uniform);

    for e in [0.1, 0.5, 0.9, 0.99] {
        let elements = OrbitalElements::new(e, 1.0, 1.0).unwrap();
        let orbit = CompactOrbit { elements, config };

        for t in [0.5, 0.5 - 1e-9, 0.5 + 1e-9, 0.4999, 0.5001] {
            let u = orbit
                .get_eccentric_anomaly_at_time(t)
                .unwrap_or_else(|err| panic!("e = {e}, t = {t}: {err}"));
            assert_almost_eq_angle(u, PI, 1e-2, "u near T/2");
        }
    }
}

#[test]
fn mercury_converges_at_random_times() {
    let mercury = mercury();
    let uniform = CompactOrbit {
        config: SolverConfig::default().with_seed_strategy(SeedStrategy::Uniform),
        ..CompactOrbit::from(mercury.orbit.clone())
    };

    let mut total_reseeds = 0;

    for _ in 0..1000 {
        let t = random_time(&mercury.orbit);

        let default = mercury
            .orbit
            .solve_eccentric_anomaly_at_time(t)
            .unwrap_or_else(|err| panic!("{err}"));
        let seeded = uniform
            .solve_eccentric_anomaly_at_time(t)
            .unwrap_or_else(|err| panic!("{err}"));

        total_reseeds += seeded.reseeds;

        assert_almost_eq_angle(
            default.eccentric_anomaly,
            seeded.eccentric_anomaly,
            1e-6,
            "default vs uniform seed",
        );
    }

    assert!(total_reseeds > 0, "uniform seeding never re-seeded");
}

#[test]
fn uniform_seeding_is_deterministic() {
    let elements = OrbitalElements::new(0.7, 2.0, 3.0).unwrap();
    let config = SolverConfig::default().with_seed_strategy(SeedStrategy::Uniform);
    let a = CompactOrbit { elements, config };
    let b = CompactOrbit { elements, config };
    let other_seed = CompactOrbit {
        elements,
        config: config.with_reseed_seed(42),
    };

    for i in 0..ORBIT_POLL_TIMES {
        let t = i as f64 * 3.0 / ORBIT_POLL_TIMES as f64;

        let sa = a.solve_eccentric_anomaly_at_time(t).unwrap();
        let sb = b.solve_eccentric_anomaly_at_time(t).unwrap();
        assert_eq!(sa, sb, "t = {t}");

        let so = other_seed.get_eccentric_anomaly_at_time(t).unwrap();
        assert_almost_eq_angle(sa.eccentric_anomaly, so, 1e-6, "other re-seed seed");
    }
}

#[test]
fn branch_folding_symmetry() {
    let config = tight_config().kepler;

    for _ in 0..1000 {
        let e = rand::random_range(0.0..0.99);
        let mean_anomaly = rand::random_range(0.0..PI);

        let lower = solvers::solve_keplers_equation(e, mean_anomaly, &config).unwrap();
        let upper = solvers::solve_keplers_equation(e, TAU - mean_anomaly, &config).unwrap();

        assert!(lower.eccentric_anomaly <= PI);
        assert!(upper.eccentric_anomaly >= PI);
        assert_almost_eq(
            lower.eccentric_anomaly + upper.eccentric_anomaly,
            TAU,
            "u(M) + u(tau - M)",
        );
    }
}

#[test]
fn convergence_failures() {
    let elements = OrbitalElements::new(0.3, 1.0, 1.0).unwrap();

    let no_attempts = CompactOrbit {
        elements,
        config: SolverConfig::default().with_iteration_caps(100, 0),
    };
    let err = no_attempts.get_eccentric_anomaly_at_time(0.3).unwrap_err();
    assert_eq!(err.attempts, 0);
    assert_eq!(err.iterations, 0);
    assert!(err.last_step.is_nan());

    let zero_tolerance = CompactOrbit {
        elements,
        config: SolverConfig::default()
            .with_kepler_tolerance(0.0)
            .with_iteration_caps(10, 3),
    };
    let err = zero_tolerance.get_position_at_time(0.3).unwrap_err();
    assert_eq!(err.attempts, 3);
    assert_eq!(err.iterations, 30);
    assert_eq!(err.eccentricity, 0.3);
    assert!(!err.to_string().is_empty());

    fn report_distance(orbit: &CompactOrbit) -> Result<f64, OrbitError> {
        Ok(orbit.get_distance_at_time(0.3)?)
    }
    assert!(matches!(
        report_distance(&zero_tolerance),
        Err(OrbitError::Convergence(ConvergenceError { attempts: 3, .. }))
    ));
}

#[test]
fn periodicity() {
    for orbit in random_any_iter(1000).map(tight) {
        let period = orbit.get_orbital_period();
        let t = rand::random_range(0.0..period);

        let here = orbit.get_position_at_time(t).unwrap();
        let next = orbit.get_position_at_time(t + period).unwrap();
        let before = orbit.get_position_at_time(t - 3.0 * period).unwrap();

        assert_almost_eq_vec2_rel(here, next, 1e-8, "t vs t + T");
        assert_almost_eq_vec2_rel(here, before, 1e-8, "t vs t - 3T");
    }
}

#[test]
fn circular_orbits() {
    for orbit in (0..100).map(|_| random_circular()) {
        let a = orbit.get_semi_major_axis();
        let expected_speed = TAU * a / orbit.get_orbital_period();

        for speed in poll_speed(&orbit) {
            assert_almost_eq_rel(speed, expected_speed, 1e-12, "circular speed");
        }
        for position in poll_orbit(&orbit) {
            assert_almost_eq_rel(position.length(), a, 1e-12, "circular radius");
        }
    }
}

#[test]
fn speed_extremes() {
    for orbit in (0..100).map(|_| random_elliptic()) {
        let speeds = poll_speed(&orbit);
        let periapsis = speeds[0];
        let apoapsis = speeds[ORBIT_POLL_TIMES / 2];

        for &speed in &speeds {
            assert!(speed <= periapsis * (1.0 + 1e-9), "{speed} > {periapsis}");
            assert!(speed >= apoapsis * (1.0 - 1e-9), "{speed} < {apoapsis}");
        }
    }
}

#[test]
fn energy_is_conserved() {
    for orbit in random_any_iter(2000) {
        let t = random_time(&orbit);

        let at_time = orbit.get_specific_orbital_energy_at_time(t).unwrap();
        let constant = orbit.get_specific_orbital_energy();

        assert_almost_eq_rel(at_time, constant, 1e-9, "vis-viva vs closed form");
        assert_almost_eq_rel(
            constant,
            -orbit.get_gravitational_parameter() / (2.0 * orbit.get_semi_major_axis()),
            1e-12,
            "closed form vs -mu / 2a",
        );
        assert!(orbit.compare_energy_at_time(t).unwrap().is_consistent());
    }
}

#[test]
fn angular_momentum_is_conserved() {
    for orbit in (0..200).map(|_| tight(random_elliptic())) {
        let t = random_time(&orbit);

        let at_time = orbit.get_angular_momentum_at_time(t).unwrap();
        assert_almost_eq_rel(
            at_time,
            orbit.get_angular_momentum(),
            1e-6,
            "r² dθ/dt vs c",
        );
    }
}

#[test]
fn true_anomaly_routes_agree() {
    for orbit in (0..200).map(|_| tight(random_elliptic())) {
        let t = random_time(&orbit);

        let integrated = orbit.get_true_anomaly_at_time(t);
        let converted = orbit.get_true_anomaly_from_eccentric_at_time(t).unwrap();

        assert_almost_eq_angle(integrated, converted, 1e-6, "integrated vs converted");
        assert!(orbit.compare_true_anomaly_at_time(t).unwrap().is_consistent());
    }

    // Past one period and before epoch
    let orbit = tight(CompactOrbit::new(0.4, 1.0, 10.0).unwrap());
    for t in [-7.5, -2.5, 12.5, 17.5, 31.0] {
        let integrated = orbit.get_true_anomaly_at_time(t);
        let converted = orbit.get_true_anomaly_from_eccentric_at_time(t).unwrap();

        assert_almost_eq_angle(integrated, converted, 1e-6, &format!("t = {t}"));
        assert_eq!(
            converted,
            orbit
                .get_true_anomaly_from_eccentric_at_time(orbit.reduce_time(t))
                .unwrap()
        );
    }
}

#[test]
fn true_anomaly_rate() {
    let orbit = Orbit::new(0.5, 2.0, 10.0).unwrap();
    let e = 0.5;
    let a = 2.0;
    let c = orbit.get_angular_momentum();

    let at_periapsis = c * (1.0 + e) * (1.0 + e) / (a * a * (1.0 - e * e) * (1.0 - e * e));
    let at_apoapsis = c * (1.0 - e) * (1.0 - e) / (a * a * (1.0 - e * e) * (1.0 - e * e));

    assert_almost_eq(orbit.get_true_anomaly_rate(0.0), at_periapsis, "rate at periapsis");
    assert_almost_eq(orbit.get_true_anomaly_rate(PI), at_apoapsis, "rate at apoapsis");

    let rate = TrueAnomalyRate::new(e, a, c);
    assert_eq!(rate.derivative(123.0, 0.0), rate.at(0.0));
}

#[test]
fn bessel_series_converges() {
    let reference = tight_config().kepler;

    for e in [0.05, 0.2, 0.4] {
        let orbit = CompactOrbit::new(e, 1.0, TAU).unwrap();
        let times = poll_times(&orbit);

        let max_errors: Vec<f64> = (1..=6)
            .map(|order| {
                times
                    .iter()
                    .map(|&t| {
                        let exact = solvers::solve_keplers_equation(e, t, &reference)
                            .unwrap()
                            .eccentric_anomaly;
                        let approx = orbit.get_bessel_eccentric_anomaly_at_time_with_order(t, order);
                        (exact - approx).abs()
                    })
                    .fold(0.0, f64::max)
            })
            .collect();

        for (order, pair) in max_errors.windows(2).enumerate() {
            assert!(
                pair[1] < pair[0],
                "e = {e}: error grew from {} to {} at order {}",
                pair[0],
                pair[1],
                order + 2
            );
        }
    }

    let mercury = tight(CompactOrbit::from(mercury().orbit));
    for t in poll_times(&mercury) {
        assert_almost_eq_angle(
            mercury.get_bessel_eccentric_anomaly_at_time(t),
            mercury.get_eccentric_anomaly_at_time(t).unwrap(),
            1e-10,
            "Mercury, 20 Bessel terms",
        );
    }

    // No terms at all leaves the mean anomaly
    assert_eq!(
        mercury.get_bessel_eccentric_anomaly_at_time_with_order(10.0, 0),
        mercury.get_mean_anomaly_at_time(10.0)
    );
}

#[test]
fn earth_at_epoch() {
    let earth = earth();
    let orbit = &earth.orbit;

    assert_eq!(orbit.get_eccentric_anomaly_at_time(0.0).unwrap(), 0.0);
    assert_almost_eq_vec2(
        orbit.get_position_at_time(0.0).unwrap(),
        DVec2::new(0.983, 0.0),
        "Earth at periapsis",
    );
    assert_almost_eq(orbit.get_true_anomaly_at_time(0.0), 0.0, "θ(0)");
    assert_almost_eq_rel(
        orbit.get_specific_orbital_energy(),
        -orbit.get_gravitational_parameter() / 2.0,
        1e-12,
        "Earth energy",
    );

    let velocity = orbit.get_velocity_at_time(0.0).unwrap();
    assert_eq!(velocity.x, 0.0);
    assert!(velocity.y > 0.0);
}

#[test]
fn velocity_is_position_derivative() {
    for orbit in (0..200).map(|_| tight(random_elliptic())) {
        let period = orbit.get_orbital_period();
        let t = rand::random_range(0.0..period);
        let h = period * 1e-7;

        let ahead = orbit.get_position_at_time(t + h).unwrap();
        let behind = orbit.get_position_at_time(t - h).unwrap();
        let finite_difference = (ahead - behind) / (2.0 * h);

        let sv = orbit.get_state_vectors_at_time(t).unwrap();
        assert_almost_eq_vec2_rel(sv.velocity, finite_difference, 1e-5, "velocity");
        assert_eq!(sv.position, orbit.get_position_at_time(t).unwrap());
    }
}

#[test]
fn rk4_integrator() {
    let growth = |_t: f64, x: f64| x;
    let result = Rk4::new(100).integrate(&growth, 0.0, 1.0, 1.0);
    assert!((result - core::f64::consts::E).abs() < 1e-8, "{result}");

    // Simpson's rule is exact for cubics
    let cubic = |t: f64, _x: f64| 3.0 * t * t;
    let result = Rk4::new(7).integrate(&cubic, 0.0, 0.0, 2.0);
    assert!((result - 8.0).abs() < 1e-12, "{result}");

    assert_eq!(Rk4::new(0).integrate(&growth, 0.0, 3.0, 1.0), 3.0);
    assert_eq!(Rk4::new(10).integrate(&growth, 1.0, 3.0, 1.0), 3.0);

    // Backwards
    let result = Rk4::new(100).integrate(&growth, 1.0, core::f64::consts::E, 0.0);
    assert!((result - 1.0).abs() < 1e-8, "{result}");
}

#[test]
fn orbit_samples() {
    let orbit = mercury().orbit;
    assert!(!orbit.is_sampled());

    let samples = orbit.get_orbit_samples(16).unwrap();
    assert_eq!(samples.len(), 17);
    assert_eq!(samples.first(), samples.last());
    assert!(orbit.is_sampled());

    let expected = orbit.sample_orbit(16).unwrap();
    assert_eq!(&*samples, expected.as_slice());

    let again = orbit.get_orbit_samples(16).unwrap();
    assert!(matches!(again, Cow::Borrowed(_)));

    let other = orbit.get_orbit_samples(8).unwrap();
    assert!(matches!(other, Cow::Owned(_)));
    assert_eq!(other.len(), 9);

    // The first sampling stays cached
    assert!(matches!(orbit.get_orbit_samples(16).unwrap(), Cow::Borrowed(_)));

    assert!(CompactOrbit::default().sample_orbit(0).unwrap().is_empty());
}

#[test]
fn failed_sampling_leaves_cache_empty() {
    let elements = OrbitalElements::new(0.3, 1.0, 1.0).unwrap();
    let orbit = Orbit::with_config(
        elements,
        SolverConfig::default()
            .with_kepler_tolerance(0.0)
            .with_iteration_caps(5, 2),
    );

    assert!(orbit.get_orbit_samples(8).is_err());
    assert!(!orbit.is_sampled());
}

#[test]
fn compact_conversion() {
    for compact in random_any_iter(100) {
        let orbit = Orbit::from(compact);
        let reexpanded = CompactOrbit::from(orbit.clone());

        assert_eq!(compact, reexpanded);
        assert_eq!(orbit.get_elements(), compact.get_elements());
        assert_eq!(orbit.get_config(), compact.get_config());

        let original = poll_orbit(&compact);
        let cached = poll_orbit(&orbit);

        for (a, b) in original.iter().zip(&cached) {
            assert_eq!((a.x.to_bits(), a.y.to_bits()), (b.x.to_bits(), b.y.to_bits()));
        }
    }
}

#[test]
fn invariant_checks() {
    let check = InvariantCheck::new(Quantity::TrueAnomaly, 0.0, TAU, 1e-9);
    assert!(check.is_consistent());
    assert!(check.into_result().is_ok());

    let check = InvariantCheck::new(Quantity::EccentricAnomaly, 0.1, TAU - 0.1, 0.3);
    assert_almost_eq(check.difference(), 0.2, "wrapped difference");
    assert!(check.is_consistent());

    let check = InvariantCheck::new(Quantity::Energy, 1.0, 1.1, 0.05);
    assert!(!check.is_consistent());
    let err = check.into_result().unwrap_err();
    assert_eq!(err.quantity, Quantity::Energy);
    assert_eq!(err.primary, 1.0);
    assert_eq!(err.secondary, 1.1);
    assert_almost_eq(err.difference, 0.1, "divergence");
    assert!(err.to_string().contains("energy"));

    let check = InvariantCheck::new(Quantity::AngularMomentum, f64::NAN, 1.0, 1.0);
    assert!(!check.is_consistent());

    let failing = CompactOrbit {
        config: SolverConfig::default().with_tolerances(InvariantTolerances {
            eccentric_anomaly: 0.0,
            ..InvariantTolerances::default()
        }),
        ..CompactOrbit::from(mercury().orbit)
    };
    let [energy, angular_momentum, true_anomaly, eccentric_anomaly] =
        failing.verify_at_time(12.0).unwrap();
    assert_eq!(energy.quantity, Quantity::Energy);
    assert_eq!(angular_momentum.quantity, Quantity::AngularMomentum);
    assert_eq!(true_anomaly.quantity, Quantity::TrueAnomaly);
    assert_eq!(eccentric_anomaly.quantity, Quantity::EccentricAnomaly);
    assert!(energy.is_consistent());
    assert!(true_anomaly.is_consistent());
    assert!(eccentric_anomaly.into_result().is_err());
}

#[test]
fn roster_from_entries() {
    let roster = Roster::from_entries(
        [
            RosterEntry::new("Mercury", 0.206, 0.387, 87.97),
            RosterEntry::new("Earth", 0.017, 1.0, 365.26),
        ],
        SolverConfig::default(),
    )
    .unwrap();

    assert_eq!(roster.len(), 2);
    assert!(!roster.is_empty());
    assert_eq!(roster.names().collect::<Vec<_>>(), ["Mercury", "Earth"]);
    assert_eq!(roster.get("Earth").unwrap().orbit.get_semi_major_axis(), 1.0);
    assert!(roster.get("Pluto").is_none());

    let duplicate = Roster::from_entries(
        [
            RosterEntry::new("Earth", 0.017, 1.0, 365.26),
            RosterEntry::new("Earth", 0.0, 2.0, 100.0),
        ],
        SolverConfig::default(),
    );
    assert_eq!(duplicate, Err(RosterError::DuplicateName("Earth".to_string())));

    let invalid = Roster::from_entries(
        [RosterEntry::new("Comet", 1.5, 3.0, 1000.0)],
        SolverConfig::default(),
    );
    assert_eq!(
        invalid,
        Err(RosterError::InvalidEntry {
            name: "Comet".to_string(),
            source: InvalidElementsError::EccentricityOutOfRange(1.5),
        })
    );

    let mut roster = Roster::new();
    assert_eq!(roster.add_body(earth()), Ok(0));
    let (err, body) = roster.add_body(earth()).unwrap_err();
    assert_eq!(err, RosterError::DuplicateName("Earth".to_string()));
    assert_eq!(body.name, "Earth");
    assert_eq!(roster.len(), 1);
}

#[test]
fn solar_system() {
    let roster = body_presets::solar_system();

    assert_eq!(
        roster.names().collect::<Vec<_>>(),
        ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
    );

    let mut previous = 0.0;
    for body in &roster {
        let a = body.orbit.get_semi_major_axis();
        assert!(a > previous, "{body} is out of order");
        previous = a;

        // Kepler's third law, a³ / T² is the same for every planet
        assert_almost_eq_rel(
            body.orbit.get_gravitational_parameter(),
            4.0 * PI * PI / (365.26 * 365.26),
            2e-2,
            &format!("mu of {body}"),
        );
    }
}

#[test]
fn solar_system_reports_are_consistent() {
    let roster = body_presets::solar_system();

    for body in roster.iter() {
        let period = body.orbit.get_orbital_period();

        for fraction in [0.0, 0.1, 0.37, 0.5, 0.81, 1.6, -0.3] {
            let t = fraction * period;
            let report = body.report(t).unwrap();

            assert!(report.is_consistent(), "{report}");
            assert_eq!(report.time, t);
            assert_eq!(report.bessel_order, 20);
            assert_almost_eq_rel(report.distance, report.position.length(), 1e-15, "distance");
        }
    }
}

#[test]
fn report_display() {
    let mercury = mercury();
    let report = mercury.report(10.0).unwrap();
    let text = report.to_string();

    assert_eq!(text.lines().count(), 13);
    assert!(text.lines().all(|line| line.contains("Mercury") || line.starts_with("Difference")));
    assert!(text.contains("t = 10"));
    assert_eq!(report.checks().len(), 4);
    assert_eq!(mercury.to_string(), "Mercury");
}
