//! This module contains presets for the planets of the Solar System.
//!
//! "A planet is a large, rounded astronomical body that is generally
//! required to be in orbit around a star [...]"
//!
//! \- [Wikipedia](https://en.wikipedia.org/wiki/Planet)

use crate::{Body, Orbit, OrbitalElements, SolverConfig};

fn planet(
    name: &str,
    eccentricity: f64,
    semi_major_axis: f64,
    period: f64,
    config: SolverConfig,
) -> Body {
    let elements = OrbitalElements::new_unchecked(eccentricity, semi_major_axis, period);
    Body::new(name, Orbit::with_config(elements, config))
}

/// Returns Mercury, the smallest and closest planet to the Sun.
pub fn mercury(config: SolverConfig) -> Body {
    planet("Mercury", 0.206, 0.387, 87.97, config)
}

/// Returns Venus.
pub fn venus(config: SolverConfig) -> Body {
    planet("Venus", 0.007, 0.723, 224.7, config)
}

/// Returns Earth.
pub fn earth(config: SolverConfig) -> Body {
    planet("Earth", 0.017, 1.0, 365.26, config)
}

/// Returns Mars.
pub fn mars(config: SolverConfig) -> Body {
    planet("Mars", 0.093, 1.524, 686.98, config)
}

/// Returns Jupiter, the largest planet of the Solar System.
pub fn jupiter(config: SolverConfig) -> Body {
    planet("Jupiter", 0.048, 5.203, 4332.6, config)
}

/// Returns Saturn.
pub fn saturn(config: SolverConfig) -> Body {
    planet("Saturn", 0.056, 9.546, 10759.0, config)
}

/// Returns Uranus.
pub fn uranus(config: SolverConfig) -> Body {
    planet("Uranus", 0.047, 19.2, 30687.0, config)
}

/// Returns Neptune, the farthest planet from the Sun.
pub fn neptune(config: SolverConfig) -> Body {
    planet("Neptune", 0.009, 30.09, 60784.0, config)
}
