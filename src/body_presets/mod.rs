//! This module contains presets for celestial bodies.
//!
//! Lengths are in astronomical units and times are in days, so
//! `mu = 4 pi² a³ / T²` comes out in AU³/day².

use crate::{Roster, SolverConfig};

mod planets;

pub use planets::*;

/// Returns the eight planets of the Solar System, ordered by distance
/// to the Sun, with the default [`SolverConfig`].
pub fn solar_system() -> Roster {
    solar_system_with_config(SolverConfig::default())
}

/// Returns the eight planets of the Solar System with a custom configuration.
pub fn solar_system_with_config(config: SolverConfig) -> Roster {
    let mut roster = Roster::new();

    for body in [
        mercury(config),
        venus(config),
        earth(config),
        mars(config),
        jupiter(config),
        saturn(config),
        uranus(config),
        neptune(config),
    ] {
        // Preset names are unique
        let _ = roster.add_body(body);
    }

    roster
}
