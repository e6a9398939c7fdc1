#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{InvalidElementsError, Orbit, OrbitTrait, OrbitalElements, SolverConfig};

/// A minimal struct representing a Keplerian orbit.
///
/// This struct does not cache its sampled trajectory, so
/// [`sample_orbit`][OrbitTrait::sample_orbit] recomputes every point on
/// every call. Use [`Orbit`] if you need the samples more than once.
///
/// # Example
/// ```
/// use kepler_state::{CompactOrbit, OrbitTrait};
///
/// let orbit = CompactOrbit::new(0.017, 1.0, 365.26).unwrap();
///
/// let position = orbit.get_position_at_time(0.0).unwrap();
/// assert!((position.x - 0.983).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompactOrbit {
    /// The orbital elements.
    pub elements: OrbitalElements,

    /// The numerical configuration.
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: SolverConfig,
}

impl CompactOrbit {
    /// Creates a new [`CompactOrbit`] with the default [`SolverConfig`].
    ///
    /// # Errors
    /// See [`OrbitalElements::new`].
    pub fn new(
        eccentricity: f64,
        semi_major_axis: f64,
        period: f64,
    ) -> Result<Self, InvalidElementsError> {
        OrbitalElements::new(eccentricity, semi_major_axis, period).map(|elements| Self {
            elements,
            config: SolverConfig::default(),
        })
    }
}

impl OrbitTrait for CompactOrbit {
    fn get_elements(&self) -> &OrbitalElements {
        &self.elements
    }

    fn get_config(&self) -> &SolverConfig {
        &self.config
    }
}

impl From<Orbit> for CompactOrbit {
    fn from(orbit: Orbit) -> Self {
        Self {
            elements: *orbit.get_elements(),
            config: *orbit.get_config(),
        }
    }
}
