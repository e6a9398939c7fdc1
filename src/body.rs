use crate::{ConvergenceError, Orbit, OrbitReport};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A struct representing a named celestial body in orbit.
///
/// Each body owns its orbit, and with it its own trajectory cache.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// The name of the celestial body.
    pub name: String,

    /// The orbit of the celestial body.
    pub orbit: Orbit,
}

impl Body {
    /// Creates a new `Body` instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the celestial body.
    /// * `orbit` - The orbit of the celestial body.
    pub fn new(name: impl Into<String>, orbit: Orbit) -> Self {
        Self {
            name: name.into(),
            orbit,
        }
    }

    /// Gathers every quantity of this body at a given time.
    ///
    /// # Errors
    /// A [`ConvergenceError`] if the Kepler solver fails at that time.
    pub fn report(&self, t: f64) -> Result<OrbitReport, ConvergenceError> {
        OrbitReport::at_time(&self.name, &self.orbit, t)
    }
}

impl core::fmt::Display for Body {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
