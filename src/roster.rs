use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Body, Orbit, OrbitalElements, RosterError, SolverConfig};

/// One row of an externally supplied body table.
///
/// Rosters are usually loaded from configuration; with the `serde` feature
/// this struct can be deserialized directly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RosterEntry {
    /// The name of the body.
    pub name: String,
    /// The eccentricity of its orbit.
    pub eccentricity: f64,
    /// The semi-major axis of its orbit.
    pub semi_major_axis: f64,
    /// The period of its orbit.
    pub period: f64,
}

impl RosterEntry {
    /// Creates a new roster entry.
    pub fn new(name: impl Into<String>, eccentricity: f64, semi_major_axis: f64, period: f64) -> Self {
        Self {
            name: name.into(),
            eccentricity,
            semi_major_axis,
            period,
        }
    }

    /// Validates this entry and turns it into a body.
    ///
    /// # Errors
    /// [`RosterError::InvalidEntry`] if the elements are invalid.
    pub fn into_body(self, config: SolverConfig) -> Result<Body, RosterError> {
        match OrbitalElements::new(self.eccentricity, self.semi_major_axis, self.period) {
            Ok(elements) => Ok(Body::new(self.name, Orbit::with_config(elements, config))),
            Err(source) => Err(RosterError::InvalidEntry {
                name: self.name,
                source,
            }),
        }
    }
}

/// A set of named bodies, in insertion order.
///
/// A roster is built once, from data supplied by the caller, and then
/// passed to whatever needs it. There is no global body table.
///
/// # Example
/// ```
/// use kepler_state::{Roster, RosterEntry, SolverConfig};
///
/// let roster = Roster::from_entries(
///     [
///         RosterEntry::new("Mercury", 0.206, 0.387, 87.97),
///         RosterEntry::new("Earth", 0.017, 1.0, 365.26),
///     ],
///     SolverConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(roster.len(), 2);
/// assert!(roster.get("Earth").is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    bodies: Vec<Body>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Roster {
        Roster::default()
    }

    /// Builds a roster from table rows, using the same configuration for
    /// every body.
    ///
    /// # Errors
    /// The first invalid or duplicate entry.
    pub fn from_entries(
        entries: impl IntoIterator<Item = RosterEntry>,
        config: SolverConfig,
    ) -> Result<Roster, RosterError> {
        let mut roster = Roster::new();

        for entry in entries {
            let body = entry.into_body(config)?;
            roster.add_body(body).map_err(|(err, _)| err)?;
        }

        Ok(roster)
    }

    /// Adds a body to the roster.
    ///
    /// Returns the index of the newly-added body. On failure, the body is
    /// handed back along with the error.
    pub fn add_body(&mut self, body: Body) -> Result<usize, (RosterError, Body)> {
        if self.index.contains_key(&body.name) {
            return Err((RosterError::DuplicateName(body.name.clone()), body));
        }

        let idx = self.bodies.len();
        self.index.insert(body.name.clone(), idx);
        self.bodies.push(body);

        Ok(idx)
    }

    /// Gets a body by name.
    pub fn get(&self, name: &str) -> Option<&Body> {
        self.index.get(name).map(|&idx| &self.bodies[idx])
    }

    /// Iterates over the bodies, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Iterates over the body names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|body| body.name.as_str())
    }

    /// Gets the number of bodies in the roster.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns whether the roster has no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Body;
    type IntoIter = core::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
