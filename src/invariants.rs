use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{angular_distance, NumericDivergenceError, Quantity};

/// The result of comparing two independent derivations of the same
/// physical quantity.
///
/// Both values are always kept. A check never picks one of them for the
/// caller; it only reports whether they agree within `tolerance`.
///
/// Anomalies are compared as angles, so `0` and `tau` agree.
///
/// # Example
/// ```
/// use kepler_state::{Orbit, OrbitTrait, Quantity};
///
/// let orbit = Orbit::new(0.3, 1.0, 10.0).unwrap();
/// let check = orbit.compare_energy_at_time(2.5).unwrap();
///
/// assert_eq!(check.quantity, Quantity::Energy);
/// assert!(check.is_consistent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InvariantCheck {
    /// Which quantity was compared.
    pub quantity: Quantity,
    /// The value from the primary, time-dependent derivation.
    pub primary: f64,
    /// The value from the secondary derivation.
    pub secondary: f64,
    /// The largest absolute difference considered consistent.
    pub tolerance: f64,
}

impl InvariantCheck {
    /// Creates a check, logging a warning if the values disagree.
    pub(crate) fn new(quantity: Quantity, primary: f64, secondary: f64, tolerance: f64) -> Self {
        let check = Self {
            quantity,
            primary,
            secondary,
            tolerance,
        };

        if !check.is_consistent() {
            warn!(
                "{quantity} mismatch: {primary} vs {secondary} (difference {}, tolerance {tolerance})",
                check.difference()
            );
        }

        check
    }

    /// Gets the absolute difference between the two values.
    ///
    /// For anomalies this is the angular distance, within `[0, pi]`.
    pub fn difference(&self) -> f64 {
        match self.quantity {
            Quantity::TrueAnomaly | Quantity::EccentricAnomaly => {
                angular_distance(self.primary, self.secondary)
            }
            Quantity::Energy | Quantity::AngularMomentum => (self.primary - self.secondary).abs(),
        }
    }

    /// Returns whether the two values agree within the tolerance.
    ///
    /// NaN values never agree.
    pub fn is_consistent(&self) -> bool {
        self.difference() <= self.tolerance
    }

    /// Converts this check into a `Result`, for callers that want to use `?`.
    ///
    /// # Errors
    /// A [`NumericDivergenceError`] carrying both values when they disagree.
    pub fn into_result(self) -> Result<Self, NumericDivergenceError> {
        if self.is_consistent() {
            Ok(self)
        } else {
            Err(NumericDivergenceError {
                quantity: self.quantity,
                primary: self.primary,
                secondary: self.secondary,
                difference: self.difference(),
                tolerance: self.tolerance,
            })
        }
    }
}
