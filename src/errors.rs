//! Error types for orbit construction, Kepler solving and self-verification.
//!
//! | Type | Raised by | Recoverable? |
//! |------|-----------|--------------|
//! | [`InvalidElementsError`] | [`OrbitalElements::new`][crate::OrbitalElements::new] | No |
//! | [`ConvergenceError`] | the Kepler fixed-point solver | Retry with another seed |
//! | [`NumericDivergenceError`] | [`InvariantCheck::into_result`][crate::InvariantCheck::into_result] | Diagnostic only |
//! | [`RosterError`] | [`Roster`][crate::Roster] construction | No |
//!
//! [`OrbitError`] wraps all of them so callers can use `?` across the crate.

use thiserror::Error;

/// An error to describe why a set of orbital elements was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidElementsError {
    /// ### Eccentricity outside of `[0, 1)`.
    /// Only closed, non-degenerate orbits are supported.
    /// Parabolic and hyperbolic trajectories have no period, and negative
    /// eccentricities have no meaning.
    #[error("eccentricity {0} is outside of [0, 1)")]
    EccentricityOutOfRange(f64),

    /// ### Semi-major axis that is zero, negative, or not finite.
    #[error("semi-major axis {0} must be positive and finite")]
    NonPositiveSemiMajorAxis(f64),

    /// ### Orbital period that is zero, negative, or not finite.
    #[error("orbital period {0} must be positive and finite")]
    NonPositivePeriod(f64),
}

/// The Kepler solver ran out of its iteration budget.
///
/// Both the re-seed loop and the inner iteration loop are capped by
/// [`KeplerSolverConfig`][crate::KeplerSolverConfig]; this error is
/// returned instead of looping forever.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error(
    "Kepler solver did not converge for M = {mean_anomaly}, e = {eccentricity} \
     after {attempts} attempt(s) and {iterations} iteration(s) (last step {last_step})"
)]
pub struct ConvergenceError {
    /// The mean anomaly the solver was asked to invert, in radians.
    pub mean_anomaly: f64,
    /// The eccentricity of the orbit.
    pub eccentricity: f64,
    /// How many seeds were tried, including the first one.
    pub attempts: u32,
    /// The total number of fixed-point iterations over all attempts.
    pub iterations: u32,
    /// The size of the last step taken, or NaN if no step was taken.
    pub last_step: f64,
}

/// A physical quantity that the crate derives in two independent ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantity {
    /// Specific orbital energy: vis-viva at a time vs. the closed form.
    Energy,
    /// Specific angular momentum: `r² dθ/dt` at a time vs. the constant `c`.
    AngularMomentum,
    /// True anomaly: integrated rate vs. conversion from the eccentric anomaly.
    TrueAnomaly,
    /// Eccentric anomaly: fixed-point solver vs. Bessel series.
    EccentricAnomaly,
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Quantity::Energy => "energy",
            Quantity::AngularMomentum => "angular momentum",
            Quantity::TrueAnomaly => "true anomaly",
            Quantity::EccentricAnomaly => "eccentric anomaly",
        };
        f.write_str(name)
    }
}

/// Two derivations of the same quantity disagree by more than the
/// configured tolerance.
///
/// This is a self-verification diagnostic. Both values are kept so the
/// caller can decide which one to trust.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error(
    "{quantity} diverged: primary {primary} vs secondary {secondary} \
     (difference {difference}, tolerance {tolerance})"
)]
pub struct NumericDivergenceError {
    /// Which quantity was compared.
    pub quantity: Quantity,
    /// The value from the primary derivation.
    pub primary: f64,
    /// The value from the secondary derivation.
    pub secondary: f64,
    /// The absolute difference that was measured.
    pub difference: f64,
    /// The tolerance it was measured against.
    pub tolerance: f64,
}

/// An error to describe why a body could not be added to a roster.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    /// A body with the same name is already present.
    #[error("a body named '{0}' is already in the roster")]
    DuplicateName(String),

    /// The elements supplied for the named body are invalid.
    #[error("invalid elements for '{name}': {source}")]
    InvalidEntry {
        /// The name of the rejected body.
        name: String,
        /// Why its elements were rejected.
        #[source]
        source: InvalidElementsError,
    },
}

/// Every error this crate can return.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    /// See [`InvalidElementsError`].
    #[error(transparent)]
    InvalidElements(#[from] InvalidElementsError),

    /// See [`ConvergenceError`].
    #[error(transparent)]
    Convergence(#[from] ConvergenceError),

    /// See [`NumericDivergenceError`].
    #[error(transparent)]
    NumericDivergence(#[from] NumericDivergenceError),

    /// See [`RosterError`].
    #[error(transparent)]
    Roster(#[from] RosterError),
}
