//! # Keplerian Orbit State
//! This library crate computes the instantaneous state of a body in a
//! closed Keplerian orbit as a function of elapsed time: position,
//! velocity, eccentric and true anomaly, energy and angular momentum.
//!
//! The orbit is described only by its eccentricity, semi-major axis and
//! period. Everything else is derived.
//!
//! Several quantities are computed in two independent ways so the crate
//! can check itself:
//! - The eccentric anomaly is found by a bounded fixed-point iteration of
//!   Kepler's equation, and approximated by a Fourier-Bessel series.
//! - The true anomaly is integrated from its rate with a fixed-step
//!   Runge-Kutta scheme, and converted from the eccentric anomaly.
//! - The energy is computed with vis-viva at a time, and in closed form.
//! - The angular momentum is computed as `r² dθ/dt` at a time, and in
//!   closed form.
//!
//! See [`InvariantCheck`] for how disagreements are reported.
//!
//! ## Getting started
//! This crate provides four main structs:
//! - [`Orbit`]: An orbit that memoizes its sampled trajectory
//!   (see [`Orbit::get_orbit_samples`]).
//! - [`CompactOrbit`]: The same orbit without the cache.
//! - [`Body`]: A named body and its orbit.
//! - [`Roster`]: A set of named bodies, usually built from external data.
//!
//! All time-based queries live in the [`OrbitTrait`] trait.
//!
//! We also provide a [`body_presets`] module with the planets of the
//! Solar System, in astronomical units and days.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//!
//! use kepler_state::{Orbit, OrbitTrait};
//!
//! # fn main() -> Result<(), kepler_state::OrbitError> {
//! // A circular orbit with a radius of 1 and a period of 1
//! let orbit = Orbit::default();
//! assert_eq!(orbit.get_position_at_time(0.0)?, DVec2::new(1.0, 0.0));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod body;
pub mod body_presets;
mod cached_orbit;
mod compact_orbit;
mod config;
mod elements;
mod errors;
pub mod integrator;
mod invariants;
mod report;
mod roster;
mod solvers;

use core::f64::consts::TAU;

pub use body::Body;
pub use cached_orbit::Orbit;
pub use compact_orbit::CompactOrbit;
pub use config::{
    InvariantTolerances, IntegratorConfig, KeplerSolverConfig, SeedStrategy, SolverConfig,
    DEFAULT_BESSEL_ORDER, DEFAULT_KEPLER_TOLERANCE, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_ITERATIONS,
    DEFAULT_RESEED_SEED, DEFAULT_RK4_STEPS,
};
pub use elements::OrbitalElements;
pub use errors::{
    ConvergenceError, InvalidElementsError, NumericDivergenceError, OrbitError, Quantity,
    RosterError,
};
pub use invariants::InvariantCheck;
pub use report::OrbitReport;
pub use roster::{Roster, RosterEntry};
pub use solvers::KeplerSolution;

use glam::DVec2;
use integrator::{Rk4, TrueAnomalyRate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A struct representing a position and velocity at a point in the orbit.
///
/// Both vectors live in the orbital plane, with the focus at the origin
/// and periapsis along the positive X axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateVectors2D {
    /// The 2D position at a point in the orbit.
    pub position: DVec2,
    /// The 2D velocity at a point in the orbit.
    pub velocity: DVec2,
}

/// A trait that defines the time-based queries of a closed Keplerian orbit.
///
/// Implementors only need to provide their [`OrbitalElements`] and
/// [`SolverConfig`]; every other method has a default implementation.
///
/// # Time
/// Every `t` parameter is an elapsed time since periapsis passage, in the
/// same unit as the period. Any real value is accepted and is reduced
/// modulo the period first, so every time-based quantity is periodic.
///
/// # Errors
/// Methods that need the eccentric anomaly return a [`ConvergenceError`]
/// if the Kepler solver exhausts its iteration budget.
///
/// # Example
/// ```
/// use kepler_state::{CompactOrbit, Orbit, OrbitTrait};
///
/// fn describe(orbit: &impl OrbitTrait) -> f64 {
///     orbit.get_apoapsis() - orbit.get_periapsis()
/// }
///
/// let orbit = Orbit::new(0.5, 2.0, 10.0).unwrap();
/// let compact = CompactOrbit::from(orbit.clone());
///
/// assert_eq!(describe(&orbit), 2.0);
/// assert_eq!(describe(&compact), 2.0);
/// ```
pub trait OrbitTrait {
    /// Gets the orbital elements of this orbit.
    fn get_elements(&self) -> &OrbitalElements;

    /// Gets the numerical configuration used by this orbit.
    fn get_config(&self) -> &SolverConfig;

    /// Gets the eccentricity of the orbit, within `[0, 1)`.
    fn get_eccentricity(&self) -> f64 {
        self.get_elements().get_eccentricity()
    }

    /// Gets the semi-major axis of the orbit.
    fn get_semi_major_axis(&self) -> f64 {
        self.get_elements().get_semi_major_axis()
    }

    /// Gets the time it takes to complete one revolution of the orbit.
    fn get_orbital_period(&self) -> f64 {
        self.get_elements().get_period()
    }

    /// Gets the gravitational parameter, `mu = 4 pi² a³ / T²`.
    #[doc(alias = "get_mu")]
    fn get_gravitational_parameter(&self) -> f64 {
        self.get_elements().get_gravitational_parameter()
    }

    /// Gets the constant specific angular momentum, `c = sqrt(mu a (1 - e²))`.
    fn get_angular_momentum(&self) -> f64 {
        self.get_elements().get_angular_momentum()
    }

    /// Gets the mean motion `n = tau / T`, in radians per unit time.
    fn get_mean_motion(&self) -> f64 {
        TAU / self.get_orbital_period()
    }

    /// Gets the semi-minor axis, `b = a sqrt(1 - e²)`.
    fn get_semi_minor_axis(&self) -> f64 {
        let e = self.get_eccentricity();
        self.get_semi_major_axis() * (1.0 - e * e).sqrt()
    }

    /// Gets the semi-latus rectum, `p = a (1 - e²)`.
    fn get_semi_latus_rectum(&self) -> f64 {
        let e = self.get_eccentricity();
        self.get_semi_major_axis() * (1.0 - e * e)
    }

    /// Gets the distance from the focus at the closest point of the orbit.
    fn get_periapsis(&self) -> f64 {
        self.get_semi_major_axis() * (1.0 - self.get_eccentricity())
    }

    /// Gets the distance from the focus at the farthest point of the orbit.
    fn get_apoapsis(&self) -> f64 {
        self.get_semi_major_axis() * (1.0 + self.get_eccentricity())
    }

    /// Reduces a time into `[0, T)`.
    ///
    /// Every other time-based method calls this first.
    fn reduce_time(&self, t: f64) -> f64 {
        let period = self.get_orbital_period();
        let reduced = t.rem_euclid(period);

        // rem_euclid can round up to the period for tiny negative inputs
        if reduced >= period {
            0.0
        } else {
            reduced
        }
    }

    /// Gets the mean anomaly `M = tau t / T` at a given time, within `[0, tau)`.
    fn get_mean_anomaly_at_time(&self, t: f64) -> f64 {
        TAU * self.reduce_time(t) / self.get_orbital_period()
    }

    /// Solves Kepler's equation at a given time and reports how the
    /// solver got there.
    ///
    /// # Performance
    /// This function uses numerical methods to approach the value and
    /// therefore is not performant. It is recommended to cache this value
    /// if you can.
    fn solve_eccentric_anomaly_at_time(&self, t: f64) -> Result<KeplerSolution, ConvergenceError> {
        solvers::solve_keplers_equation(
            self.get_eccentricity(),
            self.get_mean_anomaly_at_time(t),
            &self.get_config().kepler,
        )
    }

    /// Gets the eccentric anomaly at a given time, within `[0, tau)`.
    ///
    /// This is the primary route, using the bounded fixed-point solver.
    /// See [`get_bessel_eccentric_anomaly_at_time`][Self::get_bessel_eccentric_anomaly_at_time]
    /// for the independent approximation.
    fn get_eccentric_anomaly_at_time(&self, t: f64) -> Result<f64, ConvergenceError> {
        self.solve_eccentric_anomaly_at_time(t)
            .map(|solution| solution.eccentric_anomaly)
    }

    /// Approximates the eccentric anomaly at a given time with a
    /// Bessel series of the configured order.
    ///
    /// This is meant for verification only.
    fn get_bessel_eccentric_anomaly_at_time(&self, t: f64) -> f64 {
        self.get_bessel_eccentric_anomaly_at_time_with_order(t, self.get_config().kepler.bessel_order)
    }

    /// Approximates the eccentric anomaly at a given time with a
    /// Bessel series truncated after `order` terms.
    ///
    /// Larger orders converge to the solver's result.
    fn get_bessel_eccentric_anomaly_at_time_with_order(&self, t: f64, order: u32) -> f64 {
        solvers::bessel_eccentric_anomaly(
            self.get_eccentricity(),
            self.get_mean_anomaly_at_time(t),
            order,
        )
    }

    /// Gets the position at a given eccentric anomaly.
    ///
    /// position = (a (cos u - e), a sqrt(1 - e²) sin u)
    fn get_position_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> DVec2 {
        let (sin_u, cos_u) = eccentric_anomaly.sin_cos();

        DVec2::new(
            self.get_semi_major_axis() * (cos_u - self.get_eccentricity()),
            self.get_semi_minor_axis() * sin_u,
        )
    }

    /// Gets the velocity at a given eccentric anomaly.
    ///
    /// This is the time derivative of
    /// [`get_position_at_eccentric_anomaly`][Self::get_position_at_eccentric_anomaly],
    /// using `du/dt = n / (1 - e cos u)`:
    ///
    /// velocity = n a / (1 - e cos u) * (-sin u, sqrt(1 - e²) cos u)
    fn get_velocity_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> DVec2 {
        let (sin_u, cos_u) = eccentric_anomaly.sin_cos();
        let e = self.get_eccentricity();
        let eccentric_anomaly_rate = self.get_mean_motion() / (1.0 - e * cos_u);

        DVec2::new(
            -self.get_semi_major_axis() * sin_u,
            self.get_semi_minor_axis() * cos_u,
        ) * eccentric_anomaly_rate
    }

    /// Gets the position at a given time.
    fn get_position_at_time(&self, t: f64) -> Result<DVec2, ConvergenceError> {
        Ok(self.get_position_at_eccentric_anomaly(self.get_eccentric_anomaly_at_time(t)?))
    }

    /// Gets the distance from the focus at a given time.
    #[doc(alias = "get_altitude_at_time")]
    fn get_distance_at_time(&self, t: f64) -> Result<f64, ConvergenceError> {
        Ok(self.get_position_at_time(t)?.length())
    }

    /// Gets the velocity at a given time.
    fn get_velocity_at_time(&self, t: f64) -> Result<DVec2, ConvergenceError> {
        Ok(self.get_velocity_at_eccentric_anomaly(self.get_eccentric_anomaly_at_time(t)?))
    }

    /// Gets the speed at a given time.
    fn get_speed_at_time(&self, t: f64) -> Result<f64, ConvergenceError> {
        Ok(self.get_velocity_at_time(t)?.length())
    }

    /// Gets the position and velocity at a given time, solving Kepler's
    /// equation only once.
    fn get_state_vectors_at_time(&self, t: f64) -> Result<StateVectors2D, ConvergenceError> {
        let eccentric_anomaly = self.get_eccentric_anomaly_at_time(t)?;

        Ok(StateVectors2D {
            position: self.get_position_at_eccentric_anomaly(eccentric_anomaly),
            velocity: self.get_velocity_at_eccentric_anomaly(eccentric_anomaly),
        })
    }

    /// Gets the rate of change of the true anomaly, dθ/dt, at a given
    /// true anomaly.
    ///
    /// dθ/dt = c (1 + e cos θ)² / (a² (1 - e²)²)
    fn get_true_anomaly_rate(&self, true_anomaly: f64) -> f64 {
        self.true_anomaly_rate().at(true_anomaly)
    }

    /// Builds the true-anomaly rate ODE of this orbit.
    fn true_anomaly_rate(&self) -> TrueAnomalyRate {
        TrueAnomalyRate::new(
            self.get_eccentricity(),
            self.get_semi_major_axis(),
            self.get_angular_momentum(),
        )
    }

    /// Gets the true anomaly at a given time by integrating its rate
    /// from `θ(0) = 0`.
    ///
    /// This is the primary, time-dependent route. The time is reduced
    /// first, so the result lies within `[0, tau)` up to integration error.
    ///
    /// # Performance
    /// This takes as many Runge-Kutta steps as configured in
    /// [`IntegratorConfig::steps`], regardless of the time.
    fn get_true_anomaly_at_time(&self, t: f64) -> f64 {
        let rk4 = Rk4::new(self.get_config().integrator.steps);
        rk4.integrate(&self.true_anomaly_rate(), 0.0, 0.0, self.reduce_time(t))
    }

    /// Gets the true anomaly at a given time by converting the eccentric
    /// anomaly.
    ///
    /// cos θ = (cos u - e) / (1 - e cos u)
    ///
    /// The inverse cosine loses the sign past half a period, so the
    /// branch is picked from the reduced time: `acos` if `2t < T`,
    /// `tau - acos` otherwise.
    fn get_true_anomaly_from_eccentric_at_time(&self, t: f64) -> Result<f64, ConvergenceError> {
        let t = self.reduce_time(t);
        let e = self.get_eccentricity();
        let cos_u = self.get_eccentric_anomaly_at_time(t)?.cos();
        let cos_theta = ((cos_u - e) / (1.0 - e * cos_u)).clamp(-1.0, 1.0);
        let theta = cos_theta.acos();

        Ok(if 2.0 * t < self.get_orbital_period() {
            theta
        } else {
            TAU - theta
        })
    }

    /// Gets the specific orbital energy in closed form.
    ///
    /// E = -c² / (2 a² (1 - e²)) = -mu / (2a)
    fn get_specific_orbital_energy(&self) -> f64 {
        let c = self.get_angular_momentum();
        let a = self.get_semi_major_axis();
        let e = self.get_eccentricity();

        -c * c / (2.0 * a * a * (1.0 - e * e))
    }

    /// Gets the specific orbital energy at a given time using vis-viva.
    ///
    /// E = v² / 2 - mu / r
    fn get_specific_orbital_energy_at_time(&self, t: f64) -> Result<f64, ConvergenceError> {
        let sv = self.get_state_vectors_at_time(t)?;

        Ok(0.5 * sv.velocity.length_squared()
            - self.get_gravitational_parameter() / sv.position.length())
    }

    /// Gets the specific angular momentum at a given time, `r² dθ/dt`,
    /// with `θ` from [`get_true_anomaly_at_time`][Self::get_true_anomaly_at_time].
    fn get_angular_momentum_at_time(&self, t: f64) -> Result<f64, ConvergenceError> {
        let distance_squared = self.get_position_at_time(t)?.length_squared();
        let true_anomaly = self.get_true_anomaly_at_time(t);

        Ok(distance_squared * self.get_true_anomaly_rate(true_anomaly))
    }

    /// Samples `n` positions evenly spaced in time over one period, and
    /// repeats the first one at the end to close the loop.
    ///
    /// The result has `n + 1` points. Nothing is cached; see
    /// [`Orbit::get_orbit_samples`] for the memoized version.
    fn sample_orbit(&self, n: usize) -> Result<Vec<DVec2>, ConvergenceError> {
        let period = self.get_orbital_period();
        let mut points = Vec::with_capacity(n + 1);

        for i in 0..n {
            let t = i as f64 * period / n as f64;
            points.push(self.get_position_at_time(t)?);
        }

        if let Some(&first) = points.first() {
            points.push(first);
        }

        Ok(points)
    }

    /// Compares the vis-viva energy at a given time against the closed form.
    fn compare_energy_at_time(&self, t: f64) -> Result<InvariantCheck, ConvergenceError> {
        let constant = self.get_specific_orbital_energy();

        Ok(InvariantCheck::new(
            Quantity::Energy,
            self.get_specific_orbital_energy_at_time(t)?,
            constant,
            self.get_config().tolerances.energy * constant.abs(),
        ))
    }

    /// Compares `r² dθ/dt` at a given time against the constant `c`.
    fn compare_angular_momentum_at_time(
        &self,
        t: f64,
    ) -> Result<InvariantCheck, ConvergenceError> {
        let constant = self.get_angular_momentum();

        Ok(InvariantCheck::new(
            Quantity::AngularMomentum,
            self.get_angular_momentum_at_time(t)?,
            constant,
            self.get_config().tolerances.angular_momentum * constant,
        ))
    }

    /// Compares the integrated true anomaly against the one converted
    /// from the eccentric anomaly.
    fn compare_true_anomaly_at_time(&self, t: f64) -> Result<InvariantCheck, ConvergenceError> {
        Ok(InvariantCheck::new(
            Quantity::TrueAnomaly,
            self.get_true_anomaly_at_time(t),
            self.get_true_anomaly_from_eccentric_at_time(t)?,
            self.get_config().tolerances.true_anomaly,
        ))
    }

    /// Compares the solver's eccentric anomaly against the Bessel series.
    fn compare_eccentric_anomaly_at_time(
        &self,
        t: f64,
    ) -> Result<InvariantCheck, ConvergenceError> {
        Ok(InvariantCheck::new(
            Quantity::EccentricAnomaly,
            self.get_eccentric_anomaly_at_time(t)?,
            self.get_bessel_eccentric_anomaly_at_time(t),
            self.get_config().tolerances.eccentric_anomaly,
        ))
    }

    /// Runs every self-verification check at a given time.
    ///
    /// The order is energy, angular momentum, true anomaly, eccentric anomaly.
    fn verify_at_time(&self, t: f64) -> Result<[InvariantCheck; 4], ConvergenceError> {
        Ok([
            self.compare_energy_at_time(t)?,
            self.compare_angular_momentum_at_time(t)?,
            self.compare_true_anomaly_at_time(t)?,
            self.compare_eccentric_anomaly_at_time(t)?,
        ])
    }
}

/// Measures the distance between two angles, in `[0, pi]`.
#[inline]
pub(crate) fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(TAU);
    diff.min(TAU - diff)
}

#[cfg(test)]
mod tests;
