//! Fixed-step integration of scalar ODEs.
//!
//! Used to integrate the true-anomaly rate from epoch to a given time,
//! independently of the Kepler solver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scalar, first-order ODE `dx/dt = f(t, x)`.
pub trait ScalarOde {
    /// Evaluates the derivative `dx/dt` at time `t` and state `x`.
    fn derivative(&self, t: f64, x: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64> ScalarOde for F {
    fn derivative(&self, t: f64, x: f64) -> f64 {
        self(t, x)
    }
}

/// Classic Runge-Kutta 4th order integrator with a fixed step count.
///
/// The step size is `(t_end - t_start) / steps`. There is no error control
/// and no adaptive stepping; precision depends on the step count only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rk4 {
    /// The number of steps taken between the start and end times.
    pub steps: u32,
}

impl Rk4 {
    /// Creates an integrator that takes `steps` steps.
    pub fn new(steps: u32) -> Self {
        Self { steps }
    }

    /// Performs one step of size `dt` from `(t, x)` and returns the new state.
    #[inline]
    pub fn step(system: &impl ScalarOde, t: f64, x: f64, dt: f64) -> f64 {
        let half_dt = 0.5 * dt;

        // k1 = f(t, x)
        let k1 = system.derivative(t, x);
        // k2 = f(t + dt/2, x + dt*k1/2)
        let k2 = system.derivative(t + half_dt, x + half_dt * k1);
        // k3 = f(t + dt/2, x + dt*k2/2)
        let k3 = system.derivative(t + half_dt, x + half_dt * k2);
        // k4 = f(t + dt, x + dt*k3)
        let k4 = system.derivative(t + dt, x + dt * k3);

        // x_next = x + dt/6 * (k1 + 2k2 + 2k3 + k4)
        x + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    }

    /// Integrates `system` from `(t_start, x_start)` to `t_end`.
    ///
    /// Returns `x_start` unchanged when the interval is empty or the
    /// step count is zero.
    pub fn integrate(&self, system: &impl ScalarOde, t_start: f64, x_start: f64, t_end: f64) -> f64 {
        if self.steps == 0 || t_end == t_start {
            return x_start;
        }

        let dt = (t_end - t_start) / self.steps as f64;
        let mut x = x_start;

        for i in 0..self.steps {
            // Recompute t from the index so rounding doesn't accumulate
            let t = t_start + i as f64 * dt;
            x = Self::step(system, t, x, dt);
        }

        x
    }
}

/// The rate of change of the true anomaly of a Keplerian orbit.
///
/// dθ/dt = c (1 + e cos θ)² / (a² (1 - e²)²)
///
/// ...where `c` is the specific angular momentum, `e` the eccentricity
/// and `a` the semi-major axis. The rate is autonomous and accepts any
/// `θ`, including values outside `[0, tau)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrueAnomalyRate {
    eccentricity: f64,
    angular_momentum: f64,
    denominator: f64,
}

impl TrueAnomalyRate {
    /// Creates the rate for an orbit with the given eccentricity,
    /// semi-major axis and specific angular momentum.
    pub fn new(eccentricity: f64, semi_major_axis: f64, angular_momentum: f64) -> Self {
        let one_minus_e_sq = 1.0 - eccentricity * eccentricity;

        Self {
            eccentricity,
            angular_momentum,
            denominator: semi_major_axis * semi_major_axis * one_minus_e_sq * one_minus_e_sq,
        }
    }

    /// Evaluates dθ/dt at the true anomaly `theta`.
    #[inline]
    pub fn at(&self, theta: f64) -> f64 {
        let factor = 1.0 + self.eccentricity * theta.cos();
        self.angular_momentum * factor * factor / self.denominator
    }
}

impl ScalarOde for TrueAnomalyRate {
    fn derivative(&self, _t: f64, theta: f64) -> f64 {
        self.at(theta)
    }
}
