//! Tunable knobs for the numerical routines.
//!
//! Every orbit carries a [`SolverConfig`]. The defaults reproduce the
//! behaviour described in the crate docs: a `1e-4` Kepler tolerance,
//! 20 Bessel terms and 5000 Runge-Kutta steps.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default convergence tolerance of the Kepler solver, in radians.
pub const DEFAULT_KEPLER_TOLERANCE: f64 = 1e-4;

/// The default cap on fixed-point iterations per seed.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// The default cap on seeds tried by the Kepler solver (first seed included).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// The default number of terms of the Bessel series.
pub const DEFAULT_BESSEL_ORDER: u32 = 20;

/// The default number of Runge-Kutta steps between epoch and the target time.
pub const DEFAULT_RK4_STEPS: u32 = 5000;

/// The default PRNG seed for re-seeding the Kepler solver.
pub const DEFAULT_RESEED_SEED: u64 = 0x6b65_706c_6572;

/// How the Kepler solver picks its first guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeedStrategy {
    /// Start from the mean anomaly itself.
    ///
    /// Deterministic. The first iterate stays within `[0, pi]` for all
    /// but high eccentricities (roughly `e > 0.9` with `M` between 0.05
    /// and 0.3), so the re-seed guard is mostly a fallback.
    MeanAnomaly,

    /// Draw the first guess uniformly from `(0, pi)`.
    ///
    /// The draw comes from a PRNG seeded with [`KeplerSolverConfig::reseed_seed`]
    /// and the mean anomaly, so the result is still reproducible.
    /// This exercises the re-seed guard much more often.
    Uniform,
}

/// Configuration of the Kepler fixed-point solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeplerSolverConfig {
    /// Stop once two consecutive iterates differ by less than this.
    pub tolerance: f64,
    /// Maximum fixed-point iterations for a single seed.
    pub max_iterations: u32,
    /// Maximum number of seeds tried, including the first one.
    pub max_attempts: u32,
    /// How the first guess is chosen.
    pub seed_strategy: SeedStrategy,
    /// Seed of the PRNG used for re-seeding.
    pub reseed_seed: u64,
    /// Number of terms used by the Bessel-series cross-check.
    pub bessel_order: u32,
}

impl Default for KeplerSolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_KEPLER_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed_strategy: SeedStrategy::MeanAnomaly,
            reseed_seed: DEFAULT_RESEED_SEED,
            bessel_order: DEFAULT_BESSEL_ORDER,
        }
    }
}

/// Configuration of the fixed-step true-anomaly integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegratorConfig {
    /// Number of RK4 steps between epoch and the target time.
    ///
    /// Precision is purely a function of this value; there is no
    /// error control.
    pub steps: u32,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_RK4_STEPS,
        }
    }
}

/// Tolerances for the self-verification checks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InvariantTolerances {
    /// Vis-viva energy vs. the closed form, relative to `|energy|`.
    pub energy: f64,
    /// `r² dθ/dt` vs. `c`, relative to `c`.
    pub angular_momentum: f64,
    /// Integrated vs. converted true anomaly, in radians.
    pub true_anomaly: f64,
    /// Fixed-point vs. Bessel eccentric anomaly, in radians.
    pub eccentric_anomaly: f64,
}

impl Default for InvariantTolerances {
    fn default() -> Self {
        Self {
            energy: 1e-3,
            angular_momentum: 1e-3,
            true_anomaly: 1e-3,
            eccentric_anomaly: 1e-3,
        }
    }
}

/// Everything an orbit needs to know about how to compute its state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// See [`KeplerSolverConfig`].
    pub kepler: KeplerSolverConfig,
    /// See [`IntegratorConfig`].
    pub integrator: IntegratorConfig,
    /// See [`InvariantTolerances`].
    pub tolerances: InvariantTolerances,
}

impl SolverConfig {
    /// Returns this config with a different Kepler tolerance.
    #[must_use]
    pub fn with_kepler_tolerance(mut self, tolerance: f64) -> Self {
        self.kepler.tolerance = tolerance;
        self
    }

    /// Returns this config with different iteration caps.
    #[must_use]
    pub fn with_iteration_caps(mut self, max_iterations: u32, max_attempts: u32) -> Self {
        self.kepler.max_iterations = max_iterations;
        self.kepler.max_attempts = max_attempts;
        self
    }

    /// Returns this config with a different seeding strategy.
    #[must_use]
    pub fn with_seed_strategy(mut self, seed_strategy: SeedStrategy) -> Self {
        self.kepler.seed_strategy = seed_strategy;
        self
    }

    /// Returns this config with a different re-seed PRNG seed.
    #[must_use]
    pub fn with_reseed_seed(mut self, reseed_seed: u64) -> Self {
        self.kepler.reseed_seed = reseed_seed;
        self
    }

    /// Returns this config with a different Bessel truncation order.
    #[must_use]
    pub fn with_bessel_order(mut self, bessel_order: u32) -> Self {
        self.kepler.bessel_order = bessel_order;
        self
    }

    /// Returns this config with a different RK4 step count.
    #[must_use]
    pub fn with_rk4_steps(mut self, steps: u32) -> Self {
        self.integrator.steps = steps;
        self
    }

    /// Returns this config with different invariant tolerances.
    #[must_use]
    pub fn with_tolerances(mut self, tolerances: InvariantTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }
}
