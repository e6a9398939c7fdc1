use core::f64::consts::{PI, TAU};
use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{ConvergenceError, KeplerSolverConfig, SeedStrategy};

/// How far past `[0, pi]` an iterate may land before it is rejected.
///
/// When the root is pi itself (half a period), rounding alone puts the
/// first iterate an ulp above pi.
const GUARD_SLACK: f64 = 1e-12;

/// The outcome of solving Kepler's equation for one mean anomaly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeplerSolution {
    /// The eccentric anomaly, in radians, within `[0, tau)`.
    pub eccentric_anomaly: f64,

    /// The total number of fixed-point iterations over all seeds.
    pub iterations: u32,

    /// How many seeds were discarded before the accepted one.
    ///
    /// A seed is discarded when one of its iterates leaves `[0, pi]`,
    /// or when it runs out of iterations.
    pub reseeds: u32,
}

/// One step of the fixed-point iteration.
///
/// u' = (e (sin u - u cos u) + M) / (1 - e cos u)
///
/// This is algebraically the Newton step for `u - e sin u - M = 0`.
#[inline]
fn fixed_point_step(eccentricity: f64, mean_anomaly: f64, eccentric_anomaly: f64) -> f64 {
    let (sin_u, cos_u) = eccentric_anomaly.sin_cos();
    (eccentricity * (sin_u - eccentric_anomaly * cos_u) + mean_anomaly)
        / (1.0 - eccentricity * cos_u)
}

/// Solves Kepler's equation `u - e sin u = M` for the eccentric anomaly `u`.
///
/// The mean anomaly is wrapped into `[0, tau)` first.
///
/// # Branch folding
/// The root of Kepler's equation is odd-symmetric about pi:
/// `u(tau - M) = tau - u(M)`.
/// Mean anomalies above pi are therefore folded back into `[0, pi]`
/// before iterating, which keeps every valid iterate inside `[0, pi]` and
/// makes the out-of-range guard exact. The result is unfolded at the end.
///
/// # Re-seeding
/// When an iterate leaves `[0, pi]` (or is NaN), the current seed is
/// discarded and a new one is drawn uniformly from `(0, pi)`. The PRNG is
/// seeded from [`KeplerSolverConfig::reseed_seed`] and the mean anomaly,
/// so results are reproducible. The final attempt starts from the mean
/// anomaly again, whatever the seeding strategy.
///
/// # Bounded
/// At most `max_attempts` seeds with `max_iterations` iterations each are
/// tried before a [`ConvergenceError`] is returned.
pub(crate) fn solve_keplers_equation(
    eccentricity: f64,
    mean_anomaly: f64,
    config: &KeplerSolverConfig,
) -> Result<KeplerSolution, ConvergenceError> {
    let mean_anomaly = mean_anomaly.rem_euclid(TAU);
    let folded = mean_anomaly > PI;
    let reduced_mean_anomaly = if folded {
        TAU - mean_anomaly
    } else {
        mean_anomaly
    };

    let mut rng = StdRng::seed_from_u64(config.reseed_seed ^ mean_anomaly.to_bits());
    let mut iterations = 0;
    let mut last_step = f64::NAN;

    for attempt in 0..config.max_attempts {
        // The last attempt always starts from the mean anomaly, which
        // converges where uniform draws almost never do (M close to pi).
        let seed_from_mean_anomaly = (attempt == 0
            && config.seed_strategy == SeedStrategy::MeanAnomaly)
            || attempt + 1 == config.max_attempts;

        let mut eccentric_anomaly = if seed_from_mean_anomaly {
            reduced_mean_anomaly
        } else {
            rng.random_range(0.0..PI)
        };

        for _ in 0..config.max_iterations {
            let next = fixed_point_step(eccentricity, reduced_mean_anomaly, eccentric_anomaly);
            iterations += 1;

            // Also rejects NaN
            if !(-GUARD_SLACK..=PI + GUARD_SLACK).contains(&next) {
                debug!(
                    "Kepler iterate {next} left [0, pi] for M = {mean_anomaly}, e = {eccentricity}; re-seeding"
                );
                break;
            }
            let next = next.clamp(0.0, PI);

            last_step = (next - eccentric_anomaly).abs();
            eccentric_anomaly = next;

            if last_step < config.tolerance {
                trace!(
                    "Kepler solver converged for M = {mean_anomaly} in {iterations} iteration(s), {attempt} re-seed(s)"
                );
                return Ok(KeplerSolution {
                    eccentric_anomaly: if folded {
                        TAU - eccentric_anomaly
                    } else {
                        eccentric_anomaly
                    },
                    iterations,
                    reseeds: attempt,
                });
            }
        }
    }

    Err(ConvergenceError {
        mean_anomaly,
        eccentricity,
        attempts: config.max_attempts,
        iterations,
        last_step,
    })
}

/// Approximates the eccentric anomaly with a truncated Fourier-Bessel series.
///
/// u = M + sum_{k=1}^{N} (2 / k) J_k(k e) sin(k M)
///
/// ...where `J_k` is the Bessel function of the first kind of order `k`
/// and `N` is `order`. The mean anomaly is wrapped into `[0, tau)` first,
/// so the result lies near `[0, tau)` as well.
///
/// # Accuracy
/// The series converges to the root of Kepler's equation as `order` grows.
/// It converges quickly for small eccentricities and slowly near e = 1.
/// It is meant as an independent cross-check, not as the primary solver.
///
/// # Performance
/// Each term evaluates a Bessel function, so cost grows linearly
/// with `order`.
pub(crate) fn bessel_eccentric_anomaly(eccentricity: f64, mean_anomaly: f64, order: u32) -> f64 {
    let mean_anomaly = mean_anomaly.rem_euclid(TAU);

    let series: f64 = (1..=order)
        .map(|k| {
            let k_f64 = k as f64;
            let bessel = libm::jn(k as i32, k_f64 * eccentricity);
            2.0 / k_f64 * bessel * (k_f64 * mean_anomaly).sin()
        })
        .sum();

    mean_anomaly + series
}
