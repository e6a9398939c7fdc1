use std::{borrow::Cow, sync::OnceLock};

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    CompactOrbit, ConvergenceError, InvalidElementsError, OrbitTrait, OrbitalElements,
    SolverConfig,
};

/// A struct representing a Keplerian orbit with a cached trajectory.
///
/// The first call to [`get_orbit_samples`][Orbit::get_orbit_samples]
/// samples the orbit and keeps the result; later calls with the same
/// sample count return the cached points.
/// The elements never change, so the cache never goes stale.
///
/// If memory efficiency is your goal, you may consider using the
/// [`CompactOrbit`] struct instead.
///
/// # Example
/// ```
/// use kepler_state::{Orbit, OrbitTrait};
///
/// let orbit = Orbit::new(
///     // Eccentricity
///     0.206,
///
///     // Semi-major axis
///     0.387,
///
///     // Period
///     87.97,
/// ).unwrap();
///
/// let samples = orbit.get_orbit_samples(200).unwrap();
///
/// assert_eq!(samples.len(), 201);
/// assert_eq!(samples.first(), samples.last());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orbit {
    elements: OrbitalElements,
    #[cfg_attr(feature = "serde", serde(default))]
    config: SolverConfig,
    #[cfg_attr(feature = "serde", serde(skip))]
    cache: OnceLock<OrbitSamples>,
}

// Written at most once, on the first successful sampling.
#[derive(Clone, Debug, PartialEq)]
struct OrbitSamples {
    count: usize,
    points: Vec<DVec2>,
}

// Initialization and cache management
impl Orbit {
    /// Creates a new orbit with the default [`SolverConfig`].
    ///
    /// # Parameters
    /// - `eccentricity`: The eccentricity of the orbit, within `[0, 1)`.
    /// - `semi_major_axis`: The semi-major axis of the orbit.
    /// - `period`: The time it takes to complete one revolution.
    ///
    /// # Errors
    /// See [`OrbitalElements::new`].
    pub fn new(
        eccentricity: f64,
        semi_major_axis: f64,
        period: f64,
    ) -> Result<Orbit, InvalidElementsError> {
        OrbitalElements::new(eccentricity, semi_major_axis, period).map(Orbit::from_elements)
    }

    /// Creates a new orbit from already-validated elements.
    pub fn from_elements(elements: OrbitalElements) -> Orbit {
        Self::with_config(elements, SolverConfig::default())
    }

    /// Creates a new orbit with a custom numerical configuration.
    pub fn with_config(elements: OrbitalElements, config: SolverConfig) -> Orbit {
        Orbit {
            elements,
            config,
            cache: OnceLock::new(),
        }
    }

    /// Gets a closed polyline of `n` positions evenly spaced in time over
    /// one period, with the first point repeated at the end.
    ///
    /// The first successful call computes and caches the samples. Later
    /// calls asking for the same `n` borrow the cache; calls with another
    /// `n` compute a fresh, uncached sampling.
    ///
    /// # Errors
    /// A [`ConvergenceError`] if any sample fails to solve. The cache is
    /// left untouched in that case.
    pub fn get_orbit_samples(&self, n: usize) -> Result<Cow<'_, [DVec2]>, ConvergenceError> {
        if let Some(cached) = self.cache.get() {
            if cached.count == n {
                return Ok(Cow::Borrowed(&cached.points));
            }
            return self.sample_orbit(n).map(Cow::Owned);
        }

        let points = self.sample_orbit(n)?;

        // Another thread may have won the race; either way the cache
        // now holds a valid sampling.
        match self.cache.get_or_init(|| OrbitSamples { count: n, points }) {
            cached if cached.count == n => Ok(Cow::Borrowed(&cached.points)),
            _ => self.sample_orbit(n).map(Cow::Owned),
        }
    }

    /// Returns whether the orbit samples have been cached yet.
    pub fn is_sampled(&self) -> bool {
        self.cache.get().is_some()
    }
}

impl OrbitTrait for Orbit {
    fn get_elements(&self) -> &OrbitalElements {
        &self.elements
    }

    fn get_config(&self) -> &SolverConfig {
        &self.config
    }
}

impl Default for Orbit {
    /// Creates a circular orbit with a radius of 1 and a period of 1.
    fn default() -> Self {
        Self::from_elements(OrbitalElements::default())
    }
}

impl From<CompactOrbit> for Orbit {
    fn from(compact: CompactOrbit) -> Self {
        Self::with_config(compact.elements, compact.config)
    }
}
