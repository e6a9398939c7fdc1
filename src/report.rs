use core::fmt;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConvergenceError, InvariantCheck, OrbitTrait};

/// A snapshot of every quantity of one body at one time.
///
/// Values that can be derived in two ways are reported both ways, and
/// the matching [`InvariantCheck`]s are available through
/// [`checks`][OrbitReport::checks].
///
/// The [`Display`][fmt::Display] implementation prints one quantity
/// per line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitReport {
    /// The name of the body.
    pub name: String,
    /// The time that was asked for, before reduction.
    pub time: f64,
    /// Position in the orbital plane.
    pub position: DVec2,
    /// Distance from the focus.
    pub distance: f64,
    /// Velocity in the orbital plane.
    pub velocity: DVec2,
    /// Magnitude of the velocity.
    pub speed: f64,
    /// True anomaly, integrated from its rate.
    pub true_anomaly: f64,
    /// True anomaly, converted from the eccentric anomaly.
    pub true_anomaly_from_eccentric: f64,
    /// Energy from vis-viva at this time.
    pub energy_at_time: f64,
    /// Energy in closed form.
    pub energy: f64,
    /// Angular momentum `r² dθ/dt` at this time.
    pub angular_momentum_at_time: f64,
    /// Angular momentum constant `c`.
    pub angular_momentum: f64,
    /// Eccentric anomaly from the fixed-point solver.
    pub eccentric_anomaly: f64,
    /// Eccentric anomaly from the Bessel series.
    pub bessel_eccentric_anomaly: f64,
    /// How many terms the Bessel series used.
    pub bessel_order: u32,
    checks: [InvariantCheck; 4],
}

impl OrbitReport {
    /// Gathers the report for `orbit` at time `t`.
    ///
    /// # Errors
    /// A [`ConvergenceError`] if the Kepler solver fails at that time.
    pub fn at_time(
        name: &str,
        orbit: &impl OrbitTrait,
        t: f64,
    ) -> Result<OrbitReport, ConvergenceError> {
        let sv = orbit.get_state_vectors_at_time(t)?;
        let checks = orbit.verify_at_time(t)?;
        let [energy, angular_momentum, true_anomaly, eccentric_anomaly] = checks;

        Ok(OrbitReport {
            name: name.to_string(),
            time: t,
            position: sv.position,
            distance: sv.position.length(),
            velocity: sv.velocity,
            speed: sv.velocity.length(),
            true_anomaly: true_anomaly.primary,
            true_anomaly_from_eccentric: true_anomaly.secondary,
            energy_at_time: energy.primary,
            energy: energy.secondary,
            angular_momentum_at_time: angular_momentum.primary,
            angular_momentum: angular_momentum.secondary,
            eccentric_anomaly: eccentric_anomaly.primary,
            bessel_eccentric_anomaly: eccentric_anomaly.secondary,
            bessel_order: orbit.get_config().kepler.bessel_order,
            checks,
        })
    }

    /// Gets the invariant checks, in the order energy, angular momentum,
    /// true anomaly, eccentric anomaly.
    pub fn checks(&self) -> &[InvariantCheck; 4] {
        &self.checks
    }

    /// Returns whether every invariant check passed.
    pub fn is_consistent(&self) -> bool {
        self.checks.iter().all(InvariantCheck::is_consistent)
    }
}

impl fmt::Display for OrbitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        let t = self.time;

        writeln!(f, "Position of {name} at t = {t}: {}", self.position)?;
        writeln!(f, "Distance of {name} to the focus at t = {t}: {}", self.distance)?;
        writeln!(f, "Velocity of {name} at t = {t}: {}", self.velocity)?;
        writeln!(f, "Speed of {name} at t = {t}: {}", self.speed)?;
        writeln!(f, "True anomaly of {name} at t = {t}: {}", self.true_anomaly)?;
        writeln!(
            f,
            "True anomaly of {name} at t = {t} (from the eccentric anomaly): {}",
            self.true_anomaly_from_eccentric
        )?;
        writeln!(f, "Energy of {name} at t = {t}: {}", self.energy_at_time)?;
        writeln!(f, "Energy of {name} (constant): {}", self.energy)?;
        writeln!(
            f,
            "Angular momentum of {name} at t = {t}: {}",
            self.angular_momentum_at_time
        )?;
        writeln!(f, "Angular momentum of {name} (constant): {}", self.angular_momentum)?;
        writeln!(
            f,
            "Eccentric anomaly of {name} at t = {t} (Bessel series, {} terms): {}",
            self.bessel_order, self.bessel_eccentric_anomaly
        )?;
        writeln!(
            f,
            "Eccentric anomaly of {name} at t = {t} (fixed point): {}",
            self.eccentric_anomaly
        )?;
        write!(
            f,
            "Difference between both values: {}",
            (self.bessel_eccentric_anomaly - self.eccentric_anomaly).abs()
        )
    }
}
