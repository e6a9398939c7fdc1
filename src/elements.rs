use core::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::InvalidElementsError;

const FOUR_PI_SQUARED: f64 = 4.0 * PI * PI;

/// The immutable elements of a closed Keplerian orbit.
///
/// The orbit is described by its eccentricity, semi-major axis and period.
/// Units are up to the caller, as long as they are consistent; the
/// [solar system presets][crate::body_presets] use astronomical units
/// and days.
///
/// The gravitational parameter and the specific angular momentum are
/// derived once, at construction:
///
/// - `mu = 4 pi² a³ / T²` (Kepler's third law)
/// - `c = sqrt(mu a (1 - e²))`
///
/// # Example
/// ```
/// use kepler_state::OrbitalElements;
///
/// let earth = OrbitalElements::new(0.017, 1.0, 365.26).unwrap();
///
/// assert_eq!(earth.get_eccentricity(), 0.017);
/// assert!(OrbitalElements::new(1.0, 1.0, 365.26).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OrbitalElements {
    eccentricity: f64,
    semi_major_axis: f64,
    period: f64,
    mu: f64,
    angular_momentum: f64,
}

impl OrbitalElements {
    /// Validates the given elements and derives `mu` and `c`.
    ///
    /// # Errors
    /// - [`InvalidElementsError::EccentricityOutOfRange`] unless `0 <= e < 1`.
    /// - [`InvalidElementsError::NonPositiveSemiMajorAxis`] unless `a > 0` and finite.
    /// - [`InvalidElementsError::NonPositivePeriod`] unless `T > 0` and finite.
    pub fn new(
        eccentricity: f64,
        semi_major_axis: f64,
        period: f64,
    ) -> Result<Self, InvalidElementsError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(InvalidElementsError::EccentricityOutOfRange(eccentricity));
        }
        if !(semi_major_axis > 0.0 && semi_major_axis.is_finite()) {
            return Err(InvalidElementsError::NonPositiveSemiMajorAxis(
                semi_major_axis,
            ));
        }
        if !(period > 0.0 && period.is_finite()) {
            return Err(InvalidElementsError::NonPositivePeriod(period));
        }

        Ok(Self::new_unchecked(eccentricity, semi_major_axis, period))
    }

    /// Derives `mu` and `c` without validating the inputs.
    ///
    /// Only for elements known to be valid, like the body presets.
    pub(crate) fn new_unchecked(eccentricity: f64, semi_major_axis: f64, period: f64) -> Self {
        let mu = FOUR_PI_SQUARED * semi_major_axis.powi(3) / (period * period);
        let angular_momentum =
            (mu * semi_major_axis * (1.0 - eccentricity * eccentricity)).sqrt();

        Self {
            eccentricity,
            semi_major_axis,
            period,
            mu,
            angular_momentum,
        }
    }

    /// Gets the eccentricity of the orbit, within `[0, 1)`.
    pub fn get_eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Gets the semi-major axis of the orbit.
    pub fn get_semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// Gets the time it takes to complete one revolution.
    pub fn get_period(&self) -> f64 {
        self.period
    }

    /// Gets the gravitational parameter `mu = 4 pi² a³ / T²`.
    #[doc(alias = "get_mu")]
    pub fn get_gravitational_parameter(&self) -> f64 {
        self.mu
    }

    /// Gets the specific angular momentum `c = sqrt(mu a (1 - e²))`.
    #[doc(alias = "get_c")]
    pub fn get_angular_momentum(&self) -> f64 {
        self.angular_momentum
    }
}

impl Default for OrbitalElements {
    /// A circular orbit with a semi-major axis of 1 and a period of 1.
    fn default() -> Self {
        Self::new_unchecked(0.0, 1.0, 1.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for OrbitalElements {
    /// Deserializes the three base elements and re-derives the rest,
    /// so invalid or inconsistent input is rejected.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct BaseElements {
            eccentricity: f64,
            semi_major_axis: f64,
            period: f64,
        }

        let base = BaseElements::deserialize(deserializer)?;
        OrbitalElements::new(base.eccentricity, base.semi_major_axis, base.period)
            .map_err(serde::de::Error::custom)
    }
}
