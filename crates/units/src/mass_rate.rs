use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

use crate::mass::Mass;
use crate::time::Time;

/// A star-formation or accretion rate using f64 precision.
///
/// The base unit is solar masses per year.
///
/// # Examples
///
/// ```rust
/// use units::{MassRate, Time};
///
/// let sfr = MassRate::from_solar_masses_per_year(2.0);
/// let formed = sfr.integrate(Time::from_myr(500.0));
///
/// assert_eq!(formed.to_solar_masses(), 1e9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MassRate(f64); // Base unit: Solar Masses per year

impl MassRate {
    /// Creates a zero rate
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `MassRate` from a value in solar masses per year.
    pub fn from_solar_masses_per_year(value: f64) -> Self {
        Self(value)
    }

    /// Returns the mass rate value in solar masses per year.
    pub fn to_solar_masses_per_year(&self) -> f64 {
        self.0
    }

    /// Mass formed at this constant rate over `duration`.
    ///
    /// This is a single forward-Euler increment; callers integrating a
    /// varying rate sum these over their own grid.
    pub fn integrate(&self, duration: Time) -> Mass {
        Mass::from_solar_masses(self.0 * duration.to_years())
    }
}

impl Add for MassRate {
    type Output = MassRate;

    fn add(self, rhs: MassRate) -> MassRate {
        MassRate(self.0 + rhs.0)
    }
}

impl Mul<f64> for MassRate {
    type Output = MassRate;

    fn mul(self, rhs: f64) -> MassRate {
        MassRate(self.0 * rhs)
    }
}

/// Allow f64 * MassRate (commutative multiplication)
impl Mul<MassRate> for f64 {
    type Output = MassRate;

    fn mul(self, rhs: MassRate) -> MassRate {
        rhs * self
    }
}
