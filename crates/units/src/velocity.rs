use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Meters in one kilometer
const KM_TO_M: f64 = 1_000.0;

/// A circular or dispersion velocity using f64 precision.
///
/// Base unit is km/s, the unit halo finders use for `vmax`.
///
/// # Examples
///
/// ```rust
/// use units::Velocity;
///
/// let vmax = Velocity::from_km_per_sec(220.0);
/// assert_eq!(vmax.to_meters_per_sec(), 220_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: km/s

impl Velocity {
    pub fn from_km_per_sec(value: f64) -> Self {
        Self(value)
    }

    pub fn from_meters_per_sec(value: f64) -> Self {
        Self(value / KM_TO_M)
    }

    pub fn to_km_per_sec(&self) -> f64 {
        self.0
    }

    pub fn to_meters_per_sec(&self) -> f64 {
        self.0 * KM_TO_M
    }
}

impl Mul<f64> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: f64) -> Velocity {
        Velocity(self.0 * rhs)
    }
}

/// Ratio of two velocities, e.g. `vmax / V(z)` in the SFR fit
impl Div for Velocity {
    type Output = f64;

    fn div(self, rhs: Velocity) -> f64 {
        self.0 / rhs.0
    }
}
