use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// A halo or stellar mass using f64 precision.
///
/// The base unit is the solar mass. Halo catalogs are usually quoted in
/// M☉/h; the type does not track the factor of `h`, so a population should
/// use one convention throughout.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let milky_way_host = Mass::from_solar_masses(1e12);
/// let same = Mass::from_log10_solar_masses(12.0);
///
/// assert!((milky_way_host / same - 1.0).abs() < 1e-12);
/// assert!((milky_way_host.log10() - 12.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: Solar Masses

impl Mass {
    /// Creates a zero mass
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Mass` from a value in solar masses.
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from `log10(M / M☉)`.
    ///
    /// Mass functions and fitting formulas are mostly written in dex, so
    /// this is the natural constructor for pivot masses such as `10^13.276`.
    pub fn from_log10_solar_masses(dex: f64) -> Self {
        Self(10f64.powf(dex))
    }

    /// Returns the mass in solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0
    }

    /// Returns `log10(M / M☉)`.
    ///
    /// Non-positive masses give NaN or -inf, following f64 semantics.
    pub fn log10(&self) -> f64 {
        self.0.log10()
    }

    /// Power function
    pub fn powf(&self, n: f64) -> f64 {
        self.0.powf(n)
    }

    /// True when the mass is finite and strictly positive.
    pub fn is_physical(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl AddAssign for Mass {
    fn add_assign(&mut self, rhs: Mass) {
        self.0 += rhs.0;
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}

/// Division of Mass by Mass returns a dimensionless ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Mass (commutative multiplication)
impl Mul<Mass> for f64 {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Mass {
        rhs * self
    }
}
