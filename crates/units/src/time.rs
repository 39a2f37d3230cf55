use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Million years in regular years
const MYR_TO_YEARS: f64 = 1_000_000.0;

/// Billion years in regular years
const GYR_TO_YEARS: f64 = 1_000_000_000.0;

/// A cosmic time quantity using f64 precision.
///
/// The `Time` struct uses years as the base unit. Lookback grids and ages of
/// the universe are usually quoted in Gyr, so both conversions are provided.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// let age = Time::from_years(13.8e9);
/// let step = Time::from_myr(250.0);
///
/// assert_eq!(step.to_years(), 2.5e8);
/// assert_eq!((age - step).to_gyr(), 13.55);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: Years

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in years.
    pub fn from_years(value: f64) -> Self {
        Self(value)
    }

    /// Creates a time from a value in million years (Myr)
    pub fn from_myr(value: f64) -> Self {
        Self(value * MYR_TO_YEARS)
    }

    /// Creates a time from a value in billion years (Gyr)
    pub fn from_gyr(value: f64) -> Self {
        Self(value * GYR_TO_YEARS)
    }

    /// Returns the time in years.
    pub fn to_years(&self) -> f64 {
        self.0
    }

    /// Returns the time in million years
    pub fn to_myr(&self) -> f64 {
        self.0 / MYR_TO_YEARS
    }

    /// Returns the time in billion years
    pub fn to_gyr(&self) -> f64 {
        self.0 / GYR_TO_YEARS
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}

/// Ratio of two durations
impl Div for Time {
    type Output = f64;

    fn div(self, rhs: Time) -> f64 {
        self.0 / rhs.0
    }
}
