//! Redshift and scale factor.
//!
//! The fitting functions in this workspace are written in terms of both `z`
//! and `a = 1/(1+z)`, often in the same expression, so `Redshift` carries the
//! conversions in one place.

use serde::{Deserialize, Serialize};

/// A cosmological redshift `z`.
///
/// # Examples
///
/// ```rust
/// use units::Redshift;
///
/// let z = Redshift::new(1.0);
/// assert_eq!(z.scale_factor(), 0.5);
/// assert_eq!(Redshift::from_scale_factor(0.25).value(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Redshift(f64);

impl Redshift {
    /// The present epoch, `z = 0`
    pub fn present() -> Self {
        Self(0.0)
    }

    pub fn new(z: f64) -> Self {
        Self(z)
    }

    /// Inverse of [`Redshift::scale_factor`]: `z = 1/a - 1`.
    pub fn from_scale_factor(a: f64) -> Self {
        Self(1.0 / a - 1.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Scale factor `a = 1/(1+z)`; equal to 1 today.
    pub fn scale_factor(&self) -> f64 {
        1.0 / (1.0 + self.0)
    }

    /// `1 - a`, the evolution variable used by most empirical fits.
    pub fn one_minus_scale_factor(&self) -> f64 {
        1.0 - self.scale_factor()
    }

    /// Natural log of `1+z`
    pub fn ln_one_plus_z(&self) -> f64 {
        (1.0 + self.0).ln()
    }

    /// True for finite `z >= 0`, the range the fitting functions are calibrated on.
    pub fn is_physical(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}
