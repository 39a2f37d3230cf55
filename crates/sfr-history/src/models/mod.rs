//! Per-halo physics evaluated at each step of the integration grid.
//!
//! The chain is strictly feed-forward:
//!
//! 1. **Halo mass** - median mass accretion history, from the present-day
//!    peak mass to the mass at redshift `z`
//! 2. **Maximum circular velocity** - from halo mass and scale factor
//! 3. **Star formation rate** - from `vmax` and redshift
//!
//! None of the steps carry state between calls. [`HaloHistoryModel`] is the
//! seam the integrator drives; [`EmpiricalModel`] wires the three fits
//! together.

pub mod empirical;
pub mod halo_mass;
pub mod sfr;
pub mod vmax;

#[cfg(test)]
mod sfr_test;

use serde::{Deserialize, Serialize};
use units::{Mass, MassRate, Redshift, Velocity};

use crate::error::HistoryResult;

pub use empirical::EmpiricalModel;
pub use halo_mass::halo_mass_at_z;
pub use sfr::star_formation_rate;
pub use vmax::vmax_at_z;

/// Instantaneous properties of one halo at one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HaloState {
    /// Halo mass at the epoch
    pub halo_mass: Mass,
    /// Maximum circular velocity at the epoch
    pub vmax: Velocity,
    /// Instantaneous in-situ star formation rate
    pub sfr: MassRate,
}

/// A model that maps a halo's present-day peak mass to its state at `z`.
///
/// Implementations must be pure: the same `(peak_mass, z)` always yields
/// the same state. The integrator relies on this to evaluate halos in any
/// order and on any thread.
pub trait HaloHistoryModel: Send + Sync {
    /// Evaluate the halo state at redshift `z`.
    fn evaluate(&self, peak_mass: Mass, z: Redshift) -> HaloState;

    /// Check the model's own coefficients before an integration starts.
    fn validate(&self) -> HistoryResult<()> {
        Ok(())
    }
}
