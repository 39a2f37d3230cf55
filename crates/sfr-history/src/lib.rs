//! In-situ stellar mass histories for dark-matter halo cores.
//!
//! Annotates a halo population with the stellar mass it formed in situ up to
//! one or more output redshifts, without running a hydrodynamic simulation.
//! Each halo is described only by its present-day peak mass; everything else
//! comes from empirical fitting functions.
//!
//! # Architecture
//!
//! Per grid step and per halo, a feed-forward chain is evaluated:
//! 1. **Halo mass** at `z` from the z = 0 peak mass ([`models::halo_mass`])
//! 2. **vmax** from halo mass and scale factor ([`models::vmax`])
//! 3. **SFR** from vmax and redshift ([`models::sfr`], coefficients in [`SfrParams`])
//!
//! The [`StellarMassIntegrator`] drives the chain over a [`grid::TimeGrid`],
//! accumulates `sfr * dt` with forward Euler, and snapshots
//! `(stellar mass, sfr, halo mass)` at the steps of a [`grid::OutputSchedule`]
//! into a flat buffer ([`results`]).
//!
//! # Validation
//!
//! Shapes, orderings, masses and coefficients are checked before any output
//! is written; see [`HistoryError`]. Grid generation, catalog I/O and
//! coefficient calibration are left to the caller.
//!
//! # References
//! - Behroozi et al. (2019) - "UniverseMachine: The correlation between galaxy
//!   growth and dark matter halo assembly from z = 0-10"

pub mod config;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod models;
pub mod params;
pub mod results;


pub use units;

pub use config::IntegratorConfig;
pub use error::{HistoryError, HistoryResult};
pub use grid::{INITIAL_DT_FRACTION, OutputSchedule, TimeGrid};
pub use integrator::{StellarMassIntegrator, mstar_at_multi_zobs};
pub use models::{EmpiricalModel, HaloHistoryModel, HaloState};
pub use params::SfrParams;
pub use results::{HaloSnapshot, Quantity, ResultsLayout, StellarMassHistory};
