//! Errors for stellar mass history integration.
//!
//! Every variant is raised by up-front validation, before the results buffer
//! is touched. Numerical blow-ups inside the fitting functions are not
//! errors: with validated inputs they propagate as NaN/inf like any other
//! f64 arithmetic.

use thiserror::Error;

/// Result alias for integration and validation paths.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Unified error type for the integrator, its inputs, and result read-back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    // ---- Time grid ----
    #[error("time grid is empty")]
    EmptyTimeGrid,

    #[error("times has {times} entries but redshifts has {redshifts}")]
    GridLengthMismatch { times: usize, redshifts: usize },

    #[error("time {value} at index {index} is not finite")]
    NonFiniteTime { index: usize, value: f64 },

    #[error("times must be strictly increasing (violated at index {index})")]
    TimesNotIncreasing { index: usize },

    #[error("redshift {value} at index {index} must be finite and >= 0")]
    InvalidRedshift { index: usize, value: f64 },

    #[error("redshifts must be strictly decreasing (violated at index {index})")]
    RedshiftsNotDecreasing { index: usize },

    // ---- Output schedule ----
    #[error("no output indices requested")]
    EmptyOutputSchedule,

    #[error("output index {index} is out of range for a grid of {ntimes} steps")]
    OutputIndexOutOfRange { index: usize, ntimes: usize },

    #[error("output indices must be strictly increasing (violated at position {position})")]
    OutputIndicesNotIncreasing { position: usize },

    #[error(
        "last requested output index is {last_requested} but the grid ends at {final_index}; \
         the final integrated stellar mass would be discarded"
    )]
    FinalStepNotRequested {
        last_requested: usize,
        final_index: usize,
    },

    // ---- Halo population ----
    #[error("peak mass {value} of halo {index} must be finite and > 0")]
    InvalidPeakMass { index: usize, value: f64 },

    // ---- Results storage ----
    #[error("results buffer must be exactly {expected} long, got {actual}")]
    ResultsLengthMismatch { expected: usize, actual: usize },

    #[error("output slot {slot} out of range ({nslots} slots)")]
    SlotOutOfRange { slot: usize, nslots: usize },

    #[error("halo {halo} out of range ({nhalos} halos)")]
    HaloOutOfRange { halo: usize, nhalos: usize },

    // ---- Model coefficients ----
    #[error("invalid SFR coefficient {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
