//! Coefficients of the empirical star-formation-rate fit.
//!
//! The SFR of a halo is a double power law in `v = vmax / V(z)` plus a
//! log-normal bump at `v = 1`, scaled by an overall efficiency. Each shape
//! parameter evolves with redshift through the same basis:
//!
//! ```text
//! p(z) = p_0 + p_a (1 - a) + p_lnz ln(1 + z) + p_z z
//! ```
//!
//! (`beta` and `gamma` have no `ln(1+z)` term). The defaults reproduce the
//! published UniverseMachine calibration and are kept bit-for-bit.
//!
//! # References
//! - Behroozi et al. (2019) - "UniverseMachine: The correlation between galaxy
//!   growth and dark matter halo assembly from z = 0-10"

use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::error::{HistoryError, HistoryResult};

/// Named SFR fitting coefficients.
///
/// Deserialization fills any missing field with its default, so a caller can
/// override a subset:
///
/// ```
/// use sfr_history::params::SfrParams;
///
/// let params: SfrParams = serde_json::from_str(r#"{"delta_0": 0.06}"#).unwrap();
/// assert_eq!(params.delta_0, 0.06);
/// assert_eq!(params.epsilon_0, SfrParams::default().epsilon_0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct SfrParams {
    /// Characteristic velocity `log10(V / km s⁻¹)` at z = 0
    #[serde(rename = "logV_0")]
    pub log_v_0: f64,
    #[serde(rename = "logV_a")]
    pub log_v_a: f64,
    #[serde(rename = "logV_lnz")]
    pub log_v_lnz: f64,
    #[serde(rename = "logV_z")]
    pub log_v_z: f64,

    /// Steep (high-velocity) slope of the double power law
    pub alpha_0: f64,
    pub alpha_a: f64,
    pub alpha_lnz: f64,
    pub alpha_z: f64,

    /// Shallow (low-velocity) slope of the double power law
    pub beta_0: f64,
    pub beta_a: f64,
    pub beta_z: f64,

    /// `log10` amplitude of the log-normal bump
    pub gamma_0: f64,
    pub gamma_a: f64,
    pub gamma_z: f64,

    /// Width of the log-normal bump in dex². Must be > 0.
    pub delta_0: f64,

    /// `log10` overall SFR normalisation in M☉/yr
    pub epsilon_0: f64,
    pub epsilon_a: f64,
    pub epsilon_lnz: f64,
    pub epsilon_z: f64,
}

impl Default for SfrParams {
    fn default() -> Self {
        Self {
            log_v_0: 2.151,
            log_v_a: -1.658,
            log_v_lnz: 1.68,
            log_v_z: -0.233,
            alpha_0: -5.598,
            alpha_a: -20.731,
            alpha_lnz: 13.455,
            alpha_z: -1.321,
            beta_0: -1.911,
            beta_a: 0.395,
            beta_z: 0.747,
            gamma_0: -1.699,
            gamma_a: 4.206,
            gamma_z: -0.809,
            delta_0: 0.055,
            epsilon_0: 0.109,
            epsilon_a: -3.441,
            epsilon_lnz: 5.079,
            epsilon_z: -0.781,
        }
    }
}

impl SfrParams {
    /// Number of named coefficients
    pub const COUNT: usize = 19;

    /// All coefficients paired with their serialized names, in declaration order.
    pub fn named(&self) -> [(&'static str, f64); Self::COUNT] {
        [
            ("logV_0", self.log_v_0),
            ("logV_a", self.log_v_a),
            ("logV_lnz", self.log_v_lnz),
            ("logV_z", self.log_v_z),
            ("alpha_0", self.alpha_0),
            ("alpha_a", self.alpha_a),
            ("alpha_lnz", self.alpha_lnz),
            ("alpha_z", self.alpha_z),
            ("beta_0", self.beta_0),
            ("beta_a", self.beta_a),
            ("beta_z", self.beta_z),
            ("gamma_0", self.gamma_0),
            ("gamma_a", self.gamma_a),
            ("gamma_z", self.gamma_z),
            ("delta_0", self.delta_0),
            ("epsilon_0", self.epsilon_0),
            ("epsilon_a", self.epsilon_a),
            ("epsilon_lnz", self.epsilon_lnz),
            ("epsilon_z", self.epsilon_z),
        ]
    }

    /// Reject coefficients the fit cannot be evaluated with.
    ///
    /// Every coefficient must be finite, and `delta_0` must be strictly
    /// positive since it divides the log-normal exponent.
    pub fn validate(&self) -> HistoryResult<()> {
        if let Some((name, value)) = self.named().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(HistoryError::InvalidParameter { name, value });
        }
        if self.delta_0 <= 0.0 {
            return Err(HistoryError::InvalidParameter {
                name: "delta_0",
                value: self.delta_0,
            });
        }
        Ok(())
    }
}
