//! WASM bindings for in-situ stellar mass histories.
//!
//! Exposes the flat integrator entry point to JavaScript so a browser or Node
//! front end can annotate a halo catalog without a native build.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! import init, { mstar_at_multi_zobs, default_sfr_params } from 'sfr-history-wasm';
//!
//! await init();
//!
//! const peakMasses = new Float64Array([1e11, 1e12]);
//! const times = new Float64Array([1e9, 2e9, 13.8e9]);
//! const redshifts = new Float64Array([5.7, 3.2, 0.0]);
//! const outputs = new Uint32Array([1, 2]);
//!
//! // Defaults, or override a subset: { ...default_sfr_params(), delta_0: 0.06 }
//! const results = mstar_at_multi_zobs(peakMasses, times, redshifts, outputs, undefined);
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use sfr_history::models::{EmpiricalModel, HaloHistoryModel};
use sfr_history::units::{Mass, Redshift};
use sfr_history::{HistoryResult, IntegratorConfig, SfrParams, StellarMassIntegrator};

// Unit types serialize as bare numbers via serde(transparent)
#[wasm_bindgen(typescript_custom_section)]
const TS_UNIT_TYPES: &'static str = r#"
/** Mass in solar masses (M☉) */
export type Mass = number;
/** Star formation rate in M☉/yr */
export type MassRate = number;
/** Velocity in km/s */
export type Velocity = number;
"#;

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn to_js_error(error: impl std::fmt::Display) -> JsError {
    JsError::new(&error.to_string())
}

// =============================================================================
// Integration
// =============================================================================

/// Integrate in-situ stellar mass for a halo population.
///
/// # Arguments
/// * `core_mpeak` - Present-day peak mass of each halo (M☉)
/// * `times` - Strictly increasing cosmic times (years)
/// * `redshifts` - Strictly decreasing redshifts paired with `times`
/// * `output_indices` - Strictly increasing grid indices to snapshot; the
///   last must be the final grid point
/// * `params` - SFR coefficients, or `undefined` for the published defaults
///
/// # Returns
/// Flat array of length `nhalos * outputs * 3`: for each output, stellar
/// masses, then SFRs, then halo masses.
#[wasm_bindgen]
pub fn mstar_at_multi_zobs(
    core_mpeak: Vec<f64>,
    times: Vec<f64>,
    redshifts: Vec<f64>,
    output_indices: Vec<u32>,
    params: Option<SfrParams>,
) -> Result<Vec<f64>, JsError> {
    integrate_flat(
        &core_mpeak,
        &times,
        &redshifts,
        &output_indices,
        params.unwrap_or_default(),
    )
    .map_err(to_js_error)
}

/// Halo mass, vmax and SFR of one halo at one redshift.
///
/// Useful for plotting the fitting functions directly.
#[wasm_bindgen]
pub fn halo_state_at(
    peak_mass: f64,
    redshift: f64,
    params: Option<SfrParams>,
) -> Result<JsValue, JsError> {
    let model = EmpiricalModel::new(params.unwrap_or_default());
    model.validate().map_err(to_js_error)?;

    let state = model.evaluate(Mass::from_solar_masses(peak_mass), Redshift::new(redshift));
    to_js(&state)
}

/// The published default SFR coefficients.
#[wasm_bindgen]
pub fn default_sfr_params() -> SfrParams {
    SfrParams::default()
}

fn integrate_flat(
    core_mpeak: &[f64],
    times: &[f64],
    redshifts: &[f64],
    output_indices: &[u32],
    params: SfrParams,
) -> HistoryResult<Vec<f64>> {
    let output_indices: Vec<usize> = output_indices.iter().map(|&i| i as usize).collect();

    // WASM is single-threaded; the rayon pool would add nothing here
    let integrator =
        StellarMassIntegrator::with_config(EmpiricalModel::new(params), IntegratorConfig::default());
    let history = integrator.integrate(core_mpeak, times, redshifts, &output_indices)?;

    Ok(history.into_vec())
}
