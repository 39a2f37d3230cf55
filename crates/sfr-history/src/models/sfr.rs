//! Star formation rate as a function of `vmax` and redshift.

use units::{MassRate, Redshift, Velocity};

use crate::params::SfrParams;

/// Characteristic velocity `V(z)` at which the SFR turns over.
pub fn characteristic_velocity(z: Redshift, params: &SfrParams) -> Velocity {
    let one_minus_a = z.one_minus_scale_factor();
    let log_v = params.log_v_0
        + params.log_v_a * one_minus_a
        + params.log_v_lnz * z.ln_one_plus_z()
        + params.log_v_z * z.value();
    Velocity::from_km_per_sec(10f64.powf(log_v))
}

/// Instantaneous in-situ SFR of a halo with maximum circular velocity `vmax`.
///
/// ```text
/// SFR = ε(z) [ 1/(v^α + v^β) + γ(z) exp(-log10(v)² / 2δ) ],   v = vmax / V(z)
/// ```
///
/// Non-negative whenever `vmax > 0` and the coefficients are finite.
pub fn star_formation_rate(vmax: Velocity, z: Redshift, params: &SfrParams) -> MassRate {
    let one_minus_a = z.one_minus_scale_factor();
    let ln_one_plus_z = z.ln_one_plus_z();
    let zval = z.value();

    let v = vmax / characteristic_velocity(z, params);

    let alpha = params.alpha_0
        + params.alpha_a * one_minus_a
        + params.alpha_lnz * ln_one_plus_z
        + params.alpha_z * zval;
    let beta = params.beta_0 + params.beta_a * one_minus_a + params.beta_z * zval;
    let term1 = 1.0 / (v.powf(alpha) + v.powf(beta));

    let log10_v = v.log10();
    let exp_arg = (-log10_v * log10_v) / (2.0 * params.delta_0);
    let log10_gamma = params.gamma_0 + params.gamma_a * one_minus_a + params.gamma_z * zval;
    let term2 = 10f64.powf(log10_gamma) * exp_arg.exp();

    let log10_epsilon = params.epsilon_0
        + params.epsilon_a * one_minus_a
        + params.epsilon_lnz * ln_one_plus_z
        + params.epsilon_z * zval;

    MassRate::from_solar_masses_per_year(10f64.powf(log10_epsilon) * (term1 + term2))
}
