//! Median halo mass accretion history.
//!
//! Maps the z = 0 peak mass of a halo to its expected mass at redshift `z`.
//! The history is anchored on a pivot halo of `10^13.276 M☉` whose growth is
//! a fixed function of redshift. Other masses follow the pivot in log space,
//! with a logistic time-dependence whose midpoint `a0` moves earlier for
//! lower-mass halos (they assemble earlier).
//!
//! # References
//! - Behroozi et al. (2019), Appendix H - "UniverseMachine"

use units::{Mass, Redshift};

/// `log10` of the pivot halo mass at z = 0
pub const LOG10_PIVOT_MASS_Z0: f64 = 13.276;

/// `log10` of the mass scale in the formation-time term
pub const LOG10_FORMATION_MASS: f64 = 9.649;

/// Steepness of the logistic transition in scale factor
const TRANSITION_SLOPE: f64 = -4.651;

/// Mass of the pivot halo at redshift `z`.
///
/// `M13(z) = M13(0) (1+z)^3 (1+z/2)^-6.11 exp(-0.503 z)`
pub fn pivot_mass_at_z(z: Redshift) -> Mass {
    let z = z.value();
    let m13_z0 = 10f64.powf(LOG10_PIVOT_MASS_Z0);

    let zfactor1 = (1.0 + z).powf(3.0);
    let zfactor2 = (1.0 + 0.5 * z).powf(-6.11);
    let zfactor3 = (-0.503 * z).exp();

    Mass::from_solar_masses(m13_z0 * zfactor1 * zfactor2 * zfactor3)
}

/// Scale factor at the midpoint of the halo's logistic growth.
pub fn formation_scale_factor(peak_mass: Mass) -> f64 {
    let logarg = (10f64.powf(LOG10_FORMATION_MASS) / peak_mass.to_solar_masses()).powf(0.18);
    0.205 - (logarg + 1.0).log10()
}

/// Halo mass at redshift `z` for a halo with present-day peak mass `peak_mass`.
///
/// At `z = 0` this returns `peak_mass` up to rounding. No guard is placed on
/// the input: a non-positive mass yields NaN.
///
/// # Examples
///
/// ```
/// use sfr_history::models::halo_mass_at_z;
/// use units::{Mass, Redshift};
///
/// let mp = Mass::from_solar_masses(1e12);
/// let today = halo_mass_at_z(mp, Redshift::present());
/// let earlier = halo_mass_at_z(mp, Redshift::new(1.0));
///
/// assert!((today / mp - 1.0).abs() < 1e-12);
/// assert!(earlier < today);
/// ```
pub fn halo_mass_at_z(peak_mass: Mass, z: Redshift) -> Mass {
    let a = z.scale_factor();
    let m13_z0 = Mass::from_log10_solar_masses(LOG10_PIVOT_MASS_Z0);
    let m13 = pivot_mass_at_z(z);

    let exparg_factor1 = (peak_mass / m13_z0).log10();

    let a0 = formation_scale_factor(peak_mass);
    let factor2_num = 1.0 + (TRANSITION_SLOPE * (1.0 - a0)).exp();
    let factor2_denom = 1.0 + (TRANSITION_SLOPE * (a - a0)).exp();
    let exparg = exparg_factor1 * (factor2_num / factor2_denom);

    m13 * 10f64.powf(exparg)
}
