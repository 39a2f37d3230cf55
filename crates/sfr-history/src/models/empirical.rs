use units::{Mass, Redshift};

use super::{HaloHistoryModel, HaloState, halo_mass_at_z, star_formation_rate, vmax_at_z};
use crate::error::HistoryResult;
use crate::params::SfrParams;

/// Median accretion history + `vmax` scaling + UniverseMachine SFR fit.
///
/// # Examples
///
/// ```
/// use sfr_history::models::{EmpiricalModel, HaloHistoryModel};
/// use units::{Mass, Redshift};
///
/// let model = EmpiricalModel::default();
/// let state = model.evaluate(Mass::from_solar_masses(1e12), Redshift::present());
///
/// assert!(state.sfr.to_solar_masses_per_year() > 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmpiricalModel {
    pub params: SfrParams,
}

impl EmpiricalModel {
    pub fn new(params: SfrParams) -> Self {
        Self { params }
    }
}

impl HaloHistoryModel for EmpiricalModel {
    fn evaluate(&self, peak_mass: Mass, z: Redshift) -> HaloState {
        let halo_mass = halo_mass_at_z(peak_mass, z);
        let vmax = vmax_at_z(halo_mass, z);
        let sfr = star_formation_rate(vmax, z, &self.params);

        HaloState {
            halo_mass,
            vmax,
            sfr,
        }
    }

    fn validate(&self) -> HistoryResult<()> {
        self.params.validate()
    }
}
