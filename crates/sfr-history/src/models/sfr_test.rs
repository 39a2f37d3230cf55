use approx::assert_relative_eq;
use units::{Mass, Redshift, Velocity};

use crate::models::sfr::{characteristic_velocity, star_formation_rate};
use crate::models::{EmpiricalModel, HaloHistoryModel};
use crate::params::SfrParams;

#[test]
fn test_reference_values() {
    let params = SfrParams::default();
    let cases = [
        (172.17079432166105, 0.0, 1.2809697040343362),
        (161.815683607906, 1.0, 9.183187633922719),
        (73.16635812047068, 2.0, 1.2001130378696057),
        (723.8275760534978, 0.5, 40.7644732804711),
    ];

    for (vmax, z, expected) in cases {
        let sfr = star_formation_rate(Velocity::from_km_per_sec(vmax), Redshift::new(z), &params);
        assert_relative_eq!(sfr.to_solar_masses_per_year(), expected, max_relative = 1e-9);
    }
}

#[test]
fn test_characteristic_velocity_today() {
    let v = characteristic_velocity(Redshift::present(), &SfrParams::default());
    assert_relative_eq!(v.to_km_per_sec(), 10f64.powf(2.151), max_relative = 1e-12);
}

#[test]
fn test_sfr_non_negative_across_range() {
    let params = SfrParams::default();
    for z in [0.0, 0.5, 1.0, 2.0, 4.0, 8.0] {
        for vmax in [20.0, 50.0, 100.0, 200.0, 500.0, 1500.0] {
            let sfr = star_formation_rate(Velocity::from_km_per_sec(vmax), Redshift::new(z), &params);
            assert!(sfr.to_solar_masses_per_year() >= 0.0, "vmax={vmax}, z={z}");
        }
    }
}

#[test]
fn test_efficiency_scales_linearly() {
    let base = SfrParams::default();
    let boosted = SfrParams {
        epsilon_0: base.epsilon_0 + 1.0,
        ..base.clone()
    };
    let vmax = Velocity::from_km_per_sec(150.0);
    let z = Redshift::new(1.0);

    let ratio = star_formation_rate(vmax, z, &boosted).to_solar_masses_per_year()
        / star_formation_rate(vmax, z, &base).to_solar_masses_per_year();
    assert_relative_eq!(ratio, 10.0, max_relative = 1e-12);
}

#[test]
fn test_empirical_model_chains_submodels() {
    let model = EmpiricalModel::default();
    let state = model.evaluate(Mass::from_solar_masses(1e12), Redshift::new(1.0));

    assert_relative_eq!(state.halo_mass.to_solar_masses(), 554241250935.3972, max_relative = 1e-9);
    assert_relative_eq!(state.vmax.to_km_per_sec(), 161.815683607906, max_relative = 1e-9);
    assert_relative_eq!(state.sfr.to_solar_masses_per_year(), 9.183187633922719, max_relative = 1e-9);
}

#[test]
fn test_empirical_model_validates_params() {
    let model = EmpiricalModel::new(SfrParams {
        delta_0: -0.1,
        ..SfrParams::default()
    });
    assert!(model.validate().is_err());
    assert!(EmpiricalModel::default().validate().is_ok());
}
