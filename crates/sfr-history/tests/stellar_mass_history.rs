//! End-to-end checks of the flat entry point against an independent,
//! unoptimised reference and against pinned values of the published fit.

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use sfr_history::{
    EmpiricalModel, IntegratorConfig, Quantity, SfrParams, StellarMassIntegrator,
    mstar_at_multi_zobs,
};

/// Direct transcription of the fitting functions with no shared code.
fn reference_state(mp: f64, z: f64, p: &SfrParams) -> (f64, f64) {
    let a = 1.0 / (1.0 + z);

    let m13_z0 = 10f64.powf(13.276);
    let m13 = m13_z0 * (1.0 + z).powf(3.0) * (1.0 + 0.5 * z).powf(-6.11) * (-0.503 * z).exp();
    let a0 = 0.205 - ((10f64.powf(9.649) / mp).powf(0.18) + 1.0).log10();
    let ratio = (1.0 + (-4.651 * (1.0 - a0)).exp()) / (1.0 + (-4.651 * (a - a0)).exp());
    let halo_mass = m13 * 10f64.powf((mp / m13_z0).log10() * ratio);

    let x = a / 0.378;
    let mpivot = 1.64e12 / (x.powf(-0.142) + x.powf(-1.79));
    let vmax = 200.0 * (halo_mass / mpivot).powf(1.0 / 3.0);

    let lnz = (1.0 + z).ln();
    let v = vmax / 10f64.powf(p.log_v_0 + p.log_v_a * (1.0 - a) + p.log_v_lnz * lnz + p.log_v_z * z);
    let alpha = p.alpha_0 + p.alpha_a * (1.0 - a) + p.alpha_lnz * lnz + p.alpha_z * z;
    let beta = p.beta_0 + p.beta_a * (1.0 - a) + p.beta_z * z;
    let term1 = 1.0 / (v.powf(alpha) + v.powf(beta));
    let gamma = 10f64.powf(p.gamma_0 + p.gamma_a * (1.0 - a) + p.gamma_z * z);
    let term2 = gamma * (-v.log10().powi(2) / (2.0 * p.delta_0)).exp();
    let epsilon = 10f64.powf(p.epsilon_0 + p.epsilon_a * (1.0 - a) + p.epsilon_lnz * lnz + p.epsilon_z * z);

    (halo_mass, epsilon * (term1 + term2))
}

/// Σ sfr_i dt_i over the whole grid for one halo.
fn reference_mstar(mp: f64, times: &[f64], redshifts: &[f64], p: &SfrParams) -> f64 {
    let mut last = 0.9 * times[0];
    let mut total = 0.0;
    for (&t, &z) in times.iter().zip(redshifts) {
        let (_, sfr) = reference_state(mp, z, p);
        total += sfr * (t - last);
        last = t;
    }
    total
}

fn log_spaced_grid(n: usize) -> (Vec<f64>, Vec<f64>) {
    // Rough matter-dominated mapping t ∝ a^1.5, good enough for a test grid
    let t0 = 13.8e9;
    let redshifts: Vec<f64> = (0..n)
        .map(|i| 10.0 * (1.0 - i as f64 / (n - 1) as f64))
        .collect();
    let times = redshifts
        .iter()
        .map(|z| t0 * (1.0 / (1.0 + z)).powf(1.5))
        .collect();
    (times, redshifts)
}

fn random_population(rng: &mut ChaChaRng, n: usize) -> Vec<f64> {
    (0..n)
        .map(|_| 10f64.powf(rng.random_range(10.0..14.5)))
        .collect()
}

#[test]
fn two_step_scenario_matches_pinned_values() {
    let mut results = vec![0.0; 3];
    mstar_at_multi_zobs(
        &[1e12],
        &[1e9, 2e9],
        &[1.0, 0.0],
        &[1],
        &mut results,
        &SfrParams::default(),
    )
    .unwrap();

    assert_relative_eq!(results[0], 2199288467.426608, max_relative = 1e-9);
    assert_relative_eq!(results[1], 1.2809697040343362, max_relative = 1e-9);
    assert_relative_eq!(results[2], 1e12, max_relative = 1e-9);
}

#[test]
fn multiple_output_scenario_matches_pinned_values() {
    let mut results = vec![0.0; 6];
    mstar_at_multi_zobs(
        &[1e12],
        &[1e9, 2e9, 3e9],
        &[2.0, 1.0, 0.0],
        &[0, 2],
        &mut results,
        &SfrParams::default(),
    )
    .unwrap();

    let expected = [
        1162942151.052877,
        11.629421510528768,
        267843025700.70526,
        11627099489.009932,
        1.2809697040343362,
        1e12,
    ];
    for (got, want) in results.iter().zip(expected) {
        assert_relative_eq!(*got, want, max_relative = 1e-9);
    }
    assert!(results[3] >= results[0]);
}

#[test]
fn two_halo_scenario_matches_pinned_values() {
    let mut results = vec![0.0; 12];
    mstar_at_multi_zobs(
        &[1e11, 1e13],
        &[1e9, 2e9],
        &[1.0, 0.0],
        &[0, 1],
        &mut results,
        &SfrParams::default(),
    )
    .unwrap();

    let expected = [
        164997134.3776439,
        2624481643.5590377,
        1.6499713437764392,
        26.244816435590376,
        62871608436.00283,
        4399396280689.858,
        226316236.28531367,
        10501489932.85575,
        0.06131910190766976,
        7.877008289296712,
        1e11,
        1e13,
    ];
    for (got, want) in results.iter().zip(expected) {
        assert_relative_eq!(*got, want, max_relative = 1e-9);
    }
}

#[test]
fn single_step_grid_integrates_a_tenth_of_first_time() {
    let params = SfrParams::default();
    let mut results = vec![0.0; 3];
    mstar_at_multi_zobs(&[1e12], &[1e9], &[1.0], &[0], &mut results, &params).unwrap();

    let (_, sfr) = reference_state(1e12, 1.0, &params);
    assert_relative_eq!(results[0], sfr * 0.1 * 1e9, max_relative = 1e-12);
    assert_relative_eq!(results[0], 918318763.3922719, max_relative = 1e-9);
}

#[test]
fn final_mass_matches_reference_sum() {
    let params = SfrParams::default();
    let (times, redshifts) = log_spaced_grid(200);
    let last = times.len() - 1;

    for mp in [3e10, 1e12, 5e14] {
        let mut results = vec![0.0; 3];
        mstar_at_multi_zobs(&[mp], &times, &redshifts, &[last], &mut results, &params).unwrap();

        let expected = reference_mstar(mp, &times, &redshifts, &params);
        assert_relative_eq!(results[0], expected, max_relative = 1e-9);
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let mut rng = ChaChaRng::seed_from_u64(7);
    let masses = random_population(&mut rng, 50);
    let (times, redshifts) = log_spaced_grid(60);
    let outputs = [10, 30, 59];

    let integrator = StellarMassIntegrator::new(EmpiricalModel::default());
    let first = integrator.integrate(&masses, &times, &redshifts, &outputs).unwrap();
    let second = integrator.integrate(&masses, &times, &redshifts, &outputs).unwrap();

    assert_eq!(first, second);
}

#[test]
fn stellar_mass_never_decreases_between_snapshots() {
    let mut rng = ChaChaRng::seed_from_u64(11);
    let masses = random_population(&mut rng, 40);
    let (times, redshifts) = log_spaced_grid(80);
    let outputs: Vec<usize> = (0..80).step_by(8).chain([79]).collect();

    let history = StellarMassIntegrator::new(EmpiricalModel::default())
        .integrate(&masses, &times, &redshifts, &outputs)
        .unwrap();

    for halo in 0..masses.len() {
        for slot in 1..history.nslots() {
            let earlier = history.snapshot(slot - 1, halo).unwrap().stellar_mass;
            let later = history.snapshot(slot, halo).unwrap().stellar_mass;
            assert!(later >= earlier, "halo {halo} slot {slot}");
        }
    }
}

#[test]
fn halos_are_independent() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let left = random_population(&mut rng, 17);
    let right = random_population(&mut rng, 23);
    let combined: Vec<f64> = left.iter().chain(&right).copied().collect();
    let (times, redshifts) = log_spaced_grid(50);
    let outputs = [5, 25, 49];

    let integrator = StellarMassIntegrator::new(EmpiricalModel::default());
    let run_left = integrator.integrate(&left, &times, &redshifts, &outputs).unwrap();
    let run_right = integrator.integrate(&right, &times, &redshifts, &outputs).unwrap();
    let run_combined = integrator.integrate(&combined, &times, &redshifts, &outputs).unwrap();

    for slot in 0..outputs.len() {
        for quantity in Quantity::ALL {
            let joined: Vec<f64> = run_left
                .quantity(slot, quantity)
                .unwrap()
                .iter()
                .chain(run_right.quantity(slot, quantity).unwrap())
                .copied()
                .collect();
            assert_eq!(run_combined.quantity(slot, quantity).unwrap(), joined.as_slice());
        }
    }
}

#[test]
fn parallel_run_matches_reference() {
    let params = SfrParams::default();
    let mut rng = ChaChaRng::seed_from_u64(3);
    let masses = random_population(&mut rng, 200);
    let (times, redshifts) = log_spaced_grid(100);
    let last = times.len() - 1;

    let history = StellarMassIntegrator::with_config(
        EmpiricalModel::new(params.clone()),
        IntegratorConfig::parallel(),
    )
    .integrate(&masses, &times, &redshifts, &[last])
    .unwrap();

    for (halo, &mp) in masses.iter().enumerate() {
        let expected = reference_mstar(mp, &times, &redshifts, &params);
        assert_relative_eq!(history.stellar_mass(0).unwrap()[halo], expected, max_relative = 1e-9);
    }
}

#[test]
fn overridden_coefficients_change_the_result() {
    let times = [1e9, 2e9];
    let redshifts = [1.0, 0.0];
    let mut default_run = vec![0.0; 3];
    let mut boosted_run = vec![0.0; 3];

    let boosted = SfrParams {
        epsilon_0: SfrParams::default().epsilon_0 + 0.5,
        ..SfrParams::default()
    };
    mstar_at_multi_zobs(&[1e12], &times, &redshifts, &[1], &mut default_run, &SfrParams::default())
        .unwrap();
    mstar_at_multi_zobs(&[1e12], &times, &redshifts, &[1], &mut boosted_run, &boosted).unwrap();

    assert_relative_eq!(boosted_run[0] / default_run[0], 10f64.powf(0.5), max_relative = 1e-12);
    assert_eq!(boosted_run[2], default_run[2]);
}

#[test]
fn grid_starting_at_zero_skips_the_first_interval() {
    let mut results = vec![0.0; 3];
    mstar_at_multi_zobs(
        &[1e12],
        &[0.0, 1e9],
        &[3.0, 0.0],
        &[1],
        &mut results,
        &SfrParams::default(),
    )
    .unwrap();

    assert_relative_eq!(results[0], 1280969704.034336, max_relative = 1e-9);
    assert_relative_eq!(results[1], 1.2809697040343362, max_relative = 1e-9);
    assert_relative_eq!(results[2], 1e12, max_relative = 1e-9);
}
