//! Forward-Euler integration of in-situ stellar mass.
//!
//! For every halo the integrator walks the shared time grid in ascending
//! order. At each step it evaluates the halo model at the step's redshift and
//! adds `sfr * dt` to a private stellar-mass accumulator. On steps named by
//! the output schedule it snapshots `(stellar mass, sfr, halo mass)`.
//!
//! # Time-Stepping
//!
//! The first interval runs from `0.9 * times[0]` to `times[0]` (see
//! [`INITIAL_DT_FRACTION`](crate::grid::INITIAL_DT_FRACTION)); every later
//! interval is the gap to the previous grid point. The rate is evaluated at
//! the end of each interval. There is no sub-stepping: accuracy is set
//! entirely by the density of the caller's grid.
//!
//! # Parallelism
//!
//! Time is inherently sequential, halos are not. With
//! [`IntegratorConfig::parallel`] each halo walks the grid on its own rayon
//! task with its own accumulator, and the rows are scattered into the shared
//! buffer afterwards. The arithmetic per halo is identical, so both paths
//! produce bit-identical results.

use rayon::prelude::*;
use tracing::{debug, trace};
use units::Mass;

use crate::config::IntegratorConfig;
use crate::error::{HistoryError, HistoryResult};
use crate::grid::{OutputSchedule, TimeGrid};
use crate::models::{EmpiricalModel, HaloHistoryModel};
use crate::params::SfrParams;
use crate::results::{HaloSnapshot, ResultsLayout, StellarMassHistory};

/// Integrates stellar mass histories for a halo population.
///
/// # Examples
///
/// ```
/// use sfr_history::integrator::StellarMassIntegrator;
/// use sfr_history::models::EmpiricalModel;
///
/// let integrator = StellarMassIntegrator::new(EmpiricalModel::default());
/// let history = integrator
///     .integrate(&[1e11, 1e12], &[1e9, 5e9, 13.8e9], &[5.7, 1.2, 0.0], &[1, 2])
///     .unwrap();
///
/// let early = history.stellar_mass(0).unwrap();
/// let today = history.stellar_mass(1).unwrap();
/// assert!(today[1] > early[1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StellarMassIntegrator<M> {
    model: M,
    config: IntegratorConfig,
}

impl<M: HaloHistoryModel> StellarMassIntegrator<M> {
    /// Creates an integrator with the default configuration
    pub fn new(model: M) -> Self {
        Self::with_config(model, IntegratorConfig::default())
    }

    pub fn with_config(model: M, config: IntegratorConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Integrate every halo and fill a caller-owned flat `results` buffer.
    ///
    /// `results` must have length `nhalos * output_indices.len() * 3`; its
    /// prior contents are overwritten. All inputs are validated before any
    /// write, so on error the buffer is left untouched.
    ///
    /// # Arguments
    ///
    /// * `peak_masses` - Present-day peak mass of each halo (M☉)
    /// * `times` - Strictly increasing cosmic times (years)
    /// * `redshifts` - Strictly decreasing redshifts paired with `times`
    /// * `output_indices` - Strictly increasing grid indices to snapshot
    /// * `results` - Flat output buffer, see [`crate::results`]
    pub fn integrate_into(
        &self,
        peak_masses: &[f64],
        times: &[f64],
        redshifts: &[f64],
        output_indices: &[usize],
        results: &mut [f64],
    ) -> HistoryResult<()> {
        let (grid, schedule) = self.prepare(peak_masses, times, redshifts, output_indices)?;
        let layout = ResultsLayout::new(peak_masses.len(), schedule.len());
        layout.check_len(results.len())?;

        debug!(
            nhalos = peak_masses.len(),
            ntimes = grid.len(),
            nslots = schedule.len(),
            parallel = self.config.parallel,
            "integrating stellar mass histories"
        );

        if self.config.parallel {
            self.run_parallel(peak_masses, &grid, &schedule, layout, results);
        } else {
            self.run_sequential(peak_masses, &grid, &schedule, layout, results);
        }
        Ok(())
    }

    /// Like [`Self::integrate_into`], allocating the results buffer.
    pub fn integrate(
        &self,
        peak_masses: &[f64],
        times: &[f64],
        redshifts: &[f64],
        output_indices: &[usize],
    ) -> HistoryResult<StellarMassHistory> {
        let nslots = output_indices.len();
        let mut history = StellarMassHistory::zeroed(ResultsLayout::new(peak_masses.len(), nslots));
        self.integrate_into(
            peak_masses,
            times,
            redshifts,
            output_indices,
            history.as_mut_slice(),
        )?;
        Ok(history)
    }

    /// Integrate a single halo, returning one snapshot per output slot.
    pub fn integrate_halo(
        &self,
        peak_mass: Mass,
        times: &[f64],
        redshifts: &[f64],
        output_indices: &[usize],
    ) -> HistoryResult<Vec<HaloSnapshot>> {
        let peak_masses = [peak_mass.to_solar_masses()];
        let (grid, schedule) = self.prepare(&peak_masses, times, redshifts, output_indices)?;
        Ok(walk_halo(&self.model, peak_mass, &grid, &schedule))
    }

    fn prepare<'a>(
        &self,
        peak_masses: &[f64],
        times: &'a [f64],
        redshifts: &'a [f64],
        output_indices: &'a [usize],
    ) -> HistoryResult<(TimeGrid<'a>, OutputSchedule<'a>)> {
        self.model.validate()?;
        let grid = TimeGrid::new(times, redshifts)?;
        let schedule =
            OutputSchedule::new(output_indices, grid.len(), self.config.require_final_output)?;
        validate_peak_masses(peak_masses)?;
        Ok((grid, schedule))
    }

    /// Time-outer, halo-inner walk with one accumulator per halo.
    fn run_sequential(
        &self,
        peak_masses: &[f64],
        grid: &TimeGrid,
        schedule: &OutputSchedule,
        layout: ResultsLayout,
        results: &mut [f64],
    ) {
        let mut stellar_mass = vec![Mass::zero(); peak_masses.len()];
        let mut cursor = schedule.cursor();

        for step in grid.steps() {
            let slot = cursor.matches(step.index);

            for (ihalo, (&mp, accumulated)) in
                peak_masses.iter().zip(stellar_mass.iter_mut()).enumerate()
            {
                let state = self
                    .model
                    .evaluate(Mass::from_solar_masses(mp), step.redshift);
                *accumulated += state.sfr.integrate(step.dt);

                if let Some(slot) = slot {
                    let snapshot = HaloSnapshot {
                        stellar_mass: *accumulated,
                        sfr: state.sfr,
                        halo_mass: state.halo_mass,
                    };
                    layout.write(results, slot, ihalo, &snapshot);
                }
            }

            if let Some(slot) = slot {
                trace!(slot, itime = step.index, z = step.redshift.value(), "snapshot written");
                cursor.advance();
            }
        }
    }

    /// Halo-outer walk spread over the rayon pool.
    fn run_parallel(
        &self,
        peak_masses: &[f64],
        grid: &TimeGrid,
        schedule: &OutputSchedule,
        layout: ResultsLayout,
        results: &mut [f64],
    ) {
        let rows: Vec<Vec<HaloSnapshot>> = peak_masses
            .par_iter()
            .map(|&mp| walk_halo(&self.model, Mass::from_solar_masses(mp), grid, schedule))
            .collect();

        for (ihalo, row) in rows.iter().enumerate() {
            for (slot, snapshot) in row.iter().enumerate() {
                layout.write(results, slot, ihalo, snapshot);
            }
        }
        trace!(nslots = schedule.len(), "parallel snapshots scattered");
    }
}

/// Walk the whole grid for one halo, returning its snapshot row.
fn walk_halo<M: HaloHistoryModel>(
    model: &M,
    peak_mass: Mass,
    grid: &TimeGrid,
    schedule: &OutputSchedule,
) -> Vec<HaloSnapshot> {
    let mut row = Vec::with_capacity(schedule.len());
    let mut accumulated = Mass::zero();
    let mut cursor = schedule.cursor();

    for step in grid.steps() {
        // Nothing later in the grid can be observed
        if cursor.is_exhausted() {
            break;
        }

        let state = model.evaluate(peak_mass, step.redshift);
        accumulated += state.sfr.integrate(step.dt);

        if cursor.matches(step.index).is_some() {
            row.push(HaloSnapshot {
                stellar_mass: accumulated,
                sfr: state.sfr,
                halo_mass: state.halo_mass,
            });
            cursor.advance();
        }
    }
    row
}

fn validate_peak_masses(peak_masses: &[f64]) -> HistoryResult<()> {
    match peak_masses
        .iter()
        .enumerate()
        .find(|(_, m)| !Mass::from_solar_masses(**m).is_physical())
    {
        Some((index, &value)) => Err(HistoryError::InvalidPeakMass { index, value }),
        None => Ok(()),
    }
}

/// Integrate in-situ stellar mass for `core_mpeak_at_z0` with the empirical
/// model, writing into a caller-owned flat buffer.
///
/// This is the flat-array entry point: `results` has length
/// `nhalos * output_indices.len() * 3` and is laid out as described in
/// [`crate::results`]. The default [`IntegratorConfig`] applies, so the last
/// output index must be the last grid point.
///
/// # Examples
///
/// ```
/// use sfr_history::{mstar_at_multi_zobs, SfrParams};
///
/// let mut results = vec![0.0; 3];
/// mstar_at_multi_zobs(&[1e12], &[1e9, 2e9], &[1.0, 0.0], &[1], &mut results, &SfrParams::default())
///     .unwrap();
///
/// let [mstar, sfr, mhalo] = [results[0], results[1], results[2]];
/// assert!(mstar > 0.0 && sfr > 0.0);
/// assert!((mhalo / 1e12 - 1.0).abs() < 1e-12);
/// ```
pub fn mstar_at_multi_zobs(
    core_mpeak_at_z0: &[f64],
    times: &[f64],
    redshifts: &[f64],
    output_indices: &[usize],
    results: &mut [f64],
    params: &SfrParams,
) -> HistoryResult<()> {
    StellarMassIntegrator::new(EmpiricalModel::new(params.clone())).integrate_into(
        core_mpeak_at_z0,
        times,
        redshifts,
        output_indices,
        results,
    )
}
