//! Integration grid and output schedule.
//!
//! A [`TimeGrid`] pairs cosmic times with redshifts, index for index, and
//! yields the forward-Euler [`Step`]s the integrator walks. An
//! [`OutputSchedule`] picks the grid indices at which snapshots are taken.
//! Both borrow caller-owned slices and validate them once on construction.

use units::{Redshift, Time};

use crate::error::{HistoryError, HistoryResult};

/// Width of the first integration interval as a fraction of `times[0]`.
///
/// Integration starts at a synthetic time `(1 - INITIAL_DT_FRACTION) * times[0]`,
/// so the first step carries `dt = 0.1 * times[0]`. A grid starting at
/// `times[0] = 0` therefore has a zero-width first interval.
pub const INITIAL_DT_FRACTION: f64 = 0.1;

/// Paired, validated `times` (years) and `redshifts`.
#[derive(Debug, Clone, Copy)]
pub struct TimeGrid<'a> {
    times: &'a [f64],
    redshifts: &'a [f64],
}

impl<'a> TimeGrid<'a> {
    /// Validate and wrap a time/redshift grid.
    ///
    /// # Errors
    ///
    /// - the grid is empty or the two slices differ in length
    /// - a time is non-finite, or times do not strictly increase
    /// - a redshift is negative or non-finite, or redshifts do not strictly
    ///   decrease
    pub fn new(times: &'a [f64], redshifts: &'a [f64]) -> HistoryResult<Self> {
        if times.len() != redshifts.len() {
            return Err(HistoryError::GridLengthMismatch {
                times: times.len(),
                redshifts: redshifts.len(),
            });
        }
        if times.is_empty() {
            return Err(HistoryError::EmptyTimeGrid);
        }

        if let Some((index, &value)) = times.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(HistoryError::NonFiniteTime { index, value });
        }
        if let Some(index) = (1..times.len()).find(|&i| times[i] <= times[i - 1]) {
            return Err(HistoryError::TimesNotIncreasing { index });
        }

        if let Some((index, &value)) = redshifts
            .iter()
            .enumerate()
            .find(|(_, z)| !Redshift::new(**z).is_physical())
        {
            return Err(HistoryError::InvalidRedshift { index, value });
        }
        if let Some(index) = (1..redshifts.len()).find(|&i| redshifts[i] >= redshifts[i - 1]) {
            return Err(HistoryError::RedshiftsNotDecreasing { index });
        }

        Ok(Self { times, redshifts })
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a validated grid
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Index of the last grid point, the epoch integrated up to
    pub fn final_index(&self) -> usize {
        self.times.len() - 1
    }

    pub fn time(&self, index: usize) -> Time {
        Time::from_years(self.times[index])
    }

    pub fn redshift(&self, index: usize) -> Redshift {
        Redshift::new(self.redshifts[index])
    }

    /// Synthetic time integration starts from
    pub fn start_time(&self) -> Time {
        self.time(0) * (1.0 - INITIAL_DT_FRACTION)
    }

    /// Forward-Euler steps in ascending time order.
    pub fn steps(&self) -> Steps<'a> {
        Steps {
            grid: *self,
            next: 0,
            last_time: self.start_time(),
        }
    }
}

/// One forward-Euler step: the rate is evaluated at (`time`, `redshift`)
/// and applied over the `dt` that ends at `time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub index: usize,
    pub time: Time,
    pub dt: Time,
    pub redshift: Redshift,
}

/// Iterator over the steps of a [`TimeGrid`].
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    grid: TimeGrid<'a>,
    next: usize,
    last_time: Time,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.next >= self.grid.len() {
            return None;
        }

        let index = self.next;
        let time = self.grid.time(index);
        let step = Step {
            index,
            time,
            dt: time - self.last_time,
            redshift: self.grid.redshift(index),
        };

        self.last_time = time;
        self.next += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Steps<'_> {}

/// Validated, strictly increasing grid indices at which snapshots are taken.
///
/// Position `slot` in the schedule is the output slot in the results buffer.
#[derive(Debug, Clone, Copy)]
pub struct OutputSchedule<'a> {
    indices: &'a [usize],
}

impl<'a> OutputSchedule<'a> {
    /// Validate output indices against a grid of `ntimes` points.
    ///
    /// With `require_final_output`, the last index must be `ntimes - 1`.
    pub fn new(
        indices: &'a [usize],
        ntimes: usize,
        require_final_output: bool,
    ) -> HistoryResult<Self> {
        let Some(&last) = indices.last() else {
            return Err(HistoryError::EmptyOutputSchedule);
        };

        if let Some(&index) = indices.iter().find(|&&i| i >= ntimes) {
            return Err(HistoryError::OutputIndexOutOfRange { index, ntimes });
        }
        if let Some(position) = (1..indices.len()).find(|&p| indices[p] <= indices[p - 1]) {
            return Err(HistoryError::OutputIndicesNotIncreasing { position });
        }
        if require_final_output && last != ntimes - 1 {
            return Err(HistoryError::FinalStepNotRequested {
                last_requested: last,
                final_index: ntimes - 1,
            });
        }

        Ok(Self { indices })
    }

    /// Number of output slots
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false for a validated schedule
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }

    pub fn cursor(&self) -> OutputCursor<'a> {
        OutputCursor {
            indices: self.indices,
            slot: 0,
        }
    }
}

/// Tracks the next pending output slot while walking the grid.
///
/// Once every slot has been consumed the cursor is exhausted and never
/// matches again.
#[derive(Debug, Clone)]
pub struct OutputCursor<'a> {
    indices: &'a [usize],
    slot: usize,
}

impl OutputCursor<'_> {
    /// Slot to write at grid index `itime`, if it is the next requested one.
    pub fn matches(&self, itime: usize) -> Option<usize> {
        match self.indices.get(self.slot) {
            Some(&index) if index == itime => Some(self.slot),
            _ => None,
        }
    }

    /// Move past the current slot. Saturates once exhausted.
    pub fn advance(&mut self) {
        if self.slot < self.indices.len() {
            self.slot += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.slot >= self.indices.len()
    }
}
