//! Layout of the flat results buffer and typed read-back.
//!
//! The buffer holds one block per output slot. Each block holds three
//! sub-blocks of `nhalos` values, in [`Quantity`] order:
//!
//! ```text
//! [ slot 0: mstar[0..n] | sfr[0..n] | mhalo[0..n] ][ slot 1: ... ] ...
//! ```
//!
//! so `(slot, quantity, halo)` lives at `slot*3*n + quantity*n + halo`.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use units::{Mass, MassRate};

use crate::error::{HistoryError, HistoryResult};

/// Snapshotted quantities, in buffer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// Cumulative in-situ stellar mass (M☉)
    StellarMass = 0,
    /// Instantaneous star formation rate (M☉/yr)
    Sfr = 1,
    /// Halo mass at the snapshot epoch (M☉)
    HaloMass = 2,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [Quantity::StellarMass, Quantity::Sfr, Quantity::HaloMass];

    /// Number of quantities per halo per slot
    pub const COUNT: usize = Self::ALL.len();
}

/// State of one halo at one output slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HaloSnapshot {
    pub stellar_mass: Mass,
    pub sfr: MassRate,
    pub halo_mass: Mass,
}

/// Shape of a results buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsLayout {
    pub nhalos: usize,
    pub nslots: usize,
}

impl ResultsLayout {
    pub fn new(nhalos: usize, nslots: usize) -> Self {
        Self { nhalos, nslots }
    }

    /// Required buffer length, `nhalos * nslots * 3`
    pub fn len(&self) -> usize {
        self.nhalos * self.nslots * Quantity::COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat offset of `(slot, quantity, halo)`. Unchecked.
    #[inline]
    pub fn offset(&self, slot: usize, quantity: Quantity, halo: usize) -> usize {
        (slot * Quantity::COUNT + quantity as usize) * self.nhalos + halo
    }

    /// Range of the whole block for `slot`
    pub fn block(&self, slot: usize) -> Range<usize> {
        let start = slot * Quantity::COUNT * self.nhalos;
        start..start + Quantity::COUNT * self.nhalos
    }

    /// Range of one quantity's sub-block within `slot`
    pub fn sub_block(&self, slot: usize, quantity: Quantity) -> Range<usize> {
        let start = self.offset(slot, quantity, 0);
        start..start + self.nhalos
    }

    /// Fail unless `buffer_len` matches this layout exactly.
    pub fn check_len(&self, buffer_len: usize) -> HistoryResult<()> {
        if buffer_len != self.len() {
            return Err(HistoryError::ResultsLengthMismatch {
                expected: self.len(),
                actual: buffer_len,
            });
        }
        Ok(())
    }

    /// Bounds-check a `(slot, halo)` pair.
    pub fn check_index(&self, slot: usize, halo: usize) -> HistoryResult<()> {
        if slot >= self.nslots {
            return Err(HistoryError::SlotOutOfRange {
                slot,
                nslots: self.nslots,
            });
        }
        if halo >= self.nhalos {
            return Err(HistoryError::HaloOutOfRange {
                halo,
                nhalos: self.nhalos,
            });
        }
        Ok(())
    }

    /// Write all three quantities of `snapshot` for `(slot, halo)`.
    #[inline]
    pub fn write(&self, buffer: &mut [f64], slot: usize, halo: usize, snapshot: &HaloSnapshot) {
        buffer[self.offset(slot, Quantity::StellarMass, halo)] =
            snapshot.stellar_mass.to_solar_masses();
        buffer[self.offset(slot, Quantity::Sfr, halo)] = snapshot.sfr.to_solar_masses_per_year();
        buffer[self.offset(slot, Quantity::HaloMass, halo)] = snapshot.halo_mass.to_solar_masses();
    }

    /// Read back the snapshot for `(slot, halo)`.
    pub fn read(&self, buffer: &[f64], slot: usize, halo: usize) -> HistoryResult<HaloSnapshot> {
        self.check_index(slot, halo)?;
        self.check_len(buffer.len())?;

        Ok(HaloSnapshot {
            stellar_mass: Mass::from_solar_masses(
                buffer[self.offset(slot, Quantity::StellarMass, halo)],
            ),
            sfr: MassRate::from_solar_masses_per_year(buffer[self.offset(slot, Quantity::Sfr, halo)]),
            halo_mass: Mass::from_solar_masses(buffer[self.offset(slot, Quantity::HaloMass, halo)]),
        })
    }
}

/// Owned results of an integration run.
#[derive(Debug, Clone, PartialEq)]
pub struct StellarMassHistory {
    layout: ResultsLayout,
    values: Vec<f64>,
}

impl StellarMassHistory {
    /// Zero-filled history for `layout`
    pub fn zeroed(layout: ResultsLayout) -> Self {
        Self {
            layout,
            values: vec![0.0; layout.len()],
        }
    }

    pub fn layout(&self) -> ResultsLayout {
        self.layout
    }

    pub fn nhalos(&self) -> usize {
        self.layout.nhalos
    }

    pub fn nslots(&self) -> usize {
        self.layout.nslots
    }

    /// The flat buffer, in the layout described at module level
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    pub fn snapshot(&self, slot: usize, halo: usize) -> HistoryResult<HaloSnapshot> {
        self.layout.read(&self.values, slot, halo)
    }

    /// All values of `quantity` at `slot`, one per halo.
    pub fn quantity(&self, slot: usize, quantity: Quantity) -> HistoryResult<&[f64]> {
        if slot >= self.layout.nslots {
            return Err(HistoryError::SlotOutOfRange {
                slot,
                nslots: self.layout.nslots,
            });
        }
        Ok(&self.values[self.layout.sub_block(slot, quantity)])
    }

    pub fn stellar_mass(&self, slot: usize) -> HistoryResult<&[f64]> {
        self.quantity(slot, Quantity::StellarMass)
    }

    pub fn sfr(&self, slot: usize) -> HistoryResult<&[f64]> {
        self.quantity(slot, Quantity::Sfr)
    }

    pub fn halo_mass(&self, slot: usize) -> HistoryResult<&[f64]> {
        self.quantity(slot, Quantity::HaloMass)
    }
}
