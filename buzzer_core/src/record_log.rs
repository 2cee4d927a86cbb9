//! The record kept as a log in erase-before-write flash.
//!
//! Programming flash can only clear bits; setting one again takes an erase of
//! the whole area, and on the target that stalls the core for seconds. So the
//! area is split into [`SLOT_LEN`]-byte slots filled front to back. A write
//! that only clears bits lands in the live slot. Any other write opens the
//! next erased slot. The area is only erased by [`RecordLog::compact`], which
//! the board runs at boot while the watchdog is still off.
//!
//! Slot layout: [`RECORD_LEN`] record bytes, then a tag that is programmed to
//! [`SLOT_OPEN`] after the first record bytes of a fresh slot are in place.
//! The live slot is the last tagged one. A fresh slot holds only the bytes
//! that opened it, so the rest of the record (the marker included) reads as
//! erased until it is written again.

use log::debug;

use crate::store::NvMemory;

pub const SLOT_LEN: usize = 4;
pub const RECORD_LEN: usize = SLOT_LEN - 1;
pub const ERASED: u8 = 0xFF;
pub const SLOT_OPEN: u8 = 0x00;

const TAG: usize = RECORD_LEN;

/// Raw access to one erasable flash area.
pub trait FlashArea {
    type Error: core::fmt::Debug;

    /// The whole area, memory mapped.
    fn contents(&self) -> &[u8];
    /// Sets every byte of the area back to [`ERASED`].
    fn erase(&mut self) -> Result<(), Self::Error>;
    /// Clears bits of `bytes.len()` bytes starting at `offset`.
    fn program(&mut self, offset: usize, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// What it takes to turn `current` into `new` in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePlan {
    Skip,
    Program,
    Erase,
}

pub fn plan_write(current: &[u8], new: &[u8]) -> WritePlan {
    if current == new {
        WritePlan::Skip
    } else if current.iter().zip(new).all(|(old, new)| old & new == *new) {
        WritePlan::Program
    } else {
        WritePlan::Erase
    }
}

/// Index of the last opened slot.
pub fn live_slot(area: &[u8]) -> Option<usize> {
    area.chunks_exact(SLOT_LEN)
        .rposition(|slot| slot[TAG] != ERASED)
}

/// Where a write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Skip,
    /// Program over the live slot.
    InPlace { slot: usize },
    /// Program into this erased slot, then tag it.
    Open { slot: usize },
    /// No erased slot left.
    Full,
}

/// Places a write of `new` at record `offset`. `offset + new.len()` must not
/// exceed [`RECORD_LEN`].
pub fn place(area: &[u8], offset: usize, new: &[u8]) -> Placement {
    let slots = area.len() / SLOT_LEN;
    let next = match live_slot(area) {
        Some(slot) => {
            let current = &area[slot * SLOT_LEN + offset..][..new.len()];
            match plan_write(current, new) {
                WritePlan::Skip => return Placement::Skip,
                WritePlan::Program => return Placement::InPlace { slot },
                WritePlan::Erase => slot + 1,
            }
        }
        None if new.iter().all(|b| *b == ERASED) => return Placement::Skip,
        None => 0,
    };

    if next < slots {
        Placement::Open { slot: next }
    } else {
        Placement::Full
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLogError<E> {
    OutOfBounds,
    Full,
    Flash(E),
}

impl<E> From<E> for RecordLogError<E> {
    fn from(e: E) -> Self {
        RecordLogError::Flash(e)
    }
}

/// [`NvMemory`] over a [`FlashArea`], addressed like a [`RECORD_LEN`]-byte
/// record.
pub struct RecordLog<F> {
    area: F,
}

impl<F: FlashArea> RecordLog<F> {
    pub fn new(area: F) -> Self {
        Self { area }
    }

    fn live_record(&self) -> Option<&[u8]> {
        let area = self.area.contents();
        live_slot(area).map(|slot| &area[slot * SLOT_LEN..][..RECORD_LEN])
    }

    pub fn free_slots(&self) -> usize {
        let area = self.area.contents();
        let used = live_slot(area).map_or(0, |slot| slot + 1);
        area.len() / SLOT_LEN - used
    }

    /// Erases the area and carries the live record over to the first slot
    /// once fewer than `reserve` slots are free. Returns whether it erased.
    pub fn compact(&mut self, reserve: usize) -> Result<bool, RecordLogError<F::Error>> {
        if self.free_slots() >= reserve {
            return Ok(false);
        }

        let mut record = [ERASED; RECORD_LEN];
        let carried = match self.live_record() {
            Some(live) => {
                record.copy_from_slice(live);
                true
            }
            None => false,
        };

        debug!("compacting record area");
        self.area.erase()?;
        if carried {
            self.open(0, 0, &record)?;
        }
        Ok(true)
    }

    fn open(&mut self, slot: usize, offset: usize, bytes: &[u8]) -> Result<(), F::Error> {
        let base = slot * SLOT_LEN;
        self.area.program(base + offset, bytes)?;
        self.area.program(base + TAG, &[SLOT_OPEN])
    }
}

/// Start of `len` bytes at `offset`, if they lie inside the record.
fn window(offset: u32, len: usize) -> Option<usize> {
    let start = offset as usize;
    start
        .checked_add(len)
        .filter(|end| *end <= RECORD_LEN)
        .map(|_| start)
}

impl<F: FlashArea> NvMemory for RecordLog<F> {
    type Error = RecordLogError<F::Error>;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = window(offset, bytes.len()).ok_or(RecordLogError::OutOfBounds)?;
        match self.live_record() {
            Some(record) => bytes.copy_from_slice(&record[start..][..bytes.len()]),
            None => bytes.fill(ERASED),
        }
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = window(offset, bytes.len()).ok_or(RecordLogError::OutOfBounds)?;
        match place(self.area.contents(), start, bytes) {
            Placement::Skip => Ok(()),
            Placement::InPlace { slot } => {
                self.area.program(slot * SLOT_LEN + start, bytes)?;
                Ok(())
            }
            Placement::Open { slot } => {
                debug!("record moves to slot {}", slot);
                self.open(slot, start, bytes)?;
                Ok(())
            }
            Placement::Full => Err(RecordLogError::Full),
        }
    }
}
