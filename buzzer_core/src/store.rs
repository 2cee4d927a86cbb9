//! The persisted frequency record.
//!
//! Layout: a little-endian `u16` frequency at [`FREQUENCY_OFFSET`] and a
//! one-byte marker at [`MARKER_OFFSET`]. The record is only trusted when the
//! marker equals [`RECORD_MARKER`] and the value lies in [`PERSISTED_RANGE`].
//! The marker is always written after the value, so an interrupted save
//! leaves either the old record or no record.

use fugit::HertzU32;
use log::{debug, error, warn};

use crate::config::{
    DEFAULT_FREQUENCY, FREQUENCY_OFFSET, MARKER_OFFSET, PERSISTED_RANGE, RECORD_MARKER,
};

/// Byte-addressed non-volatile memory.
pub trait NvMemory {
    type Error: core::fmt::Debug;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error>;
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<M: NvMemory + ?Sized> NvMemory for &mut M {
    type Error = M::Error;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        M::read(self, offset, bytes)
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        M::write(self, offset, bytes)
    }
}

pub struct FrequencyStore<M> {
    memory: M,
}

impl<M: NvMemory> FrequencyStore<M> {
    pub fn new(memory: M) -> Self {
        Self { memory }
    }

    /// Returns the stored frequency, or [`DEFAULT_FREQUENCY`] when there is
    /// no valid record.
    pub fn load(&mut self) -> HertzU32 {
        let mut marker = [0_u8];
        if let Err(e) = self.memory.read(MARKER_OFFSET, &mut marker) {
            warn!("record marker unreadable: {:?}", e);
            return DEFAULT_FREQUENCY;
        }
        if marker[0] != RECORD_MARKER {
            debug!("no frequency record");
            return DEFAULT_FREQUENCY;
        }

        let mut raw = [0_u8; 2];
        if let Err(e) = self.memory.read(FREQUENCY_OFFSET, &mut raw) {
            warn!("record frequency unreadable: {:?}", e);
            return DEFAULT_FREQUENCY;
        }

        let stored = HertzU32::from_raw(u32::from(u16::from_le_bytes(raw)));
        if PERSISTED_RANGE.contains(stored) {
            stored
        } else {
            debug!("stored frequency {} Hz out of range", stored.raw());
            DEFAULT_FREQUENCY
        }
    }

    /// Writes `frequency`, then commits it with the marker.
    pub fn save(&mut self, frequency: HertzU32) {
        let Ok(raw) = u16::try_from(frequency.raw()) else {
            error!("{} Hz does not fit the record", frequency.raw());
            return;
        };

        if let Err(e) = self.memory.write(FREQUENCY_OFFSET, &raw.to_le_bytes()) {
            error!("frequency write failed: {:?}", e);
            return;
        }
        if let Err(e) = self.memory.write(MARKER_OFFSET, &[RECORD_MARKER]) {
            error!("record marker write failed: {:?}", e);
        }
    }
}
