//! Persisted record kept in a dedicated flash sector.
//!
//! The sector holds a log of record slots (see [`buzzer_core::record_log`]),
//! so saving a new frequency programs fresh bytes instead of erasing. Erasing
//! the 128 KiB sector stalls the core for seconds, far past the watchdog
//! timeout, so it only happens in [`compact`] at boot.

use stm32f4xx_hal::{
    flash::{self, FlashExt, LockedFlash},
    pac::FLASH,
};

use buzzer_core::record_log::{FlashArea, RecordLog};

/// Sector 11 of the STM32F407's 1 MiB flash, kept out of `memory.x`.
const RECORD_SECTOR: u8 = 11;
const RECORD_SECTOR_OFFSET: usize = 0xE_0000;
const RECORD_SECTOR_LEN: usize = 128 * 1024;

/// Boot compacts the sector once fewer slots than this are free. A sweep
/// opens seven slots every 15 s, so this lasts over two hours of calibration.
const RESERVE_SLOTS: usize = 4096;

pub type FlashRecord = RecordLog<RecordSector>;

pub struct RecordSector {
    flash: LockedFlash,
}

impl RecordSector {
    pub fn new(flash: FLASH) -> Self {
        Self {
            flash: LockedFlash::new(flash),
        }
    }
}

impl FlashArea for RecordSector {
    type Error = flash::Error;

    fn contents(&self) -> &[u8] {
        &self.flash.read()[RECORD_SECTOR_OFFSET..][..RECORD_SECTOR_LEN]
    }

    fn erase(&mut self) -> Result<(), Self::Error> {
        self.flash.unlocked().erase(RECORD_SECTOR)
    }

    fn program(&mut self, offset: usize, bytes: &[u8]) -> Result<(), Self::Error> {
        self.flash
            .unlocked()
            .program(RECORD_SECTOR_OFFSET + offset, bytes.iter())
    }
}

pub fn flash_record(flash: FLASH) -> FlashRecord {
    RecordLog::new(RecordSector::new(flash))
}

/// Makes room in the record sector. Must run before the watchdog starts.
pub fn compact(record: &mut FlashRecord) {
    match record.compact(RESERVE_SLOTS) {
        Ok(true) => log::info!("record sector compacted"),
        Ok(false) => log::debug!("{} record slots free", record.free_slots()),
        Err(e) => log::error!("record sector compaction failed: {:?}", e),
    }
}
