//! Calibration sweep.
//!
//! Each candidate is saved before it is played, so whatever tone is audible
//! when power is cut is the one loaded on the next boot. There is no other
//! way out of this mode.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::buzzer::Buzzer;
use crate::config::{
    CALIBRATION_CHIME, CALIBRATION_GAP, CALIBRATION_TONE, DEFAULT_FREQUENCY, SWEEP_RANGE,
    SWEEP_REST, SWEEP_STEP,
};
use crate::pacing::Heartbeat;
use crate::store::{FrequencyStore, NvMemory};
use crate::tone::ToneTimer;

pub fn run<T, D, H, M>(buzzer: &mut Buzzer<T, D, H>, store: &mut FrequencyStore<M>) -> !
where
    T: ToneTimer,
    D: DelayNs,
    H: Heartbeat,
    M: NvMemory,
{
    info!("calibration mode, cut power on the best tone");
    buzzer.play_chime(DEFAULT_FREQUENCY, &CALIBRATION_CHIME);

    loop {
        sweep_once(buzzer, store);
        buzzer.pause(SWEEP_REST);
    }
}

/// One pass over [`SWEEP_RANGE`].
pub fn sweep_once<T, D, H, M>(buzzer: &mut Buzzer<T, D, H>, store: &mut FrequencyStore<M>)
where
    T: ToneTimer,
    D: DelayNs,
    H: Heartbeat,
    M: NvMemory,
{
    for frequency in SWEEP_RANGE.steps(SWEEP_STEP) {
        store.save(frequency);
        info!("candidate {} Hz", frequency.raw());
        buzzer.beep(frequency, CALIBRATION_TONE);
        buzzer.pause(CALIBRATION_GAP);
    }
}
