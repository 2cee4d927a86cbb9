//! Boot sequence and mode selection.

use embedded_hal::{delay::DelayNs, digital::InputPin};
use log::info;

use crate::buzzer::Buzzer;
use crate::calibration;
use crate::config::{BOOT_SETTLE, STARTUP_CHIME};
use crate::pacing::{Heartbeat, Pacer};
use crate::relay::SignalRelay;
use crate::signal::SignalLine;
use crate::store::{FrequencyStore, NvMemory};
use crate::tone::{ToneClock, ToneGenerator, ToneTimer};

/// The board resources the firmware takes ownership of at boot.
pub struct Board<T, S, D, H, M> {
    pub tone: T,
    pub signal: S,
    pub delay: D,
    pub watchdog: H,
    pub memory: M,
}

/// Chosen once per power cycle from the signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootMode {
    Relay,
    Calibration,
}

impl BootMode {
    /// A line held low at power-on (shorted to ground) selects calibration.
    pub fn select<P: InputPin>(signal: &mut SignalLine<P>) -> Self {
        if signal.sound_requested() {
            BootMode::Calibration
        } else {
            BootMode::Relay
        }
    }
}

/// Runs the firmware until power is removed or the watchdog resets it.
pub fn run<T, S, D, H, M>(board: Board<T, S, D, H, M>, clock: ToneClock) -> !
where
    T: ToneTimer,
    S: InputPin,
    D: DelayNs,
    H: Heartbeat,
    M: NvMemory,
{
    let Board {
        tone,
        signal,
        delay,
        mut watchdog,
        memory,
    } = board;

    let mut store = FrequencyStore::new(memory);
    let frequency = store.load();
    info!("tone frequency {} Hz", frequency.raw());

    watchdog.start();

    let mut buzzer = Buzzer::new(ToneGenerator::new(tone, clock), Pacer::new(delay, watchdog));
    let mut signal = SignalLine::new(signal);

    buzzer.pause(BOOT_SETTLE);

    if BootMode::select(&mut signal) == BootMode::Calibration {
        calibration::run(&mut buzzer, &mut store);
    }

    info!("relay mode");
    buzzer.play_chime(frequency, &STARTUP_CHIME);
    SignalRelay::new(frequency).run(&mut buzzer, &mut signal)
}
