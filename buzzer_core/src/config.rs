//! Compile-time configuration. There is no runtime configuration surface:
//! the only choice made at run time is the boot mode, read from the signal
//! line.

use fugit::{HertzU32, MicrosDurationU32, MillisDurationU32};

use crate::buzzer::Chime;
use crate::frequency::FrequencyRange;
use crate::tone::ToneClock;

/// Used whenever no trustworthy record is stored.
pub const DEFAULT_FREQUENCY: HertzU32 = HertzU32::from_raw(2500);

/// Values accepted from storage. Wider than [`SWEEP_RANGE`] so records left by
/// older firmware that swept up to 4.5 kHz are still honoured.
pub const PERSISTED_RANGE: FrequencyRange = FrequencyRange::new(2400, 4500);

/// Band walked by the calibration sweep.
pub const SWEEP_RANGE: FrequencyRange = FrequencyRange::new(2400, 3000);

/// Matches the ~90-100 Hz spacing of the piezo's resonance modes; finer steps
/// just land on the same mode.
pub const SWEEP_STEP: HertzU32 = HertzU32::from_raw(100);

// Record layout
pub const FREQUENCY_OFFSET: u32 = 0;
pub const MARKER_OFFSET: u32 = 2;
pub const RECORD_MARKER: u8 = 0xAB;

#[cfg(not(feature = "slow_clock"))]
pub const TONE_CLOCK: ToneClock = ToneClock::MHZ_9_6;
#[cfg(feature = "slow_clock")]
pub const TONE_CLOCK: ToneClock = ToneClock::MHZ_1_2;

/// Granularity of every long wait; the heartbeat is fed once per step.
pub const PACE_STEP: MillisDurationU32 = MillisDurationU32::from_ticks(10);

/// Delay between two samples of the signal line.
pub const POLL_INTERVAL: MicrosDurationU32 = MicrosDurationU32::from_ticks(100);

/// Watchdog timeout. Must stay well above [`PACE_STEP`].
pub const LIVENESS_TIMEOUT: MillisDurationU32 = MillisDurationU32::from_ticks(250);

/// Settling time between power-on and sampling the boot mode.
pub const BOOT_SETTLE: MillisDurationU32 = MillisDurationU32::from_ticks(100);

/// Two short beeps: normal operation.
pub const STARTUP_CHIME: Chime = Chime {
    beeps: 2,
    length: MillisDurationU32::from_ticks(100),
    gap: MillisDurationU32::from_ticks(100),
    rest: MillisDurationU32::from_ticks(200),
};

/// Two long beeps at [`DEFAULT_FREQUENCY`]: calibration engaged.
pub const CALIBRATION_CHIME: Chime = Chime {
    beeps: 2,
    length: MillisDurationU32::from_ticks(400),
    gap: MillisDurationU32::from_ticks(300),
    rest: MillisDurationU32::from_ticks(500),
};

pub const CALIBRATION_TONE: MillisDurationU32 = MillisDurationU32::from_ticks(1500);
pub const CALIBRATION_GAP: MillisDurationU32 = MillisDurationU32::from_ticks(500);
pub const SWEEP_REST: MillisDurationU32 = MillisDurationU32::from_ticks(1000);
