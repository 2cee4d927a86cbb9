#![no_std]
#![no_main]

//! Wiring check: plays the calibration frequencies on PA8 in a loop without
//! touching the stored record or starting the watchdog.

use cortex_m_rt::entry;
use panic_halt as _;
use stm32f4xx_hal::pac::{self, interrupt};

use buzzer_core::{
    buzzer::Buzzer,
    config::{CALIBRATION_GAP, CALIBRATION_TONE, SWEEP_RANGE, SWEEP_REST, SWEEP_STEP, TONE_CLOCK},
    pacing::{Heartbeat, Pacer},
    tone::ToneGenerator,
};
use buzzer_hardware::{tone, BuzzerHardware};

/// Stand-in heartbeat; the IWDG stays off for this check.
struct NoWatchdog;

impl Heartbeat for NoWatchdog {
    fn start(&mut self) {}
    fn feed(&mut self) {}
}

#[entry]
fn main() -> ! {
    let cp = cortex_m::peripheral::Peripherals::take().unwrap();
    let dp = pac::Peripherals::take().unwrap();

    let hw = BuzzerHardware::init(dp, cp);
    let mut buzzer = Buzzer::new(
        ToneGenerator::new(hw.tone, TONE_CLOCK),
        Pacer::new(hw.delay, NoWatchdog),
    );

    loop {
        for frequency in SWEEP_RANGE.steps(SWEEP_STEP) {
            buzzer.beep(frequency, CALIBRATION_TONE);
            buzzer.pause(CALIBRATION_GAP);
        }

        buzzer.pause(SWEEP_REST);
    }
}

#[interrupt]
fn TIM3() {
    tone::on_timer_interrupt();
}
