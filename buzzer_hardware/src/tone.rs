//! TIM3-driven tone output on PA8.
//!
//! PA8 has no TIM3 channel, so the square wave is produced in software: the
//! counter reloads every `divisor + 1` ticks and the update interrupt toggles
//! the pin. The counter and pin live in a critical-section mutex shared with
//! that interrupt.

use core::cell::RefCell;

use cortex_m::{
    interrupt::{self, Mutex},
    peripheral::NVIC,
};
use fugit::TimerDurationU32;
use stm32f4xx_hal::{
    gpio::{Output, PushPull, PA8},
    pac::{Interrupt, TIM3},
    prelude::*,
    timer::{Counter, Event, Flag},
};

use buzzer_core::{config::TONE_CLOCK, tone::on_compare_match, tone::ToneTimer};

pub const TONE_TICK_HZ: u32 = TONE_CLOCK.tick_hz();

pub type BuzzerPin = PA8<Output<PushPull>>;
pub type ToneCounter = Counter<TIM3, TONE_TICK_HZ>;

struct ToneChannel {
    counter: ToneCounter,
    pin: BuzzerPin,
    armed: bool,
}

static TONE: Mutex<RefCell<Option<ToneChannel>>> = Mutex::new(RefCell::new(None));

/// Handle to the tone channel. Only one exists, created by
/// [`ToneOutput::new`].
pub struct ToneOutput {
    _private: (),
}

impl ToneOutput {
    pub(crate) fn new(counter: ToneCounter, mut pin: BuzzerPin) -> Self {
        pin.set_low();
        interrupt::free(|cs| {
            TONE.borrow(cs).replace(Some(ToneChannel {
                counter,
                pin,
                armed: false,
            }));
        });

        Self { _private: () }
    }
}

impl ToneTimer for ToneOutput {
    fn arm(&mut self, divisor: u8) {
        let period = TimerDurationU32::<TONE_TICK_HZ>::from_ticks(u32::from(divisor) + 1);

        interrupt::free(|cs| {
            if let Some(tone) = TONE.borrow(cs).borrow_mut().as_mut() {
                match tone.counter.start(period) {
                    Ok(()) => {
                        tone.counter.listen(Event::Update);
                        tone.armed = true;
                    }
                    Err(e) => log::error!("tone timer start failed: {:?}", e),
                }
            }
        });

        // Safety: the TIM3 handler only touches the mutex-guarded channel.
        unsafe { NVIC::unmask(Interrupt::TIM3) };
    }

    fn disarm(&mut self) {
        interrupt::free(|cs| {
            if let Some(tone) = TONE.borrow(cs).borrow_mut().as_mut() {
                tone.armed = false;
                tone.counter.unlisten(Event::Update);
                // already stopped is fine
                tone.counter.cancel().ok();
                tone.counter.clear_flags(Flag::Update);
                // an update taken inside this section must not toggle afterwards
                NVIC::unpend(Interrupt::TIM3);
                tone.pin.set_low();
            }
        });
    }
}

/// Call from the `TIM3` interrupt handler.
pub fn on_timer_interrupt() {
    interrupt::free(|cs| {
        if let Some(tone) = TONE.borrow(cs).borrow_mut().as_mut() {
            tone.counter.clear_flags(Flag::Update);
            on_compare_match(tone.armed, &mut tone.pin);
        }
    });
}
