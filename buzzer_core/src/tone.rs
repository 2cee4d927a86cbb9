//! Square-wave tone generation.
//!
//! A periodic timer interrupt inverts the output line on every compare match,
//! so one output period spans two matches:
//!
//! `divisor = clock / (2 * prescaler * frequency) - 1`
//!
//! The divisor is clamped to the compare register's range, which means an
//! out-of-range request still plays, at the nearest frequency the timer can
//! produce.

use embedded_hal::digital::StatefulOutputPin;
use fugit::HertzU32;

pub const DIVISOR_MIN: u8 = 1;
pub const DIVISOR_MAX: u8 = u8::MAX;

/// Clock feeding the tone timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneClock {
    pub clock_hz: u32,
    pub prescaler: u32,
}

impl ToneClock {
    pub const MHZ_9_6: Self = Self::new(9_600_000, 8);
    pub const MHZ_1_2: Self = Self::new(1_200_000, 8);

    pub const fn new(clock_hz: u32, prescaler: u32) -> Self {
        Self {
            clock_hz,
            prescaler,
        }
    }

    /// Counter rate after the prescaler.
    pub const fn tick_hz(&self) -> u32 {
        self.clock_hz / self.prescaler
    }

    /// Output frequency for a divisor of zero.
    const fn base_hz(&self) -> u32 {
        self.tick_hz() / 2
    }

    /// Compare value for `frequency`, or `None` for the 0 Hz silence request.
    pub fn divisor(&self, frequency: HertzU32) -> Option<u8> {
        let hz = frequency.raw();
        if hz == 0 {
            return None;
        }

        let ideal = (self.base_hz() / hz).saturating_sub(1);
        let clamped = num_traits::clamp(ideal, u32::from(DIVISOR_MIN), u32::from(DIVISOR_MAX));
        u8::try_from(clamped).ok()
    }

    /// Frequency actually produced by `divisor`.
    pub fn effective_frequency(&self, divisor: u8) -> HertzU32 {
        HertzU32::from_raw(self.base_hz() / (u32::from(divisor) + 1))
    }
}

/// The timer peripheral behind the tone generator.
pub trait ToneTimer {
    /// Loads `divisor` as the compare value, drives the output line and arms
    /// the periodic compare-match interrupt.
    fn arm(&mut self, divisor: u8);

    /// Masks the compare-match interrupt, halts the counter and forces the
    /// output line low.
    fn disarm(&mut self);
}

impl<T: ToneTimer + ?Sized> ToneTimer for &mut T {
    fn arm(&mut self, divisor: u8) {
        T::arm(self, divisor)
    }

    fn disarm(&mut self) {
        T::disarm(self)
    }
}

/// Body of the compare-match interrupt. Inverts the line while the timer is
/// armed; a match still pending from before the disarm is dropped.
pub fn on_compare_match<P: StatefulOutputPin>(armed: bool, line: &mut P) {
    if armed {
        line.toggle().ok();
    }
}

/// Owns the tone timer and whether a tone is currently playing.
pub struct ToneGenerator<T> {
    timer: T,
    clock: ToneClock,
    playing: bool,
}

impl<T: ToneTimer> ToneGenerator<T> {
    pub fn new(timer: T, clock: ToneClock) -> Self {
        Self {
            timer,
            clock,
            playing: false,
        }
    }

    /// Starts a square wave at `frequency`. 0 Hz is a no-op.
    pub fn start(&mut self, frequency: HertzU32) {
        let Some(divisor) = self.clock.divisor(frequency) else {
            return;
        };

        self.timer.arm(divisor);
        self.playing = true;
    }

    /// Silences the output. Safe to call when nothing is playing: the line is
    /// already inactive then and the timer is left alone.
    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.timer.disarm();
        self.playing = false;
    }
}
