//! Normal operation: follow the signal line.

use embedded_hal::{delay::DelayNs, digital::InputPin};
use fugit::HertzU32;
use log::debug;

use crate::buzzer::Buzzer;
use crate::pacing::Heartbeat;
use crate::signal::SignalLine;
use crate::tone::ToneTimer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayState {
    #[default]
    Silent,
    Sounding,
}

/// Two-state machine between the signal line and the tone generator. Only
/// transitions call into the generator, so a steady line costs no register
/// writes.
pub struct SignalRelay {
    frequency: HertzU32,
    state: RelayState,
}

impl SignalRelay {
    pub fn new(frequency: HertzU32) -> Self {
        Self {
            frequency,
            state: RelayState::default(),
        }
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Applies one sample of the line.
    pub fn update<T, D, H>(
        &mut self,
        sound_requested: bool,
        buzzer: &mut Buzzer<T, D, H>,
    ) -> RelayState
    where
        T: ToneTimer,
        D: DelayNs,
        H: Heartbeat,
    {
        match (self.state, sound_requested) {
            (RelayState::Silent, true) => {
                buzzer.start(self.frequency);
                self.state = RelayState::Sounding;
                debug!("sounding");
            }
            (RelayState::Sounding, false) => {
                buzzer.stop();
                self.state = RelayState::Silent;
                debug!("silent");
            }
            _ => {}
        }
        self.state
    }

    /// Sample, update, feed, sleep.
    pub fn step<T, D, H, P>(&mut self, buzzer: &mut Buzzer<T, D, H>, signal: &mut SignalLine<P>)
    where
        T: ToneTimer,
        D: DelayNs,
        H: Heartbeat,
        P: InputPin,
    {
        let requested = signal.sound_requested();
        self.update(requested, buzzer);
        buzzer.poll_interval();
    }

    pub fn run<T, D, H, P>(mut self, buzzer: &mut Buzzer<T, D, H>, signal: &mut SignalLine<P>) -> !
    where
        T: ToneTimer,
        D: DelayNs,
        H: Heartbeat,
        P: InputPin,
    {
        loop {
            self.step(buzzer, signal);
        }
    }
}
