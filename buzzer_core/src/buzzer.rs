use embedded_hal::delay::DelayNs;
use fugit::{HertzU32, MillisDurationU32};

use crate::pacing::{Heartbeat, Pacer};
use crate::tone::{ToneGenerator, ToneTimer};

/// A fixed pattern of equal beeps followed by a silent rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chime {
    pub beeps: u8,
    pub length: MillisDurationU32,
    pub gap: MillisDurationU32,
    pub rest: MillisDurationU32,
}

/// Everything the control loop drives: the tone generator and the paced
/// delay that keeps the watchdog fed.
pub struct Buzzer<T, D, H> {
    tone: ToneGenerator<T>,
    pacer: Pacer<D, H>,
}

impl<T, D, H> Buzzer<T, D, H>
where
    T: ToneTimer,
    D: DelayNs,
    H: Heartbeat,
{
    pub fn new(tone: ToneGenerator<T>, pacer: Pacer<D, H>) -> Self {
        Self { tone, pacer }
    }

    pub fn start(&mut self, frequency: HertzU32) {
        self.tone.start(frequency);
    }

    pub fn stop(&mut self) {
        self.tone.stop();
    }

    /// Plays `frequency` for `duration`. At 0 Hz this is a silent pause of
    /// the same length.
    pub fn beep(&mut self, frequency: HertzU32, duration: MillisDurationU32) {
        self.tone.start(frequency);
        self.pacer.wait(duration);
        self.tone.stop();
    }

    pub fn pause(&mut self, duration: MillisDurationU32) {
        self.pacer.wait(duration);
    }

    pub fn play_chime(&mut self, frequency: HertzU32, chime: &Chime) {
        for n in 0..chime.beeps {
            if n > 0 {
                self.pause(chime.gap);
            }
            self.beep(frequency, chime.length);
        }
        self.pause(chime.rest);
    }

    pub fn poll_interval(&mut self) {
        self.pacer.poll_interval();
    }
}
