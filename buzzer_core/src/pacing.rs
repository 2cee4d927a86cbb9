//! Waiting without starving the watchdog.

use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;

use crate::config::{PACE_STEP, POLL_INTERVAL};

/// Liveness signal. If it is not fed within the watchdog timeout the device
/// restarts.
pub trait Heartbeat {
    fn start(&mut self);
    fn feed(&mut self);
}

impl<H: Heartbeat + ?Sized> Heartbeat for &mut H {
    fn start(&mut self) {
        H::start(self)
    }

    fn feed(&mut self) {
        H::feed(self)
    }
}

/// Busy waits chopped into [`PACE_STEP`] slices with a heartbeat after each.
pub struct Pacer<D, H> {
    delay: D,
    heartbeat: H,
}

impl<D: DelayNs, H: Heartbeat> Pacer<D, H> {
    pub fn new(delay: D, heartbeat: H) -> Self {
        Self { delay, heartbeat }
    }

    /// Blocks for `duration`, rounded down to whole steps.
    pub fn wait(&mut self, duration: MillisDurationU32) {
        let step = PACE_STEP.to_millis();
        let mut remaining = duration.to_millis();
        while remaining >= step {
            self.delay.delay_ms(step);
            self.heartbeat.feed();
            remaining -= step;
        }
    }

    /// One turn of the polling loop: feed, then sleep for [`POLL_INTERVAL`].
    pub fn poll_interval(&mut self) {
        self.heartbeat.feed();
        self.delay.delay_us(POLL_INTERVAL.to_micros());
    }
}
