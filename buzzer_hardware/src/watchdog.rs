use stm32f4xx_hal::{pac::DBGMCU, watchdog::IndependentWatchdog};

use buzzer_core::{config::LIVENESS_TIMEOUT, pacing::Heartbeat};

/// Independent watchdog (IWDG) behind the heartbeat. Once started it can
/// only be stopped by a reset.
pub struct Watchdog {
    iwdg: IndependentWatchdog,
}

impl Watchdog {
    pub fn new(iwdg: IndependentWatchdog, dbgmcu: &DBGMCU) -> Self {
        // keep a halted core from resetting under the debugger
        iwdg.stop_on_debug(dbgmcu, true);
        Self { iwdg }
    }
}

impl Heartbeat for Watchdog {
    fn start(&mut self) {
        if cfg!(feature = "disable_watchdog") {
            log::warn!("watchdog disabled");
            return;
        }
        self.iwdg.start(LIVENESS_TIMEOUT);
    }

    fn feed(&mut self) {
        self.iwdg.feed();
    }
}
