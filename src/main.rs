#![no_std]
#![no_main]

mod logging;

#[cfg(feature = "defmt_logger")]
use defmt_rtt as _;
#[cfg(not(feature = "defmt_logger"))]
use panic_halt as _;
#[cfg(feature = "defmt_logger")]
use panic_probe as _;

use cortex_m_rt::entry;
use log::info;
use stm32f4xx_hal::pac::{self, interrupt};

use buzzer_core::{config::TONE_CLOCK, firmware};
use buzzer_hardware::{storage, tone, BuzzerHardware};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry]
fn main() -> ! {
    let cp = cortex_m::peripheral::Peripherals::take().unwrap();
    let dp = pac::Peripherals::take().unwrap();

    let hw = BuzzerHardware::init(dp, cp);
    let (mut board, _dbg_serial) = hw.into_board();

    #[cfg(feature = "serial_logger")]
    logging::serial_logger::init(_dbg_serial);
    logging::init(logging::Level::Info);

    info!("{} v{}", NAME, VERSION);

    // the watchdog is still off here
    storage::compact(&mut board.memory);

    firmware::run(board, TONE_CLOCK)
}

#[interrupt]
fn TIM3() {
    tone::on_timer_interrupt();
}
