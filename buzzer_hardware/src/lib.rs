#![no_std]

use stm32f4xx_hal::{
    gpio::{Input, PB1},
    pac::{CorePeripherals, Peripherals},
    prelude::*,
    timer::SysDelay,
    watchdog::IndependentWatchdog,
};

pub mod serial;
pub mod storage;
pub mod tone;
pub mod watchdog;

use buzzer_core::firmware::Board;
use serial::DebugSerialPort;
use storage::FlashRecord;
use tone::{ToneOutput, TONE_TICK_HZ};
use watchdog::Watchdog;

/// Flight controller BUZ- line, pulled up, active low.
pub type SignalPin = PB1<Input>;

pub type BuzzerBoard = Board<ToneOutput, SignalPin, SysDelay, Watchdog, FlashRecord>;

pub struct BuzzerHardware {
    pub delay: SysDelay,
    pub signal: SignalPin,
    pub tone: ToneOutput,
    pub watchdog: Watchdog,
    pub storage: FlashRecord,

    pub dbg_serial: DebugSerialPort,
}

impl BuzzerHardware {
    pub fn init(pac: Peripherals, core: CorePeripherals) -> Self {
        let rcc = pac.RCC.constrain();
        // APB1 timers end up at 84 MHz, an exact multiple of both tone tick rates
        let clocks = rcc.cfgr.sysclk(168.MHz()).freeze();
        let delay = core.SYST.delay(&clocks);

        let gpioa = pac.GPIOA.split();
        let gpiob = pac.GPIOB.split();

        // Output first so the piezo is quiet before anything else happens
        let buzzer_pin = gpioa.pa8.into_push_pull_output();
        let counter = pac.TIM3.counter::<TONE_TICK_HZ>(&clocks);
        let tone = ToneOutput::new(counter, buzzer_pin);

        let signal = gpiob.pb1.into_pull_up_input();

        let debug_tx_pin = gpioa.pa9.into_alternate();
        let dbg_serial = pac.USART1.tx(debug_tx_pin, 115200.bps(), &clocks).unwrap();

        let watchdog = Watchdog::new(IndependentWatchdog::new(pac.IWDG), &pac.DBGMCU);
        let storage = storage::flash_record(pac.FLASH);

        Self {
            delay,
            signal,
            tone,
            watchdog,
            storage,
            dbg_serial,
        }
    }

    /// Splits off the resources the firmware runs on, leaving the debug port.
    pub fn into_board(self) -> (BuzzerBoard, DebugSerialPort) {
        let board = Board {
            tone: self.tone,
            signal: self.signal,
            delay: self.delay,
            watchdog: self.watchdog,
            memory: self.storage,
        };
        (board, self.dbg_serial)
    }
}
