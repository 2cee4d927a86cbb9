use core::{cell::RefCell, fmt::Write};

use cortex_m::interrupt::{self, Mutex};
use log::{Level, Metadata, Record};

use buzzer_hardware::serial::DebugSerialPort;

pub(crate) struct SerialLogger;

static SERIAL_LOGGER: SerialLogger = SerialLogger;
static SERIAL_PORT: Mutex<RefCell<Option<DebugSerialPort>>> = Mutex::new(RefCell::new(None));

pub fn init(port: DebugSerialPort) {
    interrupt::free(|cs| {
        SERIAL_PORT.borrow(cs).replace(Some(port));
    });
}

pub(super) fn get_logger() -> &'static impl log::Log {
    &SERIAL_LOGGER
}

impl log::Log for SerialLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let level = match record.level() {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };

        interrupt::free(|cs| {
            if let Some(tx) = SERIAL_PORT.borrow(cs).borrow_mut().as_mut() {
                // nowhere to report a failed log write
                writeln!(tx, "{}: {}\r", level, record.args()).ok();
            }
        });
    }

    fn flush(&self) {}
}
