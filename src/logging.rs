#[cfg(feature = "defmt_logger")]
pub mod defmt_logger;

#[cfg(feature = "serial_logger")]
pub mod serial_logger;

pub use log::Level;
use log::{Log, Metadata, Record};

/// Fans `log` records out to every enabled backend.
struct LoggerType;

static LOGGER: LoggerType = LoggerType;

pub fn init(level: Level) {
    // only fails if a logger is already installed
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}

impl Log for LoggerType {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            #[cfg(feature = "defmt_logger")]
            {
                let logger = defmt_logger::get_logger();
                logger.log(record);
            }

            #[cfg(feature = "serial_logger")]
            {
                let logger = serial_logger::get_logger();
                logger.log(record);
            }
        }
    }

    fn flush(&self) {
        #[cfg(feature = "defmt_logger")]
        {
            let logger = defmt_logger::get_logger();
            logger.flush();
        }

        #[cfg(feature = "serial_logger")]
        {
            let logger = serial_logger::get_logger();
            logger.flush();
        }
    }
}
