use defmt::{debug, error, info, trace, warn, Display2Format};
use log::{Level, Metadata, Record};

pub(crate) struct DefmtLogger;

static DEFMT_LOGGER: DefmtLogger = DefmtLogger;

pub(super) fn get_logger() -> &'static impl log::Log {
    &DEFMT_LOGGER
}

impl log::Log for DefmtLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let target = record.target();
        let args = Display2Format(record.args());
        match record.level() {
            Level::Trace => trace!("[{}] {}", target, args),
            Level::Debug => debug!("[{}] {}", target, args),
            Level::Info => info!("[{}] {}", target, args),
            Level::Warn => warn!("[{}] {}", target, args),
            Level::Error => error!("[{}] {}", target, args),
        }
    }

    fn flush(&self) {}
}
