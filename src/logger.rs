//! Console backend for the `log` facade with coloured level labels.

use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let label = match record.level() {
            Level::Error => Red.bold().paint("ERROR"),
            Level::Warn => Yellow.bold().paint("WARN"),
            Level::Info => Green.bold().paint("INFO"),
            Level::Debug => Blue.bold().paint("DEBUG"),
            Level::Trace => Style::new().dimmed().paint("TRACE"),
        };

        if record.level() <= Level::Warn {
            eprintln!("{} {}", label, record.args());
        } else {
            println!("{} {}", label, record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
