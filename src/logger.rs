//! Diagnostic logger.
//!
//! Writes to stderr so diagnostics never mix with the data log the relay
//! produces on disk.

use chrono::Local;
use colored::Colorize;
use log::{Level, Metadata, Record};

pub struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, msg: &Record) {
        if self.enabled(msg.metadata()) {
            let s_level: String = match msg.level() {
                Level::Info => format!("{}", msg.level().as_str().bright_green()),
                Level::Warn => format!("{}", msg.level().as_str().yellow()),
                Level::Error => format!("{}", msg.level().as_str().bright_red()),
                Level::Debug => format!("{}", msg.level().as_str().bright_cyan()),
                Level::Trace => format!("{}", msg.level().as_str().cyan()),
            };

            eprintln!("[{}] {}: {}", Local::now().format("%H:%M:%S%.3f"), s_level, msg.args());
        }
    }

    fn flush(&self) {}
}
