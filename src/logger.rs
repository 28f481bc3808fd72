//! Stderr logging.
//!
//! A small `log::Log` implementation that timestamps records and writes them
//! to stderr, keeping stdout free for command output.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that writes formatted records to stderr
///
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        StderrLogger { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // Nowhere left to report a failed write to stderr
            let _ = writeln!(std::io::stderr(), "{}", format_log(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the stderr logger as the global logger.
///
pub fn init(level: LevelFilter) -> Result<(), AppError> {
    log::set_boxed_logger(Box::new(StderrLogger::new(level)))
        .map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
