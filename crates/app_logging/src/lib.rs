#![deny(missing_docs)]
//! Shared logging utilities for the downloads workspace.
//!
//! This crate provides the `app_*` logging macros used across the codebase,
//! the logger setup used by the binary, and a minimal test initializer for
//! the global logger.

use std::fs::File;
use std::path::Path;

use log::{LevelFilter, SetLoggerError};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// `log::trace!` under the workspace's own name.
#[macro_export]
macro_rules! app_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// `log::debug!` under the workspace's own name.
#[macro_export]
macro_rules! app_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! app_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// `log::warn!` under the workspace's own name.
#[macro_export]
macro_rules! app_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! app_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the log file only.
    File,
    /// Write to the terminal (stderr/stdout mixed).
    Terminal,
    /// Write to both the log file and the terminal.
    Both,
}

/// Installs the global logger.
///
/// For `LogDestination::File` or `Both`, the file at `log_path` is created
/// (truncating any previous run). A file that cannot be created is reported
/// on stderr and skipped; the terminal logger is still installed for `Both`.
pub fn initialize(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Result<(), SetLoggerError> {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, config, log_path) {
            loggers.push(file_logger);
        }
    }

    if loggers.is_empty() {
        return Ok(());
    }
    CombinedLogger::init(loggers)
}

/// Terminal logger at debug level for test binaries.
///
/// Every test may call this; only the first call in a process installs a
/// logger, later calls return silently.
pub fn initialize_for_tests() {
    let _ = TermLogger::init(
        LevelFilter::Debug,
        build_config(),
        TerminalMode::Mixed,
        ColorChoice::Never,
    );
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!(
                "Warning: Could not create log file at {:?}: {}",
                log_path, err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logger_is_created_in_writable_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("downloads.log");
        let logger = create_file_logger(LevelFilter::Info, build_config(), &path);
        assert!(logger.is_some());
        assert!(path.exists());
    }

    #[test]
    fn file_logger_is_skipped_when_parent_is_missing() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("missing").join("downloads.log");
        let logger = create_file_logger(LevelFilter::Info, build_config(), &path);
        assert!(logger.is_none());
    }
}
