//! Tag-based structured logging
//!
//! - Standard levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via `--debug-<tag>` flags
//! - Coloured console output, optional plain-text file mirror (`--log-file`)
//!
//! ```rust,ignore
//! use tracker_swap::logger::{self, LogTag};
//!
//! logger::init();
//! logger::info(LogTag::Swap, "Transaction sent");
//! logger::debug(LogTag::Rpc, "Block height 312000000"); // only with --debug-rpc
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{
    config_from_args, get_logger_config, init_from_args, set_logger_config,
    update_logger_config, LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Read logger flags from the command line and open the log file
///
/// Call once at startup, after `arguments::set_cmd_args` if the arguments
/// were overridden.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Always shown
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Shown unless `--quiet`
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Only shown with `--debug-<tag>` for this tag
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Only shown with `--verbose`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Whether a line at `level` for `tag` would currently be printed
pub fn enabled(tag: &LogTag, level: LogLevel) -> bool {
    core::should_log(tag, level)
}

/// Flush pending file writes; call before exiting
pub fn flush() {
    file::flush_file_logging();
}
