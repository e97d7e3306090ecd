/// Logger configuration, built from the command line or set programmatically
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::RwLock;

const DEBUG_TAG_KEYS: [&str; 6] = ["system", "config", "quote", "swap", "rpc", "wallet"];

#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    /// Least severe level shown
    pub min_level: LogLevel,
    /// Tags whose debug lines are shown
    pub debug_tags: HashSet<String>,
    /// Debug lines for every tag
    pub debug_all: bool,
    /// Tags shown at warning/info; empty means all
    pub enabled_tags: HashSet<String>,
    /// Plain-text mirror of everything printed
    pub file_path: Option<PathBuf>,
    /// Console output on/off (file output is unaffected)
    pub console: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            debug_all: false,
            enabled_tags: HashSet::new(),
            file_path: None,
            console: true,
        }
    }
}

impl LoggerConfig {
    /// Enable debug output for one tag; raises the threshold if needed
    pub fn with_debug_tag(mut self, tag: &LogTag) -> Self {
        self.debug_tags.insert(tag.to_debug_key());
        if self.min_level < LogLevel::Debug {
            self.min_level = LogLevel::Debug;
        }
        self
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

pub fn update_logger_config<F>(update: F)
where
    F: FnOnce(&mut LoggerConfig),
{
    match LOGGER_CONFIG.write() {
        Ok(mut current) => update(&mut current),
        Err(poisoned) => update(&mut poisoned.into_inner()),
    }
}

/// Build a config from the stored command-line arguments
pub fn config_from_args() -> LoggerConfig {
    let mut config = LoggerConfig::default();

    config.debug_all = arguments::is_debug_all_enabled();
    for key in DEBUG_TAG_KEYS {
        if arguments::has_arg(&format!("--debug-{}", key)) {
            config.debug_tags.insert(key.to_string());
        }
    }
    if arguments::is_debug_swap_enabled() {
        config.debug_tags.insert("swap".to_string());
    }

    config.min_level = if arguments::is_quiet_enabled() {
        LogLevel::Error
    } else if arguments::is_verbose_enabled() {
        LogLevel::Verbose
    } else if config.debug_all || !config.debug_tags.is_empty() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    config.file_path = arguments::get_log_file_path().map(PathBuf::from);
    config
}

pub fn init_from_args() {
    set_logger_config(config_from_args());
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = get_logger_config();
    config.debug_all || config.debug_tags.contains(&tag.to_debug_key())
}

/// `--verbose` shows verbose lines together with every tag's debug lines
pub fn is_verbose_enabled_for_tag(_tag: &LogTag) -> bool {
    get_logger_config().min_level == LogLevel::Verbose
}
