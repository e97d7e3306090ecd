/// Filtering rules applied before anything is formatted
///
/// 1. Errors always log
/// 2. Anything less severe than `min_level` is dropped
/// 3. Debug needs `--debug-<tag>` (or `--debug-all`, or `--verbose`)
/// 4. Verbose needs `--verbose`
/// 5. Warning/info respect `enabled_tags` when it is non-empty
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(tag) || is_verbose_enabled_for_tag(tag);
    }

    if level == LogLevel::Verbose {
        return is_verbose_enabled_for_tag(tag);
    }

    if !config.enabled_tags.is_empty() && !config.enabled_tags.contains(&tag.to_debug_key()) {
        return false;
    }

    true
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}
