/// Command-line flag registry
///
/// The binary parses its own arguments with clap; this snapshot of argv is what
/// the logger consults for `--debug-<tag>`, `--verbose`, `--quiet` and
/// `--log-file`, so library code never needs the parsed CLI struct.
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Replace the stored arguments (tests, embedding applications)
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        // Poisoned: fall back to the process arguments
        Err(_) => env::args().collect(),
    }
}

pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Value following `flag`, either as the next argument or as `flag=value`
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    let inline = format!("{}=", flag);

    for (i, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&inline) {
            return Some(value.to_string());
        }
        if arg == flag {
            return args.get(i + 1).filter(|v| !v.starts_with("--")).cloned();
        }
    }
    None
}

// =============================================================================
// DEBUG FLAGS
// =============================================================================

pub fn is_debug_system_enabled() -> bool {
    has_arg("--debug-system")
}

pub fn is_debug_config_enabled() -> bool {
    has_arg("--debug-config")
}

/// Quote API calls debug mode
pub fn is_debug_quote_enabled() -> bool {
    has_arg("--debug-quote")
}

/// Signing, sending and confirmation debug mode
pub fn is_debug_swap_enabled() -> bool {
    has_arg("--debug-swap") || has_arg("--debug-swaps")
}

pub fn is_debug_rpc_enabled() -> bool {
    has_arg("--debug-rpc")
}

pub fn is_debug_wallet_enabled() -> bool {
    has_arg("--debug-wallet")
}

/// Every tag at debug level
pub fn is_debug_all_enabled() -> bool {
    has_arg("--debug-all") || has_arg("--debug")
}

pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose") || has_arg("-v")
}

/// Only errors reach the console
pub fn is_quiet_enabled() -> bool {
    has_arg("--quiet") || has_arg("-q")
}

/// Path given with `--log-file`
pub fn get_log_file_path() -> Option<String> {
    get_arg_value("--log-file")
}

pub fn is_any_debug_enabled() -> bool {
    !get_enabled_debug_modes().is_empty()
}

/// Names of the enabled debug modes, for the startup banner
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    let checks: [(&'static str, fn() -> bool); 7] = [
        ("all", is_debug_all_enabled),
        ("system", is_debug_system_enabled),
        ("config", is_debug_config_enabled),
        ("quote", is_debug_quote_enabled),
        ("swap", is_debug_swap_enabled),
        ("rpc", is_debug_rpc_enabled),
        ("wallet", is_debug_wallet_enabled),
    ];

    checks
        .iter()
        .filter(|(_, enabled)| enabled())
        .map(|(name, _)| *name)
        .collect()
}
