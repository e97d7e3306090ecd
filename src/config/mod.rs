/// Configuration system
///
/// A single TOML file with `[wallet]`, `[rpc]`, `[quote]` and `[swap]`
/// sections. Every field has a default, so a missing file or a partial
/// section is fine.
///
/// ```rust,ignore
/// use tracker_swap::config::{load_config_from_path, with_config};
///
/// load_config_from_path("config.toml")?;
/// let rpc_url = with_config(|cfg| cfg.rpc.url.clone());
/// ```
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::*;
