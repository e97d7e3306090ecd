/// Log tags identifying the subsystem a line comes from
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Quote,
    Swap,
    Rpc,
    Wallet,
    Other(String),
}

impl LogTag {
    /// Key used by `--debug-<key>` flags and `enabled_tags`
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Quote => "quote".to_string(),
            LogTag::Swap => "swap".to_string(),
            LogTag::Rpc => "rpc".to_string(),
            LogTag::Wallet => "wallet".to_string(),
            LogTag::Other(name) => name.to_lowercase(),
        }
    }

    /// Uppercase label without colour, used for file output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Other(name) => name.to_uppercase(),
            tag => tag.to_debug_key().to_uppercase(),
        }
    }
}

impl fmt::Display for LogTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
