/// Define a configuration struct with embedded defaults
///
/// Each field is declared once with its type and default; the macro
/// generates the public struct, its `Default` impl and serde support with
/// `#[serde(default)]`, so a partial TOML section fills in the rest.
///
/// ```rust,ignore
/// config_struct! {
///     pub struct QuoteConfig {
///         base_url: String = "https://swap-v2.solanatracker.io".to_string(),
///         timeout_secs: u64 = 15,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
