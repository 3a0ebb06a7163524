use crate::PermissionLevel;

/// Default prefix that forces lookup of a built-in function.
pub const DEFAULT_BUILTIN_PREFIX: &str = "builtin.";

/// Limits and configuration for marshalling and dispatch.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Maximum nesting depth of lists, dictionaries and results during
    /// reverse conversion.
    pub max_depth: usize,
    /// Whether integral floats become `LONG` under best-effort conversion.
    pub integral_doubles_as_long: bool,
    /// Name prefix that selects a built-in over a user-defined function.
    pub builtin_prefix: String,
    /// Permission required by functions that do not declare one.
    pub default_permission: PermissionLevel,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            integral_doubles_as_long: true,
            builtin_prefix: DEFAULT_BUILTIN_PREFIX.to_string(),
            default_permission: PermissionLevel::Observer,
        }
    }
}
