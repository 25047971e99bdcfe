//! Merge rules: defaults, override order.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Default store location, relative to the workspace root.
pub const DEFAULT_STORE_PATH: &str = ".triage/store";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder().set_default("storage.path", DEFAULT_STORE_PATH)
}

/// Environment overrides, e.g. `TRIAGE__STORAGE__PATH=/var/lib/triage`.
///
/// The double-underscore separator keeps `TRIAGE_LOG*` variables out of the config tree.
pub fn environment_source() -> Environment {
    Environment::with_prefix("TRIAGE")
        .prefix_separator("__")
        .separator("__")
}
