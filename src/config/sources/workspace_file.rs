//! Workspace config files: a shared `config/config.toml` plus a profile overlay
//! `config/{TRIAGE_ENV}.toml`, so one checkout can carry per-site settings.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROFILE_ENV_VAR: &str = "TRIAGE_ENV";
pub const DEFAULT_PROFILE: &str = "development";

/// Profile selected by `TRIAGE_ENV`, falling back to `development`.
pub fn active_profile() -> String {
    std::env::var(PROFILE_ENV_VAR)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

/// Workspace files in ascending precedence: base, then profile overlay.
pub fn layered_paths(workspace_root: &Path, profile: &str) -> [PathBuf; 2] {
    let dir = workspace_root.join("config");
    [dir.join("config.toml"), dir.join(format!("{}.toml", profile))]
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let profile = active_profile();
    let builder = layered_paths(workspace_root, &profile)
        .into_iter()
        .filter(|path| path.exists())
        .fold(builder, |builder, path| {
            debug!(config_path = %path.display(), profile = %profile, "Workspace configuration layer");
            builder.add_source(File::from(path).required(false))
        });
    Ok(builder)
}
