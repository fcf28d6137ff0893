pub mod config;
pub mod replay;
pub mod synth;

use std::path::Path;

use tactile_common::config::AppConfig;

/// Load the explicit config file if given, otherwise the standard one.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
        None => Ok(AppConfig::load()),
    }
}
