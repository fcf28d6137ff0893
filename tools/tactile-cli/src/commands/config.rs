//! Show (and optionally persist) the effective configuration.

use tactile_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, save: bool) -> anyhow::Result<()> {
    config
        .pan
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration is invalid: {e}"))?;

    println!("{}", serde_json::to_string_pretty(config)?);

    let pan = &config.pan;
    println!();
    println!("Derived:");
    println!(
        "  Minimum distance squared: {:.1}",
        pan.minimum_distance_squared()
    );
    println!("  Smoothing steps: {}", pan.smoothing_steps());

    if save {
        let path = config.save()?;
        println!("Saved configuration to {}", path.display());
    } else {
        println!("Config file: {}", config_file_path().display());
    }

    Ok(())
}
