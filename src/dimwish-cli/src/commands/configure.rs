//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up dimwish CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `manifest` - Optional manifest path to set as default
/// * `reviewer` - Optional reviewer name to set as default
/// * `show` - If true, show current configuration
pub fn handle(manifest: Option<PathBuf>, reviewer: Option<String>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if manifest.is_none() && reviewer.is_none() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, manifest, reviewer);
    config.save()?;

    show_config(&config);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Overwrite the settings that were given
fn apply(config: &mut Config, manifest: Option<PathBuf>, reviewer: Option<String>) {
    if let Some(path) = manifest {
        config.manifest = Some(path);
    }
    if let Some(name) = reviewer {
        config.reviewer = Some(name);
    }
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.manifest {
        Some(path) => println!("Manifest: {}", path.display()),
        None => println!("Manifest: {} (default)", dimwish::DEFAULT_MANIFEST_PATH),
    }
    match &config.reviewer {
        Some(name) => println!("Reviewer: {}", name),
        None => println!("Reviewer: {} (default)", dimwish::DEFAULT_REVIEWER),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: dimwish configure --set-manifest PATH");
    println!("   or: dimwish configure --reviewer NAME");
    println!("   or: dimwish configure --show");
    println!();
    println!("Note: the manifest is the SQLite database from the Bungie API");
    println!("      (Destiny2/Manifest, mobileWorldContentPaths).");
}
