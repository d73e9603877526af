mod cli;
mod commands;
mod config;
mod input;

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::Config;
use dimwish::{Manifest, SqliteManifest};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Configure {
            set_manifest,
            reviewer,
            show,
        } => {
            commands::configure::handle(set_manifest, reviewer, show)?;
        }

        Commands::Create {
            inputs,
            reviewer,
            output,
        } => {
            let config = Config::load()?;
            let manifest = open_manifest(config.manifest_path(cli.manifest), cli.cache_capacity)?;
            commands::create::handle(
                &manifest,
                &inputs,
                &config.reviewer(reviewer),
                output.as_deref(),
            )?;
        }

        Commands::Validate { inputs } => {
            let config = Config::load()?;
            let manifest = open_manifest(config.manifest_path(cli.manifest), cli.cache_capacity)?;
            let summary = commands::validate::handle(&manifest, &inputs)?;
            if summary.failed > 0 {
                bail!(
                    "{} of {} rolls failed validation",
                    summary.failed,
                    summary.rolls
                );
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so wishlists can be piped from stdout
fn init_tracing(verbose: bool) {
    let default = if verbose { "dimwish=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_manifest(path: PathBuf, cache_capacity: usize) -> Result<Manifest> {
    let capacity =
        NonZeroUsize::new(cache_capacity).context("--cache-capacity must be at least 1")?;
    if !path.exists() {
        bail!(
            "Manifest not found at {} (set it with --manifest or `dimwish configure --set-manifest`)",
            path.display()
        );
    }
    let source = SqliteManifest::open(&path)
        .with_context(|| format!("Failed to open manifest {}", path.display()))?;
    tracing::debug!(path = %path.display(), capacity = capacity.get(), "manifest opened");
    Ok(Manifest::with_capacity(source, capacity))
}
