//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dimwish")]
#[command(about = "Create and validate DIM wishlists", long_about = None)]
pub struct Cli {
    /// Path to the SQLite manifest (uses configured default if not provided)
    #[arg(short, long, global = true, env = "DIMWISH_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Number of manifest definitions to keep cached
    #[arg(long, global = true, default_value_t = dimwish::DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// Log manifest lookups and item construction to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Turn review notes into a wishlist
    #[command(visible_alias = "c")]
    Create {
        /// Notes files to read (stdin if none)
        inputs: Vec<PathBuf>,

        /// Reviewer credited in the notes (uses configured default if not provided)
        #[arg(short, long)]
        reviewer: Option<String>,

        /// Write the wishlist here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check wishlist rolls against the manifest
    #[command(visible_alias = "v")]
    Validate {
        /// Wishlist files to read (stdin if none)
        inputs: Vec<PathBuf>,
    },

    /// Configure default settings
    Configure {
        /// Set default manifest path
        #[arg(long, value_name = "PATH")]
        set_manifest: Option<PathBuf>,

        /// Set default reviewer
        #[arg(long)]
        reviewer: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
