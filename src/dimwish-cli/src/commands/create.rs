//! Wishlist creation from review notes

use crate::input;
use anyhow::{Context, Result};
use dimwish::{Manifest, NotesParser};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Handle the create command
pub fn handle(
    manifest: &Manifest,
    inputs: &[PathBuf],
    reviewer: &str,
    output: Option<&Path>,
) -> Result<()> {
    let lines = input::lines(input::open_inputs(inputs)?);

    let rolls = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            let rolls = write_wishlist(manifest, lines, reviewer, &mut out)?;
            out.flush()
                .with_context(|| format!("Failed to write {}", path.display()))?;
            rolls
        }
        None => write_wishlist(manifest, lines, reviewer, &mut io::stdout().lock())?,
    };

    info!(rolls, "wishlist written");
    Ok(())
}

/// Parse notes and write every rendered roll block; returns the number of roll lines
pub fn write_wishlist<W: Write>(
    manifest: &Manifest,
    lines: impl Iterator<Item = io::Result<String>>,
    reviewer: &str,
    out: &mut W,
) -> Result<usize> {
    let mut parser = NotesParser::new(manifest, reviewer);
    let mut rolls = 0;

    for line in lines {
        let line = line.context("Failed to read notes")?;
        for block in parser.process_line(&line)? {
            rolls += block.lines.len();
            write!(out, "{}", block)?;
        }
    }
    for block in parser.finish()? {
        rolls += block.lines.len();
        write!(out, "{}", block)?;
    }

    Ok(rolls)
}
