//! Wishlist validation command handlers

use crate::input;
use anyhow::{Context, Result};
use dimwish::{Line, Manifest, Validator};
use std::io::{self, Write};
use std::path::PathBuf;

/// Counts gathered while validating
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub rolls: usize,
    pub failed: usize,
}

/// Handle the validate command
pub fn handle(manifest: &Manifest, inputs: &[PathBuf]) -> Result<Summary> {
    let lines = input::lines(input::open_inputs(inputs)?);
    let summary = report(manifest, lines, &mut io::stdout().lock())?;

    eprintln!(
        "Checked {} rolls on {} lines, {} failed",
        summary.rolls, summary.lines, summary.failed
    );
    Ok(summary)
}

/// Validate every line, writing titles, descriptions and one line per bad roll
pub fn report<W: Write>(
    manifest: &Manifest,
    lines: impl Iterator<Item = io::Result<String>>,
    out: &mut W,
) -> Result<Summary> {
    let mut validator = Validator::new(manifest);
    let mut summary = Summary::default();

    for line in lines {
        let line = line.context("Failed to read wishlist")?;
        match validator.process_line(&line) {
            Line::Blank | Line::Comment(_) => {}
            Line::Title(title) => writeln!(out, "{}", title)?,
            Line::Description(description) => writeln!(out, "{}", description)?,
            Line::Roll(check) => {
                summary.rolls += 1;
                if let Err(e) = &check.result {
                    summary.failed += 1;
                    writeln!(
                        out,
                        "{} {} Error! {}",
                        check.line_number,
                        check.item.as_deref().unwrap_or("<unparsed>"),
                        e
                    )?;
                }
            }
            Line::Unhandled(text) => writeln!(out, "Unhandled line: {}", text)?,
        }
    }

    summary.lines = validator.line_number();
    Ok(summary)
}
