//! Input helpers shared by the line-oriented commands

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Open every input file, or stdin when none are given
pub fn open_inputs(inputs: &[PathBuf]) -> Result<Vec<Box<dyn BufRead>>> {
    if inputs.is_empty() {
        return Ok(vec![Box::new(io::stdin().lock())]);
    }

    inputs
        .iter()
        .map(|path| -> Result<Box<dyn BufRead>> {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        })
        .collect()
}

/// Lines of all readers, one after another
pub fn lines(readers: Vec<Box<dyn BufRead>>) -> impl Iterator<Item = io::Result<String>> {
    readers.into_iter().flat_map(|reader| reader.lines())
}
