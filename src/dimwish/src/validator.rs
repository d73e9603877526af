//! Wishlist validation against the manifest.
//!
//! Each roll's perk hashes are mapped back onto the item's perk columns.
//! A roll is valid when every perk lands in its own column.

use crate::hash::ManifestHash;
use crate::item::Item;
use crate::manifest::{Manifest, ManifestError};
use crate::wishlist::{WishlistLine, WishlistLineError, PREFIX};
use std::collections::{BTreeMap, HashSet};

/// Error validating one roll
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Two perks in same column! {first} and {second}")]
    ColumnConflict { first: String, second: String },

    #[error("Perks not in manifest: {}", .perks.join(", "))]
    UnknownPerk { perks: Vec<String> },

    #[error(transparent)]
    Malformed(#[from] WishlistLineError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Column index to the perk that occupies it
pub type Roll<'a> = BTreeMap<usize, &'a Item>;

/// Assign each perk hash to a column of `item`.
///
/// Perks are taken in order and land in the first column that can roll
/// them. A perk whose column is already taken is a conflict. Perks that fit
/// no column are named through a direct manifest lookup, so retired perks
/// are still reported by name.
pub fn validate_roll<'a>(
    manifest: &Manifest,
    item: &'a Item,
    perks: &[ManifestHash],
) -> ValidationResult<Roll<'a>> {
    let mut roll = Roll::new();

    for &perk in perks {
        let Some((index, found)) = item
            .columns
            .iter()
            .enumerate()
            .find_map(|(i, c)| c.get(perk).map(|p| (i, p)))
        else {
            continue;
        };

        if let Some(existing) = roll.get(&index) {
            return Err(ValidationError::ColumnConflict {
                first: existing.to_string(),
                second: found.to_string(),
            });
        }
        roll.insert(index, found);
    }

    if perks.len() > roll.len() {
        let assigned: HashSet<ManifestHash> = roll.values().map(|p| p.hash).collect();
        let perks = perks
            .iter()
            .filter(|p| !assigned.contains(*p))
            .map(|&p| manifest.item_name(p).map(|name| format!("{} [{}]", name, p)))
            .collect::<Result<Vec<_>, _>>()?;
        return Err(ValidationError::UnknownPerk { perks });
    }

    Ok(roll)
}

/// Outcome of checking one `dimwishlist:` line
#[derive(Debug)]
pub struct RollCheck {
    /// 1-based line number in the input
    pub line_number: usize,
    /// Display string of the item, when it could be built
    pub item: Option<String>,
    /// Column index to perk, cloned out of the item
    pub result: ValidationResult<BTreeMap<usize, Item>>,
}

impl RollCheck {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

/// Classified input line
#[derive(Debug)]
pub enum Line {
    Blank,
    Comment(String),
    Title(String),
    Description(String),
    Roll(RollCheck),
    Unhandled(String),
}

/// Line-by-line wishlist validator.
///
/// Keeps the most recently built item, since wishlists list all rolls of an
/// item together.
pub struct Validator<'m> {
    manifest: &'m Manifest,
    last_item: Option<Item>,
    line_number: usize,
}

impl<'m> Validator<'m> {
    pub fn new(manifest: &'m Manifest) -> Self {
        Self {
            manifest,
            last_item: None,
            line_number: 0,
        }
    }

    /// Lines seen so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Classify one line and validate it if it is a roll
    pub fn process_line(&mut self, raw: &str) -> Line {
        let line = raw.trim();
        self.line_number += 1;

        if line.is_empty() {
            return Line::Blank;
        }
        if let Some(comment) = line.strip_prefix("//") {
            return Line::Comment(comment.to_string());
        }
        if let Some(title) = line.strip_prefix("title:") {
            return Line::Title(title.to_string());
        }
        if let Some(description) = line.strip_prefix("description:") {
            return Line::Description(description.to_string());
        }
        if line.starts_with(PREFIX) {
            return Line::Roll(self.check(line));
        }
        Line::Unhandled(line.to_string())
    }

    fn check(&mut self, line: &str) -> RollCheck {
        let line_number = self.line_number;
        let parsed: WishlistLine = match line.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                return RollCheck {
                    line_number,
                    item: None,
                    result: Err(ValidationError::Malformed(e)),
                }
            }
        };

        let manifest = self.manifest;
        let item = match self.item(parsed.item) {
            Ok(item) => item,
            Err(e) => {
                return RollCheck {
                    line_number,
                    item: Some(parsed.item.to_string()),
                    result: Err(e.into()),
                }
            }
        };

        let result = validate_roll(manifest, item, &parsed.perks).map(|roll| {
            roll.into_iter()
                .map(|(index, perk)| (index, perk.clone()))
                .collect()
        });

        RollCheck {
            line_number,
            item: Some(item.to_string()),
            result,
        }
    }

    /// Build an item, reusing the last one when the hash repeats
    fn item(&mut self, hash: ManifestHash) -> Result<&Item, ManifestError> {
        let item = match self.last_item.take() {
            Some(item) if item.hash == hash => item,
            _ => Item::build(self.manifest, hash)?,
        };
        Ok(self.last_item.insert(item))
    }
}
