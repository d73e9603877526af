//! Authored rolls and their rendering into wishlist lines.

use crate::item::Item;
use crate::tags::{self, Tag, TagSet};
use crate::wishlist::WishlistLine;
use std::fmt;

/// Perk names that contain a comma and must not be split
pub const COMMA_PERKS: &[&str] = &["Eyes Up, Guardian"];

/// Error rendering a recommendation against an item
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Could not find hash for perk {perk:?} on {item}")]
    PerkNotFound { perk: String, item: String },

    #[error("{slots} perk slots but {item} only has {columns} perk columns")]
    TooManySlots {
        slots: usize,
        columns: usize,
        item: String,
    },
}

/// Result type for rendering
pub type RenderResult<T> = Result<T, RenderError>;

/// One recommended roll for a weapon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendation {
    pub tags: TagSet,
    /// Per column, the perk names that are all acceptable there
    pub slots: Vec<Vec<String>>,
    pub masterwork: Option<String>,
}

/// Header comments plus every roll line for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRoll {
    pub heading: String,
    pub notes: String,
    pub lines: Vec<WishlistLine>,
}

/// Split a slot's perk list on commas.
///
/// A list that is exactly one of the [`COMMA_PERKS`] is kept whole.
pub fn split_perk_names(text: &str) -> Vec<String> {
    let text = text.trim();
    if COMMA_PERKS.contains(&text) {
        return vec![text.to_string()];
    }
    text.strip_suffix(',')
        .unwrap_or(text)
        .split(',')
        .map(|p| p.trim().to_string())
        .collect()
}

impl Recommendation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push_slot<S: Into<String>>(&mut self, perks: impl IntoIterator<Item = S>) {
        self.slots.push(perks.into_iter().map(Into::into).collect());
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Resolve every perk name to the perk item it refers to.
    ///
    /// Each name is looked up across all columns and the first column with
    /// a perk of that exact name wins, so a name shared by two columns
    /// always resolves to the earlier one.
    pub fn resolve<'a>(&self, item: &'a Item) -> RenderResult<Vec<Vec<&'a Item>>> {
        if self.slots.len() > item.columns.len() {
            return Err(RenderError::TooManySlots {
                slots: self.slots.len(),
                columns: item.columns.len(),
                item: item.to_string(),
            });
        }

        self.slots
            .iter()
            .map(|slot| {
                slot.iter()
                    .map(|name| {
                        item.find_perk(name)
                            .ok_or_else(|| RenderError::PerkNotFound {
                                perk: name.clone(),
                                item: item.to_string(),
                            })
                    })
                    .collect::<RenderResult<Vec<_>>>()
            })
            .collect()
    }

    /// Every combination of one perk per slot, in slot order
    pub fn rolls(&self, item: &Item) -> RenderResult<Vec<WishlistLine>> {
        let resolved = self.resolve(item)?;
        Ok(cartesian(&resolved)
            .into_iter()
            .map(|combo| WishlistLine {
                item: item.hash,
                perks: combo.iter().map(|p| p.hash).collect(),
            })
            .collect())
    }

    /// `//notes:` comment for this roll
    pub fn notes(&self, reviewer: &str, description: &str) -> String {
        let mut notes = format!("//notes:{}", reviewer);
        if !self.tags.is_empty() {
            notes.push_str(&format!(" ({})", tags::labels(&self.tags)));
        }
        notes.push_str(&format!(": \"{}\"", description));
        if let Some(mw) = &self.masterwork {
            notes.push_str(&format!(" Recommended MW: {}.", mw));
        }
        if !self.tags.is_empty() {
            notes.push_str(&format!("|tags:{}", tags::keys(&self.tags)));
        }
        notes
    }

    /// Render this roll against one item
    pub fn render(&self, item: &Item, reviewer: &str, description: &str) -> RenderResult<RenderedRoll> {
        Ok(RenderedRoll {
            heading: format!("// {}", item.name),
            notes: self.notes(reviewer, description),
            lines: self.rolls(item)?,
        })
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tags={} masterwork={}",
            tags::keys(&self.tags),
            self.masterwork.as_deref().unwrap_or("None")
        )
    }
}

impl fmt::Display for RenderedRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "{}", self.notes)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

fn cartesian<'a>(slots: &[Vec<&'a Item>]) -> Vec<Vec<&'a Item>> {
    slots.iter().fold(vec![Vec::new()], |combos, slot| {
        combos
            .iter()
            .flat_map(|prefix| {
                slot.iter().map(move |perk| {
                    let mut next = prefix.clone();
                    next.push(*perk);
                    next
                })
            })
            .collect()
    })
}
