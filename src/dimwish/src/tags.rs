//! Wishlist roll tags

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Roll tag understood by DIM.
///
/// Declaration order is display order: sorting a set of tags puts them in
/// the order they appear in notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Pvp,
    Pve,
    Mkb,
    Controller,
    Dps,
    Gambit,
}

/// All tags in display order
pub const TAGS: &[Tag] = &[
    Tag::Pvp,
    Tag::Pve,
    Tag::Mkb,
    Tag::Controller,
    Tag::Dps,
    Tag::Gambit,
];

/// Ordered set of tags
pub type TagSet = BTreeSet<Tag>;

impl Tag {
    /// Key used in `|tags:` suffixes
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pvp => "pvp",
            Self::Pve => "pve",
            Self::Mkb => "mkb",
            Self::Controller => "controller",
            Self::Dps => "dps",
            Self::Gambit => "gambit",
        }
    }

    /// Human readable label for notes
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pvp => "PvP",
            Self::Pve => "PvE",
            Self::Mkb => "M+KB",
            Self::Controller => "Controller",
            Self::Dps => "DPS",
            Self::Gambit => "Gambit",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error parsing a tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tag: {0:?}")]
pub struct UnknownTag(pub String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TAGS.iter()
            .copied()
            .find(|t| t.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// `PvP / M+KB` style label list
pub fn labels(tags: &TagSet) -> String {
    tags.iter().map(Tag::label).collect::<Vec<_>>().join(" / ")
}

/// `pvp,mkb` style key list
pub fn keys(tags: &TagSet) -> String {
    tags.iter().map(Tag::key).collect::<Vec<_>>().join(",")
}
