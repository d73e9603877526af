//! Manifest hash identifiers.
//!
//! Bungie hashes are unsigned 32-bit values everywhere users see them, but
//! the SQLite manifest keys its rows by the same bits read as a signed
//! integer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unsigned 32-bit manifest hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestHash(pub u32);

impl ManifestHash {
    /// Row id used by the SQLite manifest tables.
    ///
    /// Hashes with the high bit set are reduced by 2^32.
    pub fn sql_id(self) -> i32 {
        // Two's complement reinterpretation, same bits
        self.0 as i32
    }

    /// Inverse of [`ManifestHash::sql_id`]
    pub fn from_sql_id(id: i32) -> Self {
        Self(id as u32)
    }
}

impl From<u32> for ManifestHash {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ManifestHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing a hash from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid manifest hash: {0:?}")]
pub struct InvalidHash(pub String);

impl FromStr for ManifestHash {
    type Err = InvalidHash;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| InvalidHash(s.to_string()))
    }
}
