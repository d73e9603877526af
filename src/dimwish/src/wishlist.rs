//! `dimwishlist:` line format
//!
//! ```text
//! dimwishlist:item=3969379530&perks=839105230,1087426260,3619207468
//! ```

use crate::hash::{InvalidHash, ManifestHash};
use std::fmt;
use std::str::FromStr;

/// Prefix of every roll line
pub const PREFIX: &str = "dimwishlist:";

/// One roll of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistLine {
    pub item: ManifestHash,
    pub perks: Vec<ManifestHash>,
}

/// Error parsing a roll line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WishlistLineError {
    #[error("Not a wishlist line: {0:?}")]
    MissingPrefix(String),

    #[error("Missing {0} in wishlist line")]
    MissingField(&'static str),

    #[error(transparent)]
    Hash(#[from] InvalidHash),
}

impl fmt::Display for WishlistLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}item={}&perks=", PREFIX, self.item)?;
        for (i, perk) in self.perks.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", perk)?;
        }
        Ok(())
    }
}

impl FromStr for WishlistLine {
    type Err = WishlistLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let query = s
            .trim()
            .strip_prefix(PREFIX)
            .ok_or_else(|| WishlistLineError::MissingPrefix(s.to_string()))?;
        // Inline notes follow the query
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        let mut item = None;
        let mut perks = None;
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            // An empty perk list is a roll with no perk requirements
            if value.is_empty() && key != "perks" {
                continue;
            }
            // First occurrence of a key wins
            match key {
                "item" if item.is_none() => item = Some(value),
                "perks" if perks.is_none() => perks = Some(value),
                _ => {}
            }
        }

        let item = item
            .ok_or(WishlistLineError::MissingField("item"))?
            .parse()?;
        let perks = match perks.ok_or(WishlistLineError::MissingField("perks"))? {
            "" => Vec::new(),
            list => list
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<ManifestHash>, _>>()?,
        };

        Ok(Self { item, perks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let line: WishlistLine =
            "dimwishlist:item=3969379530&perks=839105230,1087426260,3619207468,3047969693"
                .parse()
                .unwrap();
        assert_eq!(line.item, ManifestHash(3969379530));
        assert_eq!(
            line.perks,
            vec![
                ManifestHash(839105230),
                ManifestHash(1087426260),
                ManifestHash(3619207468),
                ManifestHash(3047969693)
            ]
        );
    }

    #[test]
    fn test_display_matches_input() {
        let text = "dimwishlist:item=2171478765&perks=1001,2001,3000000003,4002";
        let line: WishlistLine = text.parse().unwrap();
        assert_eq!(line.to_string(), text);
    }

    #[test]
    fn test_parse_ignores_inline_notes() {
        let line: WishlistLine = "dimwishlist:item=1&perks=2,3#notes:great roll"
            .parse()
            .unwrap();
        assert_eq!(line.perks, vec![ManifestHash(2), ManifestHash(3)]);
    }

    #[test]
    fn test_parse_field_order_does_not_matter() {
        let line: WishlistLine = "dimwishlist:perks=5&item=4".parse().unwrap();
        assert_eq!(line.item, ManifestHash(4));
        assert_eq!(line.perks, vec![ManifestHash(5)]);
    }

    #[test]
    fn test_parse_missing_fields() {
        assert_eq!(
            "dimwishlist:item=1".parse::<WishlistLine>(),
            Err(WishlistLineError::MissingField("perks"))
        );
        assert_eq!(
            "dimwishlist:perks=1".parse::<WishlistLine>(),
            Err(WishlistLineError::MissingField("item"))
        );
    }

    #[test]
    fn test_empty_perk_list() {
        let text = "dimwishlist:item=1&perks=";
        let line: WishlistLine = text.parse().unwrap();
        assert_eq!(line.item, ManifestHash(1));
        assert!(line.perks.is_empty());
        assert_eq!(line.to_string(), text);
        assert_eq!(
            "dimwishlist:item=&perks=1".parse::<WishlistLine>(),
            Err(WishlistLineError::MissingField("item"))
        );
    }

    #[test]
    fn test_parse_bad_hash() {
        let err = "dimwishlist:item=1&perks=2,x".parse::<WishlistLine>();
        assert!(matches!(err, Err(WishlistLineError::Hash(_))));
    }

    #[test]
    fn test_parse_wrong_prefix() {
        let err = "title:My list".parse::<WishlistLine>();
        assert!(matches!(err, Err(WishlistLineError::MissingPrefix(_))));
    }
}
