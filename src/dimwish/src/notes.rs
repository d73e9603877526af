//! Parser for hand-written weapon review notes.
//!
//! The notes are markdown-ish text in the format used by community roll
//! reviews:
//!
//! ```text
//! ### Trials of Osiris
//! **[Fatebringer](https://light.gg/db/items/2171478765/fatebringer/)**
//! Great all-rounder for raids.
//! Recommended PvE Roll
//! Sights: Arrowhead Brake, Corkscrew Rifling
//! Magazine: Accurized Rounds
//! Perk 1: Explosive Payload
//! Perk 2: Kill Clip, Opening Shot
//! Masterwork: Range
//! ```
//!
//! Every finished weapon is rendered straight away.

use crate::hash::ManifestHash;
use crate::item::Item;
use crate::manifest::{Manifest, ManifestError};
use crate::recommendation::{split_perk_names, Recommendation, RenderedRoll};
use crate::tags::Tag;
use crate::weapon::{Weapon, WeaponError};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Reviewer credited in notes when none is configured
pub const DEFAULT_REVIEWER: &str = "pandapaxxy";

/// Labels that introduce one perk column each, in column order
pub const SLOT_LABELS: &[&str] = &["Sights:", "Magazine:", "Perk 1:", "Perk 2:"];

/// Line prefixes that carry nothing for the wishlist
const IGNORED_PREFIXES: &[&str] = &["Source:", "Curated Roll:", "- "];

/// Lines this short are never descriptions
const MIN_DESCRIPTION_LEN: usize = 10;

fn item_link() -> &'static Regex {
    static ITEM_LINK: OnceLock<Regex> = OnceLock::new();
    ITEM_LINK.get_or_init(|| {
        Regex::new(r"https://light\.gg/db/items/([0-9]+)/").expect("item link pattern is valid")
    })
}

/// Error reading review notes
#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    #[error("No item link in {0:?}")]
    BadItemLink(String),

    #[error("{line:?} needs a {needs} before it")]
    Orphan { line: String, needs: &'static str },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Weapon(#[from] WeaponError),
}

/// Result type for notes parsing
pub type NotesResult<T> = Result<T, NotesError>;

/// Line-by-line notes reader
pub struct NotesParser<'m> {
    manifest: &'m Manifest,
    reviewer: String,
    heading: Option<String>,
    weapon: Option<Weapon>,
}

impl<'m> NotesParser<'m> {
    pub fn new(manifest: &'m Manifest, reviewer: impl Into<String>) -> Self {
        Self {
            manifest,
            reviewer: reviewer.into(),
            heading: None,
            weapon: None,
        }
    }

    /// Current section heading
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    /// Weapon currently being collected
    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    /// Feed one line.
    ///
    /// Returns the rendered rolls of the previous weapon when this line
    /// starts a new one, otherwise nothing.
    pub fn process_line(&mut self, raw: &str) -> NotesResult<Vec<RenderedRoll>> {
        let line = raw.trim();

        if let Some(heading) = line.strip_prefix("###") {
            debug!(heading, "section");
            self.heading = Some(heading.to_string());
            return Ok(Vec::new());
        }

        if line.starts_with("**[") {
            return self.start_item(line);
        }

        if line.starts_with("Recommended") {
            let tags = recommendation_tags(line);
            self.weapon_mut(line)?
                .recommendations
                .push(Recommendation::with_tags(tags));
            return Ok(Vec::new());
        }

        if let Some(label) = SLOT_LABELS.iter().find(|l| line.contains(*l)) {
            let text = line
                .rsplit_once(": ")
                .map_or_else(|| line.split_once(*label).map_or("", |(_, t)| t), |(_, t)| t);
            self.recommendation_mut(line)?
                .push_slot(split_perk_names(text));
            return Ok(Vec::new());
        }

        if line.contains("Masterwork:") {
            if let Some((_, masterwork)) = line.rsplit_once("Masterwork: ") {
                self.recommendation_mut(line)?.masterwork = Some(masterwork.to_string());
            }
            return Ok(Vec::new());
        }

        if IGNORED_PREFIXES.iter().any(|p| line.starts_with(p)) {
            return Ok(Vec::new());
        }

        if let Some(weapon) = self.weapon.as_mut() {
            if line.chars().count() > MIN_DESCRIPTION_LEN {
                weapon.descriptions.push(line.to_string());
            }
        }
        Ok(Vec::new())
    }

    /// Render the last weapon, if any
    pub fn finish(&mut self) -> NotesResult<Vec<RenderedRoll>> {
        match self.weapon.take() {
            Some(mut weapon) => Ok(weapon.finish(&self.reviewer)?),
            None => Ok(Vec::new()),
        }
    }

    fn start_item(&mut self, line: &str) -> NotesResult<Vec<RenderedRoll>> {
        let hash: ManifestHash = item_link()
            .captures(line)
            .and_then(|c| c[1].parse().ok())
            .ok_or_else(|| NotesError::BadItemLink(line.to_string()))?;
        let item = Item::build(self.manifest, hash)?;

        if item.name.contains("(Adept)") {
            debug!(item = %item, "variant");
            self.weapon_mut(line)?.variant = Some(item);
            return Ok(Vec::new());
        }

        debug!(item = %item, "weapon");
        let rendered = self.finish()?;
        self.weapon = Some(Weapon::new(item));
        Ok(rendered)
    }

    fn weapon_mut(&mut self, line: &str) -> NotesResult<&mut Weapon> {
        self.weapon.as_mut().ok_or_else(|| NotesError::Orphan {
            line: line.to_string(),
            needs: "weapon link",
        })
    }

    fn recommendation_mut(&mut self, line: &str) -> NotesResult<&mut Recommendation> {
        self.weapon
            .as_mut()
            .and_then(|w| w.recommendations.last_mut())
            .ok_or_else(|| NotesError::Orphan {
                line: line.to_string(),
                needs: "Recommended line",
            })
    }
}

/// Tags implied by a `Recommended ...` line; later matches win
fn recommendation_tags(line: &str) -> Vec<Tag> {
    let mut tags = Vec::new();
    if line.contains("PvE") {
        tags = vec![Tag::Pve, Tag::Mkb, Tag::Controller];
    }
    if line.contains("Controller PvP") {
        tags = vec![Tag::Pvp, Tag::Controller];
    }
    if line.contains("MnK PvP") {
        tags = vec![Tag::Pvp, Tag::Mkb];
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, *};
    use crate::tags::TagSet;

    const NOTES: &str = "\
### Trials of Osiris
**[Fatebringer](https://light.gg/db/items/2171478765/fatebringer/)**
Source: Vault of Glass
Great all-rounder for raids and dungeons.
Strong duelling hand cannon for the crucible.
Recommended PvE Roll
Sights: Arrowhead Brake, Corkscrew Rifling,
Magazine: Accurized Rounds
Perk 1: Explosive Payload
Perk 2: Kill Clip
Masterwork: Range
Recommended Controller PvP Roll
Sights: Hammer-Forged Rifling
Magazine: Ricochet Rounds
Perk 1: Eyes Up, Guardian
Perk 2: Opening Shot
Masterwork: Range
Recommended MnK PvP Roll
Sights: Hammer-Forged Rifling
Magazine: Ricochet Rounds
Perk 1: Eyes Up, Guardian
Perk 2: Opening Shot
Masterwork: Range
**[Fatebringer (Adept)](https://light.gg/db/items/1216319404/fatebringer-adept/)**
- short bullet
";

    fn run(notes: &str) -> NotesResult<Vec<RenderedRoll>> {
        let manifest = fixtures::manifest();
        let mut parser = NotesParser::new(&manifest, DEFAULT_REVIEWER);
        let mut rendered = Vec::new();
        for line in notes.lines() {
            rendered.extend(parser.process_line(line)?);
        }
        rendered.extend(parser.finish()?);
        Ok(rendered)
    }

    #[test]
    fn test_full_weapon() {
        let rendered = run(NOTES).unwrap();

        // PvE roll and merged PvP roll, each for base and adept
        assert_eq!(rendered.len(), 4);
        assert_eq!(rendered[0].heading, "// Fatebringer");
        assert_eq!(rendered[1].heading, "// Fatebringer (Adept)");
        assert_eq!(rendered[0].lines.len(), 2);
        assert_eq!(
            rendered[0].notes,
            "//notes:pandapaxxy (PvE / M+KB / Controller): \
             \"Great all-rounder for raids and dungeons.\" Recommended MW: Range.\
             |tags:pve,mkb,controller"
        );
        assert_eq!(
            rendered[2].notes,
            "//notes:pandapaxxy (PvP / M+KB / Controller): \
             \"Strong duelling hand cannon for the crucible.\" Recommended MW: Range.\
             |tags:pvp,mkb,controller"
        );
        assert_eq!(
            rendered[2].lines[0].perks,
            vec![
                ManifestHash(HAMMER_FORGED),
                ManifestHash(RICOCHET_ROUNDS),
                ManifestHash(EYES_UP),
                ManifestHash(OPENING_SHOT)
            ]
        );
        assert_eq!(rendered[3].lines[0].item, ManifestHash(FATEBRINGER_ADEPT));
    }

    #[test]
    fn test_heading_tracked() {
        let manifest = fixtures::manifest();
        let mut parser = NotesParser::new(&manifest, "me");
        parser.process_line("###Raids").unwrap();
        assert_eq!(parser.heading(), Some("Raids"));
    }

    #[test]
    fn test_new_weapon_flushes_previous() {
        let manifest = fixtures::manifest();
        let mut parser = NotesParser::new(&manifest, "me");
        let first = parser
            .process_line("**[Fatebringer](https://light.gg/db/items/2171478765/x/)**")
            .unwrap();
        assert!(first.is_empty());
        parser.process_line("Recommended MnK PvP Roll").unwrap();
        parser.process_line("Perk 2: Kill Clip").unwrap();

        let flushed = parser
            .process_line("**[Ornament](https://light.gg/db/items/6001/ornament/)**")
            .unwrap();
        assert_eq!(flushed.len(), 1);
        assert_eq!(flushed[0].lines[0].perks, vec![ManifestHash(KILL_CLIP)]);
        assert_eq!(parser.weapon().map(|w| w.item.name.as_str()), Some("Ornament"));
    }

    #[test]
    fn test_recommendation_tags() {
        let tags: TagSet = recommendation_tags("Recommended PvE Roll").into_iter().collect();
        assert_eq!(tags.len(), 3);
        assert_eq!(recommendation_tags("Recommended Controller PvP"), vec![Tag::Pvp, Tag::Controller]);
        assert_eq!(recommendation_tags("Recommended MnK PvP"), vec![Tag::Pvp, Tag::Mkb]);
        assert!(recommendation_tags("Recommended Roll").is_empty());
    }

    #[test]
    fn test_unknown_perk_aborts_weapon() {
        let notes = "\
**[Fatebringer](https://light.gg/db/items/2171478765/fatebringer/)**
Recommended PvE Roll
Perk 1: Rampage
";
        let err = run(notes).unwrap_err();
        assert!(matches!(err, NotesError::Weapon(_)));
        assert!(err.to_string().contains("Rampage"));
    }

    #[test]
    fn test_slot_without_recommendation() {
        let notes = "\
**[Fatebringer](https://light.gg/db/items/2171478765/fatebringer/)**
Perk 1: Firefly
";
        assert!(matches!(run(notes), Err(NotesError::Orphan { .. })));
    }

    #[test]
    fn test_adept_without_weapon() {
        let notes = "**[Fatebringer (Adept)](https://light.gg/db/items/1216319404/x/)**\n";
        assert!(matches!(run(notes), Err(NotesError::Orphan { .. })));
    }

    #[test]
    fn test_bad_item_link() {
        let notes = "**[Fatebringer](https://example.com/fatebringer)**\n";
        assert!(matches!(run(notes), Err(NotesError::BadItemLink(_))));
    }

    #[test]
    fn test_unknown_item() {
        let notes = "**[Nope](https://light.gg/db/items/31337/nope/)**\n";
        assert!(matches!(run(notes), Err(NotesError::Manifest(_))));
    }

    #[test]
    fn test_recommendation_without_slots() {
        let notes = "\
**[Fatebringer](https://light.gg/db/items/2171478765/fatebringer/)**
Recommended PvE Roll
";
        let rendered = run(notes).unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].lines.len(), 1);
        assert!(rendered[0].lines[0].perks.is_empty());
        assert!(rendered[0]
            .to_string()
            .ends_with("dimwishlist:item=2171478765&perks=\n\n"));
    }

    #[test]
    fn test_text_before_first_weapon_ignored() {
        let rendered = run("Welcome to the list, guardians!\n").unwrap();
        assert!(rendered.is_empty());
    }
}
