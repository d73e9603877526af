//! A weapon with its recommended rolls

use crate::item::Item;
use crate::recommendation::{Recommendation, RenderError, RenderedRoll};
use crate::tags::Tag;

/// Rendering failure for a whole weapon
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error while printing {item}: {source}")]
pub struct WeaponError {
    /// Display string of the item being rendered
    pub item: String,
    #[source]
    pub source: RenderError,
}

/// Base item, optional variant (e.g. the Adept version) and their rolls
#[derive(Debug, Clone)]
pub struct Weapon {
    pub item: Item,
    pub variant: Option<Item>,
    pub recommendations: Vec<Recommendation>,
    /// PvE note first, PvP note second
    pub descriptions: Vec<String>,
}

impl Weapon {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            variant: None,
            recommendations: Vec::new(),
            descriptions: Vec::new(),
        }
    }

    /// Merge the two PvP rolls into one if they only differ in tags.
    ///
    /// Nothing happens unless there are exactly two PvP rolls with the same
    /// masterwork and identical perk slots.
    pub fn condense_pvp(&mut self) {
        let pvp: Vec<usize> = self
            .recommendations
            .iter()
            .enumerate()
            .filter(|(_, r)| r.has_tag(Tag::Pvp))
            .map(|(i, _)| i)
            .collect();

        let &[first, second] = pvp.as_slice() else {
            return;
        };

        let (a, b) = (&self.recommendations[first], &self.recommendations[second]);
        if a.masterwork != b.masterwork || a.slots != b.slots {
            return;
        }

        let merged = self.recommendations.remove(second);
        self.recommendations[first].tags.extend(merged.tags);
    }

    /// Description for a roll: PvE rolls use the first, everything else the second
    pub fn description_for(&self, recommendation: &Recommendation) -> &str {
        let index = if recommendation.has_tag(Tag::Pve) { 0 } else { 1 };
        self.descriptions.get(index).map_or("", String::as_str)
    }

    /// Condense and render every roll against the item and its variant.
    ///
    /// The first roll that fails to render aborts the whole weapon.
    pub fn finish(&mut self, reviewer: &str) -> Result<Vec<RenderedRoll>, WeaponError> {
        self.condense_pvp();

        let mut rendered = Vec::new();
        for recommendation in &self.recommendations {
            let description = self.description_for(recommendation);
            let targets = std::iter::once(&self.item).chain(self.variant.as_ref());
            for item in targets {
                let roll = recommendation
                    .render(item, reviewer, description)
                    .map_err(|source| WeaponError {
                        item: item.to_string(),
                        source,
                    })?;
                rendered.push(roll);
            }
        }
        Ok(rendered)
    }
}
