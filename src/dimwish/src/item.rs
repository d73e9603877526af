//! Weapons and their perk columns.
//!
//! An [`Item`] is built eagerly from the manifest: every perk socket in the
//! weapon-perk category becomes a [`Column`], and every perk that can roll in
//! that column is itself built as an [`Item`]. Plug sets are expanded while
//! building and not kept around.

use crate::definitions::{InventoryItemDefinition, PlugSetDefinition, SocketEntry};
use crate::hash::ManifestHash;
use crate::manifest::{Manifest, ManifestError, ManifestResult, Table};
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, warn};

/// `socketCategoryHash` of the weapon perks category
pub const WEAPON_PERKS_CATEGORY: ManifestHash = ManifestHash(4241085061);

/// A weapon, weapon variant, or perk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub hash: ManifestHash,
    pub name: String,
    pub columns: Vec<Column>,
}

/// Perks that can roll in one socket, keyed by perk hash
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    perks: IndexMap<ManifestHash, Item>,
}

/// Intermediate result of expanding a plug set
#[derive(Debug, Clone)]
pub struct PlugSet {
    pub hash: ManifestHash,
    pub items: Vec<Item>,
}

impl Item {
    /// Build an item and all of its perk columns
    pub fn build(manifest: &Manifest, hash: ManifestHash) -> ManifestResult<Self> {
        let definition: InventoryItemDefinition = manifest.definition(Table::InventoryItem, hash)?;
        let name = definition.display_properties.name;

        let Some(sockets) = definition.sockets else {
            return Ok(Self {
                hash,
                name,
                columns: Vec::new(),
            });
        };

        let mut categories = sockets
            .socket_categories
            .iter()
            .filter(|c| c.socket_category_hash == WEAPON_PERKS_CATEGORY);
        let Some(category) = categories.next() else {
            return Ok(Self {
                hash,
                name,
                columns: Vec::new(),
            });
        };
        let extra = categories.count();
        if extra > 0 {
            warn!(
                item = %hash,
                name = %name,
                extra,
                "multiple weapon perk socket categories, using the first"
            );
        }

        let mut columns = Vec::with_capacity(category.socket_indexes.len());
        for &index in &category.socket_indexes {
            let entry = sockets
                .socket_entries
                .get(index)
                .ok_or_else(|| ManifestError::Malformed {
                    table: Table::InventoryItem,
                    hash,
                    reason: format!(
                        "socket index {} out of range ({} entries)",
                        index,
                        sockets.socket_entries.len()
                    ),
                })?;
            columns.push(Column::build(manifest, entry)?);
        }

        debug!(item = %hash, name = %name, columns = columns.len(), "built item");
        Ok(Self {
            hash,
            name,
            columns,
        })
    }

    /// First perk with this display name, searching columns in order
    pub fn find_perk(&self, name: &str) -> Option<&Item> {
        self.columns.iter().find_map(|c| c.find_by_name(name))
    }

    /// Index of the first column that can roll this perk
    pub fn column_of(&self, perk: ManifestHash) -> Option<usize> {
        self.columns.iter().position(|c| c.contains(perk))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.hash)
    }
}

impl Column {
    /// Union of the socket's direct plugs and its plug set, deduplicated by hash
    fn build(manifest: &Manifest, entry: &SocketEntry) -> ManifestResult<Self> {
        let mut column = Self::default();

        for plug in &entry.reusable_plug_items {
            column.insert(Item::build(manifest, plug.plug_item_hash)?);
        }

        if let Some(plug_set_hash) = entry.plug_set_hash() {
            for item in PlugSet::build(manifest, plug_set_hash)?.items {
                column.insert(item);
            }
        }

        Ok(column)
    }

    fn insert(&mut self, item: Item) {
        self.perks.insert(item.hash, item);
    }

    pub fn contains(&self, perk: ManifestHash) -> bool {
        self.perks.contains_key(&perk)
    }

    pub fn get(&self, perk: ManifestHash) -> Option<&Item> {
        self.perks.get(&perk)
    }

    /// First perk in this column with the given display name
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.perks.values().find(|p| p.name == name)
    }

    pub fn perks(&self) -> impl Iterator<Item = &Item> {
        self.perks.values()
    }

    pub fn hashes(&self) -> impl Iterator<Item = ManifestHash> + '_ {
        self.perks.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.perks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perks.is_empty()
    }
}

impl PlugSet {
    /// Build every reusable plug item in a plug set
    pub fn build(manifest: &Manifest, hash: ManifestHash) -> ManifestResult<Self> {
        let definition: PlugSetDefinition = manifest.definition(Table::PlugSet, hash)?;
        let items = definition
            .reusable_plug_items
            .iter()
            .map(|plug| Item::build(manifest, plug.plug_item_hash))
            .collect::<ManifestResult<Vec<_>>>()?;
        Ok(Self { hash, items })
    }
}
