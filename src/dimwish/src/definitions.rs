//! Typed views over the manifest JSON.
//!
//! Only the fields wishlist tooling reads are modelled; everything else in
//! the definitions is ignored. List fields that are absent deserialize as
//! empty.

use crate::hash::ManifestHash;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayProperties {
    #[serde(default)]
    pub name: String,
}

/// `DestinyInventoryItemDefinition`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDefinition {
    #[serde(default)]
    pub display_properties: DisplayProperties,
    #[serde(default)]
    pub sockets: Option<SocketsDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketsDefinition {
    #[serde(default)]
    pub socket_entries: Vec<SocketEntry>,
    #[serde(default)]
    pub socket_categories: Vec<SocketCategory>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketCategory {
    pub socket_category_hash: ManifestHash,
    #[serde(default)]
    pub socket_indexes: Vec<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketEntry {
    /// Plugs listed directly on the socket
    #[serde(default)]
    pub reusable_plug_items: Vec<PlugItem>,
    #[serde(default)]
    pub randomized_plug_set_hash: Option<ManifestHash>,
    #[serde(default)]
    pub reusable_plug_set_hash: Option<ManifestHash>,
}

impl SocketEntry {
    /// The plug set that feeds this socket.
    ///
    /// Randomized rolls take precedence over the reusable set; only one of
    /// them is ever expanded.
    pub fn plug_set_hash(&self) -> Option<ManifestHash> {
        self.randomized_plug_set_hash.or(self.reusable_plug_set_hash)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlugItem {
    pub plug_item_hash: ManifestHash,
}

/// `DestinyPlugSetDefinition`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlugSetDefinition {
    #[serde(default)]
    pub reusable_plug_items: Vec<PlugItem>,
}
