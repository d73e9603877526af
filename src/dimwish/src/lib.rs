//! # dimwish
//!
//! Destiny 2 wishlist tooling for Destiny Item Manager.
//!
//! This library provides functionality to:
//! - Read item and plug set definitions from the SQLite manifest
//! - Rebuild a weapon's perk columns from its sockets and plug sets
//! - Turn hand-written roll recommendations into `dimwishlist:` lines
//! - Validate existing wishlists against the manifest
//!
//! ## Example
//!
//! ```no_run
//! use dimwish::{Item, Manifest, ManifestHash, Recommendation, SqliteManifest, Tag};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::new(SqliteManifest::open("manifest.sqlite3")?);
//! let item = Item::build(&manifest, ManifestHash(2171478765))?;
//!
//! let mut roll = Recommendation::with_tags([Tag::Pve]);
//! roll.push_slot(["Arrowhead Brake", "Corkscrew Rifling"]);
//! roll.push_slot(["Accurized Rounds"]);
//!
//! print!("{}", roll.render(&item, "me", "Raid roll")?);
//! # Ok(())
//! # }
//! ```

pub mod definitions;
pub mod hash;
pub mod item;
pub mod manifest;
pub mod notes;
pub mod recommendation;
pub mod tags;
pub mod validator;
pub mod weapon;
pub mod wishlist;

#[cfg(test)]
mod fixtures;

#[doc(inline)]
pub use hash::{InvalidHash, ManifestHash};
#[doc(inline)]
pub use item::{Column, Item, PlugSet, WEAPON_PERKS_CATEGORY};
#[doc(inline)]
pub use manifest::{
    Manifest, ManifestError, ManifestResult, ManifestSource, MemoryManifest, Table,
    DEFAULT_CACHE_CAPACITY,
};
#[cfg(feature = "sqlite")]
#[doc(inline)]
pub use manifest::{SqliteManifest, DEFAULT_MANIFEST_PATH};
#[doc(inline)]
pub use notes::{NotesError, NotesParser, NotesResult, DEFAULT_REVIEWER};
#[doc(inline)]
pub use recommendation::{Recommendation, RenderError, RenderResult, RenderedRoll};
#[doc(inline)]
pub use tags::{Tag, TagSet, UnknownTag};
#[doc(inline)]
pub use validator::{validate_roll, Line, RollCheck, ValidationError, ValidationResult, Validator};
#[doc(inline)]
pub use weapon::{Weapon, WeaponError};
#[doc(inline)]
pub use wishlist::{WishlistLine, WishlistLineError};
