//! Manifest access with a shared definition cache.
//!
//! The manifest is a read-only store of JSON definitions keyed by signed
//! row id. Backends implement [`ManifestSource`]; [`Manifest`] wraps any
//! backend with a bounded LRU cache so definitions that are referenced by
//! many items (perks, plug sets) are only parsed once per run.

use crate::hash::ManifestHash;
use lru::LruCache;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

/// Default number of cached definitions
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Manifest tables used by wishlist tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    InventoryItem,
    PlugSet,
}

impl Table {
    /// SQLite table name
    pub fn name(&self) -> &'static str {
        match self {
            Self::InventoryItem => "DestinyInventoryItemDefinition",
            Self::PlugSet => "DestinyPlugSetDefinition",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for manifest lookups
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("No {table} for {hash}")]
    NotFound { table: Table, hash: ManifestHash },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid {table} definition for {hash}: {source}")]
    Json {
        table: Table,
        hash: ManifestHash,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed {table} definition for {hash}: {reason}")]
    Malformed {
        table: Table,
        hash: ManifestHash,
        reason: String,
    },
}

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Backend that can fetch a raw JSON definition by table and row id
pub trait ManifestSource {
    /// Fetch the JSON text stored under `id`, or `None` if there is no row
    fn fetch(&self, table: Table, id: i32) -> ManifestResult<Option<String>>;
}

/// Cached view over a manifest backend
pub struct Manifest {
    source: Mutex<Box<dyn ManifestSource + Send>>,
    cache: Mutex<LruCache<(Table, ManifestHash), Arc<Value>>>,
}

impl Manifest {
    /// Wrap a backend with the default cache capacity
    pub fn new<S: ManifestSource + Send + 'static>(source: S) -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self::with_capacity(source, capacity)
    }

    /// Wrap a backend with an explicit cache capacity
    pub fn with_capacity<S>(source: S, capacity: NonZeroUsize) -> Self
    where
        S: ManifestSource + Send + 'static,
    {
        let source: Box<dyn ManifestSource + Send> = Box::new(source);
        Self {
            source: Mutex::new(source),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up a raw definition.
    ///
    /// Fails with [`ManifestError::NotFound`] when the table has no row for
    /// the hash.
    pub fn lookup(&self, table: Table, hash: ManifestHash) -> ManifestResult<Arc<Value>> {
        if let Some(value) = self.cache.lock().get(&(table, hash)) {
            return Ok(Arc::clone(value));
        }

        debug!(%table, %hash, "manifest cache miss");
        let json = self
            .source
            .lock()
            .fetch(table, hash.sql_id())?
            .ok_or(ManifestError::NotFound { table, hash })?;
        let value: Value = serde_json::from_str(&json)
            .map_err(|source| ManifestError::Json { table, hash, source })?;

        let value = Arc::new(value);
        self.cache.lock().put((table, hash), Arc::clone(&value));
        Ok(value)
    }

    /// Look up a definition and deserialize it into a typed view
    pub fn definition<T>(&self, table: Table, hash: ManifestHash) -> ManifestResult<T>
    where
        T: DeserializeOwned,
    {
        let value = self.lookup(table, hash)?;
        T::deserialize(&*value).map_err(|source| ManifestError::Json { table, hash, source })
    }

    /// Display name of an inventory item, straight from its definition
    pub fn item_name(&self, hash: ManifestHash) -> ManifestResult<String> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Named {
            display_properties: crate::definitions::DisplayProperties,
        }

        let named: Named = self.definition(Table::InventoryItem, hash)?;
        Ok(named.display_properties.name)
    }

    /// Number of definitions currently cached
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }

    /// Maximum number of cached definitions
    pub fn cache_capacity(&self) -> usize {
        self.cache.lock().cap().get()
    }
}

impl fmt::Debug for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manifest")
            .field("cached", &self.cached())
            .field("capacity", &self.cache_capacity())
            .finish()
    }
}

/// In-memory manifest, for fixtures and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryManifest {
    rows: HashMap<(Table, i32), String>,
}

impl MemoryManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a definition under the row id for `hash`
    pub fn insert(&mut self, table: Table, hash: ManifestHash, definition: &Value) {
        self.rows
            .insert((table, hash.sql_id()), definition.to_string());
    }

    /// Store raw JSON text, which is not checked until it is looked up
    pub fn insert_raw(&mut self, table: Table, hash: ManifestHash, json: impl Into<String>) {
        self.rows.insert((table, hash.sql_id()), json.into());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ManifestSource for MemoryManifest {
    fn fetch(&self, table: Table, id: i32) -> ManifestResult<Option<String>> {
        Ok(self.rows.get(&(table, id)).cloned())
    }
}

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteManifest, DEFAULT_MANIFEST_PATH};

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::{ManifestError, ManifestResult, ManifestSource, Table};
    use rusqlite::types::ValueRef;
    use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
    use std::path::Path;

    /// Default manifest location
    pub const DEFAULT_MANIFEST_PATH: &str = "manifest.sqlite3";

    /// SQLite-backed manifest, as downloaded from the Bungie API
    pub struct SqliteManifest {
        conn: Connection,
    }

    impl SqliteManifest {
        /// Open an existing manifest read-only
        pub fn open<P: AsRef<Path>>(path: P) -> ManifestResult<Self> {
            let conn = Connection::open_with_flags(
                path.as_ref(),
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| {
                ManifestError::Database(format!("{}: {}", path.as_ref().display(), e))
            })?;
            Ok(Self { conn })
        }

        /// Use an already open connection (e.g. an in-memory fixture)
        pub fn from_connection(conn: Connection) -> Self {
            Self { conn }
        }
    }

    impl ManifestSource for SqliteManifest {
        fn fetch(&self, table: Table, id: i32) -> ManifestResult<Option<String>> {
            // Table names come from the closed Table enum
            let sql = format!("SELECT json FROM {} WHERE id = ?1", table.name());
            self.conn
                .query_row(&sql, params![id], |row| {
                    // Bungie ships the json column as BLOB, some dumps as TEXT
                    Ok(match row.get_ref(0)? {
                        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                            String::from_utf8_lossy(bytes).into_owned()
                        }
                        _ => String::new(),
                    })
                })
                .optional()
                .map_err(|e| ManifestError::Database(e.to_string()))
        }
    }

}
