//! redb-based key-value storage for the storefront state layer
//!
//! One JSON document per key, one key per concern (see [`keys`]). This is
//! the single I/O boundary: every store routes reads and writes through
//! [`KvStore`] so that failure handling stays in one place.
//!
//! # Fault policy
//!
//! Opening the database is the only fallible operation callers see. After
//! that, `read` returns the caller's fallback on any fault (missing key,
//! parse failure, storage error) and `write`/`remove` are best effort:
//! failures are logged and swallowed, never propagated. Callers must not
//! assume durability.
//!
//! # Consistency
//!
//! Writers always replace a whole collection under its key; there is no
//! compare-and-swap. Two concurrent writers clobber each other (last write
//! wins per key) — acceptable for the single-user, single-session actor
//! this layer is built for.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Single table: key = concern name, value = JSON-serialized document
const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// Persisted keys, one per concern
pub mod keys {
    pub const CART_ITEMS: &str = "storefront.cart.items";
    pub const CART_COUNT: &str = "storefront.cart.count";
    pub const DESIGN_UPLOAD: &str = "storefront.checkout.design_upload";
    pub const LOCAL_ORDERS: &str = "storefront.orders.archive";
    pub const EXTRA_PRODUCTS: &str = "storefront.catalog.extra_products";
    pub const HIDDEN_PRODUCT_IDS: &str = "storefront.catalog.hidden_product_ids";
    pub const DELETED_PRODUCT_IDS: &str = "storefront.catalog.deleted_product_ids";
    pub const CATEGORY_BRAND_MAP: &str = "storefront.catalog.category_brands";
    pub const CUSTOM_CATEGORIES: &str = "storefront.catalog.custom_categories";
    pub const CATEGORY_OVERRIDES: &str = "storefront.catalog.category_overrides";
    pub const CATEGORY_CARDS: &str = "storefront.catalog.category_cards";
    pub const BRAND_EDITS: &str = "storefront.brands.edits";
    pub const DELETED_BRAND_NAMES: &str = "storefront.brands.deleted";
    pub const SERVICES: &str = "storefront.services.list";
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value store backed by redb
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore").finish_non_exhaustive()
    }
}

impl KvStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    ///
    /// Used by tests and by hosts that want session-scoped (non-durable)
    /// state.
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Read the value under `key`, falling back on any fault
    ///
    /// Missing key, parse failure and storage errors all return `fallback`
    /// unchanged.
    pub fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.read_raw(key) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "Malformed stored value, using fallback");
                    fallback
                }
            },
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage read failed, using fallback");
                fallback
            }
        }
    }

    /// Read the raw JSON value under `key` (`Null` on any fault)
    ///
    /// Used by migration paths that need to inspect the persisted shape
    /// before deciding how to decode it.
    pub fn read_value(&self, key: &str) -> serde_json::Value {
        self.read(key, serde_json::Value::Null)
    }

    /// Write `value` under `key`, best effort
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize value, write skipped");
                return;
            }
        };
        if let Err(e) = self.write_raw(key, &bytes) {
            tracing::warn!(key, error = %e, "Storage write failed");
        }
    }

    /// Remove `key`, best effort
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.remove_raw(key) {
            tracing::warn!(key, error = %e, "Storage remove failed");
        }
    }

    fn read_raw(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn write_raw(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key_returns_fallback() {
        let store = KvStore::open_in_memory().unwrap();
        let value: Vec<String> = store.read("nope", vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback"]);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let store = KvStore::open_in_memory().unwrap();
        store.write("k", &vec![1_i64, 2, 3]);
        let value: Vec<i64> = store.read("k", Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_malformed_value_returns_fallback() {
        let store = KvStore::open_in_memory().unwrap();
        store.write("k", &"not a number");
        let value: i64 = store.read("k", 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_remove_clears_key() {
        let store = KvStore::open_in_memory().unwrap();
        store.write("k", &7_i64);
        store.remove("k");
        assert_eq!(store.read::<i64>("k", 0), 0);
        // Removing an absent key is a no-op, not an error
        store.remove("k");
    }

    #[test]
    fn test_read_value_null_on_missing() {
        let store = KvStore::open_in_memory().unwrap();
        assert!(store.read_value("nope").is_null());
        store.write("k", &serde_json::json!({"a": 1}));
        assert_eq!(store.read_value("k")["a"], 1);
    }

    #[test]
    fn test_on_disk_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.redb");
        {
            let store = KvStore::open(&path).unwrap();
            store.write("k", &"persisted".to_string());
        }
        let store = KvStore::open(&path).unwrap();
        let value: String = store.read("k", String::new());
        assert_eq!(value, "persisted");
    }

    #[test]
    fn test_clones_share_the_database() {
        let store = KvStore::open_in_memory().unwrap();
        let clone = store.clone();
        store.write("k", &1_i64);
        assert_eq!(clone.read::<i64>("k", 0), 1);
    }
}
