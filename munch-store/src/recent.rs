//! redb-based storage layer for recently used records
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `recent` | `(namespace, key)` | `RecentEntry` | Last-touched records per namespace |
//!
//! Each namespace is an independently bounded partition: inserting past its
//! capacity evicts the oldest-touched entries inside the same write
//! transaction as the insert. redb serializes write transactions, so the
//! bound holds under concurrent `put`s.
//!
//! # Schema evolution
//!
//! Payloads are stored as JSON. An entry written by an incompatible older
//! schema is skipped on read, never surfaced half-decoded; namespaces whose
//! payload shape changes embed a schema version in their name (see
//! [`RecentNamespace::searches`]).

use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use munch_data::util::now_millis;
use munch_data::{Place, SearchQuery};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Table for recency entries: key = (namespace, entry key), value =
/// JSON-serialized RecentEntry
const RECENT_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("recent");

/// Stored envelope: recency stamp plus the opaque payload
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct RecentEntry {
    touched_at: i64,
    payload: serde_json::Value,
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

/// Process-wide recency store backed by redb
///
/// Cheap to clone; all clones share one database. Typed access goes
/// through [`RecentNamespace`].
#[derive(Clone)]
pub struct RecentStore {
    db: Arc<Database>,
}

impl RecentStore {
    /// Open or create the store at the given path
    ///
    /// Commits are durable as soon as they return; a killed process loses
    /// at most the write in flight.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECENT_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory store (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECENT_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

/// Typed, capacity-bounded view over one namespace of the store
pub struct RecentNamespace<T> {
    store: RecentStore,
    name: String,
    capacity: usize,
    _payload: PhantomData<T>,
}

impl<T> Clone for RecentNamespace<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name.clone(),
            capacity: self.capacity,
            _payload: PhantomData,
        }
    }
}

impl<T> RecentNamespace<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: RecentStore, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            store,
            name: name.into(),
            capacity,
            _payload: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // ========== Write Operations ==========

    /// Insert a record or re-touch an existing one
    ///
    /// An existing `key` gets its payload replaced and its recency bumped.
    /// A new `key` is inserted and, if the namespace is over capacity, the
    /// oldest-touched entries are evicted before the transaction commits.
    pub fn put(&self, key: &str, payload: &T) -> StorageResult<()> {
        self.put_at(key, payload, now_millis())
    }

    fn put_at(&self, key: &str, payload: &T, touched_at: i64) -> StorageResult<()> {
        let entry = RecentEntry {
            touched_at,
            payload: serde_json::to_value(payload)?,
        };
        let value = serde_json::to_vec(&entry)?;

        let txn = self.store.db.begin_write()?;
        {
            let mut table = txn.open_table(RECENT_TABLE)?;
            let existed = table
                .insert((self.name.as_str(), key), value.as_slice())?
                .is_some();

            // Eviction runs only on insert; a re-touch cannot grow the
            // namespace.
            if !existed {
                let mut stamps: Vec<(i64, String)> = Vec::new();
                for result in table.range((self.name.as_str(), "")..)? {
                    let (k, v) = result?;
                    if k.value().0 != self.name.as_str() {
                        break;
                    }
                    // Undecodable envelopes sort to the front and are
                    // reclaimed first.
                    let touched = serde_json::from_slice::<RecentEntry>(v.value())
                        .map(|e| e.touched_at)
                        .unwrap_or(i64::MIN);
                    stamps.push((touched, k.value().1.to_string()));
                }

                if stamps.len() > self.capacity {
                    stamps.sort();
                    let excess = stamps.len() - self.capacity;
                    for (_, evict_key) in &stamps[..excess] {
                        table.remove((self.name.as_str(), evict_key.as_str()))?;
                        tracing::debug!(
                            namespace = %self.name,
                            key = %evict_key,
                            "Evicted oldest recency entry"
                        );
                    }
                }
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Remove every entry in this namespace; idempotent
    pub fn clear(&self) -> StorageResult<()> {
        let txn = self.store.db.begin_write()?;
        {
            let mut table = txn.open_table(RECENT_TABLE)?;

            let mut keys: Vec<String> = Vec::new();
            for result in table.range((self.name.as_str(), "")..)? {
                let (k, _) = result?;
                if k.value().0 != self.name.as_str() {
                    break;
                }
                keys.push(k.value().1.to_string());
            }

            for key in &keys {
                table.remove((self.name.as_str(), key.as_str()))?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Read Operations ==========

    /// Most-recent-first payloads, truncated to the namespace capacity
    pub fn list(&self) -> StorageResult<Vec<T>> {
        self.list_limit(self.capacity)
    }

    /// Most-recent-first payloads, truncated to `limit`
    ///
    /// Entries that no longer decode are skipped and do not count toward
    /// `limit`. An unreadable store is an error: callers can tell "no
    /// recents" from "failed to load recents".
    pub fn list_limit(&self, limit: usize) -> StorageResult<Vec<T>> {
        let read_txn = self.store.db.begin_read()?;
        let table = read_txn.open_table(RECENT_TABLE)?;

        let mut entries: Vec<(i64, serde_json::Value)> = Vec::new();
        for result in table.range((self.name.as_str(), "")..)? {
            let (k, v) = result?;
            if k.value().0 != self.name.as_str() {
                break;
            }
            match serde_json::from_slice::<RecentEntry>(v.value()) {
                Ok(entry) => entries.push((entry.touched_at, entry.payload)),
                Err(err) => {
                    tracing::warn!(
                        namespace = %self.name,
                        key = %k.value().1,
                        %err,
                        "Skipping undecodable recency entry"
                    );
                }
            }
        }

        entries.sort_by_key(|(touched_at, _)| std::cmp::Reverse(*touched_at));

        let mut list = Vec::new();
        for (_, payload) in entries {
            if list.len() >= limit {
                break;
            }
            match serde_json::from_value::<T>(payload) {
                Ok(decoded) => list.push(decoded),
                Err(err) => {
                    tracing::warn!(
                        namespace = %self.name,
                        %err,
                        "Skipping undecodable recency payload"
                    );
                }
            }
        }
        Ok(list)
    }

    /// Number of entries currently stored in this namespace
    pub fn count(&self) -> StorageResult<usize> {
        let read_txn = self.store.db.begin_read()?;
        let table = read_txn.open_table(RECENT_TABLE)?;

        let mut count = 0;
        for result in table.range((self.name.as_str(), "")..)? {
            let (k, _) = result?;
            if k.value().0 != self.name.as_str() {
                break;
            }
            count += 1;
        }
        Ok(count)
    }
}

// ========== Typed Namespaces ==========

impl RecentNamespace<SearchQuery> {
    /// Recently issued searches, keyed by [`SearchQuery::recent_key`]
    ///
    /// The namespace carries the query schema version: bumping it orphans
    /// entries written by an incompatible app version.
    pub fn searches(store: &RecentStore) -> Self {
        Self::new(
            store.clone(),
            format!("SearchQuery+{}", SearchQuery::SCHEMA_VERSION),
            10,
        )
    }
}

impl RecentNamespace<Place> {
    /// Recently viewed places, keyed by place id
    pub fn places(store: &RecentStore) -> Self {
        Self::new(store.clone(), "RecentPlace", 20)
    }
}
