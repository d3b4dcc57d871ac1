//! Namespaced JSON storage over a key-value backend.
//!
//! # Responsibility
//! - Define the raw key-value contract (`KeyValueStore`) and its backends.
//! - Serialize values to JSON under namespaced keys (`JsonStorage`).
//!
//! # Invariants
//! - `JsonStorage::get` never fails: missing, empty, unreadable or unparsable
//!   values all resolve to the caller's fallback.
//! - Every key written through `JsonStorage` carries the `{namespace}:` prefix.
//! - No transaction spans more than one key; concurrent writers are
//!   last-write-wins.

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_kv;
mod record_list;
mod sqlite_kv;

pub use memory_kv::MemoryKvStore;
pub use record_list::RecordList;
pub use sqlite_kv::SqliteKvStore;

/// Namespace used when the configuration does not supply one.
pub const DEFAULT_NAMESPACE: &str = "secure-notes-app";

/// Logical keys persisted by the services.
pub mod keys {
    /// JSON array of every registered user.
    pub const USERS: &str = "users";
    /// JSON array of every note, all owners mixed.
    pub const NOTES: &str = "notes";
    /// JSON string holding the logged-in user id.
    pub const SESSION: &str = "session_user_id";
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer failure for raw backend access and value encoding.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// The backing connection was not migrated.
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode stored value: {err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Raw string key-value backend.
pub trait KeyValueStore {
    /// Returns the stored text for `key`, or `None` when absent.
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>>;
    /// Inserts or replaces the text stored under `key`.
    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Deletes `key`. Deleting an absent key succeeds.
    fn remove_raw(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_raw(key, value)
    }

    fn remove_raw(&self, key: &str) -> StorageResult<()> {
        (**self).remove_raw(key)
    }
}

/// JSON adapter that scopes every key under one namespace.
#[derive(Debug, Clone)]
pub struct JsonStorage<S> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> JsonStorage<S> {
    /// Wraps `store` under `namespace`. A blank namespace falls back to
    /// [`DEFAULT_NAMESPACE`].
    pub fn new(store: S, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let trimmed = namespace.trim();
        let namespace = if trimmed.is_empty() {
            DEFAULT_NAMESPACE.to_string()
        } else {
            trimmed.to_string()
        };
        Self { store, namespace }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the physical key used for logical `key`.
    pub fn namespaced_key(&self, key: &str) -> String {
        format!("{}:{key}", self.namespace)
    }

    /// Reads and parses the value under `key`, or returns `fallback`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let full_key = self.namespaced_key(key);
        let raw = match self.store.get_raw(&full_key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return fallback,
            Err(err) => {
                warn!(
                    "event=storage_get module=storage status=fallback key={} error_code=read_failed error={}",
                    full_key, err
                );
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=storage_get module=storage status=fallback key={} error_code=parse_failed error={}",
                    full_key, err
                );
                fallback
            }
        }
    }

    /// Reads a JSON array slot record by record.
    ///
    /// An absent or unparsable slot reads as empty. Elements that do not
    /// decode as `T` are skipped but kept for the next [`Self::set`].
    pub fn get_records<T: DeserializeOwned>(&self, key: &str) -> RecordList<T> {
        let values: Vec<serde_json::Value> = self.get(key, Vec::new());
        RecordList::decode(values, |position, err| {
            warn!(
                "event=storage_get module=storage status=partial key={} position={} error_code=record_skipped error={}",
                self.namespaced_key(key),
                position,
                err
            );
        })
    }

    /// Serializes `value` and stores it under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let encoded = serde_json::to_string(value)?;
        self.store.set_raw(&self.namespaced_key(key), &encoded)
    }

    /// Deletes `key`.
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.store.remove_raw(&self.namespaced_key(key))
    }
}
