//! SQLite-backed key-value store.
//!
//! # Invariants
//! - The connection must have migrations applied (`kv_store` table present).
//! - `set_raw` is an upsert; the row's `updated_at` tracks the last write.

use super::{KeyValueStore, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_store";

/// Key-value store persisted in the `kv_store` table.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `StorageError::MissingRequiredTable` when `kv_store` does not exist.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [KV_TABLE],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(StorageError::MissingRequiredTable(KV_TABLE));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
