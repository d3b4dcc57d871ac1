//! SQLite bootstrap for the key-value store backing Notekeep.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No store reads or writes happen before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or migrate the notes store file.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The store file was migrated by a newer Notekeep build; its `kv_store`
    /// layout may not be readable by this one.
    StoreFromNewerBuild { file_version: u32, known_version: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::StoreFromNewerBuild {
                file_version,
                known_version,
            } => write!(
                f,
                "notes store uses schema {file_version}, this build knows up to {known_version}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::StoreFromNewerBuild { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
