//! Core of Notekeep, a local notes application.
//!
//! Layers, leaves first: `storage` (namespaced JSON over a key-value store),
//! `service` (auth and notes use-cases), `state` (view-facing holders) and
//! `router` (session-based navigation guard).

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod router;
pub mod service;
pub mod state;
pub mod storage;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{
    NewNote, Note, NoteId, NoteUpdate, ALL_CATEGORIES, DEFAULT_CATEGORY, DEFAULT_TITLE,
};
pub use model::user::{User, UserId};
pub use router::{Navigation, Route, RouteGuard};
pub use service::auth_service::{encode_password, AuthError, AuthResult, AuthService};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
pub use state::app_state::AppState;
pub use state::auth_state::AuthState;
pub use state::notes_state::NotesState;
pub use storage::{
    JsonStorage, KeyValueStore, MemoryKvStore, RecordList, SqliteKvStore, StorageError,
    StorageResult, DEFAULT_NAMESPACE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
