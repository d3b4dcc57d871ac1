//! Note use-case service.
//!
//! # Responsibility
//! - Provide owner-scoped create/update/delete/list APIs over the persisted
//!   note collection.
//! - Derive the owner's category list.
//!
//! # Invariants
//! - Every operation reads and rewrites the whole collection under one key.
//! - Stored records that do not decode are invisible but survive rewrites.
//! - A note is only visible to, and mutable by, its owner.
//! - Note lists are sorted by `updated_at DESC`, later storage position first
//!   on ties.
//! - Write timestamps are strictly increasing across the collection.

use crate::model::note::{NewNote, Note, NoteId, NoteUpdate, DEFAULT_CATEGORY};
use crate::model::now_epoch_ms;
use crate::model::user::{User, UserId};
use crate::storage::{keys, JsonStorage, KeyValueStore, RecordList, StorageError};
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// No note matches the id for this owner.
    NoteNotFound(NoteId),
    /// The owner id does not reference a registered user.
    UserNotFound(UserId),
    Storage(StorageError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(_) => write!(f, "note not found"),
            Self::UserNotFound(_) => write!(f, "user not found"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for NoteServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Note service facade over namespaced JSON storage.
pub struct NoteService<S: KeyValueStore> {
    storage: JsonStorage<S>,
}

impl<S: KeyValueStore> NoteService<S> {
    pub fn new(storage: JsonStorage<S>) -> Self {
        Self { storage }
    }

    /// Lists the owner's notes, most recently updated first.
    pub fn get_notes(&self, user_id: UserId) -> Vec<Note> {
        let notes = self.all_notes();
        let mut owned: Vec<(usize, &Note)> = notes
            .iter()
            .enumerate()
            .filter(|(_, note)| note.is_owned_by(user_id))
            .collect();
        owned.sort_by(|(left_pos, left), (right_pos, right)| {
            right
                .updated_at
                .cmp(&left.updated_at)
                .then_with(|| right_pos.cmp(left_pos))
        });
        owned.into_iter().map(|(_, note)| note.clone()).collect()
    }

    /// Creates one note for `user_id` with defaults for missing fields.
    ///
    /// # Errors
    /// - `NoteServiceError::UserNotFound` when the owner is not registered.
    pub fn create_note(&self, user_id: UserId, fields: NewNote) -> NoteServiceResult<Note> {
        let users: RecordList<User> = self.storage.get_records(keys::USERS);
        if !users.iter().any(|user| user.id == user_id) {
            warn!(
                "event=note_create module=notes status=rejected error_code=user_not_found user_id={}",
                user_id
            );
            return Err(NoteServiceError::UserNotFound(user_id));
        }

        let mut notes = self.all_notes();
        let note = Note::new(user_id, fields, next_write_timestamp(notes.iter()));
        notes.push(note.clone());
        self.storage.set(keys::NOTES, &notes)?;

        info!(
            "event=note_create module=notes status=ok note_id={} user_id={}",
            note.id, user_id
        );
        Ok(note)
    }

    /// Merges `update` into the owner's note and refreshes `updated_at`.
    ///
    /// # Errors
    /// - `NoteServiceError::NoteNotFound` when no note matches both `id` and
    ///   `user_id`.
    pub fn update_note(
        &self,
        user_id: UserId,
        id: NoteId,
        update: NoteUpdate,
    ) -> NoteServiceResult<Note> {
        let mut notes = self.all_notes();
        let now_ms = next_write_timestamp(notes.iter());
        let Some(note) = notes
            .iter_mut()
            .find(|note| note.id == id && note.is_owned_by(user_id))
        else {
            warn!(
                "event=note_update module=notes status=error error_code=note_not_found note_id={}",
                id
            );
            return Err(NoteServiceError::NoteNotFound(id));
        };

        note.apply(update, now_ms);
        let updated = note.clone();
        self.storage.set(keys::NOTES, &notes)?;

        info!("event=note_update module=notes status=ok note_id={id}");
        Ok(updated)
    }

    /// Deletes the owner's note. Missing or foreign ids are a no-op.
    pub fn delete_note(&self, user_id: UserId, id: NoteId) -> NoteServiceResult<()> {
        let mut notes = self.all_notes();
        let removed = notes.retain(|note| !(note.id == id && note.is_owned_by(user_id)));
        if removed == 0 {
            info!("event=note_delete module=notes status=noop note_id={id}");
            return Ok(());
        }

        self.storage.set(keys::NOTES, &notes)?;
        info!("event=note_delete module=notes status=ok note_id={id}");
        Ok(())
    }

    /// Returns the owner's distinct categories, always including
    /// `DEFAULT_CATEGORY`, sorted case-insensitively.
    pub fn get_categories(&self, user_id: UserId) -> Vec<String> {
        let mut unique = BTreeSet::from([DEFAULT_CATEGORY.to_string()]);
        for note in self.get_notes(user_id) {
            if note.category.trim().is_empty() {
                continue;
            }
            unique.insert(note.category);
        }

        let mut categories: Vec<String> = unique.into_iter().collect();
        categories.sort_by(|left, right| {
            left.to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(right))
        });
        categories
    }

    fn all_notes(&self) -> RecordList<Note> {
        self.storage.get_records(keys::NOTES)
    }
}

/// Returns a timestamp later than every `updated_at` in `notes`, tracking the
/// wall clock when it is ahead.
fn next_write_timestamp<'a>(notes: impl Iterator<Item = &'a Note>) -> i64 {
    let latest = notes.map(|note| note.updated_at).max();
    let now_ms = now_epoch_ms();
    match latest {
        Some(latest) if latest >= now_ms => latest.saturating_add(1),
        _ => now_ms,
    }
}
