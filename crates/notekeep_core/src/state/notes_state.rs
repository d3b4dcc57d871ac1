//! In-memory notes list, categories, selection and filters.
//!
//! # Invariants
//! - `notes` mirrors the owner's persisted notes, most recently written
//!   first, after every successful mutation.
//! - `categories` starts with `ALL_CATEGORIES` once loaded.
//! - Mutation failures are recorded in `error`, never returned.

use crate::model::note::{NewNote, Note, NoteId, NoteUpdate, ALL_CATEGORIES};
use crate::model::user::User;
use crate::service::note_service::NoteService;
use crate::storage::KeyValueStore;
use log::debug;

/// Notes state consumed by the notes view.
pub struct NotesState<S: KeyValueStore> {
    service: NoteService<S>,
    notes: Vec<Note>,
    categories: Vec<String>,
    selected_note_id: Option<NoteId>,
    search: String,
    active_category: String,
    loading: bool,
    error: Option<String>,
}

impl<S: KeyValueStore> NotesState<S> {
    pub fn new(service: NoteService<S>) -> Self {
        Self {
            service,
            notes: Vec::new(),
            categories: Vec::new(),
            selected_note_id: None,
            search: String::new(),
            active_category: ALL_CATEGORIES.to_string(),
            loading: false,
            error: None,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected_note_id(&self) -> Option<NoteId> {
        self.selected_note_id
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The selected note, if it is still in the list.
    pub fn selected_note(&self) -> Option<&Note> {
        let selected = self.selected_note_id?;
        self.notes.iter().find(|note| note.id == selected)
    }

    /// Notes passing the active category and search filters, in list order.
    pub fn filtered_notes(&self) -> Vec<&Note> {
        let needle = self.search.trim().to_lowercase();
        let category = self.active_category.as_str();
        self.notes
            .iter()
            .filter(|note| category == ALL_CATEGORIES || note.category == category)
            .filter(|note| note.matches_search(&needle))
            .collect()
    }

    /// Replaces notes and categories from storage. No-op without a user.
    ///
    /// Keeps the selection when it still exists, otherwise selects the most
    /// recent note.
    pub fn load(&mut self, user: Option<&User>) {
        let Some(user) = user else {
            return;
        };
        self.loading = true;
        self.notes = self.service.get_notes(user.id);

        let mut categories = vec![ALL_CATEGORIES.to_string()];
        categories.extend(
            self.service
                .get_categories(user.id)
                .into_iter()
                .filter(|category| category != ALL_CATEGORIES),
        );
        self.categories = categories;

        if self.selected_note().is_none() {
            self.selected_note_id = self.notes.first().map(|note| note.id);
        }
        self.loading = false;
        debug!(
            "event=notes_load module=state status=ok count={}",
            self.notes.len()
        );
    }

    /// Creates a note, puts it at the front, and selects it.
    ///
    /// Returns the new id, or `None` without a user or on failure.
    pub fn add_new(&mut self, user: Option<&User>, fields: NewNote) -> Option<NoteId> {
        let user = user?;
        self.error = None;
        match self.service.create_note(user.id, fields) {
            Ok(note) => {
                let id = note.id;
                self.remember_category(&note.category);
                self.notes.insert(0, note);
                self.selected_note_id = Some(id);
                Some(id)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// Updates a note and moves it to the front of the list.
    pub fn save(&mut self, user: Option<&User>, id: NoteId, update: NoteUpdate) {
        let Some(user) = user else {
            return;
        };
        self.error = None;
        match self.service.update_note(user.id, id, update) {
            Ok(note) => {
                self.remember_category(&note.category);
                self.notes.retain(|existing| existing.id != id);
                self.notes.insert(0, note);
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Deletes a note; a removed selection falls back to the first note.
    pub fn remove(&mut self, user: Option<&User>, id: NoteId) {
        let Some(user) = user else {
            return;
        };
        self.error = None;
        if let Err(err) = self.service.delete_note(user.id, id) {
            self.error = Some(err.to_string());
            return;
        }

        if let Some(position) = self.notes.iter().position(|note| note.id == id) {
            self.notes.remove(position);
        }
        if self.selected_note_id == Some(id) {
            self.selected_note_id = self.notes.first().map(|note| note.id);
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.active_category = category.into();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn select_note(&mut self, id: NoteId) {
        self.selected_note_id = Some(id);
    }

    /// Drops every cached note and filter, e.g. after logout.
    pub fn reset(&mut self) {
        self.notes.clear();
        self.categories.clear();
        self.selected_note_id = None;
        self.search.clear();
        self.active_category = ALL_CATEGORIES.to_string();
        self.loading = false;
        self.error = None;
    }

    fn remember_category(&mut self, category: &str) {
        if !self.categories.iter().any(|known| known == category) {
            self.categories.push(category.to_string());
        }
    }
}
