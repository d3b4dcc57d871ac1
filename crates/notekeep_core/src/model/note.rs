//! Note record and its create/update inputs.
//!
//! # Invariants
//! - `title` is trimmed and never blank (`DEFAULT_TITLE` otherwise).
//! - `category` is trimmed and never blank (`DEFAULT_CATEGORY` otherwise).
//! - `updated_at >= created_at`.

use super::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a note.
pub type NoteId = Uuid;

/// Title assigned when none (or only whitespace) is supplied.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Category assigned when none is supplied. Always listed.
pub const DEFAULT_CATEGORY: &str = "General";
/// Synthetic filter value that disables category filtering. Never persisted.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Owning user.
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub category: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds; refreshed by every update.
    pub updated_at: i64,
}

/// Optional initial fields for a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl NewNote {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Partial update merged into an existing note. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl NoteUpdate {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl Note {
    /// Builds a note with a generated id, applying field defaults.
    pub fn new(user_id: UserId, fields: NewNote, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: normalize_title(fields.title.as_deref()),
            content: fields.content.unwrap_or_default(),
            category: normalize_category(fields.category.as_deref()),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Merges `update` and stamps `updated_at`.
    pub fn apply(&mut self, update: NoteUpdate, now_ms: i64) {
        if let Some(title) = update.title {
            self.title = normalize_title(Some(&title));
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(category) = update.category {
            self.category = normalize_category(Some(&category));
        }
        self.updated_at = now_ms;
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Case-insensitive substring match on title or content.
    ///
    /// `needle` must already be lowercase; an empty needle matches everything.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}

fn normalize_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}
