//! Tolerant decoding of JSON array slots.
//!
//! # Invariants
//! - One record that does not decode never hides its siblings.
//! - Records that do not decode are written back verbatim, in place.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum RecordEntry<T> {
    Decoded(T),
    Skipped(Value),
}

/// Records read from one JSON array slot.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RecordList<T> {
    entries: Vec<RecordEntry<T>>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: DeserializeOwned> RecordList<T> {
    /// Decodes every element, keeping failures as raw values.
    ///
    /// `on_skip` receives the array position and the decode error.
    pub(crate) fn decode(
        values: Vec<Value>,
        mut on_skip: impl FnMut(usize, &serde_json::Error),
    ) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| match T::deserialize(&value) {
                Ok(record) => RecordEntry::Decoded(record),
                Err(err) => {
                    on_skip(position, &err);
                    RecordEntry::Skipped(value)
                }
            })
            .collect();
        Self { entries }
    }
}

impl<T> RecordList<T> {
    /// Decoded records in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(|entry| match entry {
            RecordEntry::Decoded(record) => Some(record),
            RecordEntry::Skipped(_) => None,
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter_map(|entry| match entry {
            RecordEntry::Decoded(record) => Some(record),
            RecordEntry::Skipped(_) => None,
        })
    }

    pub fn push(&mut self, record: T) {
        self.entries.push(RecordEntry::Decoded(record));
    }

    /// Keeps decoded records matching `keep`; skipped records always stay.
    /// Returns how many records were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| match entry {
            RecordEntry::Decoded(record) => keep(record),
            RecordEntry::Skipped(_) => true,
        });
        before - self.entries.len()
    }

    /// Number of raw records that did not decode.
    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, RecordEntry::Skipped(_)))
            .count()
    }
}
