//! The ordered list of professional and educational history entries.

use crate::core::form::FieldErrors;
use crate::domain::model::{EntryId, EntryKind, HistoryEntry};

/// Repeatable history entries with ids that stay stable while entries are
/// added, removed or switch kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryEntries {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl HistoryEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps entries loaded from a saved form. New ids continue after the
    /// largest id present.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        Self { entries, next_id }
    }

    /// Appends an entry of the given kind and returns its id.
    pub fn add(&mut self, kind: EntryKind) -> EntryId {
        let id = EntryId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.entries.push(HistoryEntry { id, kind });
        id
    }

    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut HistoryEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Switches an entry to another kind. Fields of the previous kind are
    /// dropped; switching to the kind it already has keeps it as is.
    pub fn set_kind(&mut self, id: EntryId, kind: EntryKind) -> bool {
        let Some(entry) = self.get_mut(id) else {
            return false;
        };
        if std::mem::discriminant(&entry.kind) != std::mem::discriminant(&kind) {
            entry.kind = kind;
        }
        true
    }

    /// Drops errors that belong to entries no longer in the list.
    pub fn retain_errors(&self, errors: &mut FieldErrors) {
        errors.retain(|key, _| match key.entry {
            Some(id) => self.get(id).is_some(),
            None => true,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }
}
