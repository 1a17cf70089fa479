//! Session Cache
//!
//! Verified words and user-ignored words for one editing session. Nothing
//! here is persisted; the cache dies with the session.

use std::collections::{HashMap, HashSet};

use super::suggestion::{LocalStatus, Suggestion};
use super::word::WordKey;

/// In-memory verification cache.
///
/// Entries are write-once: a second `put` for the same key is ignored, so an
/// entry only changes through an explicit `remove_suggestion` first.
#[derive(Debug, Default)]
pub struct LocalCache {
    suggestions: HashMap<WordKey, Suggestion>,
    ignored: HashSet<WordKey>,
}

impl LocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ignored(&self, key: &WordKey) -> bool {
        self.ignored.contains(key)
    }

    /// Cache-only status; the ignore-set is not consulted
    pub fn status(&self, key: &WordKey) -> LocalStatus {
        match self.suggestions.get(key) {
            None => LocalStatus::Absent,
            Some(s) if s.is_wrong => LocalStatus::PresentWrong,
            Some(_) => LocalStatus::PresentCorrect,
        }
    }

    /// Stored suggestion, or [`Suggestion::unknown`] when absent
    pub fn get(&self, key: &WordKey) -> Suggestion {
        self.suggestions
            .get(key)
            .cloned()
            .unwrap_or_else(Suggestion::unknown)
    }

    /// Insert unless the key is already present (first writer wins).
    ///
    /// Returns whether the entry was stored. Empty keys are never stored.
    pub fn put(&mut self, key: WordKey, suggestion: Suggestion) -> bool {
        if key.is_empty() || self.suggestions.contains_key(&key) {
            return false;
        }
        self.suggestions.insert(key, suggestion);
        true
    }

    pub fn add_ignored(&mut self, key: WordKey) {
        if !key.is_empty() {
            self.ignored.insert(key);
        }
    }

    pub fn remove_ignored(&mut self, key: &WordKey) -> bool {
        self.ignored.remove(key)
    }

    pub fn remove_suggestion(&mut self, key: &WordKey) -> Option<Suggestion> {
        self.suggestions.remove(key)
    }

    pub fn entry_count(&self) -> usize {
        self.suggestions.len()
    }

    pub fn ignored_keys(&self) -> impl Iterator<Item = &WordKey> {
        self.ignored.iter()
    }
}
