//! Deduplicating, most-recent-first search history.

use crate::config::HistoryConfig;
use std::collections::VecDeque;

/// Identity of a City/State search: normalized state plus display city.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityStateKey {
    pub state: String,
    pub city: String,
}

/// One past search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry<K> {
    pub key: K,
    pub label: String,
    pub summary: String,
}

/// A bounded history list. No two entries share a key and the most recent
/// search is always first.
#[derive(Debug, Clone)]
pub struct History<K> {
    entries: VecDeque<HistoryEntry<K>>,
    max_len: usize,
    display_limit: usize,
}

impl<K: PartialEq> History<K> {
    #[must_use]
    pub fn new(config: &HistoryConfig) -> Self {
        History {
            entries: VecDeque::with_capacity(config.max_len),
            max_len: config.max_len,
            display_limit: config.display_limit,
        }
    }

    /// Record a search result.
    ///
    /// An existing entry with the same key is removed wherever it sits, the
    /// new entry goes to the front, and the oldest entries past the cap are
    /// dropped.
    pub fn upsert(&mut self, key: K, label: impl Into<String>, summary: impl Into<String>) {
        if let Some(idx) = self.entries.iter().position(|entry| entry.key == key) {
            self.entries.remove(idx);
        }
        self.entries.push_front(HistoryEntry {
            key,
            label: label.into(),
            summary: summary.into(),
        });
        self.entries.truncate(self.max_len);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries for display, most recent first, at most `display_limit`.
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEntry<K>> {
        self.entries.iter().take(self.display_limit)
    }

    /// Every stored entry, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry<K>> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry<K>> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl<K: PartialEq> Default for History<K> {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}
