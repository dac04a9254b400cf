//! History store abstraction.
//!
//! The browser treats history as a small keyed list store: it writes entries
//! when an entity is viewed, created or starred, and reads rendered lists for
//! the default page. Items are addressed by their full key string
//! (`history.<page>.<list>`) so hosts with an existing store can plug in.

use crate::domain::error::Result;
use crate::history::models::HistoryEntry;

/// Keyed recency lists.
///
/// # Implementations
///
/// - [`crate::history::JsonHistory`]: JSON file with atomic writes, or memory only
pub trait HistoryStore: Send {
    /// Puts an entry at the front of `item`, replacing any entry with the same value.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be persisted.
    fn put(&mut self, item: &str, entry: HistoryEntry) -> Result<()>;

    /// Removes the entry with `value` from `item`. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove(&mut self, item: &str, value: &str) -> Result<bool>;

    /// Entries of `item`, newest first.
    fn entries(&self, item: &str) -> Vec<HistoryEntry>;

    fn contains(&self, item: &str, value: &str) -> bool {
        self.entries(item).iter().any(|entry| entry.value == value)
    }

    /// Renders `item` as one `name <value>` line per entry, or `None` when empty.
    fn rendered_list(&self, item: &str) -> Option<String> {
        let entries = self.entries(item);
        if entries.is_empty() {
            return None;
        }
        Some(
            entries
                .iter()
                .map(|entry| format!("{} <{}>", entry.name, entry.value))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
