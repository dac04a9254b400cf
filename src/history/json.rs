//! JSON file-based history store.
//!
//! All lists are kept in memory and written out after every change using an
//! atomic write (write-to-temp + rename). A store without a path never touches
//! the filesystem.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "lists": {
//!     "history.configs.recent": [
//!       { "name": "Equity view", "value": "configs/42", "visited_at": 1700000000 }
//!     ]
//!   }
//! }
//! ```

use crate::domain::error::{ConfviewError, Result};
use crate::history::backend::HistoryStore;
use crate::history::models::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryData {
    version: u32,
    #[serde(default)]
    lists: BTreeMap<String, Vec<HistoryEntry>>,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            version: 1,
            lists: BTreeMap::new(),
        }
    }
}

/// History store backed by an optional JSON file.
///
/// Each list holds at most `limit` entries, newest first, unique by value.
///
/// # Examples
///
/// ```
/// use confview::history::{HistoryEntry, HistoryStore, JsonHistory};
///
/// let mut history = JsonHistory::in_memory(2);
/// history.put("history.configs.recent", HistoryEntry::new("a", "configs/1"))?;
/// history.put("history.configs.recent", HistoryEntry::new("b", "configs/2"))?;
/// history.put("history.configs.recent", HistoryEntry::new("a", "configs/1"))?;
/// let names: Vec<_> = history
///     .entries("history.configs.recent")
///     .into_iter()
///     .map(|e| e.name)
///     .collect();
/// assert_eq!(names, ["a", "b"]);
/// # Ok::<(), confview::ConfviewError>(())
/// ```
pub struct JsonHistory {
    file_path: Option<PathBuf>,
    data: HistoryData,
    limit: usize,
    dirty: bool,
}

impl JsonHistory {
    /// Opens or creates a file-backed history.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but is not valid history JSON.
    pub fn new(file_path: PathBuf, limit: usize) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON history");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            HistoryData::default()
        };

        tracing::debug!(lists = data.lists.len(), "history initialized");

        Ok(Self {
            file_path: Some(file_path),
            data,
            limit: limit.max(1),
            dirty: false,
        })
    }

    /// Creates a history that lives only as long as the value.
    #[must_use]
    pub fn in_memory(limit: usize) -> Self {
        Self {
            file_path: None,
            data: HistoryData::default(),
            limit: limit.max(1),
            dirty: false,
        }
    }

    fn load_from_file(path: &Path) -> Result<HistoryData> {
        let contents = std::fs::read_to_string(path)?;
        let data: HistoryData = serde_json::from_str(&contents)
            .map_err(|e| ConfviewError::History(format!("failed to parse JSON: {e}")))?;
        tracing::debug!(version = data.version, lists = data.lists.len(), "loaded history data");
        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let Some(path) = self.file_path.as_ref() else {
            self.dirty = false;
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ConfviewError::History(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;

        self.dirty = false;
        tracing::trace!(path = ?path, "history saved");
        Ok(())
    }
}

impl HistoryStore for JsonHistory {
    fn put(&mut self, item: &str, entry: HistoryEntry) -> Result<()> {
        let _span = tracing::debug_span!("history_put", item = %item, value = %entry.value).entered();

        let list = self.data.lists.entry(item.to_string()).or_default();
        list.retain(|existing| existing.value != entry.value);
        list.insert(0, entry);
        list.truncate(self.limit);

        self.dirty = true;
        self.save_to_file()
    }

    fn remove(&mut self, item: &str, value: &str) -> Result<bool> {
        let Some(list) = self.data.lists.get_mut(item) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|existing| existing.value != value);
        if list.len() == before {
            return Ok(false);
        }

        self.dirty = true;
        self.save_to_file()?;
        Ok(true)
    }

    fn entries(&self, item: &str) -> Vec<HistoryEntry> {
        self.data.lists.get(item).cloned().unwrap_or_default()
    }
}

impl Drop for JsonHistory {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save history on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECENT: &str = "history.configs.recent";

    #[test]
    fn keeps_newest_first_and_caps_length() {
        let mut history = JsonHistory::in_memory(3);
        for i in 0..5 {
            history
                .put(RECENT, HistoryEntry::new(format!("c{i}"), format!("configs/{i}")))
                .unwrap();
        }
        let values: Vec<String> = history.entries(RECENT).into_iter().map(|e| e.value).collect();
        assert_eq!(values, ["configs/4", "configs/3", "configs/2"]);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut history = JsonHistory::in_memory(5);
        history.put(RECENT, HistoryEntry::new("a", "configs/1")).unwrap();
        assert!(history.remove(RECENT, "configs/1").unwrap());
        assert!(!history.remove(RECENT, "configs/1").unwrap());
        assert!(!history.remove("history.configs.favorites", "configs/1").unwrap());
    }

    #[test]
    fn rendered_list_is_none_when_empty() {
        let mut history = JsonHistory::in_memory(5);
        assert_eq!(history.rendered_list(RECENT), None);
        history.put(RECENT, HistoryEntry::new("a", "configs/1")).unwrap();
        assert_eq!(history.rendered_list(RECENT).as_deref(), Some("a <configs/1>"));
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        {
            let mut history = JsonHistory::new(path.clone(), 10).unwrap();
            history.put(RECENT, HistoryEntry::new("a", "configs/1")).unwrap();
        }

        let reopened = JsonHistory::new(path, 10).unwrap();
        assert!(reopened.contains(RECENT, "configs/1"));
    }

    #[test]
    fn rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(JsonHistory::new(path, 10), Err(ConfviewError::History(_))));
    }
}
