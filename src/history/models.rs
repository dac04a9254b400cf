//! History record models.

use serde::{Deserialize, Serialize};

/// Which history list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryList {
    /// Recently viewed entities.
    Recent,
    /// Entities created in this browser.
    New,
    /// Entities the user starred.
    Favorites,
}

impl HistoryList {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::New => "new",
            Self::Favorites => "favorites",
        }
    }

    /// Storage key for this list on `page`, e.g. `history.configs.recent`.
    ///
    /// # Examples
    ///
    /// ```
    /// use confview::history::HistoryList;
    ///
    /// assert_eq!(HistoryList::Favorites.key("configs"), "history.configs.favorites");
    /// ```
    #[must_use]
    pub fn key(self, page: &str) -> String {
        format!("history.{page}.{}", self.as_str())
    }
}

/// One remembered entity: its display name and the route that shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    /// Canonical route string of the entity's detail view.
    pub value: String,
    /// Unix timestamp of the last time the entry was put.
    pub visited_at: i64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            visited_at: chrono::Utc::now().timestamp(),
        }
    }
}
