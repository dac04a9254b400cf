//! Confview: route-driven state reconciliation for a master-detail
//! configuration browser.
//!
//! Confview is the headless core of a "configs" page:
//! - A declarative route table mapping location strings to handlers
//! - New page / continuation detection so list work is only redone when the
//!   list context changes
//! - Stale-reply suppression for detail loads and searches
//! - Create and delete flows driven through dialogs
//! - Recent, new and favorite history persisted as JSON
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host / Driver (runtime/, main.rs)                  │  ← Executes actions
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and route handlers                │
//! │  - Reconciliation and canonical redirects           │
//! │  - Detail, search and dialog flows                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Routing       │   │ History       │   │ Store         │
//! │ (routing/)    │   │ (history/)    │   │ (store/)      │
//! │ - Patterns    │   │ - JSON I/O    │   │ - Messages    │
//! │ - Rule table  │   │ - Lists       │   │ - Memory impl │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & UI vocabulary                             │
//! │  - Route args, entities, errors (domain/)           │
//! │  - Templates, toolbar, dialogs, surface (ui/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event/action state machine
//! - [`domain`]: Route arguments, entities, errors
//! - [`history`]: Recent/new/favorite lists with JSON persistence
//! - [`infrastructure`]: Path helpers
//! - [`observability`]: Tracing setup
//! - [`routing`]: Route patterns and the configs route table
//! - [`runtime`]: Driver executing actions against collaborators
//! - [`store`]: Remote store protocol and an in-memory store
//! - [`ui`]: Templates, toolbar, dialogs and the surface trait
//!
//! # Configuration
//!
//! ```toml
//! page_name = "configs"
//! loading_delay_ms = 3000
//! history_path = "~/.local/share/confview/history.json"
//! history_limit = 10
//! trace_level = "debug"
//! log_file = "~/.local/share/confview/confview.log"
//! ```
//!
//! # Examples
//!
//! ```
//! use confview::runtime::Driver;
//! use confview::store::MemoryStore;
//! use confview::ui::RecordingSurface;
//! use confview::{initialize, Config, Entity};
//!
//! let view = initialize(&Config::default())?;
//! let store = MemoryStore::with_entities([Entity::new(
//!     "1",
//!     "ViewDefinition",
//!     "Equity view",
//!     serde_json::json!({"columns": []}),
//! )]);
//! let mut driver = Driver::new(view, store, RecordingSurface::new());
//!
//! driver.navigate("configs/1")?;
//! assert_eq!(driver.view().displayed().map(|e| e.name.as_str()), Some("Equity view"));
//! # Ok::<(), confview::ConfviewError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod history;
pub mod infrastructure;
pub mod routing;
pub mod runtime;
pub mod store;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, ConfigsView, Event};
pub use domain::{ConfviewError, Entity, Result, RouteArgs, TransientFlag};

use history::{HistoryStore, JsonHistory};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULT_PAGE: &str = "configs";
const DEFAULT_LOADING_DELAY_MS: u64 = 3000;
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Browser configuration.
///
/// Built from a host key/value map ([`Config::from_map`]) or a TOML document
/// ([`Config::from_toml_str`], [`Config::load`]).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Route prefix and tab name. Default: `"configs"`
    pub page_name: String,

    /// Delay before "loading..." escalates to "still loading...". Default: 3000
    pub loading_delay_ms: u64,

    /// History file. In-memory history when unset.
    pub history_path: Option<PathBuf>,

    /// Maximum entries per history list. Default: 10
    pub history_limit: usize,

    /// Tracing filter directive such as `debug` or `confview=trace`.
    /// Default: `"info"`
    pub trace_level: Option<String>,

    /// Log file. Logs go to stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_name: DEFAULT_PAGE.to_string(),
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
            history_path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a host key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `page_name`: non-blank string, falls back to `configs`
    /// - `loading_delay_ms`: `u64`, falls back to 3000 on parse error
    /// - `history_path`, `log_file`: paths, `~` expanded
    /// - `history_limit`: positive `usize`, falls back to 10
    /// - `trace_level`: string
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use confview::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("loading_delay_ms".to_string(), "500".to_string());
    /// map.insert("history_limit".to_string(), "zero".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.loading_delay_ms, 500);
    /// assert_eq!(config.history_limit, 10);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let page_name = config
            .get("page_name")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PAGE.to_string());

        let loading_delay_ms = config
            .get("loading_delay_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_LOADING_DELAY_MS);

        let history_limit = config
            .get("history_limit")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        Self {
            page_name,
            loading_delay_ms,
            history_path: config.get("history_path").map(|p| infrastructure::expand_tilde(p)),
            history_limit,
            trace_level: config.get("trace_level").cloned(),
            log_file: config.get("log_file").map(|p| infrastructure::expand_tilde(p)),
        }
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfviewError::Toml`] for malformed documents or unknown keys,
    /// and [`ConfviewError::Config`] for a blank page name or a zero history
    /// limit.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(source)?;

        if config.page_name.trim().is_empty() {
            return Err(ConfviewError::Config("page_name must not be blank".to_string()));
        }
        if config.history_limit == 0 {
            return Err(ConfviewError::Config("history_limit must be positive".to_string()));
        }

        config.history_path = config.history_path.map(|p| expand(&p));
        config.log_file = config.log_file.map(|p| expand(&p));
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfviewError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "loading configuration");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

fn expand(path: &Path) -> PathBuf {
    path.to_str().map_or_else(|| path.to_path_buf(), infrastructure::expand_tilde)
}

/// Builds a ready [`ConfigsView`] from configuration.
///
/// Opens the history file when `history_path` is set, otherwise keeps history
/// in memory.
///
/// # Errors
///
/// Returns an error if the history file exists but cannot be read, or the page
/// name does not form valid route patterns.
pub fn initialize(config: &Config) -> Result<ConfigsView> {
    tracing::debug!(page = %config.page_name, "initializing configs view");

    let history: Box<dyn HistoryStore> = match &config.history_path {
        Some(path) => Box::new(JsonHistory::new(path.clone(), config.history_limit)?),
        None => Box::new(JsonHistory::in_memory(config.history_limit)),
    };

    ConfigsView::new(config, history)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_defaults() {
        let config = Config::from_toml_str("page_name = \"curves\"\nloading_delay_ms = 10\n").unwrap();
        assert_eq!(config.page_name, "curves");
        assert_eq!(config.loading_delay_ms, 10);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn toml_rejects_unknown_keys_and_zero_limit() {
        assert!(matches!(Config::from_toml_str("colour = 1"), Err(ConfviewError::Toml(_))));
        assert!(matches!(
            Config::from_toml_str("history_limit = 0"),
            Err(ConfviewError::Config(_))
        ));
    }

    #[test]
    fn map_falls_back_on_bad_values() {
        let map: BTreeMap<String, String> = [
            ("page_name", " "),
            ("loading_delay_ms", "-1"),
            ("trace_level", "debug"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let config = Config::from_map(&map);
        assert_eq!(config.page_name, DEFAULT_PAGE);
        assert_eq!(config.loading_delay_ms, DEFAULT_LOADING_DELAY_MS);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn initialize_uses_file_history_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            history_path: Some(dir.path().join("history.json")),
            ..Config::default()
        };
        let view = initialize(&config).unwrap();
        assert_eq!(view.page(), "configs");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confview.toml");
        std::fs::write(&path, "history_limit = 3").unwrap();
        assert_eq!(Config::load(&path).unwrap().history_limit, 3);
        assert!(matches!(Config::load(&dir.path().join("missing.toml")), Err(ConfviewError::Io(_))));
    }
}
