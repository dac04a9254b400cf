//! Client-side recency and favorites history.
//!
//! # Modules
//!
//! - `backend`: [`HistoryStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `models`: Entry and list types

pub mod backend;
pub mod json;
pub mod models;

pub use backend::HistoryStore;
pub use json::JsonHistory;
pub use models::{HistoryEntry, HistoryList};
