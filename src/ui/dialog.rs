//! Dialog descriptions and user decisions.
//!
//! The browser opens a dialog by emitting its [`DialogSpec`] together with a
//! ticket. The host answers later with a [`DialogDecision`] for that ticket.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One input field of an input dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogField {
    pub id: String,
    pub label: String,
    /// Rendered as a text area.
    #[serde(default)]
    pub multiline: bool,
}

impl DialogField {
    pub fn input(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            multiline: false,
        }
    }

    pub fn textarea(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            multiline: true,
            ..Self::input(id, label)
        }
    }
}

/// What a dialog shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DialogSpec {
    /// Collects field values.
    Input {
        title: String,
        fields: Vec<DialogField>,
        confirm_label: String,
    },
    /// Asks for confirmation of a destructive action.
    Confirm {
        title: String,
        message: String,
        confirm_label: String,
    },
    /// Reports a failure. Nothing waits on its decision.
    Error { message: String },
}

/// The user's answer to a dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum DialogDecision {
    /// Confirmed, with field values keyed by field id (empty for confirms).
    Confirmed {
        #[serde(default)]
        fields: BTreeMap<String, String>,
    },
    Cancelled,
}

impl DialogDecision {
    /// A confirmation without fields.
    #[must_use]
    pub fn confirmed() -> Self {
        Self::Confirmed {
            fields: BTreeMap::new(),
        }
    }

    /// A confirmation carrying field values.
    pub fn with_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Confirmed {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
