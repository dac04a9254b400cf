//! Classification and detail mode types.
//!
//! # State Machine
//!
//! Every navigation is classified against the previous one:
//! - **NewPage**: the list identity (every argument except `id` and the
//!   transient flags) changed, or there was no previous navigation
//! - **Continuation**: only the selected entity or a transient flag changed
//!
//! The detail pane is either viewing an entity or editing one. Editing is bound
//! to a single id and falls back to viewing as soon as another entity is
//! loaded.

use serde::{Deserialize, Serialize};

/// Result of comparing a navigation with the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The list context changed; list-level work must be redone.
    NewPage,
    /// Same list context; only detail-level work is needed.
    Continuation,
}

impl Classification {
    #[must_use]
    pub const fn is_new_page(self) -> bool {
        matches!(self, Self::NewPage)
    }
}

/// Whether the detail pane renders its entity editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailMode {
    #[default]
    Viewing,
    /// Editing the entity with this id.
    Editing { id: String },
}

impl DetailMode {
    /// Returns true if an entity with `id` should render editable.
    #[must_use]
    pub fn is_editing(&self, id: &str) -> bool {
        matches!(self, Self::Editing { id: editing } if editing == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_is_bound_to_one_id() {
        let mode = DetailMode::Editing { id: "42".into() };
        assert!(mode.is_editing("42"));
        assert!(!mode.is_editing("7"));
        assert!(!DetailMode::Viewing.is_editing("42"));
    }
}
