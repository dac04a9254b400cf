//! Toolbar modes and buttons.

use serde::{Deserialize, Serialize};

/// Toolbar buttons, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarButton {
    New,
    Up,
    Edit,
    Delete,
    Favorites,
}

impl ToolbarButton {
    pub const ALL: [Self; 5] = [Self::New, Self::Up, Self::Edit, Self::Delete, Self::Favorites];
}

/// Which buttons the toolbar exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarMode {
    /// No entity selected: only `new` is enabled.
    NoSelection,
    /// An entity is shown in the detail pane: every button is enabled.
    SelectionActive,
}

impl ToolbarMode {
    /// Whether `button` can be pressed in this mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use confview::ui::{ToolbarButton, ToolbarMode};
    ///
    /// assert!(ToolbarMode::NoSelection.is_enabled(ToolbarButton::New));
    /// assert!(!ToolbarMode::NoSelection.is_enabled(ToolbarButton::Delete));
    /// ```
    #[must_use]
    pub const fn is_enabled(self, button: ToolbarButton) -> bool {
        match self {
            Self::NoSelection => matches!(button, ToolbarButton::New),
            Self::SelectionActive => true,
        }
    }

    /// Every button with its enabled state.
    #[must_use]
    pub fn buttons(self) -> [(ToolbarButton, bool); 5] {
        ToolbarButton::ALL.map(|button| (button, self.is_enabled(button)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_enables_everything() {
        assert!(ToolbarMode::SelectionActive.buttons().iter().all(|(_, enabled)| *enabled));
        let enabled: Vec<ToolbarButton> = ToolbarMode::NoSelection
            .buttons()
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(button, _)| *button)
            .collect();
        assert_eq!(enabled, [ToolbarButton::New]);
    }
}
