//! The host's rendering surface.

use crate::app::Action;

/// Receives the UI actions the browser emits: renders, toolbar and masthead
/// changes, messages, dialogs and errors.
///
/// Store requests, navigations and timers never reach the surface; the
/// [`crate::runtime::Driver`] handles those itself.
pub trait Surface {
    fn apply(&mut self, action: &Action);
}

/// A surface that records every action it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub actions: Vec<Action>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the recorded actions, leaving the surface empty.
    pub fn take(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

impl Surface for RecordingSurface {
    fn apply(&mut self, action: &Action) {
        self.actions.push(action.clone());
    }
}
