//! View state for the configuration browser.
//!
//! [`ConfigsView`] is the single owner of everything that outlives one event:
//! the route table, the reconciler's memory, the sticky session flags, the
//! in-flight store requests, the pending dialog and the history store.
//!
//! # State Components
//!
//! - **Current route**: The last route that resolved, with its handler and args
//! - **Toolbar**: The button set currently shown by the host
//! - **Detail**: The in-flight detail request, the displayed entity, the mode
//! - **Search**: The ticket of the latest issued search
//! - **Dialog**: The create or delete dialog awaiting a decision or a reply
//! - **Session**: Flags that stick for the life of the view

use super::modes::DetailMode;
use super::reconciler::Reconciler;
use crate::domain::error::Result;
use crate::domain::{Entity, RouteArgs};
use crate::history::HistoryStore;
use crate::routing::{configs_table, HandlerId, RouteTable};
use crate::store::Ticket;
use crate::ui::ToolbarMode;
use crate::Config;

use super::Action;

/// Flags that persist across navigations for the life of the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewSession {
    /// Once filter mode has been entered, every search runs filtered.
    pub filter: bool,
}

impl ViewSession {
    /// Returns every flag to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The route most recently resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRoute {
    pub path: String,
    pub handler: HandlerId,
    pub args: RouteArgs,
}

/// A detail request that has not been answered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDetail {
    /// Ticket of the `get` request. Also identifies the loading timer.
    pub ticket: Ticket,
    pub args: RouteArgs,
    pub editable: bool,
    /// True once "still loading..." has been shown.
    pub escalated: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub pending: Option<PendingDetail>,
    /// Entity currently rendered in the detail pane, with its route args.
    pub displayed: Option<(Entity, RouteArgs)>,
    pub mode: DetailMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchState {
    pub latest: Option<Ticket>,
}

/// What a dialog was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPurpose {
    Create,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    /// Waiting for the user's decision.
    Prompting,
    /// Confirmed; waiting for the store to answer `request`.
    Awaiting { request: Ticket, name: String },
}

/// The one dialog the view is tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDialog {
    pub ticket: Ticket,
    pub purpose: DialogPurpose,
    pub state: DialogState,
}

/// Central state container of the configuration browser.
///
/// Mutated only by [`handle_event`](super::handle_event).
pub struct ConfigsView {
    pub(crate) page: String,
    pub(crate) loading_delay_ms: u64,
    pub(crate) table: RouteTable<HandlerId>,
    pub(crate) reconciler: Reconciler,
    pub(crate) session: ViewSession,
    pub(crate) history: Box<dyn HistoryStore>,
    pub(crate) current: Option<CurrentRoute>,
    pub(crate) toolbar: Option<ToolbarMode>,
    pub(crate) detail: DetailState,
    pub(crate) search: SearchState,
    pub(crate) dialog: Option<PendingDialog>,
    next_ticket: u64,
}

impl ConfigsView {
    /// Creates a view for `config.page_name` backed by `history`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfviewError::Config`](crate::ConfviewError::Config) if the
    /// page name does not produce valid route patterns.
    pub fn new(config: &Config, history: Box<dyn HistoryStore>) -> Result<Self> {
        let table = configs_table(&config.page_name)?;
        tracing::debug!(page = %config.page_name, rules = table.rules().len(), "configs view created");

        Ok(Self {
            page: config.page_name.clone(),
            loading_delay_ms: config.loading_delay_ms,
            table,
            reconciler: Reconciler::new(),
            session: ViewSession::default(),
            history,
            current: None,
            toolbar: None,
            detail: DetailState::default(),
            search: SearchState::default(),
            dialog: None,
            next_ticket: 0,
        })
    }

    /// Hands out the next ticket. Tickets are never reused.
    pub(crate) fn issue(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    /// Switches the toolbar, emitting an action only on change.
    pub(crate) fn set_toolbar(&mut self, mode: ToolbarMode, actions: &mut Vec<Action>) {
        if self.toolbar != Some(mode) {
            tracing::debug!(?mode, "toolbar mode changed");
            self.toolbar = Some(mode);
            actions.push(Action::SetToolbar { mode });
        }
    }

    /// Arguments of the current route, empty before the first navigation.
    pub(crate) fn current_args(&self) -> RouteArgs {
        self.current
            .as_ref()
            .map(|current| current.args.clone())
            .unwrap_or_default()
    }

    /// Builds a route string for `handler`.
    pub(crate) fn hash(&self, handler: HandlerId, args: &RouteArgs) -> Result<String> {
        self.table.hash(handler, args)
    }

    /// Canonical detail route of `args`, used as the history value.
    pub(crate) fn detail_path(&self, args: &RouteArgs) -> Result<String> {
        self.hash(HandlerId::LoadConfigs, args)
    }

    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    #[must_use]
    pub fn current(&self) -> Option<&CurrentRoute> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn toolbar(&self) -> Option<ToolbarMode> {
        self.toolbar
    }

    #[must_use]
    pub const fn session(&self) -> ViewSession {
        self.session
    }

    /// Entity rendered in the detail pane, if any.
    #[must_use]
    pub fn displayed(&self) -> Option<&Entity> {
        self.detail.displayed.as_ref().map(|(entity, _)| entity)
    }

    /// True while a detail request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.detail.pending.is_some()
    }

    #[must_use]
    pub fn detail_mode(&self) -> &DetailMode {
        &self.detail.mode
    }

    #[must_use]
    pub fn pending_dialog(&self) -> Option<&PendingDialog> {
        self.dialog.as_ref()
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable<HandlerId> {
        &self.table
    }

    #[must_use]
    pub fn history(&self) -> &dyn HistoryStore {
        self.history.as_ref()
    }
}

impl std::fmt::Debug for ConfigsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigsView")
            .field("page", &self.page)
            .field("current", &self.current)
            .field("toolbar", &self.toolbar)
            .field("session", &self.session)
            .field("dialog", &self.dialog)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::JsonHistory;

    fn view() -> ConfigsView {
        ConfigsView::new(&Config::default(), Box::new(JsonHistory::in_memory(10))).unwrap()
    }

    #[test]
    fn tickets_are_unique_and_increasing() {
        let mut view = view();
        let a = view.issue();
        let b = view.issue();
        assert!(b > a);
    }

    #[test]
    fn toolbar_is_only_emitted_on_change() {
        let mut view = view();
        let mut actions = Vec::new();
        view.set_toolbar(ToolbarMode::NoSelection, &mut actions);
        view.set_toolbar(ToolbarMode::NoSelection, &mut actions);
        view.set_toolbar(ToolbarMode::SelectionActive, &mut actions);
        assert_eq!(
            actions,
            [
                Action::SetToolbar { mode: ToolbarMode::NoSelection },
                Action::SetToolbar { mode: ToolbarMode::SelectionActive },
            ]
        );
    }

    #[test]
    fn detail_path_drops_transient_flags() {
        let view = view();
        let args = RouteArgs::new().with("id", "4").with("name", "n").with("new", "true");
        assert_eq!(view.detail_path(&args).unwrap(), "configs/4/name:n");
    }
}
