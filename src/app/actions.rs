//! Actions representing side effects to be executed by the host.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler. Actions bridge pure state transitions and effectful work:
//! drawing into the host surface, calling the remote store, arming timers and
//! changing the location.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! multiple side effects are queued atomically. A host (or the
//! [`Driver`](crate::runtime::Driver)) executes them in order.
//!
//! Actions serialize as tagged JSON objects, which is what the `confview`
//! binary prints:
//!
//! ```
//! use confview::app::Action;
//!
//! let action = Action::Navigate { path: "configs/42".into() };
//! let json = serde_json::to_string(&action)?;
//! assert_eq!(json, r#"{"action":"navigate","path":"configs/42"}"#);
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::domain::EntitySummary;
use crate::store::{StoreRequest, Ticket};
use crate::ui::{DialogSpec, Layout, Template, ToolbarMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Commands representing side effects to be executed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Changes the location. The host feeds the new route back as
    /// `Event::RouteChanged`.
    Navigate { path: String },

    /// Sends a request to the remote store. The reply must come back as
    /// `Event::StoreReplied` carrying the same ticket.
    Store { ticket: Ticket, request: StoreRequest },

    /// Selects the masthead tab for this page.
    SetTab { page: String },

    SetLayout { layout: Layout },

    /// Switches the toolbar button set. Only emitted when the mode changes.
    SetToolbar { mode: ToolbarMode },

    /// Renders a template into the detail pane.
    Render { template: Template, data: Value },

    /// Replaces the rows of the list surface.
    ReplaceList { rows: Vec<EntitySummary> },

    /// Pushes route filters into the list surface's filter inputs.
    SyncListFilter {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },

    /// Shows a transient status message.
    ShowMessage { text: String },

    ClearMessage,

    /// Arms a one-shot timer. The host reports expiry as `Event::TimerFired`.
    ScheduleTimer { timer: Ticket, delay_ms: u64 },

    CancelTimer { timer: Ticket },

    /// Turns on edit-on-click for the rendered detail.
    EnableEditAffordance,

    /// Shows whether the displayed entity is a favorite.
    FavoriteChanged { favorited: bool },

    /// Opens a dialog. The host reports the user's decision as
    /// `Event::DialogResolved` carrying the same id.
    OpenDialog { dialog: Ticket, spec: DialogSpec },

    CloseDialog { dialog: Ticket },

    /// Shows an error inside an open dialog without closing it.
    ShowDialogError { dialog: Ticket, message: String },

    /// Reports a store error outside of any dialog.
    ShowError { message: String },
}

impl Action {
    /// Short name used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::Store { .. } => "store",
            Self::SetTab { .. } => "set_tab",
            Self::SetLayout { .. } => "set_layout",
            Self::SetToolbar { .. } => "set_toolbar",
            Self::Render { .. } => "render",
            Self::ReplaceList { .. } => "replace_list",
            Self::SyncListFilter { .. } => "sync_list_filter",
            Self::ShowMessage { .. } => "show_message",
            Self::ClearMessage => "clear_message",
            Self::ScheduleTimer { .. } => "schedule_timer",
            Self::CancelTimer { .. } => "cancel_timer",
            Self::EnableEditAffordance => "enable_edit_affordance",
            Self::FavoriteChanged { .. } => "favorite_changed",
            Self::OpenDialog { .. } => "open_dialog",
            Self::CloseDialog { .. } => "close_dialog",
            Self::ShowDialogError { .. } => "show_dialog_error",
            Self::ShowError { .. } => "show_error",
        }
    }
}
