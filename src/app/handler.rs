//! Event handling and route handlers.
//!
//! This module implements the core event handler that processes navigations,
//! store replies, dialog decisions, timer expiry and toolbar presses,
//! translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `ConfigsView` methods
//! 4. Actions are collected and returned for execution
//!
//! # Route Handlers
//!
//! | Handler | Route | Work |
//! |---------|-------|------|
//! | `load` | `configs[/name:][/type:]` | list; landing page when no id |
//! | `load_filter` | `configs/filter:[/:id]...` | sticky filter mode, redirect |
//! | `load_delete` | `configs/deleted:...` | refresh list, redirect to `load` |
//! | `load_configs` | `configs/:id...` | list on new page, detail |
//! | `load_new_configs` | `configs/:id/new:...` | canonical redirect |
//! | `load_edit_configs` | `configs/:id/edit:...` | editable, canonical redirect |

use super::canonical::Canonicalizer;
use super::modes::Classification;
use super::reconciler::{Condition, Reconciler};
use super::state::{ConfigsView, CurrentRoute};
use super::Action;
use crate::domain::error::Result;
use crate::domain::{RouteArgs, TransientFlag, NAME};
use crate::routing::HandlerId;
use crate::store::{StoreReply, Ticket};
use crate::ui::{DialogDecision, Layout, ToolbarButton, ToolbarMode};
use serde::{Deserialize, Serialize};

/// Events delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The location changed.
    RouteChanged { path: String },

    /// The remote store answered the request sent with `ticket`.
    StoreReplied { ticket: Ticket, reply: StoreReply },

    /// The user decided on a dialog.
    DialogResolved { dialog: Ticket, decision: DialogDecision },

    /// A timer armed by `Action::ScheduleTimer` expired.
    TimerFired { timer: Ticket },

    ToolbarPressed { button: ToolbarButton },

    /// The user clicked the rendered detail.
    EditRequested,

    /// The host re-entered the view. Clears the sticky session flags.
    SessionReset,
}

/// Work a handler may schedule through its condition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Search, select the tab, apply the default layout.
    EnterList,
    /// Run `load` as a new page.
    EnterLoad,
    /// Turn on the sticky filter.
    EnterFilterMode,
    /// Redirect to the route without the `filter` flag.
    LeaveFilterRoute,
}

const LOAD: [Condition<Step>; 1] = [Condition::new_page(Step::EnterList)];

const LOAD_FILTER: [Condition<Step>; 3] = [
    Condition::always(Step::EnterFilterMode),
    Condition::new_page(Step::EnterLoad),
    Condition::always(Step::LeaveFilterRoute),
];

const LOAD_CONFIGS: [Condition<Step>; 1] = [Condition::new_page(Step::EnterLoad)];

const LOAD_TRANSIENT: [Condition<Step>; 1] = [Condition::new_page(Step::EnterLoad).stopping()];

/// Processes an event, mutates the view, and returns actions to execute.
///
/// # Errors
///
/// Returns an error only when the view cannot build a route string it needs
/// (a programming error in the route table) or the history store fails on a
/// user-requested change. Unmatched routes and store failures are not errors:
/// the first is a logged no-op, the second is reported through actions.
///
/// # Example
///
/// ```
/// use confview::app::{handle_event, Action, ConfigsView, Event};
/// use confview::history::JsonHistory;
/// use confview::Config;
///
/// let mut view = ConfigsView::new(&Config::default(), Box::new(JsonHistory::in_memory(10)))?;
/// let actions = handle_event(&mut view, &Event::RouteChanged { path: "configs/42".into() })?;
/// assert!(actions.iter().any(|a| matches!(a, Action::ScheduleTimer { delay_ms: 3000, .. })));
/// # Ok::<(), confview::ConfviewError>(())
/// ```
pub fn handle_event(view: &mut ConfigsView, event: &Event) -> Result<Vec<Action>> {
    let _span = tracing::debug_span!("handle_event", event = ?event).entered();

    let actions = match event {
        Event::RouteChanged { path } => on_route_changed(view, path)?,
        Event::StoreReplied { ticket, reply } => on_store_replied(view, *ticket, reply)?,
        Event::DialogResolved { dialog, decision } => view.on_dialog_resolved(*dialog, decision),
        Event::TimerFired { timer } => view.on_timer(*timer),
        Event::ToolbarPressed { button } => view.on_toolbar(*button)?,
        Event::EditRequested => view.on_edit_requested()?,
        Event::SessionReset => on_session_reset(view),
    };

    tracing::trace!(actions = actions.len(), "event handled");
    Ok(actions)
}

fn on_route_changed(view: &mut ConfigsView, path: &str) -> Result<Vec<Action>> {
    let (handler, args) = match view.table.resolve(path) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::debug!(error = %e, "route ignored");
            return Ok(Vec::new());
        }
    };
    tracing::debug!(handler = handler.name(), ?args, "route resolved");

    view.current = Some(CurrentRoute {
        path: path.to_string(),
        handler,
        args: args.clone(),
    });

    let mut actions = Vec::new();
    let mode = if args.id().is_some() {
        ToolbarMode::SelectionActive
    } else {
        ToolbarMode::NoSelection
    };
    view.set_toolbar(mode, &mut actions);

    if view.pending_detail_differs(&args) {
        actions.extend(view.abandon_detail());
    }

    let handled = match handler {
        HandlerId::Load => load(view, &args)?,
        HandlerId::LoadFilter => load_filter(view, &args)?,
        HandlerId::LoadDelete => load_delete(view, &args)?,
        HandlerId::LoadConfigs => load_configs(view, &args)?,
        HandlerId::LoadNewConfigs => load_transient(view, &args, TransientFlag::New)?,
        HandlerId::LoadEditConfigs => load_transient(view, &args, TransientFlag::Edit)?,
    };
    actions.extend(handled);
    Ok(actions)
}

fn on_session_reset(view: &mut ConfigsView) -> Vec<Action> {
    let was_filtered = view.session.filter;
    view.session.reset();
    tracing::debug!(was_filtered, "session reset");

    if !was_filtered || view.current.is_none() {
        return Vec::new();
    }
    let args = view.current_args().without(TransientFlag::Filter.key());
    vec![view.search(&args)]
}

fn on_store_replied(view: &mut ConfigsView, ticket: Ticket, reply: &StoreReply) -> Result<Vec<Action>> {
    if view.owns_detail(ticket) {
        return view.on_detail_reply(reply);
    }
    if view.owns_search(ticket) {
        return Ok(view.on_search_reply(ticket, reply));
    }
    if view.owns_mutation(ticket) {
        return view.on_mutation_reply(reply);
    }

    tracing::debug!(%ticket, "stale reply discarded");
    Ok(Vec::new())
}

fn run_steps(
    view: &mut ConfigsView,
    args: &RouteArgs,
    steps: &[Step],
    classification: Classification,
) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    for step in steps {
        match step {
            Step::EnterList => {
                actions.push(view.search(args));
                actions.push(Action::SetTab { page: view.page.clone() });
                actions.push(Action::SetLayout { layout: Layout::Default });
            }
            Step::EnterLoad => {
                let inner = Reconciler::walk(Classification::NewPage, &LOAD);
                actions.extend(run_steps(view, args, &inner.fired, inner.classification)?);
            }
            Step::EnterFilterMode => {
                let entered = !view.session.filter;
                view.session.filter = true;
                if entered && !classification.is_new_page() {
                    actions.push(view.search(args));
                }
            }
            Step::LeaveFilterRoute => {
                let reduced = args.without(TransientFlag::Filter.key());
                let handler = if reduced.id().is_some() {
                    HandlerId::LoadConfigs
                } else {
                    HandlerId::Load
                };
                actions.push(Action::Navigate {
                    path: view.hash(handler, &reduced)?,
                });
            }
        }
    }
    Ok(actions)
}

fn load(view: &mut ConfigsView, args: &RouteArgs) -> Result<Vec<Action>> {
    let outcome = view.reconciler.reconcile(args, &LOAD);
    let mut actions = run_steps(view, args, &outcome.fired, outcome.classification)?;

    if args.id().is_none() {
        actions.extend(view.leave_detail());
    }
    Ok(actions)
}

fn load_filter(view: &mut ConfigsView, args: &RouteArgs) -> Result<Vec<Action>> {
    let outcome = view.reconciler.reconcile(args, &LOAD_FILTER);
    let mut actions = run_steps(view, args, &outcome.fired, outcome.classification)?;
    actions.push(ConfigsView::sync_list_filter(args));
    Ok(actions)
}

fn load_delete(view: &mut ConfigsView, args: &RouteArgs) -> Result<Vec<Action>> {
    let path = view.hash(HandlerId::Load, &args.only(&[NAME]))?;
    Ok(vec![view.search(args), Action::Navigate { path }])
}

fn load_configs(view: &mut ConfigsView, args: &RouteArgs) -> Result<Vec<Action>> {
    let outcome = view.reconciler.reconcile(args, &LOAD_CONFIGS);
    let mut actions = run_steps(view, args, &outcome.fired, outcome.classification)?;
    actions.extend(view.load_detail(args));
    Ok(actions)
}

fn load_transient(view: &mut ConfigsView, args: &RouteArgs, flag: TransientFlag) -> Result<Vec<Action>> {
    let outcome = view.reconciler.reconcile(args, &LOAD_TRANSIENT);
    let mut actions = run_steps(view, args, &outcome.fired, outcome.classification)?;
    if outcome.stopped {
        tracing::debug!(flag = flag.key(), "transient route entered as new page, stopping");
        actions.extend(view.abandon_detail());
        return Ok(actions);
    }

    if flag == TransientFlag::Edit {
        view.enter_edit_mode(args);
    }
    actions.extend(Canonicalizer::new(flag).strip_and_redirect(view, args)?);
    Ok(actions)
}
