//! Action execution loop.
//!
//! The [`Driver`] plays the host: it feeds events to the view, executes the
//! returned actions against a [`RemoteStore`] and a [`Surface`], and loops
//! navigations and store replies back in as events until the queue is empty.
//!
//! Timers never fire on their own; callers decide when time has passed with
//! [`Driver::fire_timers`]. Store replies can be held back with
//! [`Driver::deferred`] and released in any order, which is how stale-reply
//! handling is exercised.

use crate::app::{handle_event, Action, ConfigsView, Event};
use crate::domain::error::Result;
use crate::store::{RemoteStore, StoreRequest, Ticket};
use crate::ui::{DialogDecision, DialogSpec, Surface, ToolbarButton};
use std::collections::{BTreeMap, VecDeque};

/// Runs a [`ConfigsView`] against concrete collaborators.
pub struct Driver<S: RemoteStore, U: Surface> {
    view: ConfigsView,
    store: S,
    surface: U,
    queue: VecDeque<Event>,
    defer_replies: bool,
    in_flight: BTreeMap<Ticket, StoreRequest>,
    timers: BTreeMap<Ticket, u64>,
    dialogs: BTreeMap<Ticket, DialogSpec>,
    location: Option<String>,
    message: Option<String>,
    log: Vec<Action>,
}

impl<S: RemoteStore, U: Surface> Driver<S, U> {
    pub fn new(view: ConfigsView, store: S, surface: U) -> Self {
        Self {
            view,
            store,
            surface,
            queue: VecDeque::new(),
            defer_replies: false,
            in_flight: BTreeMap::new(),
            timers: BTreeMap::new(),
            dialogs: BTreeMap::new(),
            location: None,
            message: None,
            log: Vec::new(),
        }
    }

    /// Holds store requests until [`release`](Self::release) is called.
    #[must_use]
    pub fn deferred(mut self) -> Self {
        self.defer_replies = true;
        self
    }

    pub fn set_deferred(&mut self, defer: bool) {
        self.defer_replies = defer;
    }

    /// Changes the location and processes everything that follows from it.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn navigate(&mut self, path: impl Into<String>) -> Result<()> {
        let path = path.into();
        self.location = Some(path.clone());
        self.dispatch(Event::RouteChanged { path })
    }

    /// Queues `event` and runs until no events are left.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`]. Events still queued when an
    /// error occurs are dropped.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        self.queue.push_back(event);

        while let Some(event) = self.queue.pop_front() {
            let actions = match handle_event(&mut self.view, &event) {
                Ok(actions) => actions,
                Err(e) => {
                    self.queue.clear();
                    return Err(e);
                }
            };
            for action in actions {
                self.execute(action);
            }
        }
        Ok(())
    }

    fn execute(&mut self, action: Action) {
        tracing::trace!(action = action.kind(), "executing action");
        self.surface.apply(&action);

        match &action {
            Action::Navigate { path } => {
                self.location = Some(path.clone());
                self.queue.push_back(Event::RouteChanged { path: path.clone() });
            }
            Action::Store { ticket, request } => {
                if self.defer_replies {
                    self.in_flight.insert(*ticket, request.clone());
                } else {
                    let reply = self.store.execute(request);
                    self.queue.push_back(Event::StoreReplied {
                        ticket: *ticket,
                        reply,
                    });
                }
            }
            Action::ScheduleTimer { timer, delay_ms } => {
                self.timers.insert(*timer, *delay_ms);
            }
            Action::CancelTimer { timer } => {
                self.timers.remove(timer);
            }
            Action::OpenDialog { dialog, spec } => {
                self.dialogs.insert(*dialog, spec.clone());
            }
            Action::CloseDialog { dialog } => {
                self.dialogs.remove(dialog);
            }
            Action::ShowMessage { text } => self.message = Some(text.clone()),
            Action::ClearMessage => self.message = None,
            _ => {}
        }

        self.log.push(action);
    }

    /// Executes a held request and delivers its reply.
    ///
    /// Returns `false` if no request with `ticket` is held.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn release(&mut self, ticket: Ticket) -> Result<bool> {
        let Some(request) = self.in_flight.remove(&ticket) else {
            return Ok(false);
        };
        let reply = self.store.execute(&request);
        self.dispatch(Event::StoreReplied { ticket, reply })?;
        Ok(true)
    }

    /// Releases every held request in ticket order, including requests issued
    /// while releasing.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn release_all(&mut self) -> Result<()> {
        while let Some(ticket) = self.in_flight.keys().next().copied() {
            self.release(ticket)?;
        }
        Ok(())
    }

    /// Fires every armed timer, as if their delays had all elapsed.
    ///
    /// Returns the number of timers fired.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn fire_timers(&mut self) -> Result<usize> {
        let timers = std::mem::take(&mut self.timers);
        for timer in timers.keys() {
            self.dispatch(Event::TimerFired { timer: *timer })?;
        }
        Ok(timers.len())
    }

    /// Delivers the user's decision on an open dialog.
    ///
    /// Cancelling closes the dialog, as does acknowledging an error dialog.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn resolve_dialog(&mut self, dialog: Ticket, decision: DialogDecision) -> Result<()> {
        let closes = matches!(decision, DialogDecision::Cancelled)
            || matches!(self.dialogs.get(&dialog), Some(DialogSpec::Error { .. }));
        if closes {
            self.dialogs.remove(&dialog);
        }
        self.dispatch(Event::DialogResolved { dialog, decision })
    }

    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn press(&mut self, button: ToolbarButton) -> Result<()> {
        self.dispatch(Event::ToolbarPressed { button })
    }

    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn request_edit(&mut self) -> Result<()> {
        self.dispatch(Event::EditRequested)
    }

    #[must_use]
    pub const fn view(&self) -> &ConfigsView {
        &self.view
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub const fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }

    /// Location after the last navigation.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Status message currently shown.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Tickets of held store requests, in ticket order.
    #[must_use]
    pub fn pending_tickets(&self) -> Vec<Ticket> {
        self.in_flight.keys().copied().collect()
    }

    #[must_use]
    pub fn armed_timers(&self) -> Vec<Ticket> {
        self.timers.keys().copied().collect()
    }

    #[must_use]
    pub const fn open_dialogs(&self) -> &BTreeMap<Ticket, DialogSpec> {
        &self.dialogs
    }

    /// Takes every action executed since the last call.
    pub fn drain_log(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;
    use crate::history::JsonHistory;
    use crate::store::MemoryStore;
    use crate::ui::RecordingSurface;
    use crate::Config;
    use serde_json::json;

    fn driver() -> Driver<MemoryStore, RecordingSurface> {
        let view = ConfigsView::new(&Config::default(), Box::new(JsonHistory::in_memory(10))).unwrap();
        let store = MemoryStore::with_entities([Entity::new("1", "ViewDefinition", "one", json!({}))]);
        Driver::new(view, store, RecordingSurface::new())
    }

    #[test]
    fn replies_loop_back_immediately() {
        let mut driver = driver();
        driver.navigate("configs/1").unwrap();
        assert_eq!(driver.view().displayed().map(|e| e.name.as_str()), Some("one"));
        assert!(driver.armed_timers().is_empty());
        assert_eq!(driver.message(), None);
        assert_eq!(driver.surface().actions.len(), driver.drain_log().len());
    }

    #[test]
    fn deferred_requests_wait_for_release() {
        let mut driver = driver().deferred();
        driver.navigate("configs/1").unwrap();
        assert_eq!(driver.pending_tickets().len(), 2);
        assert_eq!(driver.message(), Some("loading..."));

        driver.release_all().unwrap();
        assert!(driver.pending_tickets().is_empty());
        assert!(driver.view().displayed().is_some());
    }

    #[test]
    fn release_of_unknown_ticket_is_false() {
        let mut driver = driver();
        assert!(!driver.release(Ticket(77)).unwrap());
    }
}
