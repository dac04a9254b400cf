//! Detail loading with stale-reply suppression and loading escalation.
//!
//! A detail load issues `get(id)`, shows "loading..." and arms a timer keyed by
//! the request ticket. If the timer fires while the request is still the
//! pending one, the message escalates to "still loading...". The reply cancels
//! the timer either way.

use super::modes::DetailMode;
use super::state::{ConfigsView, PendingDetail};
use super::Action;
use crate::domain::error::Result;
use crate::domain::{Entity, RouteArgs};
use crate::history::{HistoryEntry, HistoryList};
use crate::store::{StoreReply, StoreRequest, Ticket};
use crate::ui::templates::{default_page_data, detail_data};
use crate::ui::Template;

pub const LOADING: &str = "loading...";
pub const STILL_LOADING: &str = "still loading...";

impl ConfigsView {
    /// Starts loading the entity named by `args`.
    pub(crate) fn load_detail(&mut self, args: &RouteArgs) -> Vec<Action> {
        let Some(id) = args.id() else {
            tracing::debug!("detail load without id skipped");
            return Vec::new();
        };
        let id = id.to_string();

        let mut actions = Vec::new();
        if let Some(previous) = self.detail.pending.take() {
            tracing::debug!(ticket = %previous.ticket, "detail load superseded");
            actions.push(Action::CancelTimer { timer: previous.ticket });
        }

        if !self.detail.mode.is_editing(&id) {
            self.detail.mode = DetailMode::Viewing;
        }
        let editable = self.detail.mode.is_editing(&id);

        let ticket = self.issue();
        self.detail.pending = Some(PendingDetail {
            ticket,
            args: args.clone(),
            editable,
            escalated: false,
        });
        tracing::debug!(%ticket, id = %id, editable, "detail load issued");

        actions.push(Action::Store {
            ticket,
            request: StoreRequest::Get { id },
        });
        actions.push(Action::ShowMessage {
            text: LOADING.to_string(),
        });
        actions.push(Action::ScheduleTimer {
            timer: ticket,
            delay_ms: self.loading_delay_ms,
        });
        actions
    }

    /// Drops the displayed entity and any in-flight load, then renders the
    /// landing page.
    pub(crate) fn leave_detail(&mut self) -> Vec<Action> {
        let mut actions = self.abandon_detail();
        self.detail.displayed = None;
        self.detail.mode = DetailMode::Viewing;

        actions.push(Action::Render {
            template: Template::DefaultPage,
            data: default_page_data(&self.page, self.history.as_ref()),
        });
        actions
    }

    /// Forgets the in-flight load, if any, so its reply is discarded.
    pub(crate) fn abandon_detail(&mut self) -> Vec<Action> {
        let Some(pending) = self.detail.pending.take() else {
            return Vec::new();
        };
        tracing::debug!(ticket = %pending.ticket, "detail load abandoned");
        vec![Action::CancelTimer { timer: pending.ticket }, Action::ClearMessage]
    }

    /// True when an in-flight load targets an id other than the one in `args`.
    pub(crate) fn pending_detail_differs(&self, args: &RouteArgs) -> bool {
        self.detail
            .pending
            .as_ref()
            .is_some_and(|pending| pending.args.id() != args.id())
    }

    /// Marks the entity named by `args` editable for its next load.
    pub(crate) fn enter_edit_mode(&mut self, args: &RouteArgs) {
        if let Some(id) = args.id() {
            self.detail.mode = DetailMode::Editing { id: id.to_string() };
        }
    }

    pub(crate) fn owns_detail(&self, ticket: Ticket) -> bool {
        self.detail
            .pending
            .as_ref()
            .is_some_and(|pending| pending.ticket == ticket)
    }

    pub(crate) fn on_detail_reply(&mut self, reply: &StoreReply) -> Result<Vec<Action>> {
        let Some(pending) = self.detail.pending.take() else {
            return Ok(Vec::new());
        };

        let mut actions = vec![Action::CancelTimer { timer: pending.ticket }];
        match reply {
            StoreReply::Entity { entity } => {
                tracing::debug!(ticket = %pending.ticket, id = %entity.id, "detail resolved");
                actions.extend(self.show_entity(entity, pending.args, pending.editable)?);
            }
            StoreReply::Error { message } => {
                tracing::warn!(ticket = %pending.ticket, error = %message, "detail load failed");
                actions.push(Action::ClearMessage);
                actions.push(Action::ShowError {
                    message: message.clone(),
                });
            }
            other => {
                tracing::warn!(ticket = %pending.ticket, reply = ?other, "unexpected reply to detail load");
                actions.push(Action::ClearMessage);
                actions.push(Action::ShowError {
                    message: "unexpected reply to detail load".to_string(),
                });
            }
        }
        Ok(actions)
    }

    fn show_entity(&mut self, entity: &Entity, args: RouteArgs, editable: bool) -> Result<Vec<Action>> {
        let path = self.detail_path(&args)?;

        let recent = HistoryList::Recent.key(&self.page);
        if let Err(e) = self.history.put(&recent, HistoryEntry::new(&entity.name, &path)) {
            tracing::warn!(error = %e, "failed to record recent history");
        }
        let favorited = self
            .history
            .contains(&HistoryList::Favorites.key(&self.page), &path);

        let data = detail_data(entity, editable, favorited)?;
        self.detail.displayed = Some((entity.clone(), args));

        Ok(vec![
            Action::Render {
                template: Template::Detail,
                data,
            },
            Action::FavoriteChanged { favorited },
            Action::ClearMessage,
            Action::EnableEditAffordance,
        ])
    }

    pub(crate) fn on_timer(&mut self, timer: Ticket) -> Vec<Action> {
        match self.detail.pending.as_mut() {
            Some(pending) if pending.ticket == timer && !pending.escalated => {
                pending.escalated = true;
                tracing::debug!(%timer, "detail load escalated");
                vec![Action::ShowMessage {
                    text: STILL_LOADING.to_string(),
                }]
            }
            _ => {
                tracing::debug!(%timer, "inactive timer ignored");
                Vec::new()
            }
        }
    }
}
