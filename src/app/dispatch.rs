//! Toolbar actions and the create/delete dialog flows.
//!
//! Only one dialog is tracked at a time. A dialog accepts one decision per
//! prompt: once confirmed it waits for the store, and a failed create re-arms
//! it for another attempt.

use super::state::{ConfigsView, DialogPurpose, DialogState, PendingDialog};
use super::Action;
use crate::domain::error::Result;
use crate::domain::{TransientFlag, ID, NAME, TYPE};
use crate::history::{HistoryEntry, HistoryList};
use crate::routing::HandlerId;
use crate::store::{StoreReply, StoreRequest, Ticket};
use crate::ui::{DialogDecision, DialogField, DialogSpec, ToolbarButton, ToolbarMode};
use std::collections::BTreeMap;

fn create_dialog() -> DialogSpec {
    DialogSpec::Input {
        title: "Add configuration".to_string(),
        fields: vec![DialogField::input("name", "Name"), DialogField::textarea("xml", "XML")],
        confirm_label: "Ok".to_string(),
    }
}

fn delete_dialog() -> DialogSpec {
    DialogSpec::Confirm {
        title: "Delete configuration?".to_string(),
        message: "Are you sure you want to permanently delete this configuration?".to_string(),
        confirm_label: "Delete".to_string(),
    }
}

impl ConfigsView {
    pub(crate) fn on_toolbar(&mut self, button: ToolbarButton) -> Result<Vec<Action>> {
        let mode = self.toolbar.unwrap_or(ToolbarMode::NoSelection);
        if !mode.is_enabled(button) {
            tracing::debug!(?button, ?mode, "press on disabled button ignored");
            return Ok(Vec::new());
        }

        match button {
            ToolbarButton::New => Ok(self.open_dialog(DialogPurpose::Create)),
            ToolbarButton::Delete => Ok(self.open_dialog(DialogPurpose::Delete)),
            ToolbarButton::Up => {
                let path = self.hash(HandlerId::Load, &self.current_args().only(&[NAME, TYPE]))?;
                Ok(vec![Action::Navigate { path }])
            }
            ToolbarButton::Edit => self.on_edit_requested(),
            ToolbarButton::Favorites => self.toggle_favorite(),
        }
    }

    /// Redirects the displayed entity to its `edit:` route.
    pub(crate) fn on_edit_requested(&mut self) -> Result<Vec<Action>> {
        let args = self.current_args();
        if args.id().is_none() {
            tracing::debug!("edit requested without a selected entity");
            return Ok(Vec::new());
        }

        let args = args.only(&[ID, NAME, TYPE]).with_flag(TransientFlag::Edit);
        let path = self.hash(HandlerId::LoadEditConfigs, &args)?;
        Ok(vec![Action::Navigate { path }])
    }

    fn toggle_favorite(&mut self) -> Result<Vec<Action>> {
        let Some((entity, args)) = self.detail.displayed.as_ref() else {
            tracing::debug!("favorites pressed without a displayed entity");
            return Ok(Vec::new());
        };
        let name = entity.name.clone();
        let path = self.detail_path(args)?;
        let key = HistoryList::Favorites.key(&self.page);

        let favorited = if self.history.contains(&key, &path) {
            self.history.remove(&key, &path)?;
            false
        } else {
            self.history.put(&key, HistoryEntry::new(name, path))?;
            true
        };
        tracing::debug!(favorited, "favorite toggled");
        Ok(vec![Action::FavoriteChanged { favorited }])
    }

    fn open_dialog(&mut self, purpose: DialogPurpose) -> Vec<Action> {
        if let Some(pending) = &self.dialog {
            tracing::debug!(dialog = %pending.ticket, "dialog already open, press ignored");
            return Vec::new();
        }

        let ticket = self.issue();
        self.dialog = Some(PendingDialog {
            ticket,
            purpose,
            state: DialogState::Prompting,
        });
        let spec = match purpose {
            DialogPurpose::Create => create_dialog(),
            DialogPurpose::Delete => delete_dialog(),
        };
        vec![Action::OpenDialog { dialog: ticket, spec }]
    }

    pub(crate) fn on_dialog_resolved(&mut self, dialog: Ticket, decision: &DialogDecision) -> Vec<Action> {
        let prompting = self.dialog.as_ref().is_some_and(|pending| {
            pending.ticket == dialog && pending.state == DialogState::Prompting
        });
        if !prompting {
            tracing::debug!(%dialog, "resolution for unknown or resolved dialog ignored");
            return Vec::new();
        }

        match decision {
            DialogDecision::Cancelled => {
                self.dialog = None;
                vec![Action::CloseDialog { dialog }]
            }
            DialogDecision::Confirmed { fields } => self.confirm(dialog, fields),
        }
    }

    fn confirm(&mut self, dialog: Ticket, fields: &BTreeMap<String, String>) -> Vec<Action> {
        let Some(purpose) = self.dialog.as_ref().map(|pending| pending.purpose) else {
            return Vec::new();
        };

        let (request, name, mut actions) = match purpose {
            DialogPurpose::Create => {
                let name = fields.get("name").cloned().unwrap_or_default();
                let payload = fields.get("xml").cloned().unwrap_or_default();
                let request = StoreRequest::Put {
                    name: name.clone(),
                    payload,
                };
                (request, name, Vec::new())
            }
            DialogPurpose::Delete => {
                let close = vec![Action::CloseDialog { dialog }];
                let Some(id) = self.current_args().id().map(str::to_string) else {
                    tracing::debug!("delete confirmed without a selected entity");
                    self.dialog = None;
                    return close;
                };
                (StoreRequest::Delete { id }, String::new(), close)
            }
        };

        let ticket = self.issue();
        if let Some(pending) = self.dialog.as_mut() {
            pending.state = DialogState::Awaiting { request: ticket, name };
        }
        tracing::debug!(%dialog, %ticket, ?purpose, "dialog confirmed");
        actions.push(Action::Store { ticket, request });
        actions
    }

    pub(crate) fn owns_mutation(&self, ticket: Ticket) -> bool {
        self.dialog.as_ref().is_some_and(|pending| {
            matches!(&pending.state, DialogState::Awaiting { request, .. } if *request == ticket)
        })
    }

    pub(crate) fn on_mutation_reply(&mut self, reply: &StoreReply) -> Result<Vec<Action>> {
        let Some(pending) = self.dialog.take() else {
            return Ok(Vec::new());
        };
        let DialogState::Awaiting { name, .. } = pending.state.clone() else {
            self.dialog = Some(pending);
            return Ok(Vec::new());
        };

        match (pending.purpose, reply) {
            (DialogPurpose::Create, StoreReply::Created { id }) => self.on_created(pending.ticket, &name, id),
            (DialogPurpose::Create, other) => {
                let message = error_message(other);
                tracing::warn!(dialog = %pending.ticket, error = %message, "create failed");
                let dialog = pending.ticket;
                self.dialog = Some(PendingDialog {
                    state: DialogState::Prompting,
                    ..pending
                });
                Ok(vec![Action::ShowDialogError { dialog, message }])
            }
            (DialogPurpose::Delete, StoreReply::Deleted) => {
                let args = self.current_args().with_flag(TransientFlag::Deleted);
                let path = self.hash(HandlerId::LoadDelete, &args)?;
                tracing::debug!(path = %path, "entity deleted");
                Ok(vec![Action::Navigate { path }])
            }
            (DialogPurpose::Delete, other) => {
                let message = error_message(other);
                tracing::warn!(error = %message, "delete failed");
                let dialog = self.issue();
                Ok(vec![Action::OpenDialog {
                    dialog,
                    spec: DialogSpec::Error { message },
                }])
            }
        }
    }

    fn on_created(&mut self, dialog: Ticket, name: &str, id: &str) -> Result<Vec<Action>> {
        let args = self.current_args().with(ID, id);
        let history_value = self.detail_path(&args)?;
        let path = self.hash(HandlerId::LoadNewConfigs, &args.with_flag(TransientFlag::New))?;

        let new = HistoryList::New.key(&self.page);
        if let Err(e) = self.history.put(&new, HistoryEntry::new(name, history_value)) {
            tracing::warn!(error = %e, "failed to record new history");
        }
        tracing::debug!(id = %id, path = %path, "entity created");

        Ok(vec![Action::CloseDialog { dialog }, Action::Navigate { path }])
    }
}

fn error_message(reply: &StoreReply) -> String {
    match reply {
        StoreReply::Error { message } => message.clone(),
        other => format!("unexpected reply: {other:?}"),
    }
}
