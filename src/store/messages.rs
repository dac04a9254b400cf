//! Request and reply types exchanged with the remote store.
//!
//! Every request the browser issues is tagged with a [`Ticket`]. The reply comes
//! back as an event carrying the same ticket, which is how late replies for
//! superseded requests are recognized and dropped.

use crate::domain::{Entity, EntitySummary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier tying an asynchronous outcome (store reply, timer expiry, dialog
/// decision) to the action that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a list column is filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filter_type", rename_all = "snake_case")]
pub enum ColumnFilter {
    /// Free text input.
    Input,
    /// Choice among fixed options.
    Select { options: Vec<String> },
}

/// Static description of one list column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    pub field: String,
    pub width: u32,
    pub filter: ColumnFilter,
    /// Rendered as a link to the row's detail view.
    #[serde(default)]
    pub link: bool,
}

/// A list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub page_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Filter mode: the list shows its filter inputs.
    pub filter: bool,
    pub columns: Vec<Column>,
}

/// Requests the browser sends to the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StoreRequest {
    /// Fetch one entity.
    Get { id: String },
    /// Create an entity from a name and a raw payload.
    Put { name: String, payload: String },
    /// Delete one entity.
    Delete { id: String },
    /// List entities.
    Search { query: SearchQuery },
}

/// Replies from the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum StoreReply {
    Entity { entity: Entity },
    Created { id: String },
    Deleted,
    Listing { rows: Vec<EntitySummary> },
    /// The store refused or failed the request.
    Error { message: String },
}

impl StoreReply {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Metadata block of a REST reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestMeta {
    /// Identifier of a created entity. Stores send it as a number or a string.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// The REST reply envelope: `{error, message, meta, data}`.
///
/// # Examples
///
/// ```
/// use confview::store::{RestEnvelope, StoreReply, StoreRequest};
///
/// let envelope: RestEnvelope = serde_json::from_str(r#"{"error": false, "meta": {"id": 42}}"#)?;
/// let request = StoreRequest::Put { name: "X".into(), payload: "<a/>".into() };
/// assert_eq!(envelope.into_reply(&request), StoreReply::Created { id: "42".into() });
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestEnvelope {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub meta: RestMeta,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl RestEnvelope {
    /// Interprets the envelope as the reply to `request`.
    #[must_use]
    pub fn into_reply(self, request: &StoreRequest) -> StoreReply {
        if self.error {
            return StoreReply::error(self.message.unwrap_or_else(|| "request failed".to_string()));
        }

        match request {
            StoreRequest::Get { .. } => self.data.map_or_else(
                || StoreReply::error("reply has no data"),
                |data| match serde_json::from_value::<Entity>(data) {
                    Ok(entity) => StoreReply::Entity { entity },
                    Err(e) => StoreReply::error(format!("malformed entity: {e}")),
                },
            ),
            StoreRequest::Put { .. } => match self.meta.id {
                Some(serde_json::Value::String(id)) => StoreReply::Created { id },
                Some(serde_json::Value::Number(id)) => StoreReply::Created { id: id.to_string() },
                _ => StoreReply::error("reply has no id"),
            },
            StoreRequest::Delete { .. } => StoreReply::Deleted,
            StoreRequest::Search { .. } => {
                let rows = self
                    .data
                    .map(serde_json::from_value::<Vec<EntitySummary>>)
                    .transpose();
                match rows {
                    Ok(rows) => StoreReply::Listing {
                        rows: rows.unwrap_or_default(),
                    },
                    Err(e) => StoreReply::error(format!("malformed listing: {e}")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_wins_over_payload() {
        let envelope: RestEnvelope =
            serde_json::from_str(r#"{"error": true, "message": "locked", "meta": {"id": 1}}"#).unwrap();
        let reply = envelope.into_reply(&StoreRequest::Delete { id: "1".into() });
        assert_eq!(reply, StoreReply::error("locked"));
    }

    #[test]
    fn string_ids_are_kept() {
        let envelope: RestEnvelope =
            serde_json::from_str(r#"{"meta": {"id": "DbCfg~7"}}"#).unwrap();
        let reply = envelope.into_reply(&StoreRequest::Put {
            name: "n".into(),
            payload: String::new(),
        });
        assert_eq!(reply, StoreReply::Created { id: "DbCfg~7".into() });
    }

    #[test]
    fn get_reply_decodes_entity() {
        let envelope: RestEnvelope = serde_json::from_str(
            r#"{"data": {"id": "3", "type": "ViewDefinition", "name": "v", "data": {"a": 1}}}"#,
        )
        .unwrap();
        let reply = envelope.into_reply(&StoreRequest::Get { id: "3".into() });
        assert!(matches!(reply, StoreReply::Entity { entity } if entity.kind == "ViewDefinition"));
    }
}
