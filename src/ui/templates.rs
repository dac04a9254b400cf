//! Template identifiers and the data handed to the renderer.
//!
//! The browser does not know how templates are drawn. It only decides which
//! template to show and builds the data object for it.

use crate::domain::error::{ConfviewError, Result};
use crate::domain::Entity;
use crate::history::{HistoryList, HistoryStore};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Templates the browser renders into the detail pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    /// Landing page shown when no entity is selected.
    DefaultPage,
    /// One entity.
    Detail,
}

/// Pane layouts the browser can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// List and detail side by side.
    Default,
}

/// Data for the landing page: the page label and the three history lists,
/// each falling back to a placeholder sentence when empty.
///
/// # Examples
///
/// ```
/// use confview::history::JsonHistory;
/// use confview::ui::templates::default_page_data;
///
/// let data = default_page_data("configs", &JsonHistory::in_memory(10));
/// assert_eq!(data["name"], "Configs");
/// assert_eq!(data["recent_list"], "no recently viewed configs");
/// ```
pub fn default_page_data(page: &str, history: &dyn HistoryStore) -> Value {
    let list = |list: HistoryList, fallback: String| {
        history.rendered_list(&list.key(page)).unwrap_or(fallback)
    };

    json!({
        "name": page_label(page),
        "favorites_list": list(HistoryList::Favorites, format!("no favorited {page}")),
        "recent_list": list(HistoryList::Recent, format!("no recently viewed {page}")),
        "new_list": list(HistoryList::New, format!("no new {page}")),
    })
}

/// Data for the detail template.
///
/// Structured payloads are pretty-printed with four-space indentation; string
/// payloads (raw documents) are passed through.
///
/// # Errors
///
/// Fails only if the payload cannot be serialized.
pub fn detail_data(entity: &Entity, editable: bool, favorited: bool) -> Result<Value> {
    let mut data = json!({
        "id": entity.id,
        "name": entity.name,
        "type": entity.kind,
        "editable": editable,
        "favorited": favorited,
    });

    let config_data = match &entity.data {
        Value::Null => None,
        Value::String(raw) => Some(raw.clone()),
        structured => Some(pretty(structured)?),
    };
    if let (Some(config_data), Some(object)) = (config_data, data.as_object_mut()) {
        object.insert("configData".to_string(), Value::String(config_data));
    }

    Ok(data)
}

/// `configs` → `Configs`.
#[must_use]
pub fn page_label(page: &str) -> String {
    let mut chars = page.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn pretty(value: &Value) -> Result<String> {
    use serde::Serialize as _;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| ConfviewError::Config(format!("payload is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryEntry, JsonHistory};

    #[test]
    fn structured_payload_uses_four_space_indent() {
        let entity = Entity::new("1", "ViewDefinition", "v", json!({"a": 1}));
        let data = detail_data(&entity, false, true).unwrap();
        assert_eq!(data["configData"], "{\n    \"a\": 1\n}");
        assert_eq!(data["favorited"], true);
    }

    #[test]
    fn missing_payload_has_no_config_data() {
        let entity = Entity::new("1", "ViewDefinition", "v", Value::Null);
        let data = detail_data(&entity, true, false).unwrap();
        assert!(data.get("configData").is_none());
        assert_eq!(data["editable"], true);
    }

    #[test]
    fn default_page_uses_history_when_present() {
        let mut history = JsonHistory::in_memory(10);
        history
            .put(&HistoryList::New.key("configs"), HistoryEntry::new("n", "configs/3"))
            .unwrap();
        let data = default_page_data("configs", &history);
        assert_eq!(data["new_list"], "n <configs/3>");
        assert_eq!(data["favorites_list"], "no favorited configs");
    }

    #[test]
    fn label_capitalizes_first_letter() {
        assert_eq!(page_label("configs"), "Configs");
        assert_eq!(page_label(""), "");
    }
}
