//! Configuration entity model.
//!
//! An [`Entity`] is a named configuration document owned by the remote store.
//! The browser never edits entities in place; it only caches the one currently
//! shown in the detail pane and asks the store for fresh copies when the route
//! changes.

use serde::{Deserialize, Serialize};

/// A configuration document as returned by the remote store.
///
/// `data` is an opaque structured payload. The browser only pretty-prints it
/// for the detail template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Entity {
    /// Creates an entity with the given identity and payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use confview::Entity;
    ///
    /// let entity = Entity::new("42", "ViewDefinition", "Equity view", serde_json::json!({}));
    /// assert_eq!(entity.kind, "ViewDefinition");
    /// ```
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            data,
        }
    }

    /// Returns the list-row projection of this entity.
    #[must_use]
    pub fn summary(&self) -> EntitySummary {
        EntitySummary {
            id: self.id.clone(),
            kind: self.kind.clone(),
            name: self.name.clone(),
        }
    }
}

/// One row of a list query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}
