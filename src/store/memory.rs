//! In-process remote store.
//!
//! Holds entities in memory with sequential numeric ids. Name queries use skim
//! fuzzy matching, with `*` treated as a wildcard to drop; type queries are
//! exact. Individual ids can be locked so that deleting them fails.

use crate::domain::{Entity, EntitySummary};
use crate::store::backend::RemoteStore;
use crate::store::messages::{SearchQuery, StoreReply, StoreRequest};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::{BTreeMap, HashSet};

/// Type recorded for payloads whose root element cannot be read.
const UNKNOWN_TYPE: &str = "Unknown";

/// In-memory [`RemoteStore`].
///
/// # Examples
///
/// ```
/// use confview::store::{MemoryStore, RemoteStore, StoreReply, StoreRequest};
///
/// let mut store = MemoryStore::new();
/// let reply = store.execute(&StoreRequest::Put {
///     name: "Equity view".into(),
///     payload: "<ViewDefinition/>".into(),
/// });
/// assert_eq!(reply, StoreReply::Created { id: "1".into() });
/// ```
pub struct MemoryStore {
    entities: BTreeMap<String, Entity>,
    locked: HashSet<String>,
    next_id: u64,
    matcher: SkimMatcherV2,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            locked: HashSet::new(),
            next_id: 1,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Creates a store holding `entities`. Later ids continue after the
    /// largest numeric id seen.
    #[must_use]
    pub fn with_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut store = Self::new();
        for entity in entities {
            store.insert(entity);
        }
        store
    }

    /// Inserts or replaces an entity under its own id.
    pub fn insert(&mut self, entity: Entity) {
        if let Ok(numeric) = entity.id.parse::<u64>() {
            self.next_id = self.next_id.max(numeric.saturating_add(1));
        }
        self.entities.insert(entity.id.clone(), entity);
    }

    /// Makes deletes of `id` fail with `locked`.
    pub fn lock(&mut self, id: impl Into<String>) {
        self.locked.insert(id.into());
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn search(&self, query: &SearchQuery) -> Vec<EntitySummary> {
        let pattern = query
            .name
            .as_deref()
            .map(|name| name.replace('*', ""))
            .filter(|name| !name.trim().is_empty());
        let kind = query.kind.as_deref().filter(|kind| !kind.is_empty());

        let mut rows: Vec<EntitySummary> = self
            .entities
            .values()
            .filter(|entity| kind.map_or(true, |kind| entity.kind == kind))
            .filter(|entity| {
                pattern.as_deref().map_or(true, |pattern| {
                    self.matcher.fuzzy_match(&entity.name, pattern).is_some()
                })
            })
            .map(Entity::summary)
            .collect();

        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        rows
    }
}

impl RemoteStore for MemoryStore {
    fn execute(&mut self, request: &StoreRequest) -> StoreReply {
        let _span = tracing::debug_span!("memory_store", request = ?request).entered();

        match request {
            StoreRequest::Get { id } => self.entities.get(id).cloned().map_or_else(
                || StoreReply::error(format!("configuration {id} not found")),
                |entity| StoreReply::Entity { entity },
            ),
            StoreRequest::Put { name, payload } => {
                if name.trim().is_empty() {
                    return StoreReply::error("name is required");
                }
                let id = self.next_id.to_string();
                self.next_id += 1;
                let entity = Entity::new(
                    id.clone(),
                    root_element(payload).unwrap_or(UNKNOWN_TYPE),
                    name.clone(),
                    serde_json::json!({ "xml": payload }),
                );
                self.entities.insert(id.clone(), entity);
                tracing::debug!(id = %id, "entity created");
                StoreReply::Created { id }
            }
            StoreRequest::Delete { id } => {
                if self.locked.contains(id) {
                    return StoreReply::error("locked");
                }
                match self.entities.remove(id) {
                    Some(_) => StoreReply::Deleted,
                    None => StoreReply::error(format!("configuration {id} not found")),
                }
            }
            StoreRequest::Search { query } => StoreReply::Listing {
                rows: self.search(query),
            },
        }
    }
}

/// Name of the first element in an XML payload, skipping declarations.
fn root_element(payload: &str) -> Option<&str> {
    let mut rest = payload;
    loop {
        let start = rest.find('<')?;
        rest = &rest[start + 1..];
        if rest.starts_with('?') || rest.starts_with('!') {
            continue;
        }
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..end];
        return (!name.is_empty()).then_some(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(name: Option<&str>, kind: Option<&str>) -> StoreRequest {
        StoreRequest::Search {
            query: SearchQuery {
                page_type: "configs".into(),
                name: name.map(String::from),
                kind: kind.map(String::from),
                filter: false,
                columns: vec![],
            },
        }
    }

    fn seeded() -> MemoryStore {
        MemoryStore::with_entities([
            Entity::new("1", "ViewDefinition", "Equity view", serde_json::json!({})),
            Entity::new("2", "YieldCurveDefinition", "USD curve", serde_json::json!({})),
            Entity::new("7", "ViewDefinition", "FX view", serde_json::json!({})),
        ])
    }

    fn names(reply: StoreReply) -> Vec<String> {
        match reply {
            StoreReply::Listing { rows } => rows.into_iter().map(|row| row.name).collect(),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn ids_continue_after_seeded_entities() {
        let mut store = seeded();
        let reply = store.execute(&StoreRequest::Put {
            name: "New".into(),
            payload: "<?xml version=\"1.0\"?><CurrencyMatrix a=\"b\"/>".into(),
        });
        assert_eq!(reply, StoreReply::Created { id: "8".into() });
        assert_eq!(store.get("8").map(|e| e.kind.as_str()), Some("CurrencyMatrix"));
    }

    #[test]
    fn search_filters_by_type_and_fuzzy_name() {
        let mut store = seeded();
        assert_eq!(names(store.execute(&query(None, Some("ViewDefinition")))), ["Equity view", "FX view"]);
        assert_eq!(names(store.execute(&query(Some("usd*"), None))), ["USD curve"]);
        assert_eq!(names(store.execute(&query(Some("*"), None))).len(), 3);
    }

    #[test]
    fn locked_entities_cannot_be_deleted() {
        let mut store = seeded();
        store.lock("1");
        assert_eq!(store.execute(&StoreRequest::Delete { id: "1".into() }), StoreReply::error("locked"));
        assert_eq!(store.execute(&StoreRequest::Delete { id: "2".into() }), StoreReply::Deleted);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn put_requires_a_name() {
        let mut store = MemoryStore::new();
        let reply = store.execute(&StoreRequest::Put {
            name: " ".into(),
            payload: "<a/>".into(),
        });
        assert!(matches!(reply, StoreReply::Error { .. }));
        assert!(store.is_empty());
    }
}
