//! Route argument mapping.
//!
//! [`RouteArgs`] is the flat key→value mapping produced by resolving a route
//! string. Absence of a key is distinct from an empty value: `configs/name:`
//! yields `name = ""`, while `configs` yields no `name` at all.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the primary entity identifier.
pub const ID: &str = "id";

/// Key of the list name filter.
pub const NAME: &str = "name";

/// Key of the list type filter.
pub const TYPE: &str = "type";

/// One-shot route flags that are meaningful for a single navigation step.
///
/// Transient flags never take part in page identity and are stripped from the
/// route once the handler that reacts to them has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransientFlag {
    /// An entity was just created.
    New,
    /// The edit affordance was clicked.
    Edit,
    /// Filter mode is being entered.
    Filter,
    /// An entity was just deleted.
    Deleted,
}

impl TransientFlag {
    /// Every transient flag, in route grammar order.
    pub const ALL: [Self; 4] = [Self::Filter, Self::Deleted, Self::New, Self::Edit];

    /// Route argument key for this flag.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Edit => "edit",
            Self::Filter => "filter",
            Self::Deleted => "deleted",
        }
    }

    /// Returns true if `key` names a transient flag.
    #[must_use]
    pub fn is_transient(key: &str) -> bool {
        Self::ALL.iter().any(|flag| flag.key() == key)
    }
}

/// Key→string mapping of route arguments with unique keys.
///
/// Keys are kept sorted, not in insertion order. Route strings are rendered in
/// the pattern's segment order, and identity comparison and `Debug` output
/// stay deterministic.
///
/// # Examples
///
/// ```
/// use confview::RouteArgs;
///
/// let args = RouteArgs::new().with("id", "42").with("name", "EUR*");
/// assert_eq!(args.id(), Some("42"));
/// assert!(!args.contains("type"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteArgs(BTreeMap<String, String>);

impl RouteArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style flag insert. Flags carry the value `"true"`.
    #[must_use]
    pub fn with_flag(self, flag: TransientFlag) -> Self {
        self.with(flag.key(), "true")
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn has_flag(&self, flag: TransientFlag) -> bool {
        self.contains(flag.key())
    }

    /// Primary entity identifier. An empty id counts as no id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get(ID).filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get(NAME)
    }

    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.get(TYPE)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy without `key`.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut reduced = self.clone();
        reduced.remove(key);
        reduced
    }

    /// Returns a copy holding only `keys` that are present.
    #[must_use]
    pub fn only(&self, keys: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Arguments that decide page identity: everything except the id and
    /// the transient flags.
    #[must_use]
    pub fn identity(&self) -> BTreeMap<&str, &str> {
        self.iter()
            .filter(|(k, _)| *k != ID && !TransientFlag::is_transient(k))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ID, NAME, TYPE};

    #[test]
    fn insertion_order_does_not_matter() {
        let a = RouteArgs::new().with(TYPE, "t").with(NAME, "n").with(ID, "1");
        let b = RouteArgs::new().with(ID, "1").with(NAME, "n").with(TYPE, "t");
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), format!("{b:?}"));
        assert_eq!(a.only(&[ID, NAME, TYPE]), b);
    }

    #[test]
    fn identity_ignores_id_and_flags() {
        let a = RouteArgs::new()
            .with("id", "1")
            .with("name", "x")
            .with_flag(TransientFlag::New);
        let b = RouteArgs::new().with("id", "2").with("name", "x");
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn empty_value_differs_from_absence() {
        let empty = RouteArgs::new().with("name", "");
        assert_ne!(empty.identity(), RouteArgs::new().identity());
        assert_eq!(empty.name(), Some(""));
    }

    #[test]
    fn empty_id_is_no_id() {
        assert_eq!(RouteArgs::new().with("id", "").id(), None);
    }

    #[test]
    fn only_keeps_requested_keys() {
        let args = RouteArgs::new().with("name", "a").with("type", "b").with("id", "3");
        let kept = args.only(&["name"]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.name(), Some("a"));
    }
}
