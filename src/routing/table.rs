//! Ordered route table.
//!
//! Rules are tried in registration order and the first structurally matching
//! rule wins. Callers rely on that order: a flag route such as `deleted:` must be
//! registered ahead of any rule that could otherwise claim the same path.

use super::pattern::RoutePattern;
use crate::domain::error::{ConfviewError, Result};
use crate::domain::RouteArgs;
use std::fmt::Debug;

/// A registered pattern and the handler it dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule<H> {
    /// Rule name, used for diagnostics.
    pub name: String,
    pub pattern: RoutePattern,
    pub handler: H,
}

impl<H> RouteRule<H> {
    /// Compiles `pattern` into a rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is malformed.
    pub fn new(name: impl Into<String>, pattern: &str, handler: H) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            pattern: RoutePattern::parse(pattern)?,
            handler,
        })
    }
}

/// Route rules in the order they were registered.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    rules: Vec<RouteRule<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<H: Copy + PartialEq + Debug> RouteTable<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Later rules only see paths earlier rules rejected.
    pub fn register(&mut self, rule: RouteRule<H>) {
        tracing::trace!(rule = %rule.name, pattern = %rule.pattern, "route registered");
        self.rules.push(rule);
    }

    #[must_use]
    pub fn rules(&self) -> &[RouteRule<H>] {
        &self.rules
    }

    /// Resolves a route string to its handler and parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfviewError::Route`] if no rule matches.
    pub fn resolve(&self, path: &str) -> Result<(H, RouteArgs)> {
        self.rules
            .iter()
            .find_map(|rule| rule.pattern.match_path(path).map(|args| (rule.handler, args)))
            .ok_or_else(|| ConfviewError::Route(path.to_string()))
    }

    /// Returns the first rule dispatching to `handler`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfviewError::UnknownRule`] if no rule targets the handler.
    pub fn rule(&self, handler: H) -> Result<&RouteRule<H>> {
        self.rules
            .iter()
            .find(|rule| rule.handler == handler)
            .ok_or_else(|| ConfviewError::UnknownRule(format!("{handler:?}")))
    }

    /// Builds the route string that `handler`'s rule produces for `args`.
    ///
    /// # Errors
    ///
    /// Fails if the handler has no rule or a required argument is missing.
    pub fn hash(&self, handler: H, args: &RouteArgs) -> Result<String> {
        let rule = self.rule(handler)?;
        rule.pattern.render(&rule.name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Target {
        Confirm,
        ById,
        Fallback,
    }

    fn table() -> RouteTable<Target> {
        let mut table = RouteTable::new();
        table.register(RouteRule::new("confirm", "/items/:id/confirm:", Target::Confirm).unwrap());
        table.register(RouteRule::new("by_id", "/items/:id/confirm:?", Target::ById).unwrap());
        table.register(RouteRule::new("fallback", "/items/:id?", Target::Fallback).unwrap());
        table
    }

    #[test]
    fn first_registered_match_wins() {
        let table = table();
        let (target, args) = table.resolve("items/7/confirm:").unwrap();
        assert_eq!(target, Target::Confirm);
        assert_eq!(args.id(), Some("7"));

        let (target, _) = table.resolve("items/7").unwrap();
        assert_eq!(target, Target::ById);

        let (target, _) = table.resolve("items").unwrap();
        assert_eq!(target, Target::Fallback);
    }

    #[test]
    fn unmatched_route_is_reported() {
        let err = table().resolve("other/1").unwrap_err();
        assert!(matches!(err, ConfviewError::Route(path) if path == "other/1"));
    }

    #[test]
    fn hash_uses_the_handlers_rule() {
        let args = RouteArgs::new().with("id", "9").with("confirm", "");
        assert_eq!(table().hash(Target::Confirm, &args).unwrap(), "items/9/confirm:");
    }
}
