//! Route-to-route state reconciliation.
//!
//! The [`Reconciler`] remembers the arguments of the previous navigation and
//! classifies each new one as a new page or a continuation. Handlers describe
//! their work as an ordered list of [`Condition`]s; reconciling returns the
//! steps that fired and whether a stopping condition ended the walk early.
//!
//! The reconciler never performs the steps itself. Steps are plain values that
//! the calling handler interprets, which keeps this module free of any view
//! state.

use super::modes::Classification;
use crate::domain::RouteArgs;

/// When a condition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Only when the navigation is classified as a new page.
    NewPageOnly,
    /// On every navigation.
    Always,
}

impl Trigger {
    const fn matches(self, classification: Classification) -> bool {
        match self {
            Self::NewPageOnly => classification.is_new_page(),
            Self::Always => true,
        }
    }
}

/// One entry of a handler's condition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition<S> {
    pub when: Trigger,
    pub step: S,
    /// A fired stopping condition ends the walk and the handler returns.
    pub stop: bool,
}

impl<S: Copy> Condition<S> {
    #[must_use]
    pub const fn new_page(step: S) -> Self {
        Self {
            when: Trigger::NewPageOnly,
            step,
            stop: false,
        }
    }

    #[must_use]
    pub const fn always(step: S) -> Self {
        Self {
            when: Trigger::Always,
            step,
            stop: false,
        }
    }

    #[must_use]
    pub const fn stopping(self) -> Self {
        Self {
            when: self.when,
            step: self.step,
            stop: true,
        }
    }
}

/// Outcome of walking a condition list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<S> {
    pub classification: Classification,
    /// Steps whose condition fired, in declaration order.
    pub fired: Vec<S>,
    /// True if a fired stopping condition ended the walk.
    pub stopped: bool,
}

/// Compares consecutive navigations.
///
/// # Examples
///
/// ```
/// use confview::app::modes::Classification;
/// use confview::app::reconciler::{Condition, Reconciler};
/// use confview::RouteArgs;
///
/// let conditions = [Condition::new_page("search")];
/// let mut reconciler = Reconciler::new();
///
/// let first = reconciler.reconcile(&RouteArgs::new().with("id", "1"), &conditions);
/// assert_eq!(first.classification, Classification::NewPage);
/// assert_eq!(first.fired, ["search"]);
///
/// let second = reconciler.reconcile(&RouteArgs::new().with("id", "2"), &conditions);
/// assert_eq!(second.classification, Classification::Continuation);
/// assert!(second.fired.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    previous: Option<RouteArgs>,
}

impl Reconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `args` against the previous navigation without recording it.
    #[must_use]
    pub fn classify(&self, args: &RouteArgs) -> Classification {
        match &self.previous {
            Some(previous) if previous.identity() == args.identity() => Classification::Continuation,
            _ => Classification::NewPage,
        }
    }

    /// Walks `conditions` for an already known classification.
    ///
    /// Used when one handler enters another: the outer call has classified the
    /// navigation, and the inner handler's steps run against that result.
    #[must_use]
    pub fn walk<S: Copy>(classification: Classification, conditions: &[Condition<S>]) -> Reconciliation<S> {
        let mut fired = Vec::new();
        let mut stopped = false;

        for condition in conditions {
            if !condition.when.matches(classification) {
                continue;
            }
            fired.push(condition.step);
            if condition.stop {
                stopped = true;
                break;
            }
        }

        Reconciliation {
            classification,
            fired,
            stopped,
        }
    }

    /// Classifies `args`, walks `conditions` and records `args` as the previous
    /// navigation.
    pub fn reconcile<S: Copy>(&mut self, args: &RouteArgs, conditions: &[Condition<S>]) -> Reconciliation<S> {
        let classification = self.classify(args);
        let outcome = Self::walk(classification, conditions);
        tracing::debug!(
            ?classification,
            fired = outcome.fired.len(),
            stopped = outcome.stopped,
            "route reconciled"
        );
        self.previous = Some(args.clone());
        outcome
    }

    #[must_use]
    pub fn previous(&self) -> Option<&RouteArgs> {
        self.previous.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransientFlag;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        List,
        Detail,
        Tail,
    }

    const CONDITIONS: [Condition<Step>; 3] = [
        Condition::new_page(Step::List),
        Condition::always(Step::Detail),
        Condition::new_page(Step::Tail),
    ];

    #[test]
    fn first_navigation_is_a_new_page() {
        let mut reconciler = Reconciler::new();
        let outcome = reconciler.reconcile(&RouteArgs::new(), &CONDITIONS);
        assert_eq!(outcome.classification, Classification::NewPage);
        assert_eq!(outcome.fired, [Step::List, Step::Detail, Step::Tail]);
        assert!(!outcome.stopped);
    }

    #[test]
    fn id_change_is_a_continuation() {
        let mut reconciler = Reconciler::new();
        reconciler.reconcile(&RouteArgs::new().with("id", "1").with("name", "x"), &CONDITIONS);
        let outcome = reconciler.reconcile(&RouteArgs::new().with("id", "2").with("name", "x"), &CONDITIONS);
        assert_eq!(outcome.classification, Classification::Continuation);
        assert_eq!(outcome.fired, [Step::Detail]);
    }

    #[test]
    fn transient_flags_do_not_change_identity() {
        let mut reconciler = Reconciler::new();
        reconciler.reconcile(&RouteArgs::new().with("type", "A"), &CONDITIONS);
        let args = RouteArgs::new().with("type", "A").with_flag(TransientFlag::Filter);
        assert_eq!(reconciler.classify(&args), Classification::Continuation);
    }

    #[test]
    fn name_or_type_change_is_a_new_page() {
        let mut reconciler = Reconciler::new();
        reconciler.reconcile(&RouteArgs::new().with("name", "a"), &CONDITIONS);
        assert_eq!(
            reconciler.classify(&RouteArgs::new().with("name", "b")),
            Classification::NewPage
        );
        assert_eq!(
            reconciler.classify(&RouteArgs::new().with("name", "a").with("type", "T")),
            Classification::NewPage
        );
    }

    #[test]
    fn stopping_condition_ends_the_walk() {
        let conditions = [Condition::new_page(Step::List).stopping(), Condition::always(Step::Detail)];
        let outcome = Reconciler::walk(Classification::NewPage, &conditions);
        assert_eq!(outcome.fired, [Step::List]);
        assert!(outcome.stopped);

        let outcome = Reconciler::walk(Classification::Continuation, &conditions);
        assert_eq!(outcome.fired, [Step::Detail]);
        assert!(!outcome.stopped);
    }

    #[test]
    fn reconcile_records_previous_args() {
        let mut reconciler = Reconciler::new();
        let args = RouteArgs::new().with("id", "9");
        reconciler.reconcile(&args, &CONDITIONS);
        assert_eq!(reconciler.previous(), Some(&args));
    }
}
