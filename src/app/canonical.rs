//! Transient flag canonicalization.
//!
//! Routes such as `configs/42/new:` and `configs/42/edit:` exist for one
//! navigation only. Once their handler has reacted, the flag is stripped, the
//! list is refreshed and the browser is redirected to the plain detail route.

use super::state::ConfigsView;
use super::Action;
use crate::domain::error::Result;
use crate::domain::{RouteArgs, TransientFlag};
use crate::routing::HandlerId;

/// Strips one transient flag and redirects to the canonical detail route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canonicalizer {
    pub flag: TransientFlag,
}

impl Canonicalizer {
    #[must_use]
    pub const fn new(flag: TransientFlag) -> Self {
        Self { flag }
    }

    /// Returns `args` without the flag. Stripping an absent flag changes
    /// nothing.
    ///
    /// ```
    /// use confview::app::Canonicalizer;
    /// use confview::{RouteArgs, TransientFlag};
    ///
    /// let strip = Canonicalizer::new(TransientFlag::New);
    /// let args = RouteArgs::new().with("id", "42").with_flag(TransientFlag::New);
    /// let once = strip.strip(&args);
    /// assert_eq!(strip.strip(&once), once);
    /// assert!(!once.has_flag(TransientFlag::New));
    /// ```
    #[must_use]
    pub fn strip(&self, args: &RouteArgs) -> RouteArgs {
        args.without(self.flag.key())
    }

    /// Re-runs the search with the stripped args and redirects to the detail
    /// route.
    ///
    /// # Errors
    ///
    /// Fails if the stripped args carry no id.
    pub fn strip_and_redirect(&self, view: &mut ConfigsView, args: &RouteArgs) -> Result<Vec<Action>> {
        let reduced = self.strip(args);
        let path = view.hash(HandlerId::LoadConfigs, &reduced)?;
        tracing::debug!(flag = self.flag.key(), path = %path, "canonical redirect");

        Ok(vec![view.search(&reduced), Action::Navigate { path }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_is_idempotent() {
        let strip = Canonicalizer::new(TransientFlag::Edit);
        let args = RouteArgs::new().with("id", "1").with("name", "x");
        assert_eq!(strip.strip(&args), args);
        let flagged = args.clone().with_flag(TransientFlag::Edit);
        assert_eq!(strip.strip(&strip.strip(&flagged)), args);
    }

    #[test]
    fn strip_leaves_other_flags() {
        let strip = Canonicalizer::new(TransientFlag::New);
        let args = RouteArgs::new()
            .with_flag(TransientFlag::New)
            .with_flag(TransientFlag::Filter);
        assert!(strip.strip(&args).has_flag(TransientFlag::Filter));
    }
}
