//! Declarative route table of the configuration browser.
//!
//! Built once at initialization. Order is part of the contract: the flag
//! routes (`filter:`, `deleted:`) are declared before the generic by-id route
//! and the `new:`/`edit:` transients after it.

use super::table::{RouteRule, RouteTable};
use crate::domain::error::Result;
use serde::{Deserialize, Serialize};

/// Handlers the configuration browser dispatches routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerId {
    /// List only.
    Load,
    /// Enter filter mode, then redirect.
    LoadFilter,
    /// Post-delete acknowledgment, then redirect.
    LoadDelete,
    /// List plus detail.
    LoadConfigs,
    /// Post-create transient.
    LoadNewConfigs,
    /// Edit transient.
    LoadEditConfigs,
}

impl HandlerId {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::LoadFilter => "load_filter",
            Self::LoadDelete => "load_delete",
            Self::LoadConfigs => "load_configs",
            Self::LoadNewConfigs => "load_new_configs",
            Self::LoadEditConfigs => "load_edit_configs",
        }
    }
}

/// Rule declarations in matching order, as `(handler, pattern suffix)`.
const RULES: [(HandlerId, &str); 6] = [
    (HandlerId::Load, "name:?/type:?"),
    (HandlerId::LoadFilter, "filter:/:id?/name:?/type:?"),
    (HandlerId::LoadDelete, "deleted:/name:?/type:?"),
    (HandlerId::LoadConfigs, ":id/name:?/type:?"),
    (HandlerId::LoadNewConfigs, ":id/new:/name:?/type:?"),
    (HandlerId::LoadEditConfigs, ":id/edit:/name:?/type:?"),
];

/// Builds the route table for a page mounted at `/<page>`.
///
/// # Errors
///
/// Fails if `page` produces a malformed pattern.
///
/// # Examples
///
/// ```
/// use confview::routing::{configs_table, HandlerId};
///
/// let table = configs_table("configs")?;
/// let (handler, args) = table.resolve("configs/deleted:/name:FX*")?;
/// assert_eq!(handler, HandlerId::LoadDelete);
/// assert_eq!(args.name(), Some("FX*"));
/// # Ok::<(), confview::ConfviewError>(())
/// ```
pub fn configs_table(page: &str) -> Result<RouteTable<HandlerId>> {
    let mut table = RouteTable::new();
    for (handler, suffix) in RULES {
        let pattern = format!("/{page}/{suffix}");
        table.register(RouteRule::new(handler.name(), &pattern, handler)?);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteArgs;

    fn resolve(path: &str) -> (HandlerId, RouteArgs) {
        configs_table("configs").unwrap().resolve(path).unwrap()
    }

    #[test]
    fn rules_are_registered_in_declaration_order() {
        let table = configs_table("configs").unwrap();
        let order: Vec<HandlerId> = table.rules().iter().map(|rule| rule.handler).collect();
        assert_eq!(
            order,
            vec![
                HandlerId::Load,
                HandlerId::LoadFilter,
                HandlerId::LoadDelete,
                HandlerId::LoadConfigs,
                HandlerId::LoadNewConfigs,
                HandlerId::LoadEditConfigs,
            ]
        );
    }

    #[test]
    fn every_route_form_resolves() {
        assert_eq!(resolve("configs").0, HandlerId::Load);
        assert_eq!(resolve("configs/name:a/type:b").0, HandlerId::Load);
        assert_eq!(resolve("configs/filter:").0, HandlerId::LoadFilter);
        assert_eq!(resolve("configs/filter:/12/name:a").0, HandlerId::LoadFilter);
        assert_eq!(resolve("configs/deleted:/name:a").0, HandlerId::LoadDelete);
        assert_eq!(resolve("configs/12").0, HandlerId::LoadConfigs);
        assert_eq!(resolve("configs/12/new:/name:a").0, HandlerId::LoadNewConfigs);
        assert_eq!(resolve("configs/12/edit:").0, HandlerId::LoadEditConfigs);
    }

    #[test]
    fn filter_route_keeps_optional_id() {
        let (_, args) = resolve("configs/filter:/12/type:ViewDefinition");
        assert_eq!(args.id(), Some("12"));
        assert!(args.contains("filter"));
        assert_eq!(args.kind(), Some("ViewDefinition"));
    }

    #[test]
    fn foreign_page_does_not_resolve() {
        assert!(configs_table("configs").unwrap().resolve("securities/1").is_err());
    }
}
