//! List search and list filter synchronization.
//!
//! Every search carries a fresh ticket and only the latest one may update the
//! list; replies to superseded searches are dropped whatever order they arrive
//! in.

use super::state::ConfigsView;
use super::Action;
use crate::domain::{RouteArgs, TransientFlag};
use crate::store::{Column, ColumnFilter, SearchQuery, StoreReply, StoreRequest, Ticket};

/// Entity types offered by the list's type filter.
pub const TYPE_OPTIONS: [&str; 8] = [
    "CurrencyMatrix",
    "CurveSpecificationBuilderConfiguration",
    "SimpleCurrencyMatrix",
    "TimeSeriesMetaDataConfiguration",
    "ViewDefinition",
    "VolatilitySurfaceSpecification",
    "VolatilitySurfaceDefinition",
    "YieldCurveDefinition",
];

/// Columns of the configuration list.
#[must_use]
pub fn columns() -> Vec<Column> {
    vec![
        Column {
            id: "type".to_string(),
            name: "Type".to_string(),
            field: "type".to_string(),
            width: 160,
            filter: ColumnFilter::Select {
                options: TYPE_OPTIONS.iter().map(ToString::to_string).collect(),
            },
            link: false,
        },
        Column {
            id: "name".to_string(),
            name: "Name".to_string(),
            field: "name".to_string(),
            width: 300,
            filter: ColumnFilter::Input,
            link: true,
        },
    ]
}

impl ConfigsView {
    /// Issues a list search for `args`.
    pub(crate) fn search(&mut self, args: &RouteArgs) -> Action {
        let ticket = self.issue();
        self.search.latest = Some(ticket);

        let query = SearchQuery {
            page_type: self.page.clone(),
            name: args.name().map(str::to_string),
            kind: args.kind().map(str::to_string),
            filter: args.has_flag(TransientFlag::Filter) || self.session.filter,
            columns: columns(),
        };
        tracing::debug!(%ticket, name = ?query.name, kind = ?query.kind, filter = query.filter, "search issued");

        Action::Store {
            ticket,
            request: StoreRequest::Search { query },
        }
    }

    /// Pushes the route's `name` and `type` into the list filter inputs.
    pub(crate) fn sync_list_filter(args: &RouteArgs) -> Action {
        Action::SyncListFilter {
            name: args.name().map(str::to_string),
            kind: args.kind().map(str::to_string),
        }
    }

    /// Returns true if `ticket` is the latest search.
    pub(crate) fn owns_search(&self, ticket: Ticket) -> bool {
        self.search.latest == Some(ticket)
    }

    pub(crate) fn on_search_reply(&mut self, ticket: Ticket, reply: &StoreReply) -> Vec<Action> {
        self.search.latest = None;

        match reply {
            StoreReply::Listing { rows } => {
                tracing::debug!(%ticket, rows = rows.len(), "search resolved");
                vec![Action::ReplaceList { rows: rows.clone() }]
            }
            StoreReply::Error { message } => {
                tracing::warn!(%ticket, error = %message, "search failed");
                vec![Action::ShowError {
                    message: message.clone(),
                }]
            }
            other => {
                tracing::warn!(%ticket, reply = ?other, "unexpected reply to search");
                vec![Action::ShowError {
                    message: "unexpected reply to search".to_string(),
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_describe_type_and_name() {
        let columns = columns();
        assert_eq!(columns[0].width, 160);
        assert!(matches!(&columns[0].filter, ColumnFilter::Select { options } if options.len() == 8));
        assert_eq!(columns[1].width, 300);
        assert!(columns[1].link);
        assert_eq!(columns[1].filter, ColumnFilter::Input);
    }
}
