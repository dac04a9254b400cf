//! Route grammar, matching and the configuration browser's route table.
//!
//! # Modules
//!
//! - [`pattern`]: Pattern compilation, path matching and rendering
//! - [`table`]: Ordered, first-match-wins rule table
//! - [`rules`]: The declarative rule list for the configuration page

pub mod pattern;
pub mod rules;
pub mod table;

pub use pattern::{RoutePattern, Segment};
pub use rules::{configs_table, HandlerId};
pub use table::{RouteRule, RouteTable};
