//! Domain layer for the configuration browser.
//!
//! This module contains the core domain types, independent of how routes are
//! parsed or how the host renders anything.
//!
//! # Organization
//!
//! - [`args`]: Route argument mapping and transient flags
//! - [`entity`]: Configuration entity model
//! - [`error`]: Error types and result aliases

pub mod args;
pub mod entity;
pub mod error;

pub use args::{RouteArgs, TransientFlag, ID, NAME, TYPE};
pub use entity::{Entity, EntitySummary};
pub use error::{ConfviewError, Result};
