//! Application layer coordinating state, events, and actions.
//!
//! This module holds the browser's logic, sitting between the host (or the
//! [`Driver`](crate::runtime::Driver)) and the domain/routing/store/history
//! layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host Events → handle_event → State Mutations → Actions → Side Effects
//!                    ↑                                        ↓
//!                    └──── Store replies, timers, dialogs ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`canonical`]: Transient flag stripping and canonical redirects
//! - [`handler`]: Event processing and route handlers
//! - [`modes`]: Navigation classification and detail mode
//! - [`reconciler`]: Condition lists and new page / continuation detection
//! - [`state`]: The view state container
//!
//! The detail loader, search coordinator and action dispatcher are
//! implemented as `ConfigsView` methods in private modules.
//!
//! # Example
//!
//! ```
//! use confview::app::{handle_event, ConfigsView, Event};
//! use confview::history::JsonHistory;
//! use confview::Config;
//!
//! let mut view = ConfigsView::new(&Config::default(), Box::new(JsonHistory::in_memory(10)))?;
//! let actions = handle_event(&mut view, &Event::RouteChanged { path: "configs".into() })?;
//! assert!(!actions.is_empty());
//! # Ok::<(), confview::ConfviewError>(())
//! ```

pub mod actions;
pub mod canonical;
mod detail;
mod dispatch;
pub mod handler;
pub mod modes;
pub mod reconciler;
mod search;
pub mod state;

pub use actions::Action;
pub use canonical::Canonicalizer;
pub use detail::{LOADING, STILL_LOADING};
pub use handler::{handle_event, Event};
pub use modes::{Classification, DetailMode};
pub use reconciler::{Condition, Reconciler, Trigger};
pub use search::{columns, TYPE_OPTIONS};
pub use state::{ConfigsView, CurrentRoute, ViewSession};
