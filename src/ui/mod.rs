//! Host-facing UI vocabulary.
//!
//! Rendering itself belongs to the host. This module defines what the browser
//! asks the host to do: which template to render with which data, which toolbar
//! mode to show, which dialogs to open.
//!
//! # Modules
//!
//! - [`dialog`]: Dialog descriptions and decisions
//! - [`surface`]: [`Surface`] trait and a recording implementation
//! - [`templates`]: Template identifiers and template data builders
//! - [`toolbar`]: Toolbar modes and buttons

pub mod dialog;
pub mod surface;
pub mod templates;
pub mod toolbar;

pub use dialog::{DialogDecision, DialogField, DialogSpec};
pub use surface::{RecordingSurface, Surface};
pub use templates::{Layout, Template};
pub use toolbar::{ToolbarButton, ToolbarMode};
