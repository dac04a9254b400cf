//! Error types for the configuration browser.
//!
//! This module defines the centralized error type [`ConfviewError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! Most failures in this crate are not fatal: a route that matches nothing is a
//! logged no-op, and remote store errors are surfaced to the user through actions
//! rather than returned. The variants here cover the cases where a caller has
//! handed the crate something it cannot work with.

use thiserror::Error;

/// The main error type for configuration browser operations.
///
/// # Examples
///
/// ```
/// use confview::ConfviewError;
///
/// fn resolve() -> Result<(), ConfviewError> {
///     Err(ConfviewError::Route("configs/1/2/3".to_string()))
/// }
/// assert!(resolve().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ConfviewError {
    /// No registered rule matches the route string.
    #[error("No route matches: {0}")]
    Route(String),

    /// A rule requires an argument that the caller did not supply.
    ///
    /// Raised when building a route string from a rule whose pattern has a
    /// mandatory positional segment (such as `:id`) missing from the arguments.
    #[error("Route rule '{rule}' requires argument '{key}'")]
    MissingArgument {
        /// Name of the rule being rendered.
        rule: String,
        /// The missing argument key.
        key: String,
    },

    /// A handler asked for a rule the table does not contain.
    #[error("Unknown route rule: {0}")]
    UnknownRule(String),

    /// The remote store replied with an error payload.
    #[error("Remote store error: {0}")]
    Remote(String),

    /// The history store could not be read or written.
    #[error("History error: {0}")]
    History(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized `Result` type for configuration browser operations.
pub type Result<T> = std::result::Result<T, ConfviewError>;
