//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::expand_tilde;
