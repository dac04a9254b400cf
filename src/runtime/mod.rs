//! Host loop for running the browser outside a real UI.
//!
//! - [`driver`]: Executes actions against a store and a surface
//! - [`script`]: Line-oriented scripts for the `confview` binary

pub mod driver;
pub mod script;

pub use driver::Driver;
pub use script::{parse_script, ScriptCommand};
