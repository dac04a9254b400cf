//! Structured logging with an optional rotating log file.
//!
//! All modules log through `tracing` macros and spans. This module installs
//! the subscriber that turns them into output.
//!
//! # Features
//!
//! - **Filtering**: `RUST_LOG`, then `trace_level` from [`Config`](crate::Config),
//!   then `"info"`
//! - **File Output**: Optional log file that rotates at 10MB with 3-backup
//!   retention
//! - **Stderr Output**: Used when no log file is configured, which keeps
//!   stdout free for the binary's JSON lines
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating log file writer

pub mod file_writer;
mod init;

pub use file_writer::LogFile;
pub use init::init_tracing;
