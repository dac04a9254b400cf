//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber: an `EnvFilter` followed by a
//! fmt layer that writes either to stderr or to a rotating log file.

use super::file_writer::LogFile;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable, if set and valid
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Writes to `config.log_file` when set, creating its directory; falls back
///   to stderr if the directory cannot be created
/// - Idempotent: only the first call takes effect, later calls are ignored
///
/// # Example
///
/// ```
/// use confview::observability::init_tracing;
/// use confview::Config;
///
/// init_tracing(&Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_file = config.log_file.as_ref().and_then(|path| {
        let parent_ready = path
            .parent()
            .map_or(true, |parent| std::fs::create_dir_all(parent).is_ok());
        parent_ready.then(|| LogFile::new(path.clone()))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let _ = match log_file {
        Some(file) => registry
            .with(fmt::layer().with_ansi(false).with_writer(move || file.clone()))
            .try_init(),
        None => registry.with(fmt::layer().with_writer(std::io::stderr)).try_init(),
    };
}
