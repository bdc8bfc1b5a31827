//! Tracing subscriber setup
//!
//! Configures the global tracing subscriber with:
//! - An `EnvFilter` (RUST_LOG, then `[logging] filter`, then a built-in default)
//! - Console output, human-readable or JSON lines

use crate::server::config::{LogFormat, LoggingConfig};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,hosts_directory=debug";

/// Resolve the filter directives in priority order
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| {
            config
                .filter
                .as_deref()
                .and_then(|directives| EnvFilter::try_new(directives).ok())
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the global subscriber
///
/// Must be called once at startup before any tracing macros are used.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let (pretty, json) = match config.format {
        LogFormat::Pretty => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(pretty)
        .with(json)
        .try_init()?;

    tracing::debug!(format = ?config.format, "Tracing initialized");
    Ok(())
}
