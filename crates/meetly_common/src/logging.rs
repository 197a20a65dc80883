//! Logging utilities for the Meetly application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the Meetly workspace. Everything else logs through the `tracing` macros
//! directly; this module only sets up the subscriber.

use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use meetly_common::logging;
///
/// // Initialize with default log level (INFO)
/// logging::init();
///
/// // Initialize with a specific log level
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honored; `level` is added for all `meetly*`
/// targets. Calling this twice is harmless, the second call is ignored.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    let mut rejected = None;
    match format!("meetly={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => rejected = Some(e),
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
        if let Some(e) = rejected {
            warn!("Ignoring invalid log directive: {}", e);
        }
    }
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => tracing::error!("{}: {}", error_context, e),
    }
    result
}
