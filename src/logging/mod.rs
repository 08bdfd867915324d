//! Tracing subscriber setup for embedding applications
//!
//! The core itself only emits events; initializing a subscriber is the
//! host's choice. These helpers cover the two common shapes: readable
//! output for development and JSON for log aggregation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Human-readable colored logs, filtered by `RUST_LOG` (default `info`).
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(true)
                .with_writer(std::io::stdout),
        )
        .init();
}

/// Structured JSON logs for aggregation systems.
pub fn init_json() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stdout),
        )
        .init();
}
