//! Logging utilities for the SereneNow booking core.
//!
//! Provides a single place to initialize the tracing subscriber so every
//! crate in the workspace logs through the same pipeline.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at the default INFO level.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific minimum log level.
///
/// Safe to call more than once (e.g. from several tests); only the first
/// call installs a subscriber.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("serenenow={}", level).parse().unwrap());

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
