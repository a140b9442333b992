//! Logging utilities for the Roost services.
//!
//! Every binary calls [`init_with_level`] once at startup. The level comes from
//! the `[logging]` config section, and `RUST_LOG` can still add directives.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// use roost_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("roost={}", level).parse() {
        filter = filter.add_directive(directive);
    }
    if let Ok(directive) = level.to_string().parse() {
        filter = filter.add_directive(directive);
    }

    // try_init: tests and binaries may race to install the global subscriber
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

/// Parses a level name from config, falling back to INFO for unknown values.
pub fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}
