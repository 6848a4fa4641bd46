//! Logging utilities for the FreightDesk client.
//!
//! All crates emit `tracing` events under targets starting with
//! `freightdesk`; binaries call [`init`] or [`init_with_level`] once at
//! startup to install the subscriber.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use freightdesk_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; the `freightdesk=<level>` directive is added on
/// top of it. Calling this more than once is harmless: a second subscriber
/// is silently not installed.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("freightdesk={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Parse a configured level name, falling back to INFO for unknown values.
pub fn level_from_name(name: Option<&str>) -> Level {
    name.and_then(|name| name.parse::<Level>().ok())
        .unwrap_or(Level::INFO)
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(level_from_name(Some("debug")), Level::DEBUG);
        assert_eq!(level_from_name(Some("WARN")), Level::WARN);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(level_from_name(Some("chatty")), Level::INFO);
        assert_eq!(level_from_name(None), Level::INFO);
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_with_level(Level::DEBUG);
        init();
    }
}
