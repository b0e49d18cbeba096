//! Shared logging initialization for the rloc binary.
//!
//! Output goes to stderr: stdout carries resolved file contents and must stay
//! byte-exact.

use std::sync::OnceLock;

/// Environment variable selecting the log level
pub const LOG_VAR: &str = "RLOC_LOG";

static INIT: OnceLock<()> = OnceLock::new();

fn parse_level(value: Option<&str>) -> tracing::Level {
    match value.unwrap_or("info").to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// Initialize process-level tracing output from `RLOC_LOG`.
///
/// Events are written to stderr because stdout carries the resolved file's
/// bytes verbatim; a log line there would corrupt the output. Only the first
/// call installs a subscriber. Never fails.
pub fn init() {
    if INIT.get().is_some() {
        return;
    }
    let level = parse_level(std::env::var(LOG_VAR).ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    let _ = INIT.set(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), tracing::Level::DEBUG);
        assert_eq!(parse_level(Some("WARN")), tracing::Level::WARN);
        assert_eq!(parse_level(Some("trace")), tracing::Level::TRACE);
        assert_eq!(parse_level(Some("error")), tracing::Level::ERROR);
        assert_eq!(parse_level(Some("bogus")), tracing::Level::INFO);
        assert_eq!(parse_level(None), tracing::Level::INFO);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
