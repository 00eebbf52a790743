//! ## adtlab-telemetry::logging
//! **Structured logging with `tracing`**
//!
//! `init` installs the global fmt subscriber once per process. Library crates
//! log through the `tracing` macros directly; `log_event` is the helper for
//! session-level events that carry a handful of key/value fields.

use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber, writing to stderr. `RUST_LOG` wins over
    /// `default_level`.
    ///
    /// Calling it twice is harmless: the second call leaves the first
    /// subscriber in place.
    pub fn init(default_level: &str) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level.to_lowercase()));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::NONE)
            .try_init();
    }

    #[inline]
    pub fn log_event(event_type: &str, fields: &[(&str, String)]) {
        let span = info_span!("session_event", event_type = event_type);
        let _enter = span.enter();
        let rendered = fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(fields = %rendered, "Session event occurred");
    }
}
