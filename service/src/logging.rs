//! Tracing setup for the harvest service.
//!
//! Operations log one line each (info on commit, warn on rejection), so
//! the subscriber stays simple: a single fmt layer in either compact
//! human output or flattened newline-delimited JSON for log shippers.
//! A `RUST_LOG` environment variable, when present, takes precedence
//! over the configured level string.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact lines for local development.
    Human,
    /// Flattened newline-delimited JSON for aggregation pipelines.
    Json,
}

impl LogFormat {
    /// Parse the config-file representation ("human" / "json").
    /// Unrecognised values fall back to human output.
    pub fn from_config(raw: &str) -> Self {
        match raw {
            "json" => Self::Json,
            _ => Self::Human,
        }
    }
}

/// Install the global tracing subscriber for this process.
///
/// # Panics
///
/// Panics if called twice: the underlying registry can only be installed
/// once per process.
pub fn init_logging(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Human => {
            registry.with(fmt::layer().compact().with_target(true)).init();
        }
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().flatten_event(true).with_target(true))
                .init();
        }
    }
}
