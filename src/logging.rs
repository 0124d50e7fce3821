//! Tracing setup for the `enumgen` binary.
//!
//! `ENUMGEN_LOG` (or `RUST_LOG`) selects the filter using the usual
//! `EnvFilter` syntax; `ENUMGEN_LOG_FORMAT=json` switches to one JSON object
//! per event. Without either variable only warnings and errors are shown.
//! All output goes to stderr so generated listings on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var("ENUMGEN_LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("ENUMGEN_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    let filter = build_filter();

    let result = match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    // A subscriber installed earlier (e.g. by a test harness) stays in place
    let _ = result;
}
