use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Output shape of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Text`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Initialize the global tracing subscriber writing to stdout.
/// - `RUST_LOG` wins over `default_directives`
/// - Safe to call more than once; later calls are ignored
pub fn init_logging(format: LogFormat, default_directives: &str) {
    let filter = env_filter(default_directives);
    let _ = match format {
        LogFormat::Text => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(io::stdout)
            .try_init(),
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_writer(io::stdout)
            .try_init(),
    };
}

/// Compact text logs at `info`, with request traces and the socket gateway visible.
pub fn init_logging_default() {
    init_logging(LogFormat::Text, "info,tower_http=info,server::gateway=debug");
}
