//! Tracing/logging initialization.
//!
//! Records go to stderr so they never interleave with menu output on stdout.

use tracing_subscriber::EnvFilter;

use crate::LogFormat;

/// Filter used when `RUST_LOG` is unset. Interactive sessions stay quiet
/// unless something is rejected.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Text => builder.compact().try_init(),
    };
}
