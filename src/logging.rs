//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a level is supplied.
pub const DEFAULT_FILTER: &str = "travel_auth=info";

/// Build the filter for a configured level.
///
/// `RUST_LOG` always wins. A bare level such as `debug` is scoped to this
/// crate; a full directive (`travel_auth=trace,tokio=warn`) is used as-is.
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    match level {
        Some(level) if level.contains('=') => EnvFilter::new(level),
        Some(level) if !level.is_empty() => EnvFilter::new(format!("travel_auth={level}")),
        _ => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// Initialize the logging system.
///
/// Logs are written to stderr so that command output on stdout stays
/// machine-readable.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init(level: Option<&str>) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
}
