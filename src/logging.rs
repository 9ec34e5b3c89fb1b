//! Conditional logging macros for library-level tracing.
//!
//! When the `logging` feature is enabled, these macros forward to tracing.
//! When disabled, they compile to no-ops with zero runtime cost.
//!
//! With the `subscriber` feature the module also offers [`init`], which
//! installs a `tracing-subscriber` stack from a [`LoggingConfig`] so a test
//! suite can watch map and reduce passes as they run.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::logging::{debug, trace};
//!
//! debug!(records = count, "starting map pass");
//! trace!(key = %canonical, "created group");
//! ```

#[cfg(feature = "subscriber")]
use crate::config::LoggingConfig;

/// Emit a trace-level log (very detailed internal operations).
#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

/// Emit a debug-level log (operation details useful for debugging).
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Emit a warn-level log (unexpected but handled situations).
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;

/// Initialize the tracing subscriber based on configuration.
///
/// `output` is `"stdout"`, `"stderr"` or a file path the log is appended to.
/// Fails if a global subscriber is already installed, which happens when
/// several tests in one binary call this; callers usually ignore that case.
#[cfg(feature = "subscriber")]
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    use std::io::{self, IsTerminal};

    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;

    match config.output.as_str() {
        "stdout" => install(
            config,
            filter,
            io::stdout,
            config.color && io::stdout().is_terminal(),
        ),
        "stderr" => install(
            config,
            filter,
            io::stderr,
            config.color && io::stderr().is_terminal(),
        ),
        path => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::FileOpen(path.to_string(), e))?;
            install(config, filter, std::sync::Mutex::new(file), false)
        }
    }
}

#[cfg(feature = "subscriber")]
fn install<W>(
    config: &LoggingConfig,
    filter: tracing_subscriber::EnvFilter,
    writer: W,
    ansi: bool,
) -> Result<(), LoggingError>
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    use crate::config::LogFormat;
    use tracing_subscriber::fmt::{self, format::FmtSpan};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(config.target)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer);
    let registry = tracing_subscriber::registry().with(filter);

    match (config.format, config.timestamps) {
        (LogFormat::Text, true) => registry.with(layer).try_init(),
        (LogFormat::Text, false) => registry.with(layer.without_time()).try_init(),
        (LogFormat::Json, true) => registry.with(layer.json()).try_init(),
        (LogFormat::Json, false) => registry.with(layer.json().without_time()).try_init(),
    }
    .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Errors that can occur during logging initialization.
#[cfg(feature = "subscriber")]
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Invalid log filter string.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
    /// Failed to open log file.
    #[error("Failed to open log file '{0}': {1}")]
    FileOpen(String, std::io::Error),
    /// A global subscriber was already set.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}
