//! Unified error type for the mock-reduce library.
//!
//! Every fallible operation in the crate returns [`Result`], so callers can
//! use a single error type whether the failure came from a user supplied
//! map/reduce function, malformed input, or configuration loading.

use thiserror::Error;

/// Unified error type for all mock-reduce operations.
///
/// # Example
///
/// ```ignore
/// use mock_reduce::{json, Map, Result};
///
/// fn group() -> Result<()> {
///     let mut map = Map::new();
///     map.run(vec![json!({"value": "x"})], |ctx| {
///         ctx.emit(42, ctx.get("value").clone())?;
///         Ok(())
///     })?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The user supplied map function failed for a record.
    #[error("map function failed on record {index}: {source}")]
    MapFunction {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// The user supplied reduce function failed for a group.
    #[error("reduce function failed on group {index}: {source}")]
    ReduceFunction {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// `emit` was called while no map pass had it exposed.
    #[error("emit is not exposed outside of a map run")]
    EmitUnavailable,

    /// A data set did not have the shape the runner expects.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A group without values reached the reduce phase.
    #[error("Group {id} has no values to reduce")]
    EmptyGroup { id: String },

    /// A key nested deeper than the configured limit.
    #[error("Key nesting exceeds the maximum depth of {max_depth}")]
    KeyTooDeep { max_depth: usize },

    /// `map_reduce` was called without pending test data.
    #[error("No test data set for the next map/reduce run")]
    NoTestData,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parsing error.
    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// Logging initialization error.
    #[cfg(feature = "subscriber")]
    #[error(transparent)]
    Logging(#[from] crate::logging::LoggingError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error from a string message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns `true` if a user supplied map or reduce function failed.
    pub fn is_user_function(&self) -> bool {
        matches!(self, Self::MapFunction { .. } | Self::ReduceFunction { .. })
    }

    /// Returns `true` if this is an invalid input error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_function_errors_keep_source() {
        let err = Error::MapFunction {
            index: 2,
            source: anyhow::anyhow!("boom"),
        };
        assert!(err.is_user_function());
        assert_eq!(err.to_string(), "map function failed on record 2: boom");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_input_helper() {
        let err = Error::invalid_input("expected an array");
        assert!(err.is_invalid_input());
        assert!(!err.is_user_function());
        assert_eq!(err.to_string(), "Invalid input: expected an array");
    }
}
