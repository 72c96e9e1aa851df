//! Error types for the engine.
//!
//! Rejected user actions are not errors; they come back as
//! [`Dispatch::Ignored`](crate::Dispatch::Ignored). What remains here are
//! infrastructure failures.

use thiserror::Error;

/// Errors that can occur while driving the engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A thread panicked while holding the workspace lock.
    #[error("Workspace lock poisoned: {0}")]
    Poisoned(String),

    /// The timer scheduler was started outside a tokio runtime.
    #[error("No tokio runtime available to drive animations")]
    NoRuntime,

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::Config("frame_ms must be positive".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: frame_ms must be positive"
        );
        assert_eq!(
            EngineError::NoRuntime.to_string(),
            "No tokio runtime available to drive animations"
        );
    }
}
