//! Error types for the shortcut store.
//!
//! Every store operation returns a structured error naming the step that
//! failed; the FFI bridge collapses this to the boolean surface the
//! managed caller sees.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for shortcut store operations.
#[derive(Debug, Error)]
pub enum LinkError {
    // Precondition failures, raised before any shell service is touched
    #[error("Required field not set: {field}")]
    MissingField { field: &'static str },

    #[error("Identity path is {length} bytes, exceeds the maximum of {max}")]
    IdentityTooLong { length: usize, max: usize },

    // Shell persistence service failures
    #[error("Shell service unavailable: {message}")]
    ServiceUnavailable { message: String },

    // Commit/open/field-read failures
    #[error("IO error while trying to {step} at {path:?}")]
    Io {
        step: &'static str,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Text that does not survive the configured encoding
    #[error("Text is not valid {encoding}: {message}")]
    Encoding {
        encoding: &'static str,
        message: String,
    },
}

/// Result type alias for shortcut store operations.
pub type Result<T> = std::result::Result<T, LinkError>;

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        LinkError::Io {
            step: "access the filesystem",
            path: None,
            source: Some(err),
        }
    }
}

impl LinkError {
    /// Create an IO error naming the failing step and path.
    pub fn io(step: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LinkError::Io {
            step,
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// True for errors raised before the backing shell service is touched.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            LinkError::MissingField { .. } | LinkError::IdentityTooLong { .. }
        )
    }
}
