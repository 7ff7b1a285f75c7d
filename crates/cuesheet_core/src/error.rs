//! Core error types for CUESHEET.

use std::fmt;

/// Core result type
pub type CueResult<T> = Result<T, CueError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueError {
    /// Not found
    NotFound { kind: String, id: String },

    /// Already exists
    AlreadyExists { kind: String, id: String },

    /// Validation error
    Validation { field: String, reason: String },

    /// Internal error (for unexpected errors)
    Internal {
        /// Error message
        message: String,
    },
}

impl fmt::Display for CueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{} not found: {}", kind, id),
            Self::AlreadyExists { kind, id } => write!(f, "{} already exists: {}", kind, id),
            Self::Validation { field, reason } => {
                write!(f, "Validation failed for {}: {}", field, reason)
            }
            Self::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for CueError {}
