//! Validation errors
//!
//! Three failure tiers are kept apart: malformed calls
//! ([`ValidationError::InvalidArgument`]), broken validation code
//! ([`ValidationError::InvalidOperation`]) and invalid objects
//! ([`ValidationError::Invalid`], only raised by `ensure_valid`).

use thiserror::Error;
use traversal::{HookError, HookPhase, TraversalError};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The call itself was malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A validation hook failed unexpectedly
    #[error("Validation hook failed during {phase} at '{path}': {source}")]
    InvalidOperation {
        phase: HookPhase,
        path: String,
        #[source]
        source: HookError,
    },

    /// The object graph is invalid
    #[error("{message}")]
    Invalid { message: String },

    /// The traversal engine failed for a reason of its own
    #[error("Traversal failed: {0}")]
    Traversal(#[source] TraversalError),
}

impl ValidationError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ValidationError::InvalidArgument(_))
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, ValidationError::InvalidOperation { .. })
    }

    /// Path of the node whose hook failed
    pub fn path(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidOperation { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<TraversalError> for ValidationError {
    fn from(error: TraversalError) -> Self {
        match error {
            TraversalError::InvalidArgument(message) => ValidationError::InvalidArgument(message),
            TraversalError::Hook {
                phase,
                path,
                source,
            } => ValidationError::InvalidOperation {
                phase,
                path,
                source,
            },
            other => ValidationError::Traversal(other),
        }
    }
}
