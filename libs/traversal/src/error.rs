//! Traversal errors
//!
//! Hook failures carry the path of the node whose hook failed, so a report
//! points straight at the offending object.

use std::fmt;
use thiserror::Error;

/// Error raised by a visitor hook
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Type alias for traversal results
pub type TraversalResult<T> = Result<T, TraversalError>;

/// Which hook of a node was running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Enter,
    Exit,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::Enter => f.write_str("enter"),
            HookPhase::Exit => f.write_str("exit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TraversalError {
    /// The call itself was malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A visitor hook failed; traversal stopped at `path`
    #[error("{phase} hook failed at '{path}': {source}")]
    Hook {
        phase: HookPhase,
        path: String,
        #[source]
        source: HookError,
    },

    /// A collected child was no longer reserved when its owner reached it
    #[error("Reservation bookkeeping lost child '{path}' before it was processed")]
    ReservationLost { path: String },
}

impl TraversalError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, TraversalError::InvalidArgument(_))
    }
}
