//! Call-site error types

use thiserror::Error;
use oapi::BridgeError;

/// Result type for call-site operations
pub type SapResult<T> = std::result::Result<T, SapError>;

/// Errors surfaced by typed call sites
#[derive(Error, Debug)]
pub enum SapError {
    /// The application understood the request and refused it
    #[error("{method} rejected with status {status}")]
    Rejected { method: &'static str, status: i32 },

    /// The application returned output arrays of an unexpected length
    #[error("{method} returned {got} values where {expected} were expected")]
    Shape {
        method: &'static str,
        expected: usize,
        got: usize,
    },

    /// The application reported success but left an output unwritten
    #[error("{method} succeeded without writing {output}")]
    MissingOutput {
        method: &'static str,
        output: &'static str,
    },

    /// The bridge failed; no status was produced
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl SapError {
    /// Whether this is a recoverable rejection by the application
    pub fn is_rejection(&self) -> bool {
        matches!(self, SapError::Rejected { .. })
    }

    /// The non-zero status of a rejection
    pub fn status(&self) -> Option<i32> {
        match self {
            SapError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the application session is gone
    pub fn is_session_loss(&self) -> bool {
        matches!(self, SapError::Bridge(e) if e.is_session_loss())
    }
}
