//! Error types for sequences and generators.

use thiserror::Error;

/// The main error type for sequence operations.
///
/// Most operations in this crate cannot fail: exhausted sequences produce
/// documented degenerate results (see [`crate::terminals::max`]). Errors are
/// reserved for empty input where no sensible value exists and for the
/// lifecycle of background producers.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// An operation that needs at least one element was given none
    #[error("cannot {operation} from an empty sequence")]
    Empty { operation: &'static str },

    /// A generator was started without a tokio runtime to run its producer on
    #[error("no tokio runtime available to spawn the {generator} producer")]
    NoRuntime { generator: &'static str },

    /// A producer task panicked or was aborted
    #[error("producer task failed: {0}")]
    Producer(String),

    /// Waiting on a producer took longer than allowed
    #[error("operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

// Convenience constructors
impl Error {
    /// Create an empty-input error for the named operation
    pub fn empty(operation: &'static str) -> Self {
        Error::Empty { operation }
    }

    /// Create a timeout error
    pub fn timeout(duration_ms: u64) -> Self {
        Error::Timeout { duration_ms }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Producer(err.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;
