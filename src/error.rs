//! Error types shared by every metric in the crate.
//!
//! Exceeding a score cutoff is never an error: the metrics report it through
//! sentinel scores instead. Errors are reserved for calls that cannot be
//! answered at all because the arguments are inconsistent.

use thiserror::Error;

/// Errors raised by the distance metrics and the batch scorers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The arguments do not describe a valid computation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A batch scorer received more sequences than it was sized for.
    #[error("cannot insert sequence: batch scorer is full (capacity {capacity})")]
    OutOfBoundsInsert { capacity: usize },
}

impl Error {
    /// Builds an [`Error::InvalidArgument`] from anything string-like.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Result type for fallible metric operations
pub type Result<T> = std::result::Result<T, Error>;
