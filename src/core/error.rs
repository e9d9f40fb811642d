//! Error types for the crossfill crate.

use thiserror::Error;

/// Main error type for the crossfill crate.
///
/// Layout and word-list problems are fatal during setup, before the search
/// loop starts. A grid the search cannot fill completely is *not* an error;
/// it is a normal outcome carried by [`crate::solver::RunOutcome`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid layout: {detail}")]
    InvalidLayout { detail: String },

    #[error("invalid word list: {detail}")]
    InvalidWordList { detail: String },

    #[error("conflicting fixed letters '{first}' and '{second}' at ({row}, {col})")]
    InconsistentFixedLetters {
        row: usize,
        col: usize,
        first: char,
        second: char,
    },

    #[error("no file matches pattern '{pattern}'")]
    NoMatchingFiles { pattern: String },

    #[error("invalid path pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("internal consistency error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Shorthand for an [`Error::InvalidLayout`].
    pub fn layout(detail: impl Into<String>) -> Self {
        Error::InvalidLayout {
            detail: detail.into(),
        }
    }

    /// Shorthand for an [`Error::InvalidWordList`].
    pub fn words(detail: impl Into<String>) -> Self {
        Error::InvalidWordList {
            detail: detail.into(),
        }
    }

    /// Shorthand for an [`Error::Io`] with operation context.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Shorthand for an [`Error::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
