//! Error types for answer persistence and quiz sessions.
//!
//! The scoring engine itself has no error type; these cover the layers
//! around it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing an answer store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("answer store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The answer map could not be encoded.
    #[error("failed to encode answers: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from driving a quiz session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Not every question has an answer yet.
    #[error("quiz incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    /// A question number outside `1..=total`.
    #[error("question {number} is out of range (1-{total})")]
    OutOfRange { number: usize, total: usize },

    /// The bank has no questions to navigate.
    #[error("question bank is empty")]
    EmptyBank,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Returns `true` if answering more questions would resolve the error.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, SessionError::Incomplete { .. })
    }
}
