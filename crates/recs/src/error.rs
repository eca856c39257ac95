//! Recommendation engine errors
//!
//! Fatal conditions surface here; recoverable ones (unknown book in a
//! similarity query, user with no rating history) are expressed in return
//! types instead. Data-source failures pass through untouched so the caller
//! can decide retry policy.

use thiserror::Error;

/// Errors raised by the recommendation engine.
#[derive(Debug, Error)]
pub enum RecsError {
    /// No book in the catalog carries a non-empty description, so there is
    /// nothing to build a content matrix from.
    #[error("no books with a non-empty description in the catalog")]
    EmptyCatalog,

    /// Document-frequency filtering removed every candidate term; the text
    /// feature space would be empty.
    #[error("term filtering left an empty vocabulary over {documents} documents")]
    EmptyVocabulary { documents: usize },

    /// A transform was queried before being fitted.
    #[error("{what} used before being fitted")]
    NotFitted { what: &'static str },

    /// A matrix no longer lines up with the data it was fitted on.
    #[error("{context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A data source (catalog, ratings, sink) failed.
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, RecsError>;
