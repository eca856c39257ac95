//! Recommendation result types
//!
//! Shapes match the platform's recommendation API contract. Results are
//! computed on demand and never mutated afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A personalized recommendation for one book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub book_id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    /// Profile-driven score in `[0, 1]`
    pub score: f32,
    /// Human-readable reasons, semicolon-joined
    pub explanation: String,
}

/// A similar-content neighbor of a query book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarBook {
    pub book_id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    /// Cosine similarity; non-negative in practice for tf-idf-dominated rows
    pub similarity_score: f32,
    pub explanation: String,
}
