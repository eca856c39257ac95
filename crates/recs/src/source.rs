//! Data-access seam
//!
//! The engine reads catalogs and rating histories, and optionally caches
//! results, through these traits. Implementations live in the platform's
//! storage crates; the engine performs no retries and never swallows a
//! source failure.

use crate::types::Recommendation;
use anyhow::Result;
use readsphere_core::Book;
use std::collections::HashSet;
use uuid::Uuid;

/// A user rating joined with the book attributes profile building needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedBook {
    pub book_id: Uuid,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub rating: f32,
}

/// Source of the book catalog.
pub trait CatalogSource {
    /// Every book eligible for content features, i.e. with a non-empty
    /// description.
    fn books_with_description(&self) -> Result<Vec<Book>>;
}

/// Source of user rating history.
pub trait RatingSource {
    /// The user's ratings at or above `min_rating`, joined with book
    /// attributes.
    fn rated_at_or_above(&self, user_id: Uuid, min_rating: f32) -> Result<Vec<RatedBook>>;

    /// Every book the user has rated (any value) or logged in reading
    /// history; recommendations never include these.
    fn read_or_reviewed(&self, user_id: Uuid) -> Result<HashSet<Uuid>>;
}

/// Optional cache for computed recommendations.
pub trait RecommendationSink {
    /// Atomically drop any previously stored recommendations for the user
    /// and store the new set. All-or-nothing; never an append.
    fn replace_recommendations(
        &self,
        user_id: Uuid,
        recommendations: &[Recommendation],
    ) -> Result<()>;
}
