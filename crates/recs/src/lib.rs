//! ReadSphere Recommendation Engine
//!
//! Content-based book recommendations: a fused text/numeric content matrix
//! per catalog load, cosine similarity for similar-book queries, and
//! profile-driven scoring personalized from each user's rating history.
//!
//! The engine is synchronous and snapshot-oriented. [`CatalogSnapshot`] is
//! built once per catalog load and shared read-only; [`Recommender`] answers
//! queries against it, rebuilding the [`UserProfile`] from the live rating
//! history on every request. Storage is reached only through the traits in
//! [`source`].

pub mod catalog;
pub mod error;
pub mod features;
pub mod memory;
pub mod profile;
pub mod recommend;
pub mod scaling;
pub mod similarity;
pub mod source;
pub mod text;
pub mod types;

// Re-export key types
pub use catalog::CatalogSnapshot;
pub use error::{RecsError, Result};
pub use features::combine_text_features;
pub use memory::InMemoryStore;
pub use profile::UserProfile;
pub use recommend::Recommender;
pub use scaling::StandardScaler;
pub use similarity::{cosine_similarity, similarity_matrix, top_k_neighbors};
pub use source::{CatalogSource, RatedBook, RatingSource, RecommendationSink};
pub use text::TfidfVectorizer;
pub use types::{Recommendation, SimilarBook};

/// Engine configuration.
///
/// `text_weight` and `numeric_weight` are intended to sum to 1.0; the engine
/// does not enforce it.
#[derive(Debug, Clone)]
pub struct RecsConfig {
    /// Weight of text features in the fused content row (default: 0.8)
    pub text_weight: f32,
    /// Weight of numeric features in the fused content row (default: 0.2)
    pub numeric_weight: f32,
    /// Vocabulary cap for the tf-idf transform (default: 5000)
    pub max_text_features: usize,
    /// Minimum documents a term must appear in (default: 2)
    pub min_doc_freq: usize,
    /// Maximum fraction of documents a term may appear in (default: 0.8)
    pub max_doc_frac: f32,
    /// Page count substituted for books without one (default: 300)
    pub default_pages: f32,
    /// Lowest rating that counts as preference evidence (default: 4.0)
    pub signal_rating: f32,
    /// Scores at or below this never surface (default: 0.1)
    pub min_score: f32,
    /// Average rating that earns the quality bonus (default: 4.0)
    pub quality_rating: f32,
    /// Average rating called out as highly rated in explanations (default: 4.5)
    pub highly_rated: f32,
    /// Review count that earns the confidence bonus (default: 50)
    pub confident_reviews: u32,
    /// Fixed score attached to popularity-fallback results (default: 0.8)
    pub fallback_score: f32,
}

impl Default for RecsConfig {
    fn default() -> Self {
        Self {
            text_weight: 0.8,
            numeric_weight: 0.2,
            max_text_features: 5000,
            min_doc_freq: 2,
            max_doc_frac: 0.8,
            default_pages: 300.0,
            signal_rating: 4.0,
            min_score: 0.1,
            quality_rating: 4.0,
            highly_rated: 4.5,
            confident_reviews: 50,
            fallback_score: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = RecsConfig::default();
        assert_eq!(config.text_weight, 0.8);
        assert_eq!(config.numeric_weight, 0.2);
        assert!((config.text_weight + config.numeric_weight - 1.0).abs() < 1e-6);
        assert_eq!(config.max_text_features, 5000);
        assert_eq!(config.min_score, 0.1);
        assert_eq!(config.fallback_score, 0.8);
    }
}
