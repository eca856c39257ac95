//! Personalized recommendation scoring
//!
//! Scores every unread catalog book against a user's preference profile,
//! explains the result, and falls back to a popularity ranking for users
//! with no rating signal.

use crate::catalog::CatalogSnapshot;
use crate::error::Result;
use crate::profile::UserProfile;
use crate::similarity::top_k_neighbors;
use crate::source::{RatingSource, RecommendationSink};
use crate::types::{Recommendation, SimilarBook};
use crate::RecsConfig;
use readsphere_core::Book;
use std::cmp::Ordering;
use tracing::{debug, info};
use uuid::Uuid;

// Additive score weights. Genre affinity dominates; the rest nudge.
const GENRE_WEIGHT: f32 = 0.4;
const AUTHOR_WEIGHT: f32 = 0.2;
const TAG_WEIGHT: f32 = 0.2;
const QUALITY_BONUS: f32 = 0.1;
const CONFIDENCE_BONUS: f32 = 0.05;
const POPULARITY_WEIGHT: f32 = 0.05;

const POPULAR_EXPLANATION: &str = "Popular among readers";
const SIMILAR_EXPLANATION: &str = "Similar content and themes";
const GENERIC_EXPLANATION: &str = "Recommended based on your reading preferences";

/// Recommendation queries over one catalog snapshot.
pub struct Recommender<'a, R: RatingSource> {
    snapshot: &'a CatalogSnapshot,
    ratings: &'a R,
    config: RecsConfig,
}

impl<'a, R: RatingSource> Recommender<'a, R> {
    pub fn new(snapshot: &'a CatalogSnapshot, ratings: &'a R, config: RecsConfig) -> Self {
        Self {
            snapshot,
            ratings,
            config,
        }
    }

    /// Top-`n` personalized recommendations for a user.
    ///
    /// Builds the profile from the live rating history; a user with no
    /// qualifying ratings gets the popularity ranking instead. Books the
    /// user has rated or logged as read never appear. Scores at or below
    /// the relevance floor are dropped; ties keep catalog order.
    pub fn recommend_for_user(&self, user_id: Uuid, n: usize) -> Result<Vec<Recommendation>> {
        let rated = self
            .ratings
            .rated_at_or_above(user_id, self.config.signal_rating)?;
        let Some(profile) = UserProfile::from_rated_books(&rated) else {
            debug!(%user_id, "no rating signal, using popularity fallback");
            return Ok(self.trending(n));
        };

        let seen = self.ratings.read_or_reviewed(user_id)?;
        let mut recommendations: Vec<Recommendation> = Vec::new();
        for book in self.snapshot.books() {
            if seen.contains(&book.id) {
                continue;
            }
            let score = self.score_book(book, &profile);
            if score > self.config.min_score {
                recommendations.push(Recommendation {
                    book_id: book.id,
                    title: book.title.clone(),
                    author: book.author.clone(),
                    genre: book.genre.clone(),
                    score,
                    explanation: self.explain(book, &profile),
                });
            }
        }

        recommendations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        recommendations.truncate(n);
        debug!(%user_id, count = recommendations.len(), "scored recommendations");
        Ok(recommendations)
    }

    /// Additive profile score, clamped to 1.0.
    fn score_book(&self, book: &Book, profile: &UserProfile) -> f32 {
        let mut score = 0.0;

        score += profile.genre_weight(book.genre.as_deref()) * GENRE_WEIGHT;
        score += profile.author_weight(book.author.as_deref()) * AUTHOR_WEIGHT;

        if !book.tags.is_empty() {
            let tag_sum: f32 = book
                .tags
                .iter()
                .map(|tag| profile.tag_count(tag) as f32)
                .sum();
            score += tag_sum / book.tags.len() as f32 * TAG_WEIGHT;
        }

        if book.average_rating.unwrap_or(0.0) >= self.config.quality_rating {
            score += QUALITY_BONUS;
        }
        if book.review_count.unwrap_or(0) >= self.config.confident_reviews {
            score += CONFIDENCE_BONUS;
        }
        score += book.popularity_score.unwrap_or(0.0) / 100.0 * POPULARITY_WEIGHT;

        score.min(1.0)
    }

    /// Human-readable reasons in fixed priority order: genre, author, up to
    /// two matching tags, then a high-rating callout.
    fn explain(&self, book: &Book, profile: &UserProfile) -> String {
        let mut reasons: Vec<String> = Vec::new();

        if let Some(genre) = book.genre.as_deref() {
            if profile.genres.contains_key(genre) {
                reasons.push(format!("You enjoy {genre} books"));
            }
        }
        if let Some(author) = book.author.as_deref() {
            if profile.authors.contains_key(author) {
                reasons.push(format!("You've liked books by {author}"));
            }
        }

        let matching: Vec<&str> = book
            .tags
            .iter()
            .filter(|tag| profile.tags.contains_key(*tag))
            .map(String::as_str)
            .take(2)
            .collect();
        if !matching.is_empty() {
            reasons.push(format!("Matches your interest in {}", matching.join(", ")));
        }

        if book.average_rating.unwrap_or(0.0) >= self.config.highly_rated {
            reasons.push("Highly rated by other readers".to_string());
        }

        if reasons.is_empty() {
            GENERIC_EXPLANATION.to_string()
        } else {
            reasons.join("; ")
        }
    }

    /// Popularity ranking: the catalog by descending popularity score, each
    /// result carrying the fixed fallback score.
    pub fn trending(&self, n: usize) -> Vec<Recommendation> {
        let mut order: Vec<usize> = (0..self.snapshot.len()).collect();
        order.sort_by(|&a, &b| {
            let pa = self.snapshot.book_at(a).popularity_score.unwrap_or(0.0);
            let pb = self.snapshot.book_at(b).popularity_score.unwrap_or(0.0);
            pb.partial_cmp(&pa).unwrap_or(Ordering::Equal)
        });

        order
            .into_iter()
            .take(n)
            .map(|idx| {
                let book = self.snapshot.book_at(idx);
                Recommendation {
                    book_id: book.id,
                    title: book.title.clone(),
                    author: book.author.clone(),
                    genre: book.genre.clone(),
                    score: self.config.fallback_score,
                    explanation: POPULAR_EXPLANATION.to_string(),
                }
            })
            .collect()
    }

    /// The `k` books most similar to `book_id` by content.
    ///
    /// An id not in the snapshot yields an empty result, not an error.
    pub fn find_similar_books(&self, book_id: Uuid, k: usize) -> Vec<SimilarBook> {
        let Some(row) = self.snapshot.row_of(book_id) else {
            debug!(%book_id, "similar-books query for unknown book");
            return Vec::new();
        };

        top_k_neighbors(self.snapshot.similarity(), row, k)
            .into_iter()
            .map(|(idx, similarity_score)| {
                let book = self.snapshot.book_at(idx);
                SimilarBook {
                    book_id: book.id,
                    title: book.title.clone(),
                    author: book.author.clone(),
                    genre: book.genre.clone(),
                    similarity_score,
                    explanation: SIMILAR_EXPLANATION.to_string(),
                }
            })
            .collect()
    }

    /// Compute recommendations and replace the user's cached set in the
    /// sink. The sink write is atomic per user: prior entries are dropped.
    pub fn refresh_for_user<S: RecommendationSink>(
        &self,
        user_id: Uuid,
        n: usize,
        sink: &S,
    ) -> Result<Vec<Recommendation>> {
        let recommendations = self.recommend_for_user(user_id, n)?;
        sink.replace_recommendations(user_id, &recommendations)?;
        info!(%user_id, count = recommendations.len(), "saved recommendations");
        Ok(recommendations)
    }
}
