//! User preference profiles
//!
//! Aggregates a reader's high-rated books into weighted preference
//! distributions. Profiles are rebuilt on every request from the live
//! rating history and never cached.

use crate::source::RatedBook;
use std::collections::HashMap;

/// Derived preference summary for one reader.
///
/// Genre and author weights reward both consistency and volume:
/// `mean(rating) * ln(count + 1)`, so a genre backed by many strong ratings
/// outweighs one strong outlier, with diminishing returns on volume. Tag
/// weights are plain occurrence counts across the qualifying books.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub genres: HashMap<String, f32>,
    pub authors: HashMap<String, f32>,
    pub tags: HashMap<String, u32>,
    /// Mean of the qualifying ratings
    pub avg_rating: f32,
    /// Number of qualifying books
    pub total_books: usize,
}

impl UserProfile {
    /// Build a profile from a reader's qualifying (signal-threshold) rated
    /// books. Returns `None` when there are none, signaling the caller to
    /// fall back to a popularity ranking.
    pub fn from_rated_books(rated: &[RatedBook]) -> Option<Self> {
        if rated.is_empty() {
            return None;
        }

        let genres = affinity_weights(
            rated
                .iter()
                .filter_map(|r| Some((nonblank(r.genre.as_deref())?, r.rating))),
        );
        let authors = affinity_weights(
            rated
                .iter()
                .filter_map(|r| Some((nonblank(r.author.as_deref())?, r.rating))),
        );

        let mut tags: HashMap<String, u32> = HashMap::new();
        for tag in rated
            .iter()
            .flat_map(|r| r.tags.iter())
            .filter(|t| !t.trim().is_empty())
        {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }

        let avg_rating = rated.iter().map(|r| r.rating).sum::<f32>() / rated.len() as f32;

        Some(Self {
            genres,
            authors,
            tags,
            avg_rating,
            total_books: rated.len(),
        })
    }

    /// Weight for a genre; unknown or absent genres weigh zero.
    pub fn genre_weight(&self, genre: Option<&str>) -> f32 {
        genre
            .and_then(|g| self.genres.get(g))
            .copied()
            .unwrap_or(0.0)
    }

    /// Weight for an author; unknown or absent authors weigh zero.
    pub fn author_weight(&self, author: Option<&str>) -> f32 {
        author
            .and_then(|a| self.authors.get(a))
            .copied()
            .unwrap_or(0.0)
    }

    /// Occurrence count for a tag; unknown tags count zero.
    pub fn tag_count(&self, tag: &str) -> u32 {
        self.tags.get(tag).copied().unwrap_or(0)
    }
}

fn nonblank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `mean(rating) * ln(count + 1)` per key.
fn affinity_weights<'a>(pairs: impl Iterator<Item = (&'a str, f32)>) -> HashMap<String, f32> {
    let mut sums: HashMap<&str, (f32, u32)> = HashMap::new();
    for (key, rating) in pairs {
        let entry = sums.entry(key).or_insert((0.0, 0));
        entry.0 += rating;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, count))| {
            let mean = sum / count as f32;
            (key.to_string(), mean * (count as f32 + 1.0).ln())
        })
        .collect()
}
