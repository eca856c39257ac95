//! In-memory data sources
//!
//! Backs the demo driver and the engine's tests. The production services
//! implement the same traits over Postgres; the engine cannot tell the
//! difference.

use crate::source::{CatalogSource, RatedBook, RatingSource, RecommendationSink};
use crate::types::Recommendation;
use anyhow::Result;
use readsphere_core::{Book, Rating};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

/// Catalog, ratings, reading history, and recommendation cache in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    books: Vec<Book>,
    book_index: HashMap<Uuid, usize>,
    ratings: Vec<Rating>,
    reading_history: HashMap<Uuid, HashSet<Uuid>>,
    recommendations: Mutex<HashMap<Uuid, Vec<Recommendation>>>,
}

impl InMemoryStore {
    pub fn new(books: Vec<Book>, ratings: Vec<Rating>) -> Self {
        let book_index = books
            .iter()
            .enumerate()
            .map(|(idx, book)| (book.id, idx))
            .collect();
        Self {
            books,
            book_index,
            ratings,
            reading_history: HashMap::new(),
            recommendations: Mutex::new(HashMap::new()),
        }
    }

    /// Log a book in a user's reading history without a rating.
    pub fn mark_read(&mut self, user_id: Uuid, book_id: Uuid) {
        self.reading_history
            .entry(user_id)
            .or_default()
            .insert(book_id);
    }

    /// Cached recommendations for a user, if any have been stored.
    pub fn cached_recommendations(&self, user_id: Uuid) -> Option<Vec<Recommendation>> {
        self.recommendations
            .lock()
            .ok()
            .and_then(|cache| cache.get(&user_id).cloned())
    }
}

impl CatalogSource for InMemoryStore {
    fn books_with_description(&self) -> Result<Vec<Book>> {
        Ok(self
            .books
            .iter()
            .filter(|b| b.has_description())
            .cloned()
            .collect())
    }
}

impl RatingSource for InMemoryStore {
    fn rated_at_or_above(&self, user_id: Uuid, min_rating: f32) -> Result<Vec<RatedBook>> {
        Ok(self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id && r.rating >= min_rating)
            .filter_map(|r| {
                let book = self.book_index.get(&r.book_id).map(|&idx| &self.books[idx])?;
                Some(RatedBook {
                    book_id: book.id,
                    genre: book.genre.clone(),
                    author: book.author.clone(),
                    tags: book.tags.clone(),
                    rating: r.rating,
                })
            })
            .collect())
    }

    fn read_or_reviewed(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let mut seen: HashSet<Uuid> = self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.book_id)
            .collect();
        if let Some(history) = self.reading_history.get(&user_id) {
            seen.extend(history.iter().copied());
        }
        Ok(seen)
    }
}

impl RecommendationSink for InMemoryStore {
    fn replace_recommendations(
        &self,
        user_id: Uuid,
        recommendations: &[Recommendation],
    ) -> Result<()> {
        let mut cache = self
            .recommendations
            .lock()
            .map_err(|_| anyhow::anyhow!("recommendation cache lock poisoned"))?;
        cache.insert(user_id, recommendations.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(title: &str, description: Option<&str>) -> Book {
        Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: None,
            genre: None,
            subgenres: Vec::new(),
            tags: Vec::new(),
            description: description.map(str::to_string),
            pages: None,
            average_rating: None,
            review_count: None,
            popularity_score: None,
            published_date: None,
            language: None,
        }
    }

    #[test]
    fn catalog_source_filters_description_less_books() {
        let store = InMemoryStore::new(
            vec![
                book("Has one", Some("Something happens.")),
                book("Has none", None),
            ],
            Vec::new(),
        );
        let books = store.books_with_description().expect("books");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Has one");
    }

    #[test]
    fn read_or_reviewed_unions_ratings_and_history() {
        let user = Uuid::new_v4();
        let rated = book("Rated", Some("d"));
        let logged = book("Logged", Some("d"));
        let rated_id = rated.id;
        let logged_id = logged.id;

        let mut store = InMemoryStore::new(
            vec![rated, logged],
            vec![Rating::new(user, rated_id, 2.0, Utc::now()).expect("rating")],
        );
        store.mark_read(user, logged_id);

        let seen = store.read_or_reviewed(user).expect("seen");
        assert!(seen.contains(&rated_id));
        assert!(seen.contains(&logged_id));
    }

    #[test]
    fn low_ratings_are_not_preference_signal() {
        let user = Uuid::new_v4();
        let b = book("Meh", Some("d"));
        let id = b.id;
        let store = InMemoryStore::new(
            vec![b],
            vec![Rating::new(user, id, 3.0, Utc::now()).expect("rating")],
        );

        assert!(store.rated_at_or_above(user, 4.0).expect("rated").is_empty());
        assert!(store.read_or_reviewed(user).expect("seen").contains(&id));
    }

    #[test]
    fn replace_recommendations_overwrites_prior_set() {
        let store = InMemoryStore::new(Vec::new(), Vec::new());
        let user = Uuid::new_v4();
        let rec = |title: &str| Recommendation {
            book_id: Uuid::new_v4(),
            title: title.to_string(),
            author: None,
            genre: None,
            score: 0.5,
            explanation: String::new(),
        };

        store
            .replace_recommendations(user, &[rec("first"), rec("second")])
            .expect("store");
        store
            .replace_recommendations(user, &[rec("third")])
            .expect("store");

        let cached = store.cached_recommendations(user).expect("cached");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].title, "third");
    }
}
