//! Book catalog models
//!
//! The canonical book record as stored in the ReadSphere catalog. Most
//! attributes are optional at ingestion time; consumers that need a default
//! (page counts, rating aggregates) apply it themselves rather than relying
//! on placeholder values in the record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book in the ReadSphere catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Catalog identifier
    pub id: Uuid,

    /// Display title
    pub title: String,

    /// Author display name
    pub author: Option<String>,

    /// Primary genre
    pub genre: Option<String>,

    /// Secondary genres, most relevant first
    #[serde(default)]
    pub subgenres: Vec<String>,

    /// Free-form descriptive tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Back-cover description / synopsis
    pub description: Option<String>,

    /// Page count
    pub pages: Option<u32>,

    /// Mean review rating, 0.0 to 5.0
    pub average_rating: Option<f32>,

    /// Number of reviews behind `average_rating`
    pub review_count: Option<u32>,

    /// Platform popularity score, 0.0 to 100.0
    pub popularity_score: Option<f32>,

    /// First publication date
    pub published_date: Option<NaiveDate>,

    /// ISO 639-1 language code
    pub language: Option<String>,
}

impl Book {
    /// Whether this book carries a non-empty description.
    ///
    /// Books without one are invisible to content-based features: there is
    /// no text to vectorize.
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_book() -> Book {
        Book {
            id: Uuid::new_v4(),
            title: "Untitled".to_string(),
            author: None,
            genre: None,
            subgenres: Vec::new(),
            tags: Vec::new(),
            description: None,
            pages: None,
            average_rating: None,
            review_count: None,
            popularity_score: None,
            published_date: None,
            language: None,
        }
    }

    #[test]
    fn has_description_rejects_missing_and_blank() {
        let mut book = minimal_book();
        assert!(!book.has_description());

        book.description = Some("   ".to_string());
        assert!(!book.has_description());

        book.description = Some("A quiet story of a lighthouse keeper.".to_string());
        assert!(book.has_description());
    }

    #[test]
    fn deserializes_with_absent_optional_lists() {
        let json = r#"{
            "id": "7b1c8a52-3f43-4f09-9a6b-0d2f3f1c9a11",
            "title": "The Glass Meridian",
            "author": "N. Okafor",
            "genre": "Science Fiction",
            "description": "A cartographer maps a city that rearranges itself.",
            "pages": 412,
            "average_rating": 4.4,
            "review_count": 183,
            "popularity_score": 77.2,
            "published_date": "2019-05-14",
            "language": "en"
        }"#;

        let book: Book = serde_json::from_str(json).expect("book should deserialize");
        assert!(book.subgenres.is_empty());
        assert!(book.tags.is_empty());
        assert!(book.has_description());
    }
}
