//! Per-book feature extraction
//!
//! Builds the raw inputs the content matrix is assembled from: a combined
//! text string for the tf-idf transform and a small numeric attribute
//! vector for standardization.

use readsphere_core::Book;

/// Number of numeric attributes extracted per book.
pub const NUMERIC_FEATURES: usize = 4;

/// Combine a book's text attributes into one string for vectorization.
///
/// Order: description once, genre three times (boosting its term weight over
/// single-occurrence tokens), each subgenre, each tag, then the author as a
/// single `author_`-prefixed underscore-joined token so multi-word names
/// survive tokenization and stay distinct from generic vocabulary. Missing
/// or blank attributes contribute nothing.
pub fn combine_text_features(book: &Book) -> String {
    let mut features: Vec<String> = Vec::new();

    if let Some(description) = book.description.as_deref() {
        if !description.trim().is_empty() {
            features.push(description.to_string());
        }
    }

    if let Some(genre) = book.genre.as_deref() {
        if !genre.trim().is_empty() {
            for _ in 0..3 {
                features.push(genre.to_string());
            }
        }
    }

    features.extend(
        book.subgenres
            .iter()
            .filter(|s| !s.trim().is_empty())
            .cloned(),
    );
    features.extend(book.tags.iter().filter(|t| !t.trim().is_empty()).cloned());

    if let Some(author) = book.author.as_deref() {
        if !author.trim().is_empty() {
            features.push(format!("author_{}", author.trim().replace(' ', "_")));
        }
    }

    features.join(" ")
}

/// Numeric attributes in content-matrix column order:
/// pages, average rating, review count, popularity score.
///
/// Pages default to `default_pages` when absent; the quality triple defaults
/// to zero.
pub fn numeric_features(book: &Book, default_pages: f32) -> [f32; NUMERIC_FEATURES] {
    [
        book.pages.map(|p| p as f32).unwrap_or(default_pages),
        book.average_rating.unwrap_or(0.0),
        book.review_count.map(|c| c as f32).unwrap_or(0.0),
        book.popularity_score.unwrap_or(0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn book() -> Book {
        Book {
            id: Uuid::new_v4(),
            title: "The Ember Road".to_string(),
            author: Some("Mara Voss".to_string()),
            genre: Some("Fantasy".to_string()),
            subgenres: vec!["Epic".to_string()],
            tags: vec!["dragons".to_string(), "magic".to_string()],
            description: Some("A courier crosses a burning empire.".to_string()),
            pages: Some(512),
            average_rating: Some(4.6),
            review_count: Some(210),
            popularity_score: Some(88.0),
            published_date: None,
            language: Some("en".to_string()),
        }
    }

    #[test]
    fn combines_all_attributes_in_order() {
        let combined = combine_text_features(&book());
        assert_eq!(
            combined,
            "A courier crosses a burning empire. Fantasy Fantasy Fantasy Epic dragons magic author_Mara_Voss"
        );
    }

    #[test]
    fn absent_optional_attributes_contribute_nothing() {
        let mut b = book();
        b.author = None;
        b.genre = None;
        b.subgenres.clear();
        b.tags.clear();
        assert_eq!(
            combine_text_features(&b),
            "A courier crosses a burning empire."
        );

        b.description = None;
        assert_eq!(combine_text_features(&b), "");
    }

    #[test]
    fn blank_strings_are_treated_as_absent() {
        let mut b = book();
        b.genre = Some("  ".to_string());
        b.tags = vec![String::new(), "magic".to_string()];
        let combined = combine_text_features(&b);
        assert!(!combined.contains("Fantasy"));
        assert!(combined.contains("magic"));
        assert!(!combined.contains("  "));
    }

    #[test]
    fn numeric_defaults_fill_missing_attributes() {
        let mut b = book();
        b.pages = None;
        b.average_rating = None;
        b.review_count = None;
        b.popularity_score = None;
        assert_eq!(numeric_features(&b, 300.0), [300.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn numeric_features_read_present_attributes() {
        assert_eq!(numeric_features(&book(), 300.0), [512.0, 4.6, 210.0, 88.0]);
    }
}
