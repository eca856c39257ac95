//! Catalog snapshots
//!
//! A `CatalogSnapshot` is the immutable product of one catalog load: the
//! eligible books, their fused content matrix, and the all-pairs similarity
//! matrix, with row order shared across all three. Reloading the catalog
//! builds a new snapshot; readers holding the old one stay consistent.

use crate::error::{RecsError, Result};
use crate::features::{combine_text_features, numeric_features};
use crate::scaling::StandardScaler;
use crate::similarity::similarity_matrix;
use crate::source::CatalogSource;
use crate::text::TfidfVectorizer;
use crate::RecsConfig;
use ndarray::{s, Array2};
use readsphere_core::Book;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// One catalog load, frozen: books, content matrix, similarity matrix.
#[derive(Debug)]
pub struct CatalogSnapshot {
    books: Vec<Book>,
    row_of: HashMap<Uuid, usize>,
    content: Array2<f32>,
    similarity: Array2<f32>,
}

impl CatalogSnapshot {
    /// Load eligible books from a catalog source and build a snapshot.
    pub fn load<S: CatalogSource>(source: &S, config: &RecsConfig) -> Result<Self> {
        let books = source.books_with_description()?;
        Self::build(books, config)
    }

    /// Build a snapshot from raw book records.
    ///
    /// Books without a description are dropped; an all-ineligible catalog is
    /// an error, not an empty matrix. The tf-idf transform and the two
    /// numeric scalers are fitted on this catalog alone, so the same books
    /// and configuration always produce the same matrices.
    pub fn build(books: Vec<Book>, config: &RecsConfig) -> Result<Self> {
        let books: Vec<Book> = books.into_iter().filter(Book::has_description).collect();
        if books.is_empty() {
            return Err(RecsError::EmptyCatalog);
        }
        info!(books = books.len(), "loaded catalog");

        let documents: Vec<String> = books.iter().map(combine_text_features).collect();
        let mut vectorizer = TfidfVectorizer::new()
            .with_max_features(config.max_text_features)
            .with_ngram_range(1, 2)
            .with_min_df(config.min_doc_freq)
            .with_max_df(config.max_doc_frac);
        let text = vectorizer.fit_transform(&documents)?;

        // Page count and the quality triple are standardized independently.
        let n = books.len();
        let mut pages = Array2::<f32>::zeros((n, 1));
        let mut quality = Array2::<f32>::zeros((n, 3));
        for (i, book) in books.iter().enumerate() {
            let [page_count, rating, reviews, popularity] =
                numeric_features(book, config.default_pages);
            pages[[i, 0]] = page_count;
            quality[[i, 0]] = rating;
            quality[[i, 1]] = reviews;
            quality[[i, 2]] = popularity;
        }
        let pages = StandardScaler::new().fit_transform(&pages)?;
        let quality = StandardScaler::new().fit_transform(&quality)?;

        let text_cols = text.ncols();
        let mut content = Array2::<f32>::zeros((n, text_cols + 4));
        content
            .slice_mut(s![.., ..text_cols])
            .assign(&(&text * config.text_weight));
        content
            .slice_mut(s![.., text_cols..text_cols + 1])
            .assign(&(&pages * config.numeric_weight));
        content
            .slice_mut(s![.., text_cols + 1..])
            .assign(&(&quality * config.numeric_weight));
        info!(
            rows = n,
            cols = content.ncols(),
            vocabulary = vectorizer.vocabulary_size(),
            "built content matrix"
        );

        let similarity = similarity_matrix(&content);
        info!("computed similarity matrix");

        let row_of = books
            .iter()
            .enumerate()
            .map(|(idx, book)| (book.id, idx))
            .collect();

        Ok(Self {
            books,
            row_of,
            content,
            similarity,
        })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Row index of a book id, if the book is in this snapshot.
    pub fn row_of(&self, book_id: Uuid) -> Option<usize> {
        self.row_of.get(&book_id).copied()
    }

    pub fn book_at(&self, row: usize) -> &Book {
        &self.books[row]
    }

    pub fn content(&self) -> &Array2<f32> {
        &self.content
    }

    pub fn similarity(&self) -> &Array2<f32> {
        &self.similarity
    }
}
