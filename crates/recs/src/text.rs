//! Tf-idf text vectorization
//!
//! Turns the combined per-book feature strings into weighted term vectors.
//! The transform is fitted once per catalog load; refitting produces a new
//! feature space, so any matrix derived from the old fit must be rebuilt
//! with it.

use crate::error::{RecsError, Result};
use ndarray::{Array1, Array2, Axis};
use std::collections::{HashMap, HashSet};

/// English stop words, sorted for binary search. Tokens shorter than two
/// characters never reach the filter.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercase word tokenizer.
///
/// Tokens are runs of alphanumeric characters or underscores, at least two
/// characters long. Underscores stay inside tokens so that composite markers
/// like `author_jane_doe` survive as a single term.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|t| !is_stop_word(t))
        .collect()
}

/// Tf-idf vectorizer over a fixed document corpus.
///
/// Vocabulary selection keeps terms whose document frequency falls inside
/// `[min_df, max_df]`, caps the vocabulary at `max_features` by corpus
/// frequency, and orders columns alphabetically so repeated fits over the
/// same corpus produce identical matrices. Idf uses the smoothed form
/// `ln((1 + n) / (1 + df)) + 1` and rows are L2-normalized.
pub struct TfidfVectorizer {
    max_features: Option<usize>,
    ngram_range: (usize, usize),
    min_df: usize,
    max_df: f32,
    vocabulary: HashMap<String, usize>,
    idf: Array1<f32>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: None,
            ngram_range: (1, 1),
            min_df: 1,
            max_df: 1.0,
            vocabulary: HashMap::new(),
            idf: Array1::zeros(0),
        }
    }

    /// Cap the vocabulary at the `max_features` most frequent terms.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Extract n-grams from `min_n` to `max_n` tokens.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n.max(1), max_n.max(1));
        self
    }

    /// Drop terms appearing in fewer than `min_df` documents.
    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Drop terms appearing in more than `max_df` fraction of documents.
    #[must_use]
    pub fn with_max_df(mut self, max_df: f32) -> Self {
        self.max_df = max_df.clamp(0.0, 1.0);
        self
    }

    /// Number of terms in the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Tokenize a document and expand it into the configured n-gram terms.
    fn analyze(&self, document: &str) -> Vec<String> {
        let tokens = tokenize(document);
        let mut terms = Vec::new();
        for n in self.ngram_range.0..=self.ngram_range.1 {
            for gram in tokens.windows(n) {
                terms.push(gram.join(" "));
            }
        }
        terms
    }

    /// Learn the vocabulary and idf weights from the corpus.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen: HashSet<String> = HashSet::new();
            for term in self.analyze(doc.as_ref()) {
                *corpus_freq.entry(term.clone()).or_insert(0) += 1;
                seen.insert(term);
            }
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Document-frequency window, then frequency-ranked vocabulary cap.
        let max_df_count = (self.max_df * n_docs as f32).floor() as usize;
        let mut kept: Vec<(String, usize)> = corpus_freq
            .into_iter()
            .filter(|(term, _)| {
                let df = doc_freq.get(term).copied().unwrap_or(0);
                df >= self.min_df && df <= max_df_count
            })
            .collect();
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(max_features) = self.max_features {
            kept.truncate(max_features);
        }

        let mut terms: Vec<String> = kept.into_iter().map(|(term, _)| term).collect();
        terms.sort();
        if terms.is_empty() {
            return Err(RecsError::EmptyVocabulary { documents: n_docs });
        }

        self.idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs as f32) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        Ok(())
    }

    /// Map documents into the fitted feature space.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Array2<f32>> {
        if self.vocabulary.is_empty() {
            return Err(RecsError::NotFitted {
                what: "tf-idf vectorizer",
            });
        }

        let mut matrix = Array2::<f32>::zeros((documents.len(), self.vocabulary.len()));
        for (row, doc) in documents.iter().enumerate() {
            for term in self.analyze(doc.as_ref()) {
                if let Some(&col) = self.vocabulary.get(&term) {
                    matrix[[row, col]] += 1.0;
                }
            }
        }

        for mut row in matrix.axis_iter_mut(Axis(0)) {
            row *= &self.idf;
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }

        Ok(matrix)
    }

    /// Fit on the corpus and transform it in one pass.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Array2<f32>> {
        self.fit(documents)?;
        self.transform(documents)
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_sorted_for_binary_search() {
        for pair in STOP_WORDS.windows(2) {
            assert!(pair[0] < pair[1], "{} >= {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn tokenize_keeps_underscore_tokens_whole() {
        let tokens = tokenize("written by author_Jane_Doe last year");
        assert!(tokens.contains(&"author_jane_doe".to_string()));
    }

    #[test]
    fn tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("a dragon in the sky");
        assert_eq!(tokens, vec!["dragon", "sky"]);
    }

    #[test]
    fn bigrams_are_formed_after_stop_word_removal() {
        let vectorizer = TfidfVectorizer::new().with_ngram_range(1, 2);
        let terms = vectorizer.analyze("the dark tower rises");
        assert!(terms.contains(&"dark tower".to_string()));
        assert!(terms.contains(&"tower rises".to_string()));
    }

    #[test]
    fn min_df_drops_rare_terms() {
        let docs = vec![
            "dragons breathe fire",
            "dragons hoard gold",
            "spaceship leaves orbit",
        ];
        let mut vectorizer = TfidfVectorizer::new().with_min_df(2);
        vectorizer.fit(&docs).expect("fit");
        assert_eq!(vectorizer.vocabulary_size(), 1);
        assert!(vectorizer.vocabulary.contains_key("dragons"));
    }

    #[test]
    fn max_df_drops_ubiquitous_terms() {
        let docs = vec![
            "magic magic everywhere",
            "magic rune circle",
            "magic rune ward",
            "quiet harbor town",
        ];
        let mut vectorizer = TfidfVectorizer::new().with_max_df(0.8);
        vectorizer.fit(&docs).expect("fit");
        // "magic" appears in 3/4 documents = 0.75 <= 0.8, kept.
        assert!(vectorizer.vocabulary.contains_key("magic"));

        let mut strict = TfidfVectorizer::new().with_max_df(0.5);
        strict.fit(&docs).expect("fit");
        assert!(!strict.vocabulary.contains_key("magic"));
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        let docs = vec!["unique words here", "nothing shared anywhere"];
        let result = TfidfVectorizer::new().with_min_df(2).fit(&docs);
        assert!(matches!(
            result,
            Err(RecsError::EmptyVocabulary { documents: 2 })
        ));
    }

    #[test]
    fn transform_before_fit_is_an_error() {
        let vectorizer = TfidfVectorizer::new();
        let result = vectorizer.transform(&["anything"]);
        assert!(matches!(result, Err(RecsError::NotFitted { .. })));
    }

    #[test]
    fn rows_are_l2_normalized() {
        let docs = vec!["ember ash ember", "ash cinder smoke"];
        let mut vectorizer = TfidfVectorizer::new();
        let matrix = vectorizer.fit_transform(&docs).expect("fit_transform");
        for row in matrix.axis_iter(Axis(0)) {
            let norm = row.dot(&row).sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn refitting_the_same_corpus_is_deterministic() {
        let docs = vec![
            "storm over the ridge",
            "storm lanterns in the ridge pass",
            "dust on the old road",
        ];
        let mut first = TfidfVectorizer::new().with_ngram_range(1, 2);
        let a = first.fit_transform(&docs).expect("fit_transform");
        let mut second = TfidfVectorizer::new().with_ngram_range(1, 2);
        let b = second.fit_transform(&docs).expect("fit_transform");

        assert_eq!(first.vocabulary, second.vocabulary);
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-7);
        }
    }
}
