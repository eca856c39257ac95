//! Pairwise content similarity
//!
//! Cosine similarity over content-matrix rows. The matrix is symmetric with
//! the self-similarity on the diagonal; it must be recomputed whenever the
//! content matrix changes.

use ndarray::{Array2, ArrayView1};

/// Cosine similarity between two vectors; zero vectors are orthogonal to
/// everything.
pub fn cosine_similarity(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// All-pairs cosine similarity between the rows of `content`.
///
/// Only the upper triangle is computed; the result is mirrored.
pub fn similarity_matrix(content: &Array2<f32>) -> Array2<f32> {
    let n = content.nrows();
    let mut sim = Array2::<f32>::zeros((n, n));
    for i in 0..n {
        sim[[i, i]] = cosine_similarity(content.row(i), content.row(i));
        for j in (i + 1)..n {
            let s = cosine_similarity(content.row(i), content.row(j));
            sim[[i, j]] = s;
            sim[[j, i]] = s;
        }
    }
    sim
}

/// The `k` rows most similar to `row`, excluding `row` itself.
///
/// Sorted by descending similarity; equal scores keep their original row
/// order. An out-of-range row yields an empty result.
pub fn top_k_neighbors(similarity: &Array2<f32>, row: usize, k: usize) -> Vec<(usize, f32)> {
    if row >= similarity.nrows() {
        return Vec::new();
    }
    let mut scored: Vec<(usize, f32)> = similarity
        .row(row)
        .iter()
        .copied()
        .enumerate()
        .filter(|(idx, _)| *idx != row)
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);
    scored
}
