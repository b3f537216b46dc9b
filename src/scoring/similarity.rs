use crate::catalog::CatalogIndex;

/// Squared-sum norm of `v`, accumulated in `f64`.
#[inline]
pub(crate) fn norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt()
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 means identical direction, and 0 when either
/// vector has zero magnitude. Components are widened to `f64` before accumulation.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    cosine_with_norms(a, norm(a), b, norm(b))
}

#[inline]
fn cosine_with_norms(a: &[f32], norm_a: f64, b: &[f32], norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();
    dot / (norm_a * norm_b)
}

/// Scores `query` against every alias embedding, in alias order.
///
/// The caller is responsible for `query.len() == index.dimension()`.
pub fn score_all(index: &CatalogIndex, query: &[f32]) -> Vec<f64> {
    debug_assert_eq!(query.len(), index.dimension());

    let query_norm = norm(query);

    index
        .rows()
        .map(|(row, row_norm)| cosine_with_norms(query, query_norm, row, row_norm))
        .collect()
}
