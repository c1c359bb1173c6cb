//! Pairwise token relevance scoring.
//!
//! `RelevanceScorer` is the seam where a trained model can replace the
//! fixed `UniformRelevance` rule; callers only see tokens in and a square
//! matrix out.

/// Row-major N×N scores indexed by token positions `(i, j)`.
pub type RelevanceMatrix = Vec<Vec<f64>>;

/// Score assigned to a token paired with itself.
pub const SELF_RELEVANCE: f64 = 1.0;
/// Score assigned to every pair of distinct positions.
pub const CROSS_RELEVANCE: f64 = 0.5;

/// Scores every ordered pair of tokens.
///
/// Implementations must return a matrix with exactly `tokens.len()` rows,
/// each of length `tokens.len()`, and must accept an empty slice.
pub trait RelevanceScorer: Send + Sync {
    fn score(&self, tokens: &[String]) -> RelevanceMatrix;
}

/// Placeholder scorer: `1.0` on the diagonal and `0.5` everywhere else.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRelevance;

impl RelevanceScorer for UniformRelevance {
    fn score(&self, tokens: &[String]) -> RelevanceMatrix {
        let n = tokens.len();
        (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { SELF_RELEVANCE } else { CROSS_RELEVANCE })
                    .collect()
            })
            .collect()
    }
}
