//! Token relevance visualization.
//!
//! # Responsibility
//! - Split text into whitespace-delimited tokens.
//! - Score every token pair through a pluggable `RelevanceScorer`.
//!
//! # Invariants
//! - Output is always square with side equal to the token count.
//! - Nothing here touches storage; results live for one request.

pub mod relevance;
pub mod tokenizer;

use relevance::{RelevanceMatrix, RelevanceScorer};

/// Tokenizes `text` and scores the resulting tokens with `scorer`.
pub fn visualize(scorer: &dyn RelevanceScorer, text: &str) -> RelevanceMatrix {
    let tokens = tokenizer::tokenize(text);
    scorer.score(&tokens)
}
