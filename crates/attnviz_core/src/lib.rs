//! Core domain logic for the text visualizer service.
//! This crate owns record validation, persistence and token relevance scoring.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod viz;

pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::text::{validate_text, TextId, TextRecord, TextValidationError, MAX_TEXT_BYTES};
pub use repo::text_repo::{RepoError, RepoResult, SqliteTextRepository, TextRepository};
pub use service::text_service::{TextService, TextServiceError, TextServiceResult};
pub use viz::relevance::{RelevanceMatrix, RelevanceScorer, UniformRelevance};
pub use viz::tokenizer::tokenize;
pub use viz::visualize;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
