//! HTTP surface for the text visualizer.
//!
//! # Responsibility
//! - Map HTTP verbs and paths onto `attnviz_core` services.
//! - Own process-level concerns: configuration, state wiring, serving.
//!
//! # Invariants
//! - Handlers reach storage only through the injected `AppState`.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::{router, serve, TextPayload};
pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;
