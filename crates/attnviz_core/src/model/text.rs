//! Text record domain model.
//!
//! # Responsibility
//! - Define the record shape exchanged with storage and transport layers.
//! - Own the length rule applied before any write.
//!
//! # Invariants
//! - `text` never exceeds `MAX_TEXT_BYTES` UTF-8 bytes once persisted.
//! - Over-long input is rejected, never truncated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier, backed by an SQLite `INTEGER PRIMARY KEY`.
pub type TextId = i64;

/// Inclusive upper bound on `TextRecord::text`, counted in UTF-8 bytes.
pub const MAX_TEXT_BYTES: usize = 100;

/// One persisted text row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    /// Assigned on create; immutable afterwards.
    pub id: TextId,
    pub text: String,
}

impl TextRecord {
    pub fn new(id: TextId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Checks this record against the persisted-state invariant.
    pub fn validate(&self) -> Result<(), TextValidationError> {
        validate_text(&self.text)
    }
}

/// Validation failure for text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValidationError {
    TooLong { bytes: usize, max: usize },
}

impl Display for TextValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLong { max, .. } => write!(f, "Text exceeds {max} characters"),
        }
    }
}

impl Error for TextValidationError {}

/// Validates raw text content before it reaches storage.
///
/// Empty text is accepted.
pub fn validate_text(text: &str) -> Result<(), TextValidationError> {
    let bytes = text.len();
    if bytes > MAX_TEXT_BYTES {
        return Err(TextValidationError::TooLong {
            bytes,
            max: MAX_TEXT_BYTES,
        });
    }
    Ok(())
}
