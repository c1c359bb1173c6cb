//! Text use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete entry points for transport callers.
//! - Turn repository results into records the caller can return as-is.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - `update` on an unknown id fails with `NotFound`, the same as `get`.
//! - `delete` succeeds whether or not a row existed.

use crate::model::text::{TextId, TextRecord, TextValidationError};
use crate::repo::text_repo::{RepoError, TextRepository};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for text use-cases.
#[derive(Debug)]
pub enum TextServiceError {
    /// Input text violates the length rule.
    Validation(TextValidationError),
    /// Target record does not exist.
    NotFound(TextId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for TextServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "text not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent text state: {details}"),
        }
    }
}

impl Error for TextServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TextServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type TextServiceResult<T> = Result<T, TextServiceError>;

/// Text service facade over repository implementations.
pub struct TextService<R: TextRepository> {
    repo: R,
}

impl<R: TextRepository> TextService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every record in primary-key order.
    pub fn list(&self) -> TextServiceResult<Vec<TextRecord>> {
        let records = self.repo.list_texts()?;
        debug!(
            "event=text_list module=service status=ok count={}",
            records.len()
        );
        Ok(records)
    }

    /// Gets one record by id.
    pub fn get(&self, id: TextId) -> TextServiceResult<TextRecord> {
        self.repo
            .get_text(id)?
            .ok_or(TextServiceError::NotFound(id))
    }

    /// Creates a record and returns it with the assigned id.
    pub fn create(&self, text: impl Into<String>) -> TextServiceResult<TextRecord> {
        let text = text.into();
        let id = match self.repo.create_text(&text) {
            Ok(id) => id,
            Err(err) => {
                warn!("event=text_create module=service status=error error={err}");
                return Err(err.into());
            }
        };

        let created = self
            .repo
            .get_text(id)?
            .ok_or(TextServiceError::InconsistentState(
                "created text not found in read-back",
            ))?;
        info!("event=text_create module=service status=ok id={id}");
        Ok(created)
    }

    /// Replaces the text of an existing record.
    ///
    /// # Contract
    /// - Fails with `Validation` before touching storage when text is too long.
    /// - Fails with `NotFound` when no row has `id`.
    pub fn update(&self, id: TextId, text: impl Into<String>) -> TextServiceResult<TextRecord> {
        let record = TextRecord::new(id, text);
        if let Err(err) = self.repo.update_text(&record) {
            warn!("event=text_update module=service status=error id={id} error={err}");
            return Err(err.into());
        }
        info!("event=text_update module=service status=ok id={id}");
        Ok(record)
    }

    /// Deletes a record by id. Missing ids are not an error.
    pub fn delete(&self, id: TextId) -> TextServiceResult<()> {
        let removed = self.repo.delete_text(id)?;
        info!("event=text_delete module=service status=ok id={id} removed={removed}");
        Ok(())
    }
}
