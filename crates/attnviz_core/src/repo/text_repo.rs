//! Text repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `texts` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate text length before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Ids come from `AUTOINCREMENT` and are never reused after delete.

use crate::db::DbError;
use crate::model::text::{validate_text, TextId, TextRecord, TextValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for text persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TextValidationError),
    Db(DbError),
    NotFound(TextId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "text not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted text data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TextValidationError> for RepoError {
    fn from(value: TextValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for text CRUD operations.
pub trait TextRepository {
    fn create_text(&self, text: &str) -> RepoResult<TextId>;
    fn update_text(&self, record: &TextRecord) -> RepoResult<()>;
    fn get_text(&self, id: TextId) -> RepoResult<Option<TextRecord>>;
    fn list_texts(&self) -> RepoResult<Vec<TextRecord>>;
    /// Returns whether a row was removed.
    fn delete_text(&self, id: TextId) -> RepoResult<bool>;
}

/// SQLite-backed text repository.
pub struct SqliteTextRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTextRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TextRepository for SqliteTextRepository<'_> {
    fn create_text(&self, text: &str) -> RepoResult<TextId> {
        validate_text(text)?;

        self.conn
            .execute("INSERT INTO texts (text) VALUES (?1);", params![text])?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_text(&self, record: &TextRecord) -> RepoResult<()> {
        record.validate()?;

        let changed = self.conn.execute(
            "UPDATE texts SET text = ?1 WHERE id = ?2;",
            params![record.text.as_str(), record.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.id));
        }

        Ok(())
    }

    fn get_text(&self, id: TextId) -> RepoResult<Option<TextRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, text FROM texts WHERE id = ?1;",
                params![id],
                read_text_row,
            )
            .optional()?;

        record.map(check_persisted).transpose()
    }

    fn list_texts(&self) -> RepoResult<Vec<TextRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text FROM texts ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(check_persisted(read_text_row(row)?)?);
        }

        Ok(records)
    }

    fn delete_text(&self, id: TextId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM texts WHERE id = ?1;", params![id])?;
        Ok(changed > 0)
    }
}

fn read_text_row(row: &Row<'_>) -> rusqlite::Result<TextRecord> {
    Ok(TextRecord {
        id: row.get("id")?,
        text: row.get("text")?,
    })
}

fn check_persisted(record: TextRecord) -> RepoResult<TextRecord> {
    record.validate().map_err(|err| {
        RepoError::InvalidData(format!("row {} in texts.text: {err}", record.id))
    })?;
    Ok(record)
}
