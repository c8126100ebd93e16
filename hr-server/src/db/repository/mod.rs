//! Repository Module
//!
//! CRUD and range-scan primitives over the SQLite pool, one file per
//! table. Functions are free async fns; the ones that take part in a
//! service transaction accept any executor so they run against either the
//! pool or an open transaction.
//!
//! Queries use runtime binding (`query` / `query_as`), never the
//! compile-time checked macros — builds stay independent of a prepared
//! database.

pub mod contract;
pub mod department;
pub mod employee;
pub mod leave_request;
pub mod position;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepoError::Validation(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Stand-in upper bound for open-ended date ranges (NULL end date).
///
/// ISO dates compare lexicographically, so this collates after every real
/// calendar date the system will ever see.
pub(crate) const DATE_MAX: &str = "9999-12-31";
