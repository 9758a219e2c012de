use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Error taxonomy for store operations.
///
/// `Validation` and `NotFound` are client-caused and map to 4xx at the API
/// boundary; `Db` covers connectivity and query failures and maps to 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        StoreError::NotFound(msg.into())
    }

    /// Maps a unique-constraint violation from the database into a
    /// `Validation` error, so concurrent duplicate inserts surface to the
    /// caller instead of crashing the request.
    pub fn from_insert(err: DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StoreError::Validation(format!("{what} already exists"))
            }
            _ => StoreError::Db(err),
        }
    }
}
