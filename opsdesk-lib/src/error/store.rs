//! Key-value store error types

/// Errors raised by persisted store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
}
