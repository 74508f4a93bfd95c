use thiserror::Error;

/// Errors that can occur when interacting with the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be mapped back to the domain model.
    #[error("Corrupt stored state: {0}")]
    Decode(String),
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;
