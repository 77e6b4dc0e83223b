//! Database-specific error types and conversions.

use hirelink_core::error::HirelinkError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Stored row could not be decoded: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },
}

impl From<DbError> for HirelinkError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => HirelinkError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => HirelinkError::AlreadyExists { entity },
            other => HirelinkError::Database(other.to_string()),
        }
    }
}
