//! Error types for the Hirelink platform.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HirelinkError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authentication required")]
    AuthenticationRequired,

    #[error("session is invalid or expired")]
    SessionExpired,

    #[error("insufficient permissions: requires {required}, actor is {actual}")]
    InsufficientPermissions { required: String, actual: String },

    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type HirelinkResult<T> = Result<T, HirelinkError>;
