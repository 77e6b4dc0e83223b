//! Authentication error types.

use hirelink_core::error::HirelinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authentication required")]
    AuthenticationRequired,

    /// Covers both "no such session" and "session past expiry" — the
    /// store does not distinguish them to the caller.
    #[error("session is invalid or expired")]
    SessionExpired,

    #[error("insufficient permissions: requires {required}, actor is {actual}")]
    InsufficientPermissions { required: String, actual: String },

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for HirelinkError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => HirelinkError::InvalidCredentials,
            AuthError::AuthenticationRequired => HirelinkError::AuthenticationRequired,
            AuthError::SessionExpired => HirelinkError::SessionExpired,
            AuthError::InsufficientPermissions { required, actual } => {
                HirelinkError::InsufficientPermissions { required, actual }
            }
            AuthError::PasswordTooShort { .. } => HirelinkError::Validation {
                message: err.to_string(),
            },
            AuthError::Crypto(msg) => HirelinkError::Crypto(msg),
        }
    }
}
