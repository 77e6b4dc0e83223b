//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign bearer tokens (HS256).
    pub signing_secret: String,
    /// Session validity window in seconds (default: 604_800 = 7 days).
    pub session_ttl_secs: u64,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
    /// Minimum password length for policy enforcement.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_secret: String::new(),
            session_ttl_secs: 604_800,
            pepper: None,
            min_password_length: 8,
        }
    }
}
