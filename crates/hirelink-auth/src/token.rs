//! Signed bearer token issuance/verification and opaque session-id
//! generation.
//!
//! The session store is keyed by a random opaque id; the bearer token
//! is a self-contained signed claim set issued alongside it. Rotating
//! the signing secret leaves stored sessions valid.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Type discriminator for tokens minted at login.
pub const SESSION_TOKEN_TYPE: &str = "session";

/// Claims embedded in every signed bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    /// Token type discriminator (e.g. `session`).
    pub typ: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

/// Issue a signed HS256 bearer token embedding an expiry and the given
/// type discriminator. Tokens are immutable after issuance.
pub fn sign_claims(
    user_id: Uuid,
    token_type: &str,
    ttl_secs: u64,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        typ: token_type.to_string(),
        iat: now,
        exp: now + ttl_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.signing_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
}

/// Verify a bearer token's signature and expiry.
///
/// Never fails loudly: a tampered payload, a signature mismatch, or an
/// elapsed expiry all yield `None`.
pub fn verify_claims(token: &str, config: &AuthConfig) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(config.signing_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);
    validation.leeway = 0;

    jsonwebtoken::decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .ok()
}

/// Generate a cryptographically random opaque session id
/// (32 bytes, base64url-encoded, no padding).
pub fn generate_session_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rand::Rng::random(&mut rng);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            signing_secret: "test-signing-secret".into(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn token_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = sign_claims(user_id, SESSION_TOKEN_TYPE, 900, &config).unwrap();
        let claims = verify_claims(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.typ, SESSION_TOKEN_TYPE);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_yields_none() {
        let config = test_config();
        let token = sign_claims(Uuid::new_v4(), SESSION_TOKEN_TYPE, 900, &config).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(verify_claims(&tampered, &config).is_none());

        let other = AuthConfig {
            signing_secret: "a-different-secret".into(),
            ..AuthConfig::default()
        };
        assert!(verify_claims(&token, &other).is_none());
    }

    #[test]
    fn expired_token_yields_none() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: Uuid::new_v4().to_string(),
            typ: SESSION_TOKEN_TYPE.into(),
            iat: now - 300,
            exp: now - 120,
            jti: Uuid::new_v4().to_string(),
        };
        let key = EncodingKey::from_secret(config.signing_secret.as_bytes());
        let token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        assert!(verify_claims(&token, &config).is_none());
    }

    #[test]
    fn session_ids_are_url_safe_and_unique() {
        let id = generate_session_id();
        assert!(
            id.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        // 32 bytes -> 43 base64url chars.
        assert_eq!(id.len(), 43);
        assert_ne!(id, generate_session_id());
    }
}
