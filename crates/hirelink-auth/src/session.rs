//! Session creation, validation, and destruction.

use chrono::{Duration, Utc};
use hirelink_core::error::{HirelinkError, HirelinkResult};
use hirelink_core::models::session::{CreateSession, Session};
use hirelink_core::models::user::User;
use hirelink_core::repository::{SessionRepository, UserRepository};
use tracing::debug;

use crate::config::AuthConfig;
use crate::token;

/// Persisted-session service.
///
/// Generic over repository implementations so the auth layer has no
/// dependency on the database crate.
#[derive(Clone)]
pub struct SessionService<U, S> {
    users: U,
    sessions: S,
    config: AuthConfig,
}

impl<U, S> SessionService<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(users: U, sessions: S, config: AuthConfig) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Mint an opaque session id and persist the session row with a
    /// fixed validity window.
    pub async fn create_session(&self, user_id: uuid::Uuid) -> HirelinkResult<Session> {
        let id = token::generate_session_id();
        let expires_at = Utc::now() + Duration::seconds(self.config.session_ttl_secs as i64);

        self.sessions
            .create(CreateSession {
                id,
                user_id,
                expires_at,
            })
            .await
    }

    /// Resolve a session id to its user.
    ///
    /// An absent row yields `None`. An expired row is deleted lazily
    /// and yields `None` — there is no background sweeper, and the
    /// delete is idempotent, so concurrent validations of the same
    /// expired session all converge on the same outcome.
    pub async fn validate_session(&self, session_id: &str) -> HirelinkResult<Option<User>> {
        let Some(session) = self.sessions.get(session_id).await? else {
            return Ok(None);
        };

        if session.expires_at <= Utc::now() {
            debug!(session_id, "session expired, removing row");
            self.sessions.delete(session_id).await?;
            return Ok(None);
        }

        match self.users.get_by_id(session.user_id).await {
            Ok(user) => Ok(Some(user)),
            Err(HirelinkError::NotFound { .. }) => {
                // Orphaned session for a deleted account.
                self.sessions.delete(session_id).await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Unconditional delete; idempotent.
    pub async fn destroy_session(&self, session_id: &str) -> HirelinkResult<()> {
        self.sessions.delete(session_id).await
    }
}
