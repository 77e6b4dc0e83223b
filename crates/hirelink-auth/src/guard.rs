//! Role-gated access control.
//!
//! Handlers call [`AccessGuard::require_role`] (or a convenience
//! composition) and inspect the typed result before touching a
//! protected resource.

use hirelink_core::error::HirelinkResult;
use hirelink_core::models::user::{Role, User};
use hirelink_core::repository::{SessionRepository, UserRepository};

use crate::error::AuthError;
use crate::session::SessionService;

/// An authenticated identity attached to a request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

impl Identity {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

fn roles_label(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join("|")
}

/// Resolves a request's session carrier into an authorized identity.
#[derive(Clone)]
pub struct AccessGuard<U, S> {
    sessions: SessionService<U, S>,
}

impl<U, S> AccessGuard<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(sessions: SessionService<U, S>) -> Self {
        Self { sessions }
    }

    /// Resolve the session carrier, rejecting with
    /// `AuthenticationRequired` when absent and `SessionExpired` when
    /// the store cannot vouch for it (invalid and expired are
    /// indistinguishable to the caller by design).
    pub async fn require_auth(&self, session_id: Option<&str>) -> HirelinkResult<Identity> {
        let session_id = session_id.ok_or(AuthError::AuthenticationRequired)?;
        match self.sessions.validate_session(session_id).await? {
            Some(user) => Ok(Identity { user }),
            None => Err(AuthError::SessionExpired.into()),
        }
    }

    /// Compose `require_auth` with a role-membership check. The
    /// rejection carries both the required and actual roles for
    /// diagnostics.
    pub async fn require_role(
        &self,
        session_id: Option<&str>,
        allowed: &[Role],
    ) -> HirelinkResult<Identity> {
        let identity = self.require_auth(session_id).await?;
        if allowed.contains(&identity.role()) {
            Ok(identity)
        } else {
            Err(AuthError::InsufficientPermissions {
                required: roles_label(allowed),
                actual: identity.role().as_str().to_string(),
            }
            .into())
        }
    }

    pub async fn require_job_seeker(&self, session_id: Option<&str>) -> HirelinkResult<Identity> {
        self.require_role(session_id, &[Role::JobSeeker]).await
    }

    pub async fn require_employer_or_admin(
        &self,
        session_id: Option<&str>,
    ) -> HirelinkResult<Identity> {
        self.require_role(session_id, &[Role::Employer, Role::Admin])
            .await
    }

    pub async fn require_admin(&self, session_id: Option<&str>) -> HirelinkResult<Identity> {
        self.require_role(session_id, &[Role::Admin]).await
    }
}
