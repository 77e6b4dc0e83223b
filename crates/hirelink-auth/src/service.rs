//! Authentication service — registration, login, and logout
//! orchestration.

use hirelink_core::error::{HirelinkError, HirelinkResult};
use hirelink_core::models::session::Session;
use hirelink_core::models::user::{CreateUser, Role, User};
use hirelink_core::repository::{SessionRepository, UserRepository};
use tracing::info;

use crate::error::AuthError;
use crate::password;
use crate::session::SessionService;
use crate::token;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    /// Persisted session; its id goes into the `session` cookie.
    pub session: Session,
    /// Signed bearer token with a `session` type discriminator,
    /// issued independently of the session store key.
    pub access_token: String,
    /// Session lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over repository implementations so that the auth layer
/// has no dependency on the database crate.
#[derive(Clone)]
pub struct AuthService<U, S> {
    users: U,
    sessions: SessionService<U, S>,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(users: U, sessions: SessionService<U, S>) -> Self {
        Self { users, sessions }
    }

    /// Create an account. Job seekers and employers self-register;
    /// admin accounts are provisioned out of band.
    pub async fn register(&self, input: RegisterInput) -> HirelinkResult<User> {
        let config = self.sessions.config();
        if input.password.chars().count() < config.min_password_length {
            return Err(AuthError::PasswordTooShort {
                min: config.min_password_length,
            }
            .into());
        }

        let password_hash = password::hash_password(&input.password, config.pepper.as_deref())?;

        let user = self
            .users
            .create(CreateUser {
                email: input.email,
                full_name: input.full_name,
                phone: input.phone,
                password_hash,
                role: input.role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user)
    }

    /// Authenticate with email + password, persist a session, and
    /// issue a signed bearer token.
    pub async fn login(&self, input: LoginInput) -> HirelinkResult<LoginOutput> {
        // 1. Look up the account; an unknown email reads the same as a
        //    bad password.
        let user = match self.users.get_by_email(&input.email).await {
            Ok(u) => u,
            Err(HirelinkError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify the password.
        let config = self.sessions.config();
        let valid =
            password::verify_password(&input.password, &user.password_hash, config.pepper.as_deref())?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Create the session and issue the bearer token.
        let session = self.sessions.create_session(user.id).await?;
        let access_token = token::sign_claims(
            user.id,
            token::SESSION_TOKEN_TYPE,
            config.session_ttl_secs,
            config,
        )?;

        info!(user_id = %user.id, "login succeeded");
        Ok(LoginOutput {
            expires_in: config.session_ttl_secs,
            user,
            session,
            access_token,
        })
    }

    /// Destroy a session (logout). Idempotent — logging out twice is
    /// not an error.
    pub async fn logout(&self, session_id: &str) -> HirelinkResult<()> {
        self.sessions.destroy_session(session_id).await
    }

    /// Resolve the current user from a session id, if the session is
    /// still valid.
    pub async fn current_user(&self, session_id: &str) -> HirelinkResult<Option<User>> {
        self.sessions.validate_session(session_id).await
    }
}
