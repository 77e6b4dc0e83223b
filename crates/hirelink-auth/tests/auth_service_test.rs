//! Integration tests for the authentication service and access guard
//! against an in-memory SurrealDB.

use chrono::{Duration, Utc};
use hirelink_auth::config::AuthConfig;
use hirelink_auth::guard::AccessGuard;
use hirelink_auth::service::{AuthService, LoginInput, RegisterInput};
use hirelink_auth::session::SessionService;
use hirelink_auth::token;
use hirelink_core::error::HirelinkError;
use hirelink_core::models::session::CreateSession;
use hirelink_core::models::user::Role;
use hirelink_core::repository::SessionRepository;
use hirelink_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

type Db = surrealdb::engine::local::Db;
type Users = SurrealUserRepository<Db>;
type Sessions = SurrealSessionRepository<Db>;

fn test_config() -> AuthConfig {
    AuthConfig {
        signing_secret: "test-signing-secret".into(),
        session_ttl_secs: 3600,
        pepper: None,
        min_password_length: 8,
    }
}

/// Spin up an in-memory DB, run migrations, and wire the auth stack.
async fn setup() -> (AuthService<Users, Sessions>, AccessGuard<Users, Sessions>, Sessions) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hirelink_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let sessions = SurrealSessionRepository::new(db);
    let session_service = SessionService::new(users.clone(), sessions.clone(), test_config());
    let auth = AuthService::new(users, session_service.clone());
    let guard = AccessGuard::new(session_service);
    (auth, guard, sessions)
}

fn register_input(email: &str, role: Role) -> RegisterInput {
    RegisterInput {
        email: email.into(),
        full_name: "Dana Doe".into(),
        phone: "+15550002222".into(),
        password: "correct-horse-battery".into(),
        role,
    }
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let (auth, _, _) = setup().await;

    let user = auth
        .register(register_input("dana@example.com", Role::JobSeeker))
        .await
        .unwrap();
    // The raw password never lands in the store.
    assert_ne!(user.password_hash, "correct-horse-battery");

    let output = auth
        .login(LoginInput {
            email: "dana@example.com".into(),
            password: "correct-horse-battery".into(),
        })
        .await
        .unwrap();
    assert_eq!(output.user.id, user.id);
    assert_eq!(output.expires_in, 3600);

    // The bearer token verifies independently of the session id.
    let claims = token::verify_claims(&output.access_token, &test_config()).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.typ, token::SESSION_TOKEN_TYPE);
    assert_ne!(output.access_token, output.session.id);

    let current = auth.current_user(&output.session.id).await.unwrap().unwrap();
    assert_eq!(current.id, user.id);
}

#[tokio::test]
async fn bad_credentials_read_identically() {
    let (auth, _, _) = setup().await;
    auth.register(register_input("dana@example.com", Role::JobSeeker))
        .await
        .unwrap();

    let err = auth
        .login(LoginInput {
            email: "dana@example.com".into(),
            password: "wrong-password-here".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HirelinkError::InvalidCredentials));

    let err = auth
        .login(LoginInput {
            email: "nobody@example.com".into(),
            password: "correct-horse-battery".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HirelinkError::InvalidCredentials));
}

#[tokio::test]
async fn short_passwords_are_rejected_at_registration() {
    let (auth, _, _) = setup().await;
    let err = auth
        .register(RegisterInput {
            password: "short".into(),
            ..register_input("dana@example.com", Role::JobSeeker)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HirelinkError::Validation { .. }));
}

#[tokio::test]
async fn expired_sessions_are_lazily_removed() {
    let (auth, _, sessions) = setup().await;
    let user = auth
        .register(register_input("dana@example.com", Role::JobSeeker))
        .await
        .unwrap();

    // A session whose window has already elapsed.
    let stale = sessions
        .create(CreateSession {
            id: token::generate_session_id(),
            user_id: user.id,
            expires_at: Utc::now() - Duration::seconds(60),
        })
        .await
        .unwrap();

    assert!(auth.current_user(&stale.id).await.unwrap().is_none());
    // The first validation deleted the row.
    assert!(sessions.get(&stale.id).await.unwrap().is_none());
}

#[tokio::test]
async fn logout_destroys_the_session_and_is_idempotent() {
    let (auth, _, _) = setup().await;
    auth.register(register_input("dana@example.com", Role::JobSeeker))
        .await
        .unwrap();
    let output = auth
        .login(LoginInput {
            email: "dana@example.com".into(),
            password: "correct-horse-battery".into(),
        })
        .await
        .unwrap();

    auth.logout(&output.session.id).await.unwrap();
    assert!(auth.current_user(&output.session.id).await.unwrap().is_none());
    // Logging out twice is fine.
    auth.logout(&output.session.id).await.unwrap();
}

#[tokio::test]
async fn guard_distinguishes_missing_from_invalid_carriers() {
    let (_, guard, _) = setup().await;

    let err = guard.require_auth(None).await.unwrap_err();
    assert!(matches!(err, HirelinkError::AuthenticationRequired));

    let err = guard.require_auth(Some("forged-session-id")).await.unwrap_err();
    assert!(matches!(err, HirelinkError::SessionExpired));
}

#[tokio::test]
async fn guard_enforces_role_membership() {
    let (auth, guard, _) = setup().await;
    auth.register(register_input("dana@example.com", Role::JobSeeker))
        .await
        .unwrap();
    let output = auth
        .login(LoginInput {
            email: "dana@example.com".into(),
            password: "correct-horse-battery".into(),
        })
        .await
        .unwrap();
    let session_id = output.session.id.as_str();

    // The seeker passes the seeker gate...
    let identity = guard.require_job_seeker(Some(session_id)).await.unwrap();
    assert_eq!(identity.role(), Role::JobSeeker);

    // ...and is turned away from the admin gate with diagnostics.
    let err = guard.require_admin(Some(session_id)).await.unwrap_err();
    match err {
        HirelinkError::InsufficientPermissions { required, actual } => {
            assert_eq!(required, "admin");
            assert_eq!(actual, "job_seeker");
        }
        other => panic!("expected InsufficientPermissions, got {other:?}"),
    }

    let err = guard
        .require_employer_or_admin(Some(session_id))
        .await
        .unwrap_err();
    assert!(matches!(err, HirelinkError::InsufficientPermissions { .. }));
}
