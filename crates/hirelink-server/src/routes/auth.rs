//! Auth endpoints: register, login, logout, who-am-i.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use hirelink_auth::{LoginInput, RegisterInput};
use hirelink_core::error::HirelinkError;
use hirelink_core::models::user::{Role, User};
use serde::{Deserialize, Serialize};
use serde_json::json;
use surrealdb::Connection;
use tracing::warn;
use uuid::Uuid;

use super::{SESSION_COOKIE, session_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Client-facing view of an account; never exposes the credential
/// hash.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    pub employer_verified: bool,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            employer_verified: user.employer_verified,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserSummary,
    pub access_token: String,
    pub expires_in: u64,
}

fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .build()
}

pub(crate) async fn register<C: Connection>(
    State(state): State<AppState<C>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    // Admin accounts are provisioned out of band, never self-served.
    if body.role == Role::Admin {
        return Err(HirelinkError::Validation {
            message: "admin accounts cannot be self-registered".into(),
        }
        .into());
    }

    let user = state
        .auth
        .register(RegisterInput {
            email: body.email,
            full_name: body.full_name,
            phone: body.phone,
            password: body.password,
            role: body.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub(crate) async fn login<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let output = state
        .auth
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = jar.add(session_cookie(output.session.id));
    Ok((
        jar,
        Json(LoginResponse {
            user: output.user.into(),
            access_token: output.access_token,
            expires_in: output.expires_in,
        }),
    ))
}

/// Destroys the session if one is presented. Always 200 — logging out
/// an already-dead session is not an error.
pub(crate) async fn logout<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    if let Some(id) = session_id(&jar) {
        if let Err(e) = state.auth.logout(&id).await {
            warn!(error = %e, "session destroy failed during logout");
        }
    }
    let jar = jar.remove(session_cookie(String::new()));
    (jar, Json(json!({ "status": "logged_out" })))
}

pub(crate) async fn me<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
) -> Result<Json<UserSummary>, ApiError> {
    let identity = state.guard.require_auth(session_id(&jar).as_deref()).await?;
    Ok(Json(identity.user.into()))
}
