//! Route table and session-cookie plumbing.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod jobs;

use axum::Json;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use surrealdb::Connection;

use crate::state::AppState;

/// Name of the credential cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "session";

/// Pull the session id out of the request's cookie jar, if present.
pub(crate) fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Assemble the full route table over a shared state.
pub fn build_router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(auth::register::<C>))
        .route("/api/v1/auth/login", post(auth::login::<C>))
        .route("/api/v1/auth/logout", post(auth::logout::<C>))
        .route("/api/v1/auth/me", get(auth::me::<C>))
        .route(
            "/api/v1/jobs",
            post(jobs::create::<C>).get(jobs::list_open::<C>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(applications::apply::<C>).get(applications::list_for_job::<C>),
        )
        .route("/api/v1/applications/:id", get(applications::get_one::<C>))
        .route(
            "/api/v1/applications/:id/status",
            post(applications::update_status::<C>),
        )
        .route(
            "/api/v1/applications/:id/documents/request",
            post(applications::request_documents::<C>),
        )
        .route(
            "/api/v1/applications/:id/documents",
            post(applications::submit_documents::<C>),
        )
        .route(
            "/api/v1/admin/sessions/purge",
            post(admin::purge_sessions::<C>),
        )
        .with_state(state)
}
