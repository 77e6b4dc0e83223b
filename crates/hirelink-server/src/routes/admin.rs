//! Admin-only operational endpoints.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use hirelink_core::repository::SessionRepository;
use serde_json::json;
use surrealdb::Connection;
use tracing::info;

use super::session_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Remove expired session rows in bulk. The request path never needs
/// this — validation expires sessions lazily — but it keeps the table
/// from accumulating dead rows.
pub(crate) async fn purge_sessions<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
) -> Result<Json<serde_json::Value>, ApiError> {
    let identity = state.guard.require_admin(session_id(&jar).as_deref()).await?;

    let purged = state.sessions.purge_expired().await?;
    info!(purged, admin = %identity.user.id, "expired sessions purged");
    Ok(Json(json!({ "purged": purged })))
}
