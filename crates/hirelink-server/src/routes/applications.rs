//! Application endpoints: apply, read, review transitions, and
//! document exchange.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use hirelink_core::models::application::{Application, ApplicationStatus, DocumentKind};
use hirelink_core::repository::Pagination;
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use uuid::Uuid;

use super::session_id;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status; the legacy `pending` spelling is accepted and
    /// normalised on deserialisation.
    pub status: ApplicationStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RequestDocumentsRequest {
    pub kinds: Vec<DocumentKind>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitDocumentsRequest {
    /// Document kind -> storage key of the uploaded content.
    pub documents: BTreeMap<DocumentKind, String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub items: Vec<Application>,
    pub total: u64,
}

pub(crate) async fn apply<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    let identity = state
        .guard
        .require_job_seeker(session_id(&jar).as_deref())
        .await?;

    let application = state.lifecycle.apply(&identity.user, job_id).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub(crate) async fn get_one<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, ApiError> {
    let identity = state.guard.require_auth(session_id(&jar).as_deref()).await?;
    let application = state.lifecycle.get_for(&identity.user, id).await?;
    Ok(Json(application))
}

pub(crate) async fn update_status<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Application>, ApiError> {
    let identity = state
        .guard
        .require_employer_or_admin(session_id(&jar).as_deref())
        .await?;

    let application = state
        .lifecycle
        .transition(&identity.user, id, body.status, body.reason)
        .await?;
    Ok(Json(application))
}

pub(crate) async fn request_documents<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Json(body): Json<RequestDocumentsRequest>,
) -> Result<Json<Application>, ApiError> {
    let identity = state
        .guard
        .require_employer_or_admin(session_id(&jar).as_deref())
        .await?;

    let application = state
        .lifecycle
        .request_documents(&identity.user, id, body.kinds)
        .await?;
    Ok(Json(application))
}

pub(crate) async fn submit_documents<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Json(body): Json<SubmitDocumentsRequest>,
) -> Result<Json<Application>, ApiError> {
    let identity = state
        .guard
        .require_job_seeker(session_id(&jar).as_deref())
        .await?;

    let application = state
        .lifecycle
        .submit_documents(&identity.user, id, body.documents)
        .await?;
    Ok(Json(application))
}

pub(crate) async fn list_for_job<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    let identity = state
        .guard
        .require_employer_or_admin(session_id(&jar).as_deref())
        .await?;

    let page = state
        .lifecycle
        .list_for_job(&identity.user, job_id, Pagination::default())
        .await?;
    Ok(Json(ApplicationListResponse {
        items: page.items,
        total: page.total,
    }))
}
