//! Job listing endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use hirelink_core::models::job::{CreateJob, Job};
use hirelink_core::repository::{JobRepository, Pagination};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;

use super::session_id;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub items: Vec<Job>,
    pub total: u64,
}

pub(crate) async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Json(body): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let identity = state
        .guard
        .require_employer_or_admin(session_id(&jar).as_deref())
        .await?;

    let job = state
        .jobs
        .create(CreateJob {
            employer_id: identity.user.id,
            title: body.title,
            description: body.description,
            location: body.location,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// Public listing of open jobs.
pub(crate) async fn list_open<C: Connection>(
    State(state): State<AppState<C>>,
) -> Result<Json<JobListResponse>, ApiError> {
    let page = state.jobs.list_open(Pagination::default()).await?;
    Ok(Json(JobListResponse {
        items: page.items,
        total: page.total,
    }))
}
