//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in the
//! database crate; services depend only on these traits.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::HirelinkResult;
use crate::models::{
    application::{Application, ApplicationStatus, CreateApplication, DocumentKind, StatusChange},
    job::{CreateJob, Job},
    session::{CreateSession, Session},
    user::{CreateUser, UpdateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait UserRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the email is taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = HirelinkResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HirelinkResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = HirelinkResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = HirelinkResult<User>> + Send;
}

pub trait JobRepository: Send + Sync {
    fn create(&self, input: CreateJob) -> impl Future<Output = HirelinkResult<Job>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HirelinkResult<Job>> + Send;
    fn list_open(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = HirelinkResult<PaginatedResult<Job>>> + Send;
}

pub trait ApplicationRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the applicant already applied to
    /// the job.
    fn create(
        &self,
        input: CreateApplication,
    ) -> impl Future<Output = HirelinkResult<Application>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HirelinkResult<Application>> + Send;
    fn list_by_job(
        &self,
        job_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = HirelinkResult<PaginatedResult<Application>>> + Send;

    /// Apply a status change if and only if the stored status still
    /// equals `expected_from`. Returns `None` when the row exists but
    /// the expectation is stale — the caller re-reads and re-validates.
    /// Row-level atomicity of the store serialises concurrent writers.
    fn update_status(
        &self,
        id: Uuid,
        expected_from: ApplicationStatus,
        change: StatusChange,
    ) -> impl Future<Output = HirelinkResult<Option<Application>>> + Send;

    /// Merge submitted documents into the application. Does not touch
    /// the status.
    fn record_documents(
        &self,
        id: Uuid,
        submissions: BTreeMap<DocumentKind, String>,
    ) -> impl Future<Output = HirelinkResult<Application>> + Send;
}

pub trait SessionRepository: Send + Sync {
    fn create(&self, input: CreateSession) -> impl Future<Output = HirelinkResult<Session>> + Send;
    /// Point lookup by opaque session id. Absent rows are `None`, not
    /// an error — the session service folds both into "invalid".
    fn get(&self, id: &str) -> impl Future<Output = HirelinkResult<Option<Session>>> + Send;
    /// Unconditional, idempotent delete.
    fn delete(&self, id: &str) -> impl Future<Output = HirelinkResult<()>> + Send;
    /// Remove all expired sessions. Operational cleanup only; the
    /// request path relies on lazy per-session expiry instead.
    fn purge_expired(&self) -> impl Future<Output = HirelinkResult<u64>> + Send;
}
