//! SurrealDB implementation of [`JobRepository`].

use chrono::{DateTime, Utc};
use hirelink_core::error::HirelinkResult;
use hirelink_core::models::job::{CreateJob, Job, JobStatus};
use hirelink_core::repository::{JobRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct JobRow {
    employer_id: String,
    title: String,
    description: String,
    location: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct JobRowWithId {
    record_id: String,
    employer_id: String,
    title: String,
    description: String,
    location: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<JobStatus, DbError> {
    JobStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown job status: {s}")))
}

impl JobRow {
    fn into_job(self, id: Uuid) -> Result<Job, DbError> {
        let employer_id = Uuid::parse_str(&self.employer_id)
            .map_err(|e| DbError::Decode(format!("invalid employer UUID: {e}")))?;
        Ok(Job {
            id,
            employer_id,
            title: self.title,
            description: self.description,
            location: self.location,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl JobRowWithId {
    fn try_into_job(self) -> Result<Job, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let employer_id = Uuid::parse_str(&self.employer_id)
            .map_err(|e| DbError::Decode(format!("invalid employer UUID: {e}")))?;
        Ok(Job {
            id,
            employer_id,
            title: self.title,
            description: self.description,
            location: self.location,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Job repository.
#[derive(Clone)]
pub struct SurrealJobRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealJobRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> JobRepository for SurrealJobRepository<C> {
    async fn create(&self, input: CreateJob) -> HirelinkResult<Job> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('job', $id) SET \
                 employer_id = $employer_id, \
                 title = $title, \
                 description = $description, \
                 location = $location, \
                 status = 'open'",
            )
            .bind(("id", id_str.clone()))
            .bind(("employer_id", input.employer_id.to_string()))
            .bind(("title", input.title))
            .bind(("description", input.description))
            .bind(("location", input.location))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<JobRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "job".into(),
            id: id_str,
        })?;

        Ok(row.into_job(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> HirelinkResult<Job> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('job', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<JobRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "job".into(),
            id: id_str,
        })?;

        Ok(row.into_job(id)?)
    }

    async fn list_open(&self, pagination: Pagination) -> HirelinkResult<PaginatedResult<Job>> {
        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM job \
                 WHERE status = 'open' GROUP ALL",
            )
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM job \
                 WHERE status = 'open' \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<JobRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(JobRowWithId::try_into_job)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
