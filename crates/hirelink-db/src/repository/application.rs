//! SurrealDB implementation of [`ApplicationRepository`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hirelink_core::error::HirelinkResult;
use hirelink_core::models::application::{
    Application, ApplicationStatus, CreateApplication, DocumentKind, StatusChange,
};
use hirelink_core::repository::{ApplicationRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ApplicationRow {
    job_id: String,
    applicant_id: String,
    status: String,
    required_documents: Vec<String>,
    submitted_documents: serde_json::Value,
    decision_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ApplicationRowWithId {
    record_id: String,
    job_id: String,
    applicant_id: String,
    status: String,
    required_documents: Vec<String>,
    submitted_documents: serde_json::Value,
    decision_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<ApplicationStatus, DbError> {
    // Accepts the legacy 'pending' spelling and normalises it.
    ApplicationStatus::parse(s)
        .ok_or_else(|| DbError::Decode(format!("unknown application status: {s}")))
}

fn parse_required(kinds: Vec<String>) -> Result<Vec<DocumentKind>, DbError> {
    kinds
        .iter()
        .map(|k| {
            DocumentKind::parse(k)
                .ok_or_else(|| DbError::Decode(format!("unknown document kind: {k}")))
        })
        .collect()
}

fn parse_submitted(value: serde_json::Value) -> Result<BTreeMap<DocumentKind, String>, DbError> {
    let serde_json::Value::Object(entries) = value else {
        return Err(DbError::Decode("submitted_documents is not an object".into()));
    };
    entries
        .into_iter()
        .map(|(kind, storage_key)| {
            let kind = DocumentKind::parse(&kind)
                .ok_or_else(|| DbError::Decode(format!("unknown document kind: {kind}")))?;
            let storage_key = storage_key
                .as_str()
                .ok_or_else(|| DbError::Decode("document storage key is not a string".into()))?
                .to_string();
            Ok((kind, storage_key))
        })
        .collect()
}

fn submitted_to_value(documents: &BTreeMap<DocumentKind, String>) -> serde_json::Value {
    serde_json::Value::Object(
        documents
            .iter()
            .map(|(kind, storage_key)| {
                (
                    kind.as_str().to_string(),
                    serde_json::Value::String(storage_key.clone()),
                )
            })
            .collect(),
    )
}

impl ApplicationRow {
    fn into_application(self, id: Uuid) -> Result<Application, DbError> {
        let job_id = Uuid::parse_str(&self.job_id)
            .map_err(|e| DbError::Decode(format!("invalid job UUID: {e}")))?;
        let applicant_id = Uuid::parse_str(&self.applicant_id)
            .map_err(|e| DbError::Decode(format!("invalid applicant UUID: {e}")))?;
        Ok(Application {
            id,
            job_id,
            applicant_id,
            status: parse_status(&self.status)?,
            required_documents: parse_required(self.required_documents)?,
            submitted_documents: parse_submitted(self.submitted_documents)?,
            decision_reason: self.decision_reason,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ApplicationRowWithId {
    fn try_into_application(self) -> Result<Application, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let row = ApplicationRow {
            job_id: self.job_id,
            applicant_id: self.applicant_id,
            status: self.status,
            required_documents: self.required_documents,
            submitted_documents: self.submitted_documents,
            decision_reason: self.decision_reason,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_application(id)
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Application repository.
#[derive(Clone)]
pub struct SurrealApplicationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealApplicationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ApplicationRepository for SurrealApplicationRepository<C> {
    async fn create(&self, input: CreateApplication) -> HirelinkResult<Application> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('application', $id) SET \
                 job_id = $job_id, \
                 applicant_id = $applicant_id, \
                 status = 'applied', \
                 required_documents = [], \
                 submitted_documents = {}, \
                 decision_reason = NONE",
            )
            .bind(("id", id_str.clone()))
            .bind(("job_id", input.job_id.to_string()))
            .bind(("applicant_id", input.applicant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| {
            // The (job_id, applicant_id) unique index reports a
            // duplicate application on CREATE.
            if e.to_string().contains("already contains") {
                DbError::AlreadyExists {
                    entity: "application".into(),
                }
            } else {
                DbError::Migration(e.to_string())
            }
        })?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "application".into(),
            id: id_str,
        })?;

        Ok(row.into_application(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> HirelinkResult<Application> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('application', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "application".into(),
            id: id_str,
        })?;

        Ok(row.into_application(id)?)
    }

    async fn list_by_job(
        &self,
        job_id: Uuid,
        pagination: Pagination,
    ) -> HirelinkResult<PaginatedResult<Application>> {
        let job_id_str = job_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM application \
                 WHERE job_id = $job_id GROUP ALL",
            )
            .bind(("job_id", job_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM application \
                 WHERE job_id = $job_id \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("job_id", job_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(ApplicationRowWithId::try_into_application)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected_from: ApplicationStatus,
        change: StatusChange,
    ) -> HirelinkResult<Option<Application>> {
        let id_str = id.to_string();

        // Single conditional statement: the store's row atomicity
        // serialises concurrent writers, and a stale expectation
        // simply matches nothing.
        let mut sets = vec!["status = $to"];
        if change.reason.is_some() {
            sets.push("decision_reason = $reason");
        }
        if change.required_documents.is_some() {
            sets.push("required_documents = $required_documents");
        }
        sets.push("updated_at = time::now()");

        let expected: Vec<String> = expected_from
            .storage_aliases()
            .iter()
            .map(|s| (*s).to_string())
            .collect();

        let query = format!(
            "UPDATE type::record('application', $id) SET {} \
             WHERE status IN $expected",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str))
            .bind(("to", change.to.as_str().to_string()))
            .bind(("expected", expected));

        if let Some(reason) = change.reason {
            builder = builder.bind(("reason", reason));
        }
        if let Some(required) = change.required_documents {
            let required: Vec<String> =
                required.iter().map(|k| k.as_str().to_string()).collect();
            builder = builder.bind(("required_documents", required));
        }

        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_application(id)?)),
            None => Ok(None),
        }
    }

    async fn record_documents(
        &self,
        id: Uuid,
        submissions: BTreeMap<DocumentKind, String>,
    ) -> HirelinkResult<Application> {
        let current = self.get_by_id(id).await?;
        let mut merged = current.submitted_documents;
        merged.extend(submissions);

        let id_str = id.to_string();
        let mut result = self
            .db
            .query(
                "UPDATE type::record('application', $id) SET \
                 submitted_documents = $submitted_documents, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("submitted_documents", submitted_to_value(&merged)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "application".into(),
            id: id_str,
        })?;

        Ok(row.into_application(id)?)
    }
}
