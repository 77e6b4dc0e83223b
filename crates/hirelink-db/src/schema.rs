//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD full_name ON TABLE user TYPE string;
DEFINE FIELD phone ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['job_seeker', 'employer', 'admin'];
DEFINE FIELD employer_verified ON TABLE user TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Jobs
-- =======================================================================
DEFINE TABLE job SCHEMAFULL;
DEFINE FIELD employer_id ON TABLE job TYPE string;
DEFINE FIELD title ON TABLE job TYPE string;
DEFINE FIELD description ON TABLE job TYPE string;
DEFINE FIELD location ON TABLE job TYPE string;
DEFINE FIELD status ON TABLE job TYPE string \
    ASSERT $value IN ['open', 'closed'];
DEFINE FIELD created_at ON TABLE job TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE job TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_job_employer ON TABLE job COLUMNS employer_id;
DEFINE INDEX idx_job_status ON TABLE job COLUMNS status;

-- =======================================================================
-- Applications
-- =======================================================================
DEFINE TABLE application SCHEMAFULL;
DEFINE FIELD job_id ON TABLE application TYPE string;
DEFINE FIELD applicant_id ON TABLE application TYPE string;
-- 'pending' is the legacy spelling of 'applied'; reads normalise it.
DEFINE FIELD status ON TABLE application TYPE string \
    ASSERT $value IN ['applied', 'pending', 'reviewed', \
    'additional_docs_required', 'interview_scheduled', \
    'interview_completed', 'hired', 'not_proceeding'];
DEFINE FIELD required_documents ON TABLE application TYPE array<string> \
    DEFAULT [];
DEFINE FIELD submitted_documents ON TABLE application TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD decision_reason ON TABLE application TYPE option<string>;
DEFINE FIELD created_at ON TABLE application TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE application TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_application_job_applicant ON TABLE application \
    COLUMNS job_id, applicant_id UNIQUE;
DEFINE INDEX idx_application_job ON TABLE application COLUMNS job_id;

-- =======================================================================
-- Sessions (keyed by the opaque session id)
-- =======================================================================
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE session TYPE string;
DEFINE FIELD expires_at ON TABLE session TYPE datetime;
DEFINE FIELD created_at ON TABLE session TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_session_user ON TABLE session COLUMNS user_id;
";

/// Apply any migrations newer than the recorded schema version.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// The v1 schema DDL, exposed for inspection and tooling.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
