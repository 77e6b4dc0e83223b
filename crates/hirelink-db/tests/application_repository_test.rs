//! Integration tests for the Application repository using in-memory
//! SurrealDB.

use std::collections::BTreeMap;

use hirelink_core::error::HirelinkError;
use hirelink_core::models::application::{
    ApplicationStatus, CreateApplication, DocumentKind, StatusChange,
};
use hirelink_core::repository::{ApplicationRepository, Pagination};
use hirelink_db::repository::SurrealApplicationRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hirelink_db::run_migrations(&db).await.unwrap();
    db
}

fn change(to: ApplicationStatus) -> StatusChange {
    StatusChange {
        to,
        reason: None,
        required_documents: None,
    }
}

#[tokio::test]
async fn create_starts_at_applied() {
    let db = setup().await;
    let repo = SurrealApplicationRepository::new(db);

    let application = repo
        .create(CreateApplication {
            job_id: Uuid::new_v4(),
            applicant_id: Uuid::new_v4(),
        })
        .await
        .unwrap();

    assert_eq!(application.status, ApplicationStatus::Applied);
    assert!(application.required_documents.is_empty());
    assert!(application.submitted_documents.is_empty());
    assert!(application.decision_reason.is_none());

    let fetched = repo.get_by_id(application.id).await.unwrap();
    assert_eq!(fetched.job_id, application.job_id);
}

#[tokio::test]
async fn one_application_per_seeker_per_job() {
    let db = setup().await;
    let repo = SurrealApplicationRepository::new(db);

    let input = CreateApplication {
        job_id: Uuid::new_v4(),
        applicant_id: Uuid::new_v4(),
    };
    repo.create(input.clone()).await.unwrap();
    let err = repo.create(input).await.unwrap_err();
    assert!(matches!(err, HirelinkError::AlreadyExists { .. }));
}

#[tokio::test]
async fn conditional_update_applies_once_and_rejects_stale_writers() {
    let db = setup().await;
    let repo = SurrealApplicationRepository::new(db);

    let application = repo
        .create(CreateApplication {
            job_id: Uuid::new_v4(),
            applicant_id: Uuid::new_v4(),
        })
        .await
        .unwrap();

    // First writer wins.
    let updated = repo
        .update_status(
            application.id,
            ApplicationStatus::Applied,
            change(ApplicationStatus::Reviewed),
        )
        .await
        .unwrap()
        .expect("first update should match");
    assert_eq!(updated.status, ApplicationStatus::Reviewed);

    // A second writer still expecting `applied` observes the row has
    // moved on and gets no match — never a silent overwrite.
    let stale = repo
        .update_status(
            application.id,
            ApplicationStatus::Applied,
            change(ApplicationStatus::InterviewScheduled),
        )
        .await
        .unwrap();
    assert!(stale.is_none());

    let fresh = repo.get_by_id(application.id).await.unwrap();
    assert_eq!(fresh.status, ApplicationStatus::Reviewed);
}

#[tokio::test]
async fn rejection_reason_and_required_documents_are_persisted() {
    let db = setup().await;
    let repo = SurrealApplicationRepository::new(db);

    let application = repo
        .create(CreateApplication {
            job_id: Uuid::new_v4(),
            applicant_id: Uuid::new_v4(),
        })
        .await
        .unwrap();

    let updated = repo
        .update_status(
            application.id,
            ApplicationStatus::Applied,
            StatusChange {
                to: ApplicationStatus::AdditionalDocsRequired,
                reason: None,
                required_documents: Some(vec![
                    DocumentKind::Identification,
                    DocumentKind::Transcript,
                ]),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        updated.required_documents,
        vec![DocumentKind::Identification, DocumentKind::Transcript]
    );

    let rejected = repo
        .update_status(
            application.id,
            ApplicationStatus::AdditionalDocsRequired,
            StatusChange {
                to: ApplicationStatus::NotProceeding,
                reason: Some("Position filled internally".into()),
                required_documents: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rejected.status, ApplicationStatus::NotProceeding);
    assert_eq!(
        rejected.decision_reason.as_deref(),
        Some("Position filled internally")
    );
}

#[tokio::test]
async fn legacy_pending_rows_read_as_applied_and_still_transition() {
    let db = setup().await;

    // A row written by an older deployment.
    let id = Uuid::new_v4();
    db.query(
        "CREATE type::record('application', $id) SET \
         job_id = $job_id, applicant_id = $applicant_id, \
         status = 'pending', required_documents = [], \
         submitted_documents = {}, decision_reason = NONE",
    )
    .bind(("id", id.to_string()))
    .bind(("job_id", Uuid::new_v4().to_string()))
    .bind(("applicant_id", Uuid::new_v4().to_string()))
    .await
    .unwrap()
    .check()
    .unwrap();

    let repo = SurrealApplicationRepository::new(db);
    let application = repo.get_by_id(id).await.unwrap();
    assert_eq!(application.status, ApplicationStatus::Applied);

    // A transition expecting `applied` matches the stored `pending`.
    let updated = repo
        .update_status(
            id,
            ApplicationStatus::Applied,
            change(ApplicationStatus::Reviewed),
        )
        .await
        .unwrap()
        .expect("pending row should satisfy an applied expectation");
    assert_eq!(updated.status, ApplicationStatus::Reviewed);
}

#[tokio::test]
async fn submitted_documents_merge_without_touching_status() {
    let db = setup().await;
    let repo = SurrealApplicationRepository::new(db);

    let application = repo
        .create(CreateApplication {
            job_id: Uuid::new_v4(),
            applicant_id: Uuid::new_v4(),
        })
        .await
        .unwrap();

    let first = repo
        .record_documents(
            application.id,
            BTreeMap::from([(DocumentKind::Resume, "s3://docs/resume-1".to_string())]),
        )
        .await
        .unwrap();
    assert_eq!(first.submitted_documents.len(), 1);
    assert_eq!(first.status, ApplicationStatus::Applied);

    // A later submission adds to, and can replace within, the map.
    let second = repo
        .record_documents(
            application.id,
            BTreeMap::from([
                (DocumentKind::Resume, "s3://docs/resume-2".to_string()),
                (DocumentKind::Transcript, "s3://docs/tr-1".to_string()),
            ]),
        )
        .await
        .unwrap();
    assert_eq!(second.submitted_documents.len(), 2);
    assert_eq!(
        second.submitted_documents[&DocumentKind::Resume],
        "s3://docs/resume-2"
    );
}

#[tokio::test]
async fn list_by_job_pages_in_submission_order() {
    let db = setup().await;
    let repo = SurrealApplicationRepository::new(db);

    let job_id = Uuid::new_v4();
    for _ in 0..3 {
        repo.create(CreateApplication {
            job_id,
            applicant_id: Uuid::new_v4(),
        })
        .await
        .unwrap();
    }
    // An unrelated job's application must not leak in.
    repo.create(CreateApplication {
        job_id: Uuid::new_v4(),
        applicant_id: Uuid::new_v4(),
    })
    .await
    .unwrap();

    let page = repo
        .list_by_job(
            job_id,
            Pagination {
                offset: 0,
                limit: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert!(page.items.iter().all(|a| a.job_id == job_id));

    let rest = repo
        .list_by_job(
            job_id,
            Pagination {
                offset: 2,
                limit: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 1);
}
