//! Migration runner behaviour.

use hirelink_core::models::job::CreateJob;
use hirelink_core::repository::{JobRepository, Pagination};
use hirelink_db::repository::SurrealJobRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    hirelink_db::run_migrations(&db).await.unwrap();
    // A second run sees the recorded version and applies nothing.
    hirelink_db::run_migrations(&db).await.unwrap();

    let repo = SurrealJobRepository::new(db);
    let job = repo
        .create(CreateJob {
            employer_id: Uuid::new_v4(),
            title: "Backend Engineer".into(),
            description: "Rust services".into(),
            location: "Remote".into(),
        })
        .await
        .unwrap();

    let page = repo.list_open(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, job.id);
}

#[tokio::test]
async fn schema_v1_defines_the_core_tables() {
    let ddl = hirelink_db::schema_v1();
    for table in ["user", "job", "application", "session"] {
        assert!(
            ddl.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
            "missing table {table}"
        );
    }
    // Legacy status spelling stays accepted at the schema level.
    assert!(ddl.contains("'pending'"));
}
