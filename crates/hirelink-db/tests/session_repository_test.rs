//! Integration tests for the Session repository using in-memory
//! SurrealDB.

use chrono::{Duration, Utc};
use hirelink_core::models::session::CreateSession;
use hirelink_core::repository::SessionRepository;
use hirelink_db::repository::SurrealSessionRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hirelink_db::run_migrations(&db).await.unwrap();
    db
}

fn session_input(id: &str, ttl_secs: i64) -> CreateSession {
    CreateSession {
        id: id.into(),
        user_id: Uuid::new_v4(),
        expires_at: Utc::now() + Duration::seconds(ttl_secs),
    }
}

#[tokio::test]
async fn create_get_and_delete_roundtrip() {
    let db = setup().await;
    let repo = SurrealSessionRepository::new(db);

    // Opaque base64url ids carry '-' and '_'.
    let id = "u2vG-3kPq_40distinctly-random_sessionid43c";
    let created = repo.create(session_input(id, 3600)).await.unwrap();
    assert_eq!(created.id, id);

    let fetched = repo.get(id).await.unwrap().expect("session should exist");
    assert_eq!(fetched.user_id, created.user_id);
    assert!(fetched.expires_at > fetched.created_at);

    repo.delete(id).await.unwrap();
    assert!(repo.get(id).await.unwrap().is_none());

    // Deleting again is a no-op, not an error.
    repo.delete(id).await.unwrap();
}

#[tokio::test]
async fn absent_session_reads_as_none() {
    let db = setup().await;
    let repo = SurrealSessionRepository::new(db);
    assert!(repo.get("never-created").await.unwrap().is_none());
}

#[tokio::test]
async fn purge_removes_only_expired_rows() {
    let db = setup().await;
    let repo = SurrealSessionRepository::new(db);

    repo.create(session_input("expired-1", -60)).await.unwrap();
    repo.create(session_input("expired-2", -3600)).await.unwrap();
    repo.create(session_input("live-1", 3600)).await.unwrap();

    let purged = repo.purge_expired().await.unwrap();
    assert_eq!(purged, 2);

    assert!(repo.get("expired-1").await.unwrap().is_none());
    assert!(repo.get("expired-2").await.unwrap().is_none());
    assert!(repo.get("live-1").await.unwrap().is_some());
}
