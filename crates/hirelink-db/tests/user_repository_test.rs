//! Integration tests for the User repository using in-memory SurrealDB.

use hirelink_core::error::HirelinkError;
use hirelink_core::models::user::{CreateUser, Role, UpdateUser};
use hirelink_core::repository::UserRepository;
use hirelink_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hirelink_db::run_migrations(&db).await.unwrap();
    db
}

fn seeker_input(email: &str) -> CreateUser {
    CreateUser {
        email: email.into(),
        full_name: "Dana Doe".into(),
        phone: "+15550002222".into(),
        password_hash: "$argon2id$fake".into(),
        role: Role::JobSeeker,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(seeker_input("dana@example.com")).await.unwrap();
    assert_eq!(user.email, "dana@example.com");
    assert_eq!(user.role, Role::JobSeeker);
    assert!(!user.employer_verified);

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.phone, "+15550002222");

    let by_email = repo.get_by_email("dana@example.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(seeker_input("dana@example.com")).await.unwrap();
    let err = repo
        .create(seeker_input("dana@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, HirelinkError::AlreadyExists { .. }));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, HirelinkError::NotFound { .. }));

    let err = repo.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, HirelinkError::NotFound { .. }));
}

#[tokio::test]
async fn update_marks_an_employer_verified() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let employer = repo
        .create(CreateUser {
            email: "hr@acme.example".into(),
            full_name: "Acme HR".into(),
            phone: "+15550001111".into(),
            password_hash: "$argon2id$fake".into(),
            role: Role::Employer,
        })
        .await
        .unwrap();
    assert!(!employer.employer_verified);

    let updated = repo
        .update(
            employer.id,
            UpdateUser {
                employer_verified: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.employer_verified);
    assert_eq!(updated.full_name, "Acme HR");
}
