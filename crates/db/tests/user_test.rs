//! Integration tests for the user repository.

mod common;

use fairshare_db::UserRepository;
use uuid::Uuid;

#[tokio::test]
async fn test_user_create_and_find() {
    let Some(db) = common::connect().await else {
        return;
    };
    let repo = UserRepository::new(db);
    let email = format!("user-{}@example.com", Uuid::new_v4());

    let user = repo
        .create(&email, "$argon2id$hash", "Ana Pérez")
        .await
        .expect("Failed to create user");

    assert!(user.is_active);
    assert_eq!(user.full_name, "Ana Pérez");

    let by_email = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, email);

    assert!(repo.email_exists(&email).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let Some(db) = common::connect().await else {
        return;
    };
    let repo = UserRepository::new(db);
    let email = format!("dup-{}@example.com", Uuid::new_v4());

    repo.create(&email, "$argon2id$hash", "First").await.unwrap();
    let second = repo.create(&email, "$argon2id$hash", "Second").await;

    assert!(second.is_err());
}
