//! Runs the Postgres store against a real database.
//!
//! Needs `DATABASE_URL` pointing at a disposable database:
//! `cargo test --test postgres_store -- --ignored`

use dotenv::dotenv;
use pretty_assertions::assert_eq;
use taskledger::models::{NewTask, TaskStatus};
use taskledger::store::{PgStore, StoreError, TaskStore, UserStore};

async fn connect() -> PgStore {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let store = PgStore::connect(&database_url, 2)
        .await
        .expect("Failed to connect to test DB");
    store.migrate().await.expect("Failed to run migrations");
    store
}

async fn cleanup_user(store: &PgStore, username: &str) {
    let _ = sqlx::query(
        "DELETE FROM tasks WHERE user_id IN (SELECT id FROM users WHERE username = $1)",
    )
    .bind(username)
    .execute(store.pool())
    .await;
    let _ = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(store.pool())
        .await;
}

#[ignore]
#[actix_rt::test]
async fn test_unique_username_violation_is_conflict() {
    let store = connect().await;
    cleanup_user(&store, "pg_dup_user").await;

    let first = store.create_user("pg_dup_user", "hash-one").await.unwrap();
    let second = store.create_user("pg_dup_user", "hash-two").await;
    assert!(matches!(second, Err(StoreError::Conflict(_))));

    let found = store.find_by_username("pg_dup_user").await.unwrap();
    assert_eq!(found, first);
    assert_eq!(found.password_hash, "hash-one");

    cleanup_user(&store, "pg_dup_user").await;
}

#[ignore]
#[actix_rt::test]
async fn test_missing_user_is_not_found() {
    let store = connect().await;
    cleanup_user(&store, "pg_nobody").await;

    assert!(matches!(
        store.find_by_username("pg_nobody").await,
        Err(StoreError::NotFound)
    ));
}

#[ignore]
#[actix_rt::test]
async fn test_tasks_round_trip_per_user() {
    let store = connect().await;
    cleanup_user(&store, "pg_task_owner").await;
    cleanup_user(&store, "pg_other_user").await;

    let owner = store.create_user("pg_task_owner", "hash").await.unwrap();
    let other = store.create_user("pg_other_user", "hash").await.unwrap();

    let created = store
        .create_task(
            NewTask {
                title: "persisted".to_string(),
                description: "in postgres".to_string(),
            },
            owner.id,
        )
        .await
        .unwrap();
    assert_eq!(created.status, TaskStatus::Pending);

    assert_eq!(store.list_by_user(owner.id).await.unwrap(), vec![created]);
    assert!(store.list_by_user(other.id).await.unwrap().is_empty());

    cleanup_user(&store, "pg_task_owner").await;
    cleanup_user(&store, "pg_other_user").await;
}
