//! Persistence for users and tasks.
//!
//! Handlers only see the [`UserStore`] and [`TaskStore`] traits; the application
//! state holds them as trait objects so the Postgres backend can be swapped for
//! the in-memory one in tests and database-less local runs.
//!
//! Every operation is a single statement against the backend. Nothing here
//! retries, and no transaction spans more than one call.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{NewTask, Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors returned by store operations.
///
/// `Conflict` and `NotFound` are domain outcomes the caller is expected to
/// handle. `Storage` is any backend failure and carries detail meant for logs only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::Conflict(db_error.constraint().unwrap_or("unique").to_string())
            }
            other => StoreError::Storage(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(error: sqlx::migrate::MigrateError) -> StoreError {
        StoreError::Storage(error.to_string())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Uniqueness of `username` is enforced by the store itself,
    /// so callers do not look the name up first.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<User, StoreError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a task owned by `user_id` with status `pending`.
    async fn create_task(&self, input: NewTask, user_id: i32) -> Result<Task, StoreError>;

    /// All tasks owned by `user_id`, in no particular order.
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Task>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn test_other_sqlx_errors_map_to_storage() {
        let error = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, StoreError::Storage(_)));
    }
}
