//! In-memory store.
//!
//! Keeps users and tasks in vectors behind `tokio::sync::RwLock`s. Ids are
//! assigned sequentially from 1, mirroring a `SERIAL` column. The uniqueness
//! check and the insert happen under the same write lock, so two concurrent
//! signups for one username cannot both succeed.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TaskStore, UserStore};
use crate::models::{NewTask, Task, User};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> Result<i32, StoreError> {
    i32::try_from(len + 1).map_err(|_| StoreError::Storage("id space exhausted".into()))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|user| user.username == username) {
            return Err(StoreError::Conflict("users_username_key".into()));
        }

        let user = User {
            id: next_id(users.len())?,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, input: NewTask, user_id: i32) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        let task = Task::new(next_id(tasks.len())?, input, user_id);
        tasks.push(task.clone());
        Ok(task)
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use pretty_assertions::assert_eq;

    #[actix_rt::test]
    async fn test_duplicate_username_conflicts_and_keeps_first() {
        let store = MemoryStore::new();
        let first = store.create_user("alice", "hash-one").await.unwrap();
        assert_eq!(first.id, 1);

        let second = store.create_user("alice", "hash-two").await;
        assert!(matches!(second, Err(StoreError::Conflict(_))));

        let found = store.find_by_username("alice").await.unwrap();
        assert_eq!(found, first);
    }

    #[actix_rt::test]
    async fn test_find_unknown_user() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.find_by_username("nobody").await,
            Err(StoreError::NotFound)
        ));
    }

    #[actix_rt::test]
    async fn test_tasks_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let input = NewTask {
            title: "write report".to_string(),
            description: "quarterly".to_string(),
        };
        let created = store.create_task(input, 1).await.unwrap();
        assert_eq!(created.status, TaskStatus::Pending);

        store.create_task(NewTask::default(), 2).await.unwrap();

        assert_eq!(store.list_by_user(1).await.unwrap(), vec![created]);
        assert_eq!(store.list_by_user(2).await.unwrap().len(), 1);
        assert!(store.list_by_user(3).await.unwrap().is_empty());
    }
}
