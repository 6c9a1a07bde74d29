use redis::{AsyncCommands, Client};
use std::sync::Arc;

use crate::accounting::TaskInput;
use crate::errors::{AppError, AppResult};
use crate::models::{Task, User};

// Key layout:
//   user:{username}        -> User JSON (SET NX enforces username uniqueness)
//   task:{id}              -> Task JSON
//   tasks:owner:{user_id}  -> list of task ids, RPUSH order = insertion order
//   next_user_id / next_task_id -> INCR counters
pub struct RedisStore {
    client: Arc<Client>,
}

impl RedisStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut conn = self.client.get_async_connection().await?;
        let id: i64 = conn.incr("next_user_id", 1).await?;
        let user = User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };

        // SET NX is the single authority on uniqueness; an existing row is
        // never overwritten.
        let created: bool = conn
            .set_nx(
                format!("user:{}", username),
                serde_json::to_string(&user).unwrap(),
            )
            .await?;
        if !created {
            return Err(AppError::DuplicateUsername);
        }
        Ok(user)
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let user_data: Option<String> = conn.get(format!("user:{}", username)).await?;
        Ok(user_data.map(|data| serde_json::from_str(&data).unwrap()))
    }

    // Record and owner-index writes go through one MULTI/EXEC, so a storage
    // failure leaves no partial task behind.
    pub async fn create_task(&self, owner_id: i64, input: TaskInput) -> AppResult<Task> {
        let mut conn = self.client.get_async_connection().await?;
        let id: i64 = conn.incr("next_task_id", 1).await?;
        let task = Task {
            id,
            owner_id,
            title: input.title,
            start_time: input.start_time,
            end_time: input.end_time,
            duration_minutes: input.duration_minutes,
        };

        redis::pipe()
            .atomic()
            .set(format!("task:{}", id), serde_json::to_string(&task).unwrap())
            .ignore()
            .rpush(format!("tasks:owner:{}", owner_id), id)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(task)
    }

    pub async fn find_task(&self, task_id: i64) -> Result<Option<Task>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let task_data: Option<String> = conn.get(format!("task:{}", task_id)).await?;
        Ok(task_data.map(|data| serde_json::from_str(&data).unwrap()))
    }

    pub async fn find_tasks_by_owner(
        &self,
        owner_id: i64,
    ) -> Result<Vec<Task>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let task_ids: Vec<i64> = conn
            .lrange(format!("tasks:owner:{}", owner_id), 0, -1)
            .await?;

        let mut tasks = Vec::with_capacity(task_ids.len());
        for task_id in task_ids {
            let task_data: Option<String> = conn.get(format!("task:{}", task_id)).await?;
            match task_data {
                Some(data) => tasks.push(serde_json::from_str(&data).unwrap()),
                None => tracing::warn!("Task {} indexed for owner {} but missing", task_id, owner_id),
            }
        }
        Ok(tasks)
    }

    pub async fn update_task(&self, task: &Task) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set(
            format!("task:{}", task.id),
            serde_json::to_string(task).unwrap(),
        )
        .await
    }

    pub async fn delete_task(&self, task: &Task) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        redis::pipe()
            .atomic()
            .del(format!("task:{}", task.id))
            .ignore()
            .lrem(format!("tasks:owner:{}", task.owner_id), 0, task.id)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
    }
}

impl Clone for RedisStore {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

// These tests need a local redis instance; run with `cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::duration_minutes;
    use chrono::NaiveDateTime;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn test_store() -> RedisStore {
        let client =
            redis::Client::open("redis://127.0.0.1:6379").expect("Failed to open redis client");
        RedisStore::new(Arc::new(client))
    }

    // Fresh username per run so reruns never collide with leftover keys
    fn unique(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{}_{}", prefix, nanos)
    }

    fn input(title: &str, start: &str, end: &str) -> TaskInput {
        let start: NaiveDateTime = start.parse().unwrap();
        let end: NaiveDateTime = end.parse().unwrap();
        TaskInput {
            title: title.to_string(),
            start_time: start,
            end_time: end,
            duration_minutes: duration_minutes(start, end),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_create_then_list_round_trip() {
        let store = test_store();
        let user = store
            .create_user(&unique("roundtrip"), "hash")
            .await
            .unwrap();

        let task = store
            .create_task(
                user.id,
                input("Write report", "2024-01-01T09:00:00", "2024-01-01T10:30:00"),
            )
            .await
            .unwrap();
        assert_eq!(task.duration_minutes, 90);

        // Listing immediately returns exactly the created task
        let tasks = store.find_tasks_by_owner(user.id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task.id);
        assert_eq!(tasks[0].owner_id, user.id);
        assert_eq!(tasks[0].title, "Write report");
        assert_eq!(tasks[0].start_time, task.start_time);
        assert_eq!(tasks[0].end_time, task.end_time);
        assert_eq!(tasks[0].duration_minutes, 90);

        let second = store
            .create_task(
                user.id,
                input("Review notes", "2024-01-02T09:00:00", "2024-01-02T09:30:00"),
            )
            .await
            .unwrap();

        // Insertion order is preserved
        let ids: Vec<i64> = store
            .find_tasks_by_owner(user.id)
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![task.id, second.id]);

        store.delete_task(&second).await.unwrap();
        store.delete_task(&task).await.unwrap();
        assert!(store.find_tasks_by_owner(user.id).await.unwrap().is_empty());
        assert!(store.find_task(task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore]
    async fn test_duplicate_username_never_overwrites() {
        let store = test_store();
        let username = unique("duplicate");
        let first = store.create_user(&username, "first_hash").await.unwrap();

        let second = store.create_user(&username, "second_hash").await;
        assert!(matches!(second, Err(AppError::DuplicateUsername)));

        // The original row is untouched
        let stored = store.find_user(&username).await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.password_hash, "first_hash");
    }
}
