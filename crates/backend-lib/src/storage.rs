// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with flat-file implementation.
//!
//! One pretty-printed JSON document per record, under `users/` and
//! `tasks/`. There is no in-process cache; every lookup reads the
//! authoritative files.
use async_trait::async_trait;
use std::{
    fs,
    path::{Path, PathBuf},
};
use taskboard_common::{TaskRecord, UserRecord};
use tokio::fs as tokio_fs;

use crate::error::AppError;

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a new user record
    async fn insert_user(&self, user: &UserRecord) -> Result<(), AppError>;

    /// Look up a user by (lowercased) email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    /// Look up a user by id
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, AppError>;

    /// Overwrite an existing user record
    async fn update_user(&self, user: &UserRecord) -> Result<(), AppError>;

    /// Store a new task record
    async fn insert_task(&self, task: &TaskRecord) -> Result<(), AppError>;

    /// Look up a task by id
    async fn find_task_by_id(&self, id: &str) -> Result<Option<TaskRecord>, AppError>;

    /// All tasks owned by a user, newest first
    async fn tasks_for_user(&self, user_id: &str) -> Result<Vec<TaskRecord>, AppError>;

    /// Overwrite an existing task record
    async fn update_task(&self, task: &TaskRecord) -> Result<(), AppError>;

    /// Remove a task record
    async fn delete_task(&self, id: &str) -> Result<(), AppError>;
}

/// Flat-file implementation of the Storage trait
#[derive(Clone)]
pub struct FlatFileStorage {
    root: PathBuf,
}

impl FlatFileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("users"))?;
        fs::create_dir_all(root.join("tasks"))?;
        Ok(Self { root })
    }

    fn user_path(&self, id: &str) -> PathBuf {
        self.root.join("users").join(format!("{id}.json"))
    }

    fn task_path(&self, id: &str) -> PathBuf {
        self.root.join("tasks").join(format!("{id}.json"))
    }

    async fn read_record<T: serde::de::DeserializeOwned>(
        path: &Path,
    ) -> Result<Option<T>, AppError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio_fs::read_to_string(path).await?;
        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    async fn write_record<T: serde::Serialize>(path: &Path, record: &T) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(record)?;
        tokio_fs::write(path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FlatFileStorage {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), AppError> {
        Self::write_record(&self.user_path(&user.id), user).await
    }

    /// Scan the user documents for a matching email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let needle = email.to_lowercase();
        let mut dir = tokio_fs::read_dir(self.root.join("users")).await?;
        while let Some(entry) = dir.next_entry().await? {
            let content = tokio_fs::read_to_string(entry.path()).await?;
            let user: UserRecord = serde_json::from_str(&content)?;
            if user.email == needle {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, AppError> {
        Self::read_record(&self.user_path(id)).await
    }

    async fn update_user(&self, user: &UserRecord) -> Result<(), AppError> {
        Self::write_record(&self.user_path(&user.id), user).await
    }

    async fn insert_task(&self, task: &TaskRecord) -> Result<(), AppError> {
        Self::write_record(&self.task_path(&task.id), task).await
    }

    async fn find_task_by_id(&self, id: &str) -> Result<Option<TaskRecord>, AppError> {
        Self::read_record(&self.task_path(id)).await
    }

    async fn tasks_for_user(&self, user_id: &str) -> Result<Vec<TaskRecord>, AppError> {
        let mut tasks = Vec::new();
        let mut dir = tokio_fs::read_dir(self.root.join("tasks")).await?;
        while let Some(entry) = dir.next_entry().await? {
            let content = tokio_fs::read_to_string(entry.path()).await?;
            let task: TaskRecord = serde_json::from_str(&content)?;
            if task.user_id == user_id {
                tasks.push(task);
            }
        }
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update_task(&self, task: &TaskRecord) -> Result<(), AppError> {
        Self::write_record(&self.task_path(&task.id), task).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), AppError> {
        let path = self.task_path(id);
        if path.exists() {
            tokio_fs::remove_file(path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use taskboard_common::TaskStatus;

    fn user(id: &str, email: &str) -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: id.to_string(),
            full_name: "Jane Doe".to_string(),
            email: email.to_string(),
            password_hash: "digest".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn task(id: &str, user_id: &str, age_secs: i64) -> TaskRecord {
        let created = Utc::now() - Duration::seconds(age_secs);
        TaskRecord {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            status: TaskStatus::Pending,
            deadline: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[tokio::test]
    async fn test_user_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path()).unwrap();

        storage.insert_user(&user("u1", "jane@x.com")).await.unwrap();

        let by_id = storage.find_user_by_id("u1").await.unwrap().unwrap();
        assert_eq!(by_id.email, "jane@x.com");

        let by_email = storage
            .find_user_by_email("jane@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, "u1");

        assert!(storage.find_user_by_id("u2").await.unwrap().is_none());
        assert!(storage
            .find_user_by_email("nobody@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_tasks_for_user_filters_and_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path()).unwrap();

        storage.insert_task(&task("t1", "u1", 30)).await.unwrap();
        storage.insert_task(&task("t2", "u1", 10)).await.unwrap();
        storage.insert_task(&task("t3", "u2", 20)).await.unwrap();

        let tasks = storage.tasks_for_user("u1").await.unwrap();
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path()).unwrap();

        storage.insert_task(&task("t1", "u1", 0)).await.unwrap();
        storage.delete_task("t1").await.unwrap();
        assert!(storage.find_task_by_id("t1").await.unwrap().is_none());

        // deleting an already-absent record is not an error
        storage.delete_task("t1").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_task_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path()).unwrap();

        let mut t = task("t1", "u1", 0);
        storage.insert_task(&t).await.unwrap();

        t.status = TaskStatus::Completed;
        t.title = "done".to_string();
        storage.update_task(&t).await.unwrap();

        let read = storage.find_task_by_id("t1").await.unwrap().unwrap();
        assert_eq!(read.status, TaskStatus::Completed);
        assert_eq!(read.title, "done");
    }
}
