//! In-memory board storage for the stub server.
//!
//! Holds tasks and users behind a [`RwLock`]. Ids are assigned by the
//! store, never by callers, and every mutation refreshes `updated_at`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use taskdeck_api::TaskStatus;

/// A stored user, serialized in the wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    /// Server-assigned identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Creation timestamp (RFC3339).
    pub created_at: String,
}

/// A stored task, serialized in the wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    /// Server-assigned identifier.
    pub id: i64,
    /// Free-text description.
    pub description: String,
    /// Board column.
    pub status: TaskStatus,
    /// Owning user identifier.
    pub user_id: i64,
    /// Creation timestamp (RFC3339).
    pub created_at: String,
    /// Last-update timestamp (RFC3339).
    pub updated_at: String,
}

/// Request body accepted by task create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskBody {
    /// Free-text description.
    pub description: String,
    /// Board column.
    pub status: TaskStatus,
    /// Owning user identifier.
    pub user_id: i64,
}

/// Validation and lookup failures, mapped to HTTP statuses by the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Task or user id does not exist (404).
    #[error("{0}")]
    NotFound(String),
    /// Request body failed validation (422).
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Default)]
struct Inner {
    tasks: BTreeMap<i64, TaskRecord>,
    users: Vec<UserRecord>,
    next_task_id: i64,
}

/// Thread-safe in-memory store for the stub server.
pub struct BoardStore {
    inner: RwLock<Inner>,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Creates an empty store with no users.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_task_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Creates a store seeded with the given users (assigned ids 1..).
    #[must_use]
    pub fn with_users(names: &[(&str, &str)]) -> Self {
        let now = now_rfc3339();
        let users = names
            .iter()
            .enumerate()
            .map(|(i, (first, last))| UserRecord {
                id: i64::try_from(i).unwrap_or_default() + 1,
                first_name: (*first).to_string(),
                last_name: (*last).to_string(),
                created_at: now.clone(),
            })
            .collect();
        Self {
            inner: RwLock::new(Inner {
                tasks: BTreeMap::new(),
                users,
                next_task_id: 1,
            }),
        }
    }

    /// Creates a store seeded with a small default user set.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_users(&[
            ("Ada", "Lovelace"),
            ("Grace", "Hopper"),
            ("Alan", "Turing"),
        ])
    }

    /// Lists all users.
    pub async fn list_users(&self) -> Vec<UserRecord> {
        self.inner.read().await.users.clone()
    }

    /// Lists all tasks in id order.
    pub async fn list_tasks(&self) -> Vec<TaskRecord> {
        self.inner.read().await.tasks.values().cloned().collect()
    }

    /// Creates a task, assigning the next id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] for a blank description or an
    /// unknown owner.
    pub async fn create_task(&self, body: TaskBody) -> Result<TaskRecord, StoreError> {
        let mut inner = self.inner.write().await;
        validate(&inner, &body)?;

        let now = now_rfc3339();
        let id = inner.next_task_id;
        inner.next_task_id += 1;
        let record = TaskRecord {
            id,
            description: body.description,
            status: body.status,
            user_id: body.user_id,
            created_at: now.clone(),
            updated_at: now,
        };
        inner.tasks.insert(id, record.clone());
        Ok(record)
    }

    /// Replaces the task with the given id (full-resource update).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown task and
    /// [`StoreError::Invalid`] for an invalid body.
    pub async fn update_task(&self, id: i64, body: TaskBody) -> Result<TaskRecord, StoreError> {
        let mut inner = self.inner.write().await;
        validate(&inner, &body)?;

        let now = now_rfc3339();
        let record = inner
            .tasks
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Task {id} not found")))?;
        record.description = body.description;
        record.status = body.status;
        record.user_id = body.user_id;
        record.updated_at = now;
        Ok(record.clone())
    }

    /// Deletes the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown task.
    pub async fn delete_task(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .tasks
            .remove(&id)
            .map(drop)
            .ok_or_else(|| StoreError::NotFound(format!("Task {id} not found")))
    }
}

fn validate(inner: &Inner, body: &TaskBody) -> Result<(), StoreError> {
    if body.description.trim().is_empty() {
        return Err(StoreError::Invalid(
            "description must not be empty".to_string(),
        ));
    }
    if !inner.users.iter().any(|u| u.id == body.user_id) {
        return Err(StoreError::Invalid(format!(
            "User {} not found",
            body.user_id
        )));
    }
    Ok(())
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
