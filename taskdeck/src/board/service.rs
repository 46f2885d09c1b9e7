//! Board service: drives fetches and mutations against the remote API and
//! reconciles the cache.
//!
//! Reads honor a configured retry count; mutations never retry. A failed
//! mutation leaves the cache untouched; a successful one invalidates the
//! task slot and refetches it, which is the only path by which mutations
//! become visible locally.

use taskdeck_api::{ApiError, Task, TaskClient, TaskId, UserClient};

use super::BoardError;
use super::cache::{BoardCache, BoardSnapshot};
use super::mutate::{TaskDraft, TaskPatch, merge_patch};

/// Owns the cache and the resource clients.
#[derive(Debug)]
pub struct BoardService {
    cache: BoardCache,
    tasks: TaskClient,
    users: UserClient,
    read_retries: u32,
}

impl BoardService {
    /// Creates a service with an empty (stale) cache.
    #[must_use]
    pub const fn new(tasks: TaskClient, users: UserClient, read_retries: u32) -> Self {
        Self {
            cache: BoardCache::new(),
            tasks,
            users,
            read_retries,
        }
    }

    /// Read access to the cache for lookups and derived views.
    #[must_use]
    pub const fn cache(&self) -> &BoardCache {
        &self.cache
    }

    /// Builds an immutable view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.cache.snapshot()
    }

    /// Refetches both collections. The reads are independent; a failure in
    /// one does not stop the other.
    pub async fn refresh(&mut self) {
        self.refresh_tasks().await;
        self.refresh_users().await;
    }

    /// Refetches the task collection, retrying per the configured read
    /// policy. The outcome lands in the cache; errors are not returned.
    pub async fn refresh_tasks(&mut self) {
        self.cache.begin_tasks_fetch();
        let mut attempt = 0u32;
        let result = loop {
            match self.tasks.list().await {
                Ok(tasks) => break Ok(tasks),
                Err(e) if attempt < self.read_retries => {
                    attempt += 1;
                    tracing::warn!(error = %e, attempt, "task fetch failed, retrying");
                }
                Err(e) => break Err(e),
            }
        };
        self.cache.complete_tasks(result);
    }

    /// Refetches the user collection, retrying per the configured read
    /// policy.
    pub async fn refresh_users(&mut self) {
        self.cache.begin_users_fetch();
        let mut attempt = 0u32;
        let result = loop {
            match self.users.list().await {
                Ok(users) => break Ok(users),
                Err(e) if attempt < self.read_retries => {
                    attempt += 1;
                    tracing::warn!(error = %e, attempt, "user fetch failed, retrying");
                }
                Err(e) => break Err(e),
            }
        };
        self.cache.complete_users(result);
    }

    /// Creates a task. Validation happens locally before any network call;
    /// on success the task slot is invalidated and refetched.
    ///
    /// # Errors
    ///
    /// Returns a local validation error or the transport error unmodified.
    pub async fn create_task(&mut self, draft: TaskDraft) -> Result<Task, BoardError> {
        let payload = draft.into_payload()?;
        let task = self.tasks.create(&payload).await.map_err(BoardError::Api)?;
        tracing::debug!(id = %task.id, "task created");
        self.cache.invalidate_tasks();
        self.refresh_tasks().await;
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// The task's current full state is resolved from the cache and merged
    /// with the patch into a full-replace payload. An id absent from the
    /// cache fails with [`ApiError::TaskNotFound`] before any network call.
    ///
    /// # Errors
    ///
    /// Returns the cache-precondition error or the transport error
    /// unmodified.
    pub async fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, BoardError> {
        let current = self
            .cache
            .task_by_id(id)
            .ok_or(ApiError::TaskNotFound(id))?
            .task;
        let payload = merge_patch(&current, &patch);
        let task = self
            .tasks
            .update(id, &payload)
            .await
            .map_err(BoardError::Api)?;
        tracing::debug!(id = %task.id, "task updated");
        self.cache.invalidate_tasks();
        self.refresh_tasks().await;
        Ok(task)
    }

    /// Deletes a task; on success the task slot is invalidated and
    /// refetched.
    ///
    /// # Errors
    ///
    /// Returns the transport error unmodified.
    pub async fn delete_task(&mut self, id: TaskId) -> Result<(), BoardError> {
        self.tasks.delete(id).await.map_err(BoardError::Api)?;
        tracing::debug!(%id, "task deleted");
        self.cache.invalidate_tasks();
        self.refresh_tasks().await;
        Ok(())
    }
}
