//! Resource client for the `/api/tasks` endpoints.

use url::Url;

use crate::error::ApiError;
use crate::http;
use crate::types::{Task, TaskId};
use crate::wire::{TaskPayload, WireTask};

/// Client for the task resource.
///
/// Wraps a shared [`reqwest::Client`]; every response passes through the
/// normalizing handlers in [`crate::http`], and every body crosses the
/// wire/domain seam in [`crate::wire`].
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TaskClient {
    /// Creates a task client against the given base URL.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Fetches all tasks.
    ///
    /// # Errors
    ///
    /// Returns the transport error unmodified on any non-2xx response or
    /// connection failure.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.http.get(self.endpoint("/api/tasks")).send().await?;
        let wire: Vec<WireTask> = http::read_json(response).await?;
        Ok(wire.into_iter().map(Task::from).collect())
    }

    /// Creates a task and returns the server's representation of it.
    ///
    /// # Errors
    ///
    /// Returns the transport error unmodified on failure.
    pub async fn create(&self, payload: &TaskPayload) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/tasks"))
            .json(payload)
            .send()
            .await?;
        let wire: WireTask = http::read_json(response).await?;
        Ok(Task::from(wire))
    }

    /// Replaces the task with the given id (full-resource PUT).
    ///
    /// # Errors
    ///
    /// Returns the transport error unmodified on failure.
    pub async fn update(&self, id: TaskId, payload: &TaskPayload) -> Result<Task, ApiError> {
        let response = self
            .http
            .put(self.endpoint(&format!("/api/tasks/{id}")))
            .json(payload)
            .send()
            .await?;
        let wire: WireTask = http::read_json(response).await?;
        Ok(Task::from(wire))
    }

    /// Deletes the task with the given id. The 204 response body is never
    /// read.
    ///
    /// # Errors
    ///
    /// Returns the transport error unmodified on failure.
    pub async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/api/tasks/{id}")))
            .send()
            .await?;
        http::read_no_content(response).await
    }
}
