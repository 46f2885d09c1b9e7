//! Error types shared across the API client.

use thiserror::Error;

use crate::types::TaskId;

/// Errors surfaced by the API client and the board mutation layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote responded outside the 2xx range. The message is the
    /// `detail` field of the error body when present.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable message extracted from the error body.
        message: String,
    },

    /// Connection-level failure: no response was received. Terminal for
    /// the current attempt, like a rejected response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The target task was not found in the local cache; synthesized
    /// before any network call.
    #[error("Task with id {0} not found")]
    TaskNotFound(TaskId),
}

impl ApiError {
    /// The HTTP status code associated with this error, where one exists.
    ///
    /// Local cache misses report 404; connection-level failures carry no
    /// status.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::TaskNotFound(_) => Some(404),
            Self::Http(_) => None,
        }
    }
}
