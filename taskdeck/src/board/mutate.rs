//! Mutation inputs and the partial-update merge.
//!
//! The remote update endpoint replaces the whole resource, so a partial
//! edit is merged against the cached full task before anything is sent:
//! fields present in the patch override, everything else is carried over
//! verbatim.

use taskdeck_api::{Task, TaskPayload, TaskStatus, UserId};

use super::BoardError;

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Free-text description.
    pub description: String,
    /// Initial board column.
    pub status: TaskStatus,
    /// Selected owner, if any. Create is rejected locally when absent.
    pub owner: Option<UserId>,
}

impl TaskDraft {
    /// Validates the draft and builds the outbound payload.
    ///
    /// Rejected locally, before any network call, when the description is
    /// empty or whitespace-only or when no owner is selected. The
    /// description is trimmed on the way out.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DescriptionEmpty`] or
    /// [`BoardError::OwnerMissing`].
    pub fn into_payload(self) -> Result<TaskPayload, BoardError> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(BoardError::DescriptionEmpty);
        }
        let Some(owner) = self.owner else {
            return Err(BoardError::OwnerMissing);
        };
        Ok(TaskPayload {
            description,
            status: self.status,
            user_id: owner,
        })
    }
}

/// A partial set of task fields to change. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New description, if changing.
    pub description: Option<String>,
    /// New board column, if changing.
    pub status: Option<TaskStatus>,
    /// New owner, if changing.
    pub user_id: Option<UserId>,
}

impl TaskPatch {
    /// A patch changing only the description.
    #[must_use]
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// A patch changing only the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A patch changing only the owner.
    #[must_use]
    pub fn owner(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }
}

/// Merges a partial update with the current full task into a complete
/// outbound payload. Fields absent from the patch are carried over
/// unchanged.
#[must_use]
pub fn merge_patch(current: &Task, patch: &TaskPatch) -> TaskPayload {
    TaskPayload {
        description: patch
            .description
            .clone()
            .unwrap_or_else(|| current.description.clone()),
        status: patch.status.unwrap_or(current.status),
        user_id: patch.user_id.unwrap_or(current.user_id),
    }
}
