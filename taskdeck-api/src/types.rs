//! Domain types for the task board.
//!
//! Identifiers are integers assigned by the server; the client never
//! generates them. Timestamps are opaque ISO-8601 strings and are not
//! parsed or validated client-side.

use serde::{Deserialize, Serialize};

/// Unique identifier for a task, assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a server-assigned task id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user, assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a server-assigned user id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a task on the board. Closed to exactly three values; no other
/// value is valid input to create/update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Task has not been started.
    Todo,
    /// Task is actively being worked on.
    Doing,
    /// Task is finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::Doing, Self::Done];

    /// The column to the left of this one, if any.
    #[must_use]
    pub const fn left(self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::Doing => Some(Self::Todo),
            Self::Done => Some(Self::Doing),
        }
    }

    /// The column to the right of this one, if any.
    #[must_use]
    pub const fn right(self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::Doing),
            Self::Doing => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "TODO"),
            Self::Doing => write!(f, "DOING"),
            Self::Done => write!(f, "DONE"),
        }
    }
}

/// A user as seen by the client. Immutable from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Server-assigned identifier.
    pub id: UserId,
    /// Display name, computed from the wire first/last name fields.
    pub full_name: String,
}

/// A task as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Free-text description.
    pub description: String,
    /// Board column.
    pub status: TaskStatus,
    /// Owning user. The referenced user may be missing from the client's
    /// currently loaded user set.
    pub user_id: UserId,
    /// Creation timestamp (opaque ISO-8601 string).
    pub created_at: String,
    /// Last-update timestamp (opaque ISO-8601 string).
    pub updated_at: String,
}

/// A task joined with its resolved owning user.
///
/// `user` is `None` when the owner is not present in the currently loaded
/// user collection (still loading, or stale); consumers must tolerate that
/// and render an unassigned owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedTask {
    /// The underlying task.
    pub task: Task,
    /// The resolved owner, if found.
    pub user: Option<User>,
}
