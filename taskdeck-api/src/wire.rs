//! Wire representations exchanged with the remote API.
//!
//! The structs here mirror the remote JSON exactly (snake_case fields).
//! The `From` conversions into domain types are the single authoritative
//! seam between wire and domain representations, applied on every read
//! and write boundary.

use serde::{Deserialize, Serialize};

use crate::types::{Task, TaskId, TaskStatus, User, UserId};

/// A task object as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireTask {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Free-text description.
    pub description: String,
    /// Board column.
    pub status: TaskStatus,
    /// Owning user identifier.
    pub user_id: UserId,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-update timestamp.
    pub updated_at: String,
}

/// A user object as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireUser {
    /// Server-assigned identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Creation timestamp (unused client-side).
    pub created_at: String,
}

impl From<WireTask> for Task {
    fn from(wire: WireTask) -> Self {
        Self {
            id: wire.id,
            description: wire.description,
            status: wire.status,
            user_id: wire.user_id,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        Self {
            id: wire.id,
            // Computed fresh on every fetch, never cached independently of
            // the two source fields.
            full_name: format!("{} {}", wire.first_name, wire.last_name),
        }
    }
}

/// Outbound request body for task create and full-replace update.
///
/// The remote update endpoint replaces the whole resource, so every field
/// is required even when only one changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    /// Free-text description.
    pub description: String,
    /// Board column.
    pub status: TaskStatus,
    /// Owning user identifier.
    pub user_id: UserId,
}
