//! Board state and mutation layer.
//!
//! The cache owns the two remote collections (tasks, users) and derives
//! the joined board view; the mutation layer validates input locally,
//! merges partial updates against the cached full task, and reconciles
//! every successful mutation through invalidation plus refetch. There is
//! no optimistic mutation of cached data.

pub mod cache;
pub mod mutate;
pub mod service;

pub use cache::{BoardCache, BoardSnapshot};
pub use mutate::{TaskDraft, TaskPatch, merge_patch};
pub use service::BoardService;

use taskdeck_api::ApiError;
use thiserror::Error;

/// Errors raised by board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Create was attempted with an empty or whitespace-only description.
    #[error("task description cannot be empty")]
    DescriptionEmpty,
    /// Create was attempted without a selected owner.
    #[error("a task owner must be selected")]
    OwnerMissing,
    /// A transport-level or cache-precondition failure, propagated
    /// unmodified.
    #[error(transparent)]
    Api(#[from] ApiError),
}
