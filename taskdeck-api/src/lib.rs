//! HTTP client library for the Taskdeck remote task API.
//!
//! Wraps the REST surface (`/api/tasks`, `/api/users`) behind typed
//! resource clients, translating between the wire representation
//! (snake_case JSON) and the domain representation at a single seam.

pub mod error;
pub mod http;
pub mod tasks;
pub mod types;
pub mod users;
pub mod wire;

pub use error::ApiError;
pub use tasks::TaskClient;
pub use types::{EnrichedTask, Task, TaskId, TaskStatus, User, UserId};
pub use users::UserClient;
pub use wire::TaskPayload;
