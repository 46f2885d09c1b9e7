//! In-memory stub of the remote task API.
//!
//! Implements the REST surface the Taskdeck client consumes
//! (`/api/tasks` CRUD plus `/api/users`) with server-assigned ids,
//! RFC3339 timestamps, and FastAPI-style `{"detail": ...}` error bodies.
//! The real API server is an external system; this stub exists for local
//! development and integration tests.

pub mod server;
pub mod store;

pub use server::{router, start_server};
pub use store::{BoardStore, TaskBody, TaskRecord, UserRecord};
