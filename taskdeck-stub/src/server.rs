//! axum router and server startup for the stub API.
//!
//! Routes match the remote REST surface consumed by the client. Failures
//! are rendered as `{"detail": ...}` bodies: 404 for unknown ids, 422 for
//! invalid input. Delete returns 204 with no body.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::store::{BoardStore, StoreError, TaskBody, TaskRecord, UserRecord};

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

/// Builds the stub API router over the given store.
pub fn router(store: Arc<BoardStore>) -> axum::Router {
    axum::Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", axum::routing::put(update_task).delete(delete_task))
        .route("/api/users", get(list_users))
        .with_state(store)
}

async fn list_tasks(State(store): State<Arc<BoardStore>>) -> Json<Vec<TaskRecord>> {
    Json(store.list_tasks().await)
}

async fn create_task(
    State(store): State<Arc<BoardStore>>,
    Json(body): Json<TaskBody>,
) -> Result<(StatusCode, Json<TaskRecord>), StoreError> {
    let record = store.create_task(body).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_task(
    State(store): State<Arc<BoardStore>>,
    Path(id): Path<i64>,
    Json(body): Json<TaskBody>,
) -> Result<Json<TaskRecord>, StoreError> {
    let record = store.update_task(id, body).await?;
    Ok(Json(record))
}

async fn delete_task(
    State(store): State<Arc<BoardStore>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StoreError> {
    store.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(State(store): State<Arc<BoardStore>>) -> Json<Vec<UserRecord>> {
    Json(store.list_users().await)
}

/// Starts the stub server on the given address and returns the bound
/// address and a join handle.
///
/// This is the entry point used by both `main.rs` and test code; tests
/// bind `127.0.0.1:0` for an OS-assigned port.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
    store: Arc<BoardStore>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "stub server error");
        }
    });

    Ok((bound_addr, handle))
}
