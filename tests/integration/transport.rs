//! Integration tests for the HTTP transport layer.
//!
//! Runs the resource clients against the in-process stub server and
//! against small purpose-built axum routers for the response shapes the
//! stub never produces.
//!
//! These tests validate:
//! - `{"detail": ...}` error bodies surface as the error message with status
//! - Non-`detail` JSON error bodies fall back to `HTTP {status}`
//! - Unparseable error bodies surface the fixed parse-failure message
//! - 204 delete responses complete without reading a body
//! - Connection failures surface as transport errors with no status

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use url::Url;

use taskdeck_api::{ApiError, TaskClient, TaskId, TaskPayload, TaskStatus, UserClient, UserId};
use taskdeck_stub::{BoardStore, start_server};

/// Start the stub server in-process and return a base URL.
async fn start_stub() -> (Url, tokio::task::JoinHandle<()>) {
    let store = Arc::new(BoardStore::seeded());
    let (addr, handle) = start_server("127.0.0.1:0", store)
        .await
        .expect("failed to start stub server");
    let url = Url::parse(&format!("http://{addr}")).expect("invalid stub URL");
    (url, handle)
}

fn task_client(base: &Url) -> TaskClient {
    TaskClient::new(reqwest::Client::new(), base.clone())
}

fn payload(description: &str, status: TaskStatus, user_id: i64) -> TaskPayload {
    TaskPayload {
        description: description.to_string(),
        status,
        user_id: UserId::new(user_id),
    }
}

#[tokio::test]
async fn detail_body_becomes_error_message_with_status() {
    let (base, _handle) = start_stub().await;
    let client = task_client(&base);

    let err = client
        .create(&payload("   ", TaskStatus::Todo, 1))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "description must not be empty");
}

#[tokio::test]
async fn unknown_id_surfaces_server_404_detail() {
    let (base, _handle) = start_stub().await;
    let client = task_client(&base);

    let err = client
        .update(TaskId::new(42), &payload("x", TaskStatus::Todo, 1))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Task 42 not found");
}

#[tokio::test]
async fn json_body_without_detail_falls_back_to_http_status() {
    // A route that fails with JSON carrying no `detail` field.
    let app = axum::Router::new().route(
        "/api/tasks",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(serde_json::json!({ "message": "boom" })),
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let base = Url::parse(&format!("http://{addr}")).expect("invalid URL");
    let err = task_client(&base).list().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn unparseable_error_body_surfaces_fixed_message() {
    // A route that fails with a plain-text body.
    let app = axum::Router::new().route(
        "/api/tasks",
        get(|| async { (StatusCode::BAD_REQUEST, "not json") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let base = Url::parse(&format!("http://{addr}")).expect("invalid URL");
    let err = task_client(&base).list().await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Error parsing response body as JSON.");
}

#[tokio::test]
async fn delete_completes_on_204_without_body() {
    let (base, _handle) = start_stub().await;
    let client = task_client(&base);

    let created = client
        .create(&payload("doomed", TaskStatus::Todo, 1))
        .await
        .expect("create failed");
    client.delete(created.id).await.expect("delete failed");

    let remaining = client.list().await.expect("list failed");
    assert!(remaining.iter().all(|t| t.id != created.id));
}

#[tokio::test]
async fn connection_failure_is_transport_error_without_status() {
    let base = Url::parse("http://127.0.0.1:9").expect("invalid URL");
    let err = task_client(&base).list().await.unwrap_err();

    assert!(matches!(err, ApiError::Http(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn users_arrive_with_joined_full_names() {
    let (base, _handle) = start_stub().await;
    let client = UserClient::new(reqwest::Client::new(), base);

    let users = client.list().await.expect("list users failed");
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].full_name, "Ada Lovelace");
    assert_eq!(users[1].full_name, "Grace Hopper");
}

#[tokio::test]
async fn create_round_trips_all_fields() {
    let (base, _handle) = start_stub().await;
    let client = task_client(&base);

    let created = client
        .create(&payload("ship the board", TaskStatus::Doing, 2))
        .await
        .expect("create failed");

    assert_eq!(created.description, "ship the board");
    assert_eq!(created.status, TaskStatus::Doing);
    assert_eq!(created.user_id, UserId::new(2));
    assert!(!created.created_at.is_empty());
}
