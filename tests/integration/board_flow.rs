//! Integration tests for the board service against the stub server.
//!
//! These tests validate:
//! - Mutations become visible only through invalidation plus refetch
//! - Partial updates preserve the fields absent from the patch
//! - Update of an id missing from the cache fails before any network call
//! - Failed mutations leave the cache untouched

use std::sync::Arc;

use url::Url;

use taskdeck::board::{BoardError, BoardService, TaskDraft, TaskPatch};
use taskdeck_api::{ApiError, TaskClient, TaskId, TaskStatus, UserClient, UserId};
use taskdeck_stub::{BoardStore, start_server};

/// Start the stub server and build a service over it.
async fn start_board() -> (BoardService, tokio::task::JoinHandle<()>) {
    let store = Arc::new(BoardStore::seeded());
    let (addr, handle) = start_server("127.0.0.1:0", store)
        .await
        .expect("failed to start stub server");
    let base = Url::parse(&format!("http://{addr}")).expect("invalid stub URL");
    let http = reqwest::Client::new();
    let service = BoardService::new(
        TaskClient::new(http.clone(), base.clone()),
        UserClient::new(http, base),
        1,
    );
    (service, handle)
}

fn draft(description: &str, status: TaskStatus, owner: i64) -> TaskDraft {
    TaskDraft {
        description: description.to_string(),
        status,
        owner: Some(UserId::new(owner)),
    }
}

#[tokio::test]
async fn created_task_appears_after_refetch() {
    let (mut service, _handle) = start_board().await;
    service.refresh().await;
    assert!(service.snapshot().tasks.is_empty());

    let created = service
        .create_task(draft("write the report", TaskStatus::Todo, 1))
        .await
        .expect("create failed");

    // create_task refetches internally; the cache must already see it.
    let snapshot = service.snapshot();
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(snapshot.tasks[0].task.id, created.id);
    assert_eq!(snapshot.column(TaskStatus::Todo).len(), 1);
}

#[tokio::test]
async fn deleted_task_disappears_after_refetch() {
    let (mut service, _handle) = start_board().await;
    service.refresh().await;
    let created = service
        .create_task(draft("doomed", TaskStatus::Todo, 1))
        .await
        .expect("create failed");

    service.delete_task(created.id).await.expect("delete failed");

    assert!(service.snapshot().tasks.is_empty());
}

#[tokio::test]
async fn description_patch_preserves_status_and_owner() {
    let (mut service, _handle) = start_board().await;
    service.refresh().await;
    let created = service
        .create_task(draft("first pass", TaskStatus::Doing, 2))
        .await
        .expect("create failed");

    let updated = service
        .update_task(created.id, TaskPatch::description("second pass"))
        .await
        .expect("update failed");

    assert_eq!(updated.description, "second pass");
    assert_eq!(updated.status, TaskStatus::Doing);
    assert_eq!(updated.user_id, UserId::new(2));

    let cached = service
        .cache()
        .task_by_id(created.id)
        .expect("task missing from cache");
    assert_eq!(cached.task.description, "second pass");
    assert_eq!(cached.task.status, TaskStatus::Doing);
}

#[tokio::test]
async fn status_patch_moves_task_between_columns() {
    let (mut service, _handle) = start_board().await;
    service.refresh().await;
    let created = service
        .create_task(draft("moving", TaskStatus::Todo, 1))
        .await
        .expect("create failed");

    service
        .update_task(created.id, TaskPatch::status(TaskStatus::Done))
        .await
        .expect("update failed");

    let snapshot = service.snapshot();
    assert!(snapshot.column(TaskStatus::Todo).is_empty());
    assert_eq!(snapshot.column(TaskStatus::Done).len(), 1);
}

#[tokio::test]
async fn update_of_uncached_id_fails_before_the_network() {
    let (mut service, _handle) = start_board().await;
    service.refresh().await;

    let err = service
        .update_task(TaskId::new(999), TaskPatch::description("x"))
        .await
        .unwrap_err();

    match err {
        BoardError::Api(api_err) => {
            assert_eq!(api_err.status(), Some(404));
            assert_eq!(api_err.to_string(), "Task with id 999 not found");
            assert!(matches!(api_err, ApiError::TaskNotFound(_)));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_update_leaves_cache_untouched() {
    let (mut service, _handle) = start_board().await;
    service.refresh().await;
    let created = service
        .create_task(draft("keep me", TaskStatus::Todo, 1))
        .await
        .expect("create failed");

    // The stub rejects blank descriptions with 422.
    let err = service
        .update_task(created.id, TaskPatch::description("   "))
        .await
        .unwrap_err();
    match err {
        BoardError::Api(api_err) => assert_eq!(api_err.status(), Some(422)),
        other => panic!("expected Api error, got: {other:?}"),
    }

    let cached = service
        .cache()
        .task_by_id(created.id)
        .expect("task missing from cache");
    assert_eq!(cached.task.description, "keep me");
}

#[tokio::test]
async fn tasks_join_to_seeded_users() {
    let (mut service, _handle) = start_board().await;
    service.refresh().await;
    service
        .create_task(draft("joined", TaskStatus::Todo, 2))
        .await
        .expect("create failed");

    let snapshot = service.snapshot();
    assert_eq!(
        snapshot.tasks[0]
            .user
            .as_ref()
            .map(|u| u.full_name.as_str()),
        Some("Grace Hopper")
    );
}
