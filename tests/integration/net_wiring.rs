//! Integration tests for the board networking coordinator.
//!
//! Tests that `spawn_board` wires the HTTP clients, the board service, and
//! the command/event channels together against the in-process stub server.
//!
//! These tests validate:
//! - `spawn_board` performs an initial refresh and publishes a snapshot
//! - Mutation commands produce updated snapshots
//! - Failed mutations produce `MutationFailed` followed by a snapshot
//! - Shutdown terminates the background task and closes the event channel

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use taskdeck::board::{TaskDraft, TaskPatch};
use taskdeck::net::{BoardCommand, BoardEvent, BoardNetConfig, spawn_board};
use taskdeck_api::{TaskId, TaskStatus, UserId};
use taskdeck_stub::{BoardStore, start_server};

/// Start the stub server and return a networking config pointed at it.
async fn start_stub_config() -> (BoardNetConfig, tokio::task::JoinHandle<()>) {
    let store = Arc::new(BoardStore::seeded());
    let (addr, handle) = start_server("127.0.0.1:0", store)
        .await
        .expect("failed to start stub server");
    let base = Url::parse(&format!("http://{addr}")).expect("invalid stub URL");
    (BoardNetConfig::new(base), handle)
}

/// Wait for the next event with a timeout.
async fn next_event(rx: &mut mpsc::Receiver<BoardEvent>) -> BoardEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timeout waiting for board event")
        .expect("event channel closed unexpectedly")
}

/// Wait for the next snapshot, skipping nothing (panics on other events).
async fn next_snapshot(rx: &mut mpsc::Receiver<BoardEvent>) -> taskdeck::board::BoardSnapshot {
    match next_event(rx).await {
        BoardEvent::Snapshot(snapshot) => snapshot,
        other => panic!("expected Snapshot, got: {other:?}"),
    }
}

#[tokio::test]
async fn initial_refresh_publishes_a_snapshot() {
    let (config, _handle) = start_stub_config().await;
    let (_cmd_tx, mut evt_rx) = spawn_board(config).expect("spawn_board failed");

    let snapshot = next_snapshot(&mut evt_rx).await;
    assert!(snapshot.tasks.is_empty());
    assert_eq!(snapshot.users.len(), 3);
    assert!(!snapshot.is_loading());
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn create_command_produces_updated_snapshot() {
    let (config, _handle) = start_stub_config().await;
    let (cmd_tx, mut evt_rx) = spawn_board(config).expect("spawn_board failed");
    let _ = next_snapshot(&mut evt_rx).await;

    cmd_tx
        .send(BoardCommand::CreateTask(TaskDraft {
            description: "wired up".to_string(),
            status: TaskStatus::Doing,
            owner: Some(UserId::new(1)),
        }))
        .await
        .expect("send failed");

    let snapshot = next_snapshot(&mut evt_rx).await;
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(snapshot.tasks[0].task.description, "wired up");
    assert_eq!(snapshot.column(TaskStatus::Doing).len(), 1);
}

#[tokio::test]
async fn failed_update_emits_mutation_failed_then_snapshot() {
    let (config, _handle) = start_stub_config().await;
    let (cmd_tx, mut evt_rx) = spawn_board(config).expect("spawn_board failed");
    let _ = next_snapshot(&mut evt_rx).await;

    cmd_tx
        .send(BoardCommand::UpdateTask {
            id: TaskId::new(999),
            patch: TaskPatch::description("x"),
        })
        .await
        .expect("send failed");

    match next_event(&mut evt_rx).await {
        BoardEvent::MutationFailed { action, message } => {
            assert_eq!(action, "update");
            assert_eq!(message, "Task with id 999 not found");
        }
        other => panic!("expected MutationFailed, got: {other:?}"),
    }

    // The cache is unchanged but a snapshot still follows every command.
    let snapshot = next_snapshot(&mut evt_rx).await;
    assert!(snapshot.tasks.is_empty());
}

#[tokio::test]
async fn refresh_command_republishes_current_board() {
    let (config, _handle) = start_stub_config().await;
    let (cmd_tx, mut evt_rx) = spawn_board(config).expect("spawn_board failed");
    let _ = next_snapshot(&mut evt_rx).await;

    cmd_tx
        .send(BoardCommand::Refresh)
        .await
        .expect("send failed");

    let snapshot = next_snapshot(&mut evt_rx).await;
    assert_eq!(snapshot.users.len(), 3);
}

#[tokio::test]
async fn shutdown_closes_the_event_channel() {
    let (config, _handle) = start_stub_config().await;
    let (cmd_tx, mut evt_rx) = spawn_board(config).expect("spawn_board failed");
    let _ = next_snapshot(&mut evt_rx).await;

    cmd_tx
        .send(BoardCommand::Shutdown)
        .await
        .expect("send failed");

    let closed = tokio::time::timeout(Duration::from_secs(5), evt_rx.recv())
        .await
        .expect("timeout waiting for channel close");
    assert!(closed.is_none());
}

#[tokio::test]
async fn unreachable_api_surfaces_error_in_first_snapshot() {
    let base = Url::parse("http://127.0.0.1:9").expect("invalid URL");
    let config = BoardNetConfig {
        read_retries: 0,
        request_timeout: Duration::from_secs(1),
        ..BoardNetConfig::new(base)
    };
    let (_cmd_tx, mut evt_rx) = spawn_board(config).expect("spawn_board failed");

    let snapshot = next_snapshot(&mut evt_rx).await;
    assert!(snapshot.error.is_some());
    assert!(snapshot.tasks.is_empty());
}
