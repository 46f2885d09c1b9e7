//! Networking coordinator for wiring the TUI to the async API layer.
//!
//! This module bridges the synchronous TUI event loop (crossterm poll-based)
//! with the async [`BoardService`] / [`reqwest`] stack. It spawns a
//! background tokio task and communicates with the main thread via
//! [`BoardCommand`] / [`BoardEvent`] channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── BoardEvent ───  tokio background task
//!                     ─── BoardCommand →
//! ```
//!
//! The main thread sends [`BoardCommand`]s (refresh, mutate) and drains
//! [`BoardEvent`]s (board snapshots, mutation failures) on each tick of
//! the poll-based event loop. Every command that touches the cache ends
//! with a fresh [`BoardSnapshot`] so the TUI never reads shared state.

use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use taskdeck_api::{TaskClient, TaskId, UserClient};

use crate::board::{BoardService, BoardSnapshot, TaskDraft, TaskPatch};

/// Commands sent from the TUI main loop to the board background task.
#[derive(Debug)]
pub enum BoardCommand {
    /// Refetch both collections from the remote API.
    Refresh,
    /// Create a task from validated-at-the-service draft input.
    CreateTask(TaskDraft),
    /// Apply a partial update to a task.
    UpdateTask {
        /// Target task.
        id: TaskId,
        /// Fields to change; the rest is carried over from the cache.
        patch: TaskPatch,
    },
    /// Delete a task.
    DeleteTask(TaskId),
    /// Gracefully shut down the board task.
    Shutdown,
}

/// Events sent from the board background task to the TUI main loop.
#[derive(Debug)]
pub enum BoardEvent {
    /// The cache changed; this is the complete new view to render.
    Snapshot(BoardSnapshot),
    /// A mutation failed; the cache was left untouched.
    MutationFailed {
        /// Short verb for the attempted action ("create", "update", ...).
        action: &'static str,
        /// Human-readable failure message.
        message: String,
    },
}

/// Configuration for the board networking layer.
#[derive(Debug, Clone)]
pub struct BoardNetConfig {
    /// Base URL of the remote task API (e.g. `http://localhost:8000`).
    pub base_url: Url,
    /// Per-request timeout applied to the HTTP client.
    pub request_timeout: Duration,
    /// Extra attempts for reads. Mutations never retry.
    pub read_retries: u32,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,
}

/// Default per-request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default extra attempts for failed reads.
const DEFAULT_READ_RETRIES: u32 = 1;

/// Default channel capacity for commands and events.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

impl BoardNetConfig {
    /// Creates a config with default timeout, retry, and channel values.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            read_retries: DEFAULT_READ_RETRIES,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Spawn the board background task and return channel handles.
///
/// Builds the shared HTTP client, wraps it in a [`BoardService`], performs
/// an initial full refresh (whose snapshot is the first event the TUI
/// receives), and then processes commands until [`BoardCommand::Shutdown`]
/// or until the TUI drops its channel ends.
///
/// # Errors
///
/// Returns an error string if the HTTP client cannot be built.
pub fn spawn_board(
    config: BoardNetConfig,
) -> Result<(mpsc::Sender<BoardCommand>, mpsc::Receiver<BoardEvent>), String> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| format!("failed to build HTTP client: {e}"))?;

    let tasks = TaskClient::new(http.clone(), config.base_url.clone());
    let users = UserClient::new(http, config.base_url);
    let service = BoardService::new(tasks, users, config.read_retries);

    let (cmd_tx, cmd_rx) = mpsc::channel::<BoardCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<BoardEvent>(config.channel_capacity);

    tokio::spawn(async move {
        command_loop(service, cmd_rx, evt_tx).await;
    });

    Ok((cmd_tx, evt_rx))
}

/// Background task: process commands from the TUI main loop.
///
/// Each command runs to completion before the next is taken, so snapshots
/// arrive in the order the cache changed.
async fn command_loop(
    mut service: BoardService,
    mut cmd_rx: mpsc::Receiver<BoardCommand>,
    evt_tx: mpsc::Sender<BoardEvent>,
) {
    service.refresh().await;
    if send_snapshot(&service, &evt_tx).await.is_err() {
        return;
    }

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BoardCommand::Refresh => {
                service.refresh().await;
            }
            BoardCommand::CreateTask(draft) => {
                if let Err(e) = service.create_task(draft).await {
                    let _ = evt_tx
                        .send(BoardEvent::MutationFailed {
                            action: "create",
                            message: e.to_string(),
                        })
                        .await;
                }
            }
            BoardCommand::UpdateTask { id, patch } => {
                if let Err(e) = service.update_task(id, patch).await {
                    let _ = evt_tx
                        .send(BoardEvent::MutationFailed {
                            action: "update",
                            message: e.to_string(),
                        })
                        .await;
                }
            }
            BoardCommand::DeleteTask(id) => {
                if let Err(e) = service.delete_task(id).await {
                    let _ = evt_tx
                        .send(BoardEvent::MutationFailed {
                            action: "delete",
                            message: e.to_string(),
                        })
                        .await;
                }
            }
            BoardCommand::Shutdown => {
                tracing::info!("board command loop shutting down");
                break;
            }
        }

        if send_snapshot(&service, &evt_tx).await.is_err() {
            // TUI dropped; exit.
            break;
        }
    }
}

async fn send_snapshot(
    service: &BoardService,
    evt_tx: &mpsc::Sender<BoardEvent>,
) -> Result<(), mpsc::error::SendError<BoardEvent>> {
    evt_tx.send(BoardEvent::Snapshot(service.snapshot())).await
}
