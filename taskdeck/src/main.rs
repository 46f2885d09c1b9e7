//! Taskdeck terminal task board.
//!
//! Launches the TUI against a remote task API. Configuration via CLI
//! flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Against the default local API
//! cargo run --bin taskdeck
//!
//! # Against another host
//! cargo run --bin taskdeck -- --api-url http://board.internal:8000
//!
//! # Or via environment variables
//! TASKDECK_API_URL=http://board.internal:8000 cargo run --bin taskdeck
//! ```

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::net::{self, BoardCommand};
use taskdeck::ui;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskdeck starting");

    // Validate the API URL before taking over the terminal.
    let net_config = match config.to_net_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid API URL '{}': {e}", config.base_url);
            return ExitCode::FAILURE;
        }
    };

    // Set up terminal.
    if let Err(e) = setup_terminal() {
        eprintln!("Failed to set up terminal: {e}");
        return ExitCode::FAILURE;
    }
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = restore_terminal();
            eprintln!("Failed to create terminal: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Run the app.
    let result = run_app(&mut terminal, net_config, &config).await;

    // Restore terminal.
    if let Err(e) = restore_terminal() {
        eprintln!("Failed to restore terminal: {e}");
    }
    let _ = terminal.show_cursor();

    tracing::info!("taskdeck exiting");
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("taskdeck failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    net_config: net::BoardNetConfig,
    client_config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(client_config.max_description_len);

    let (cmd_tx, mut evt_rx) = match net::spawn_board(net_config) {
        Ok(channels) => channels,
        Err(e) => return Err(io::Error::other(e)),
    };

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending board events (non-blocking).
        while let Ok(event) = evt_rx.try_recv() {
            app.apply_event(event);
        }

        // Step 3: Poll for terminal input events.
        if event::poll(client_config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(BoardCommand) when the key maps
            // to a remote operation (refresh, create, update, delete).
            if let Some(cmd) = app.handle_key_event(key) {
                match cmd_tx.try_send(cmd) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        app.push_message("Command dropped, network busy".to_string());
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        app.push_message("Board task stopped".to_string());
                    }
                }
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(BoardCommand::Shutdown);
            return Ok(());
        }
    }
}
