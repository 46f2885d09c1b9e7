//! Taskdeck stub API server -- in-memory stand-in for the remote task API.
//!
//! Serves the task/user REST surface with seeded users, for developing the
//! client without the real backend.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 127.0.0.1:8000
//! cargo run --bin taskdeck-stub
//!
//! # Run on custom address
//! cargo run --bin taskdeck-stub -- --bind 127.0.0.1:9001
//! ```

use std::sync::Arc;

use clap::Parser;

use taskdeck_stub::BoardStore;
use taskdeck_stub::server::start_server;

/// CLI arguments for the stub server.
#[derive(clap::Parser, Debug)]
#[command(version, about = "Taskdeck stub API server")]
struct CliArgs {
    /// Address to bind the stub server to.
    #[arg(short, long, default_value = "127.0.0.1:8000", env = "TASKDECK_STUB_ADDR")]
    bind: String,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKDECK_STUB_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = CliArgs::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = Arc::new(BoardStore::seeded());

    match start_server(&cli.bind, store).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "stub API server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "stub server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start stub server");
            std::process::exit(1);
        }
    }
}
