//! Dashboard daemon entry point.
//!
//! Wires the engine against the real HTTP service and file-backed storage,
//! then runs until interrupted. The session must already exist in the data
//! directory (the login flow writes it); without one the daemon reports the
//! auth failure and exits so the operator can sign in again.

use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use whatsflow_board::api::HttpApi;
use whatsflow_board::lifecycle::{setup_tracing, DashboardConfig, DashboardSystem, StartError};
use whatsflow_board::notify::BellLogger;
use whatsflow_board::storage::FileStore;

#[derive(Parser, Debug)]
#[command(name = "whatsflow-board", about = "Order dashboard sync engine")]
struct Args {
    /// Base URL of the order service.
    #[arg(long, env = "WHATSFLOW_BASE_URL")]
    base_url: Url,

    /// Directory holding the persisted session and preferences.
    #[arg(long, env = "WHATSFLOW_DATA_DIR", default_value = ".whatsflow")]
    data_dir: PathBuf,

    /// Poll period in seconds.
    #[arg(long, env = "WHATSFLOW_POLL_SECS", default_value_t = 5)]
    poll_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();
    let args = Args::parse();

    let api = Arc::new(HttpApi::new(args.base_url));
    let store = Arc::new(FileStore::new(&args.data_dir));
    let sink = Arc::new(BellLogger);
    let config = DashboardConfig {
        poll_interval: Duration::from_secs(args.poll_secs),
        ..DashboardConfig::default()
    };

    let system = match DashboardSystem::start(api, store, sink, config).await {
        Ok(system) => system,
        Err(StartError::Auth(e)) => {
            error!(error = %e, "session invalid, sign in again before starting the board");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!(error = %e, "could not start the dashboard");
            return ExitCode::FAILURE;
        }
    };

    info!(
        user = system.session.user_email.as_deref().unwrap_or("-"),
        client = system.session.client_name.as_deref().unwrap_or("-"),
        "dashboard running"
    );

    match (system.board.active_view().await, system.board.history_view().await) {
        (Ok(active), Ok(history)) => {
            info!(active = active.len(), completed = history.len(), "board seeded");
        }
        _ => error!("board went away during startup"),
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
    system.shutdown().await;
    ExitCode::SUCCESS
}
