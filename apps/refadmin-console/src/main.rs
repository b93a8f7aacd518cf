//! # Refadmin Console
//!
//! The main entry point for the terminal admin console.

use clap::Parser;
use tokio::io::BufReader;

mod config;
mod router;
mod shell;
mod state;
mod telemetry;
mod views;

use config::{AppConfig, Cli};
use shell::Shell;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_cli(&cli);

    telemetry::init_telemetry(&config.telemetry);

    tracing::info!(
        api_url = %config.api.base_url,
        session_store = ?config.session_store,
        "Starting refadmin console"
    );

    let state = AppState::build(&config).await?;

    Shell::new(state.clone())
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    // Session-only cookies die with the console
    if let Err(e) = state.session.teardown().await {
        tracing::warn!(error = %e, "Session teardown failed");
    }

    tracing::info!("Console closed");
    Ok(())
}
