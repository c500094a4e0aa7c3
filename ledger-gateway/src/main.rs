//! Ledger gateway binary.
//!
//! Exposes `protocol::ledger::Ledger` over HTTP:
//!
//! - `POST /transaction/new`
//! - `POST /block/mine`
//! - `GET /transaction/verify`
//! - `GET /chain`, `GET /info`

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use tokio::signal;

use config::Cli;
use protocol::ledger::Ledger;
use state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ledger_gateway=info,protocol=info".to_string()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let app_state: SharedState = Arc::new(AppState {
        ledger: Ledger::new(),
    });

    let app = Router::new()
        .route("/transaction/new", post(routes::post_transaction_new))
        .route("/block/mine", post(routes::post_block_mine))
        .route("/transaction/verify", get(routes::get_transaction_verify))
        .route("/chain", get(routes::get_chain))
        .route("/info", get(routes::get_info))
        .with_state(app_state);

    let listen_addr = cli.listen_addr();
    tracing::info!("ledger gateway listening on http://{listen_addr}");

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .map_err(|e| format!("failed to bind {listen_addr}: {e}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("ledger gateway server error: {e}"))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
