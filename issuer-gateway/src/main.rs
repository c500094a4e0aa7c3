//! Issuer gateway binary.
//!
//! Exposes `protocol::issuer::Issuer` over HTTP:
//!
//! - `GET /pp`
//! - `POST /issue`

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
use protocol::issuer::Issuer;
use state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "issuer_gateway=info,protocol=info".to_string()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let issuer = Issuer::setup(cli.n);
    tracing::info!(n = cli.n, "issuer parameters generated");

    let app_state: SharedState = Arc::new(AppState { issuer });

    let app = Router::new()
        .route("/pp", get(routes::get_pp))
        .route("/issue", post(routes::post_issue))
        .with_state(app_state);

    let listen_addr = cli.listen_addr();
    tracing::info!("issuer gateway listening on http://{listen_addr}");

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .map_err(|e| format!("failed to bind {listen_addr}: {e}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("issuer gateway server error: {e}"))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
