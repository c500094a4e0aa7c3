//! Verifier gateway binary.
//!
//! Exposes `protocol::verifier::Verifier` over HTTP:
//!
//! - `POST /setup`
//! - `POST /policy`, `GET /policy`
//! - `POST /verify`

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
use protocol::verifier::Verifier;
use state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "verifier_gateway=info,protocol=info".to_string()),
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
        verifier: Verifier::new(),
    });

    let app = Router::new()
        .route("/setup", post(routes::post_setup))
        .route("/policy", post(routes::post_policy).get(routes::get_policy))
        .route("/verify", post(routes::post_verify))
        .with_state(app_state);

    let listen_addr = cli.listen_addr();
    tracing::info!("verifier gateway listening on http://{listen_addr}");

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .map_err(|e| format!("failed to bind {listen_addr}: {e}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("verifier gateway server error: {e}"))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
