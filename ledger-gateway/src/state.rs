//! Shared application state for the ledger gateway.

use std::sync::Arc;

use protocol::ledger::Ledger;

pub struct AppState {
    pub ledger: Ledger,
}

pub type SharedState = Arc<AppState>;
