//! Shared application state for the verifier gateway.

use std::sync::Arc;

use protocol::verifier::Verifier;

/// `Verifier` is internally `RwLock`-guarded (mirrors the Ledger's single
/// lock over mutable state), so no outer mutex is needed here.
pub struct AppState {
    pub verifier: Verifier,
}

pub type SharedState = Arc<AppState>;
