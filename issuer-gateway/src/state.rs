//! Shared application state for the issuer gateway.

use std::sync::Arc;

use protocol::issuer::Issuer;

/// The issuer is effectively stateless after `setup` (§5): `PP` is
/// read-only and `sk` never leaves the `Issuer` value, so no interior
/// mutability is needed here.
pub struct AppState {
    pub issuer: Issuer,
}

pub type SharedState = Arc<AppState>;
