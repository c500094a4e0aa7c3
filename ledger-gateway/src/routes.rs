//! HTTP routes exposed by the ledger gateway: `POST /transaction/new`,
//! `POST /block/mine`, `GET /transaction/verify`, `GET /chain`,
//! `GET /info`.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use protocol::error::ProtocolError;
use protocol::ledger::{Block, LedgerInfo, LedgerSnapshot, SpvProof};

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct NewTransactionRequest {
    pub u: String,
    pub v: String,
}

#[derive(Serialize)]
pub struct NewTransactionResponse {
    pub pending_count: usize,
}

/// `POST /transaction/new` — append a transaction to the pending buffer.
pub async fn post_transaction_new(
    State(state): State<SharedState>,
    Json(body): Json<NewTransactionRequest>,
) -> (StatusCode, Json<NewTransactionResponse>) {
    let (_index, pending_count) = state.ledger.submit(body.u, body.v);
    (StatusCode::CREATED, Json(NewTransactionResponse { pending_count }))
}

#[derive(Serialize)]
pub struct MineResponse {
    pub block: Block,
    pub block_hash: String,
    pub transactions_count: usize,
}

/// `POST /block/mine` — mine the pending buffer into a new block.
pub async fn post_block_mine(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<MineResponse>), ApiError> {
    let block = state
        .ledger
        .mine()
        .map_err(|()| ApiError::from(ProtocolError::LedgerEmpty))?;
    let block_hash = block.hash();
    let transactions_count = block.transactions.len();
    Ok((
        StatusCode::CREATED,
        Json(MineResponse {
            block,
            block_hash,
            transactions_count,
        }),
    ))
}

#[derive(Deserialize)]
pub struct VerifyQuery {
    pub block_height: i64,
    pub u: String,
    pub v: String,
}

#[derive(Serialize)]
pub struct VerifyFoundResponse {
    pub exists: bool,
    pub spv_proof: SpvProof,
}

#[derive(Serialize)]
pub struct VerifyNotFoundResponse {
    pub exists: bool,
}

/// `GET /transaction/verify?block_height=H&u=U&v=V` — an SPV inclusion
/// lookup for `(u, v)` in the block at `block_height`.
pub async fn get_transaction_verify(
    State(state): State<SharedState>,
    Query(query): Query<VerifyQuery>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.ledger.spv(query.block_height, &query.u, &query.v) {
        Some(spv_proof) => (
            StatusCode::OK,
            Json(serde_json::json!(VerifyFoundResponse {
                exists: true,
                spv_proof,
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!(VerifyNotFoundResponse { exists: false })),
        ),
    }
}

/// `GET /chain` — a snapshot of the full chain.
pub async fn get_chain(State(state): State<SharedState>) -> Json<LedgerSnapshot> {
    Json(state.ledger.chain())
}

/// `GET /info` — current chain height and pending-buffer size.
pub async fn get_info(State(state): State<SharedState>) -> Json<LedgerInfo> {
    Json(state.ledger.info())
}
