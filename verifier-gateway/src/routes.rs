//! HTTP routes exposed by the verifier gateway: `POST /setup`,
//! `POST|GET /policy`, `POST /verify`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use protocol::codec::{ProofEnvelope, PublicParamsWire};
use protocol::verifier::Policy;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SetupRequest {
    pub pp: PublicParamsWire,
}

#[derive(Serialize)]
pub struct SetupResponse {
    pub status: &'static str,
}

/// `POST /setup` — configure the public parameters to verify against.
pub async fn post_setup(
    State(state): State<SharedState>,
    Json(body): Json<SetupRequest>,
) -> Result<(StatusCode, Json<SetupResponse>), ApiError> {
    let pp = body.pp.into_domain().map_err(ApiError::from)?;
    state.verifier.setup(pp);
    Ok((StatusCode::CREATED, Json(SetupResponse { status: "ok" })))
}

#[derive(Deserialize)]
pub struct PolicyRequest {
    pub policy: Policy,
}

#[derive(Serialize)]
pub struct PolicyResponse {
    pub policy: Policy,
}

/// `POST /policy` — replace the disclosure policy.
pub async fn post_policy(
    State(state): State<SharedState>,
    Json(body): Json<PolicyRequest>,
) -> (StatusCode, Json<PolicyResponse>) {
    state.verifier.set_policy(body.policy);
    (
        StatusCode::CREATED,
        Json(PolicyResponse {
            policy: state.verifier.policy(),
        }),
    )
}

/// `GET /policy` — the currently configured disclosure policy.
pub async fn get_policy(State(state): State<SharedState>) -> Json<PolicyResponse> {
    Json(PolicyResponse {
        policy: state.verifier.policy(),
    })
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `POST /verify` — runs the four-step proof check and reports
/// `{valid:true}` or `{valid:false, message}` (never the generic error
/// envelope: a rejected proof is an ordinary outcome, not a malformed
/// request).
pub async fn post_verify(
    State(state): State<SharedState>,
    Json(proof): Json<ProofEnvelope>,
) -> (StatusCode, Json<VerifyResponse>) {
    match state.verifier.verify(&proof) {
        Ok(()) => (
            StatusCode::OK,
            Json(VerifyResponse {
                valid: true,
                message: None,
            }),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(VerifyResponse {
                valid: false,
                message: Some(e.to_string()),
            }),
        ),
    }
}

