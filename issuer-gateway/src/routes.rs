//! HTTP routes exposed by the issuer gateway: `GET /pp`, `POST /issue`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use protocol::codec::{CredentialWire, IssueRequest, PublicParamsWire};

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct PublicParamsResponse {
    pub pp: PublicParamsWire,
}

/// `GET /pp` — the issuer's public parameters.
pub async fn get_pp(State(state): State<SharedState>) -> Json<PublicParamsResponse> {
    Json(PublicParamsResponse {
        pp: PublicParamsWire::from_domain(state.issuer.public_params()),
    })
}

#[derive(Serialize)]
pub struct IssueResponse {
    pub credential: CredentialWire,
}

/// `POST /issue` — issue a BBS+ credential over the request's attribute
/// vector, cleartext and/or blind.
pub async fn post_issue(
    State(state): State<SharedState>,
    Json(body): Json<IssueRequest>,
) -> Result<(StatusCode, Json<IssueResponse>), ApiError> {
    let attrs = body.into_domain()?;
    let cred = state.issuer.issue(&attrs)?;
    Ok((
        StatusCode::CREATED,
        Json(IssueResponse {
            credential: CredentialWire::from_domain(&cred),
        }),
    ))
}
