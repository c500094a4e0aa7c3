//! Holder CLI binary.
//!
//! Drives the Holder side of the protocol over HTTP against a running
//! issuer, ledger, and verifier gateway, mirroring
//! `original_source/src/user.py`'s `User.authenticate`: request a
//! credential, generate a DID, register it on the ledger, then build and
//! submit a selective-disclosure proof.

mod client;
mod config;
mod error;

use std::collections::{BTreeMap, BTreeSet};

use clap::Parser;
use serde::{Deserialize, Serialize};

use protocol::codec::{AttributeSlotWire, CredentialWire, IssueRequest, ProofEnvelope, PublicParamsWire};
use protocol::group;
use protocol::holder;

use client::HttpClient;
use config::{Cli, Command};
use error::CliError;

#[derive(Deserialize)]
struct PpResponse {
    pp: PublicParamsWire,
}

#[derive(Deserialize)]
struct IssueResponse {
    credential: CredentialWire,
}

#[derive(Serialize)]
struct NewTransactionRequest {
    u: String,
    v: String,
}

#[derive(Deserialize)]
struct NewTransactionResponse {
    pending_count: usize,
}

#[derive(Serialize)]
struct SetupRequest {
    pp: PublicParamsWire,
}

#[derive(Deserialize)]
struct SetupResponse {
    #[allow(dead_code)]
    status: String,
}

#[derive(Deserialize)]
struct VerifyResponse {
    valid: bool,
    message: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "holder_cli=info,protocol=info".to_string()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run {
            issuer_url,
            ledger_url,
            verifier_url,
            attributes,
            disclose,
            setup_verifier,
            timeout_secs,
        } => {
            run_authenticate(
                &issuer_url,
                &ledger_url,
                &verifier_url,
                attributes,
                disclose,
                setup_verifier,
                timeout_secs,
            )
            .await
        }
        Command::IssueBlind {
            issuer_url,
            attributes,
            timeout_secs,
        } => run_issue_blind(&issuer_url, attributes, timeout_secs).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// `request_credential` + `generate_did` + `register_did_on_blockchain` +
/// `verify_identity`, exactly in the order `User.authenticate` runs them.
async fn run_authenticate(
    issuer_url: &str,
    ledger_url: &str,
    verifier_url: &str,
    attribute_values: Vec<String>,
    disclose: Vec<usize>,
    setup_verifier: bool,
    timeout_secs: u64,
) -> Result<(), CliError> {
    let http = HttpClient::new(timeout_secs);

    // Step 1: fetch PP, request a cleartext credential.
    let pp_resp: PpResponse = http.get_json(&format!("{issuer_url}/pp")).await?;
    let pp = pp_resp.pp.into_domain()?;
    tracing::info!(n = pp.n, "fetched issuer public parameters");

    if attribute_values.len() != pp.n {
        return Err(CliError::Decode(format!(
            "issuer expects {} attribute slots, got {}",
            pp.n,
            attribute_values.len()
        )));
    }

    let mut values: BTreeMap<usize, String> = BTreeMap::new();
    let mut issue_attrs = BTreeMap::new();
    for (idx, value) in attribute_values.iter().enumerate() {
        let i = idx + 1;
        values.insert(i, value.clone());
        issue_attrs.insert(
            format!("m{i}"),
            AttributeSlotWire::Value { value: value.clone() },
        );
    }

    let issue_resp: IssueResponse = http
        .post_json(&format!("{issuer_url}/issue"), &IssueRequest { attributes: issue_attrs })
        .await?;
    let cred = protocol::issuer::Credential {
        a: protocol::codec::decode_g1(&issue_resp.credential.a)?,
        x: protocol::codec::decode_zr(&issue_resp.credential.x)?,
        s: protocol::codec::decode_zr(&issue_resp.credential.s)?,
    };
    tracing::info!("credential issued");

    // Step 2: generate a DID bound to the credential's blinding scalar,
    // then register it (internal u, v order) on the ledger.
    let did = holder::generate_did(cred.s);
    let tx_resp: NewTransactionResponse = http
        .post_json(
            &format!("{ledger_url}/transaction/new"),
            &NewTransactionRequest {
                u: protocol::codec::encode_g1(&did.u),
                v: protocol::codec::encode_g1(&did.v),
            },
        )
        .await?;
    tracing::info!(pending_count = tx_resp.pending_count, "DID registered on ledger");

    // Optionally push PP to the verifier before presenting the proof.
    if setup_verifier {
        let _: SetupResponse = http
            .post_json(
                &format!("{verifier_url}/setup"),
                &SetupRequest {
                    pp: PublicParamsWire::from_domain(&pp),
                },
            )
            .await?;
        tracing::info!("verifier public parameters configured");
    }

    // Step 3: build the selective-disclosure + DID-binding proof and
    // submit it to the verifier.
    let disclosed: BTreeSet<usize> = disclose.into_iter().collect();
    let proof: ProofEnvelope = holder::build_disclosure_proof(&pp, &cred, &values, &disclosed, did).to_wire();

    let verify_resp: VerifyResponse = http
        .post_json_any_status(&format!("{verifier_url}/verify"), &proof)
        .await?;

    if verify_resp.valid {
        println!("valid=true");
        Ok(())
    } else {
        println!(
            "valid=false message={}",
            verify_resp.message.unwrap_or_else(|| "no message".to_string())
        );
        std::process::exit(1);
    }
}

/// Demonstrates the blind-attribute commitment path against a running
/// issuer: commits to every attribute value and proves knowledge of it
/// via a Schnorr NIZK before issuance, per `spec.md` §9's Open Question
/// that the issuer's blinded path should be reachable through a holder
/// helper.
async fn run_issue_blind(issuer_url: &str, attribute_values: Vec<String>, timeout_secs: u64) -> Result<(), CliError> {
    let http = HttpClient::new(timeout_secs);

    let pp_resp: PpResponse = http.get_json(&format!("{issuer_url}/pp")).await?;
    let pp = pp_resp.pp.into_domain()?;

    if attribute_values.len() != pp.n {
        return Err(CliError::Decode(format!(
            "issuer expects {} attribute slots, got {}",
            pp.n,
            attribute_values.len()
        )));
    }

    let mut issue_attrs = BTreeMap::new();
    for (idx, value) in attribute_values.iter().enumerate() {
        let i = idx + 1;
        let m_i = group::hash_to_scalar(value.as_bytes());
        let (commitment, proof) = holder::prove_attribute_knowledge(pp.h(i), m_i);
        issue_attrs.insert(
            format!("m{i}"),
            AttributeSlotWire::Blind {
                commitment: protocol::codec::encode_g1(&commitment),
                proof: protocol::codec::NizkProofWire::from_domain(&proof),
            },
        );
    }

    let issue_resp: IssueResponse = http
        .post_json(&format!("{issuer_url}/issue"), &IssueRequest { attributes: issue_attrs })
        .await?;

    println!(
        "credential issued: A={} x={} s={}",
        issue_resp.credential.a, issue_resp.credential.x, issue_resp.credential.s
    );
    Ok(())
}
