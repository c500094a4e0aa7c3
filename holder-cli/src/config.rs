//! Holder CLI argument parsing.
//!
//! Grounded on the `clap::Parser`/`Subcommand` idiom shown by
//! `other_examples/09f1f51c_exidz-murkl__cli-src-main.rs.rs`: a single
//! `Cli` with a `#[command(subcommand)]` enum, each variant carrying the
//! flags that subcommand needs.

use clap::{Parser, Subcommand};

/// HTTP client driving the end-to-end DID/BBS+ authentication flow
/// against a running issuer, ledger, and verifier gateway.
#[derive(Parser, Debug)]
#[command(name = "holder-cli")]
#[command(about = "Holder client for the DID/BBS+ credential protocol", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full `authenticate()` flow: request a cleartext credential,
    /// generate a DID, register it on the ledger, and present a
    /// selective-disclosure proof to the verifier.
    Run {
        /// Base URL of the issuer gateway.
        #[arg(long, default_value = "http://127.0.0.1:8090")]
        issuer_url: String,

        /// Base URL of the ledger gateway.
        #[arg(long, default_value = "http://127.0.0.1:8092")]
        ledger_url: String,

        /// Base URL of the verifier gateway.
        #[arg(long, default_value = "http://127.0.0.1:8091")]
        verifier_url: String,

        /// Attribute slot values in order, e.g. `-a alice -a 25 -a student`
        /// fills `m1`, `m2`, `m3`.
        #[arg(short = 'a', long = "attribute", required = true)]
        attributes: Vec<String>,

        /// Comma-separated 1-based slot indices to disclose, e.g. `1,3`.
        #[arg(short = 'd', long = "disclose", value_delimiter = ',')]
        disclose: Vec<usize>,

        /// Push the issuer's public parameters to the verifier's
        /// `POST /setup` before presenting the proof. Skip this if the
        /// verifier has already been configured out-of-band.
        #[arg(long, default_value_t = true)]
        setup_verifier: bool,

        /// Per-request timeout, in seconds.
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },

    /// Demonstrates the blind-attribute commitment path: commits to each
    /// attribute value behind a Schnorr NIZK and issues over the
    /// commitments rather than cleartext values, matching
    /// `original_source/test/test_issuer.py`'s blind-issuance scenarios.
    IssueBlind {
        /// Base URL of the issuer gateway.
        #[arg(long, default_value = "http://127.0.0.1:8090")]
        issuer_url: String,

        /// Attribute slot values in order, e.g. `-a alice -a 25 -a student`
        /// fills `m1`, `m2`, `m3`, each committed and proven rather than
        /// sent in cleartext.
        #[arg(short = 'a', long = "attribute", required = true)]
        attributes: Vec<String>,

        /// Per-request timeout, in seconds.
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}
