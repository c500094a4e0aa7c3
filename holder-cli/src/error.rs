//! Error type for the holder CLI's HTTP orchestration.
//!
//! Distinct from `protocol::ProtocolError`, which covers failures inside
//! the cryptographic core: this enum covers the transport and decoding
//! failures that only arise once the Holder's operations are driven over
//! HTTP against the three gateways, plus a pass-through for decode
//! failures surfaced by `protocol::codec`.

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The underlying HTTP request could not be sent or the response
    /// body could not be read.
    Transport(reqwest::Error),
    /// A gateway replied with a non-2xx status; carries the status code
    /// and response body for diagnostics.
    Gateway { status: u16, body: String },
    /// A wire payload from a gateway failed to decode into the expected
    /// shape (malformed JSON or an undecodable group element).
    Decode(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Transport(e) => write!(f, "request failed: {e}"),
            CliError::Gateway { status, body } => write!(f, "gateway returned {status}: {body}"),
            CliError::Decode(msg) => write!(f, "failed to decode response: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        CliError::Transport(e)
    }
}

impl From<protocol::ProtocolError> for CliError {
    fn from(e: protocol::ProtocolError) -> Self {
        CliError::Decode(e.to_string())
    }
}
