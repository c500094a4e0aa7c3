//! Error kinds for the protocol crate.
//!
//! [`ProtocolError`] is the single error type threaded through Issuer,
//! Holder, Verifier, and Ledger operations. Each variant corresponds to one
//! of the tagged error kinds in the specification's error-handling design;
//! HTTP gateways map each variant to the status code named there (400 for
//! everything except [`ProtocolError::NotFound`], which is 404).
//!
//! Kept as a plain enum with manual `Display`/`Error` impls rather than a
//! `thiserror`-derived one, matching the style already used by the
//! teacher's validation/consensus error types.

use std::fmt;

/// Failures in group/scalar (de)serialization, kept separate from
/// [`ProtocolError`] so [`crate::group`] has no dependency on the rest of
/// the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// Decoding a canonical byte encoding into a group or scalar element
    /// failed. Carries the type name (`"G1"`, `"G2"`, `"Zr"`) for
    /// diagnostics.
    DeserializationFailed(&'static str),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::DeserializationFailed(ty) => {
                write!(f, "failed to deserialize canonical {ty} encoding")
            }
        }
    }
}

impl std::error::Error for CryptoError {}

/// Errors produced by the Issuer, Holder, Verifier, and Ledger components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A request was missing a field or had a field of the wrong shape.
    InputMalformed(String),
    /// A group element or scalar failed to decode from its wire encoding.
    DeserializationFailed(String),
    /// The Issuer or Verifier was used before `setup`/`POST /setup`.
    NotInitialized(String),
    /// An attribute vector had the wrong slot count or a missing slot.
    AttributeMismatch(String),
    /// A blind-attribute NIZK failed to verify.
    NizkRejected(String),
    /// Disclosed attributes did not satisfy the verifier's policy.
    PolicyViolation(String),
    /// The BBS+ pairing equation did not hold.
    PairingCheckFailed,
    /// The Fiat-Shamir challenge could not be reproduced from the
    /// transcript (tampered commitment or response scalars).
    SchnorrCheckFailed,
    /// The DID trapdoor equation `u_did^z_s == R3 * v_did^c` did not hold.
    DidCheckFailed,
    /// `mine` was called with an empty pending-transaction buffer.
    LedgerEmpty,
    /// An SPV lookup found no matching block, height, or transaction.
    NotFound(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InputMalformed(msg) => write!(f, "malformed input: {msg}"),
            ProtocolError::DeserializationFailed(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ProtocolError::NotInitialized(msg) => write!(f, "not initialized: {msg}"),
            ProtocolError::AttributeMismatch(msg) => write!(f, "attribute mismatch: {msg}"),
            ProtocolError::NizkRejected(msg) => write!(f, "NIZK rejected: {msg}"),
            ProtocolError::PolicyViolation(msg) => write!(f, "policy violation: {msg}"),
            ProtocolError::PairingCheckFailed => write!(f, "pairing check failed"),
            ProtocolError::SchnorrCheckFailed => write!(f, "Schnorr check failed"),
            ProtocolError::DidCheckFailed => write!(f, "DID check failed"),
            ProtocolError::LedgerEmpty => write!(f, "ledger has no pending transactions to mine"),
            ProtocolError::NotFound(msg) => write!(f, "not found: {msg}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<CryptoError> for ProtocolError {
    fn from(e: CryptoError) -> Self {
        ProtocolError::DeserializationFailed(e.to_string())
    }
}

impl ProtocolError {
    /// The tag surfaced to callers, matching the specification's
    /// error-kind names verbatim (e.g. `"PAIRING_CHECK_FAILED"`).
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolError::InputMalformed(_) => "INPUT_MALFORMED",
            ProtocolError::DeserializationFailed(_) => "DESERIALIZATION_FAILED",
            ProtocolError::NotInitialized(_) => "NOT_INITIALIZED",
            ProtocolError::AttributeMismatch(_) => "ATTRIBUTE_MISMATCH",
            ProtocolError::NizkRejected(_) => "NIZK_REJECTED",
            ProtocolError::PolicyViolation(_) => "POLICY_VIOLATION",
            ProtocolError::PairingCheckFailed => "PAIRING_CHECK_FAILED",
            ProtocolError::SchnorrCheckFailed => "SCHNORR_CHECK_FAILED",
            ProtocolError::DidCheckFailed => "DID_CHECK_FAILED",
            ProtocolError::LedgerEmpty => "LEDGER_EMPTY",
            ProtocolError::NotFound(_) => "NOT_FOUND",
        }
    }

    /// The HTTP status code a gateway should respond with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ProtocolError::NotFound(_) => 404,
            _ => 400,
        }
    }
}
