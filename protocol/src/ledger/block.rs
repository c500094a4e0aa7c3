//! Block and transaction types for the anchoring ledger.

use serde::{Deserialize, Serialize};

use crate::merkle::{canonical_json, sha256_hex};

/// A DID-registration transaction: the canonical encodings of a holder's
/// `(u, v)` points, carried as opaque strings (the ledger itself has no
/// notion of the pairing group — it just anchors bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub u: String,
    pub v: String,
}

/// Block header: linking, ordering, and content-commitment fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub height: u64,
    pub prev_hash: String,
    pub merkle_root: String,
    pub timestamp: u64,
}

/// A block: a header plus the ordered transactions it commits to via
/// `merkle_root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

/// All-zero prev-hash used by the genesis block: 32 zero bytes, hex
/// encoded as 64 `"0"` characters (SHA-256 digests are 32 bytes).
pub fn zero_hash() -> String {
    "0".repeat(64)
}

impl Block {
    /// Computes this block's content hash as `sha256(canonical(header))`.
    pub fn hash(&self) -> String {
        sha256_hex(&canonical_json(&self.header))
    }
}
