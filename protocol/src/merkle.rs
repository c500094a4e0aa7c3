//! Deterministic binary Merkle tree over ledger transactions, with
//! SPV-style inclusion proofs.
//!
//! Grounded on `original_source/src/blockchain.py`'s `MerkleTree`: leaves
//! are SHA-256 over the canonical JSON encoding of a transaction, internal
//! nodes hash the concatenation of their children's *lowercase hex*
//! strings (not raw bytes — this hex convention is part of the interop
//! contract per the specification), and odd-width levels duplicate the
//! last node rather than promoting it unpaired.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::ledger::Transaction;

/// Which side of the running hash a Merkle-proof sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
}

/// One step of a Merkle inclusion proof: a sibling hash and which side of
/// the running hash it sits on.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProofStep {
    pub sibling_hash: String,
    pub position: Position,
}

/// Canonical-JSON SHA-256 hash of a single transaction leaf.
pub fn leaf_hash(tx: &Transaction) -> String {
    sha256_hex(&canonical_json(tx))
}

fn node_hash(left_hex: &str, right_hex: &str) -> String {
    let mut input = String::with_capacity(left_hex.len() + right_hex.len());
    input.push_str(left_hex);
    input.push_str(right_hex);
    sha256_hex(input.as_bytes())
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}

/// Canonical JSON bytes for any serializable value: keys sorted
/// lexicographically (via `serde_json::Value`'s default `BTreeMap`
/// backing), UTF-8, no extraneous whitespace.
pub fn canonical_json<T: Serialize>(value: &T) -> Vec<u8> {
    let v = serde_json::to_value(value).expect("transaction is always representable as JSON");
    serde_json::to_vec(&v).expect("a serde_json::Value always serializes")
}

/// Computes the Merkle root over an ordered list of transactions.
///
/// Empty input hashes to `sha256("")`. A single transaction's root is its
/// own leaf hash. Otherwise, pairs `(2k, 2k+1)` are folded bottom-up,
/// duplicating the last node at any level with an odd width.
pub fn root(txs: &[Transaction]) -> String {
    if txs.is_empty() {
        return sha256_hex(b"");
    }
    let mut level: Vec<String> = txs.iter().map(leaf_hash).collect();
    while level.len() > 1 {
        level = fold_level(&level);
    }
    level.into_iter().next().expect("non-empty level")
}

fn fold_level(level: &[String]) -> Vec<String> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    let mut i = 0;
    while i < level.len() {
        let left = &level[i];
        let right = if i + 1 < level.len() {
            &level[i + 1]
        } else {
            left
        };
        next.push(node_hash(left, right));
        i += 2;
    }
    next
}

/// Builds the inclusion proof for the transaction at index `i`, ordered
/// leaf-to-root.
///
/// Returns an empty proof if `i` is out of range; callers must check
/// membership separately (`verify` on an empty proof against a
/// single-leaf root is the legitimate non-error case, so the empty proof
/// is not itself a failure signal).
pub fn proof(txs: &[Transaction], i: usize) -> Vec<ProofStep> {
    if i >= txs.len() {
        return Vec::new();
    }
    let mut steps = Vec::new();
    let mut level: Vec<String> = txs.iter().map(leaf_hash).collect();
    let mut index = i;

    while level.len() > 1 {
        let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };
        let (sibling_hash, position) = if sibling_index < level.len() {
            let position = if sibling_index > index {
                Position::Right
            } else {
                Position::Left
            };
            (level[sibling_index].clone(), position)
        } else {
            // Odd width: the last node is its own duplicated sibling.
            (level[index].clone(), Position::Right)
        };
        steps.push(ProofStep {
            sibling_hash,
            position,
        });

        level = fold_level(&level);
        index /= 2;
    }

    steps
}

/// Verifies that `tx` is included under `expected_root` via `proof`,
/// folding from the leaf hash up to the root in the order given.
pub fn verify(tx: &Transaction, expected_root: &str, proof: &[ProofStep]) -> bool {
    let mut running = leaf_hash(tx);
    for step in proof {
        running = match step.position {
            Position::Right => node_hash(&running, &step.sibling_hash),
            Position::Left => node_hash(&step.sibling_hash, &running),
        };
    }
    running == expected_root
}
