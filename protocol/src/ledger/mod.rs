//! The append-only anchoring ledger: a minimal chain of blocks over DID
//! registration transactions, with SPV-style Merkle inclusion proofs.
//!
//! Structurally grounded on `chain::consensus` (a storage trait plus an
//! engine that serializes mutation) and `chain::types::block` (a header +
//! body split with a canonical content hash); the block-production model
//! itself (genesis, pending buffer, height-indexed chain) follows
//! `original_source/src/blockchain.py`'s `Blockchain` exactly, since that
//! is what the specification pins.

mod block;
mod store;

pub use block::{Block, BlockHeader, Transaction};
pub use store::{Ledger, LedgerInfo, LedgerSnapshot, SpvProof};
