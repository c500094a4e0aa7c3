//! The mutable ledger state: chain + pending buffer, guarded by a single
//! lock per §5's concurrency model ("submit and mine acquire a single
//! exclusive lock over the pair (chain, pending), held for the duration
//! of the operation; readers take a shared lock or a consistent
//! snapshot").

use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::block::{Block, BlockHeader, Transaction, zero_hash};
use crate::merkle::{self, ProofStep};

struct LedgerState {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

fn genesis_block() -> Block {
    let transactions = vec![Transaction {
        u: "genesis".to_string(),
        v: "genesis".to_string(),
    }];
    let header = BlockHeader {
        height: 0,
        prev_hash: zero_hash(),
        merkle_root: merkle::root(&transactions),
        timestamp: current_unix_timestamp(),
    };
    Block {
        header,
        transactions,
    }
}

fn current_unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// The anchoring ledger: an append-only chain of blocks plus a pending
/// transaction buffer, both guarded by one `RwLock`.
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of `spv`: a transaction's location plus the Merkle proof
/// that it is committed to by the block's `merkle_root`.
#[derive(Debug, Clone, Serialize)]
pub struct SpvProof {
    pub transaction: Transaction,
    pub height: u64,
    pub merkle_root: String,
    pub proof: Vec<ProofStep>,
    pub tx_index: usize,
    pub timestamp: u64,
}

/// A read-only snapshot of the full chain, for `GET /chain`.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    pub chain: Vec<Block>,
}

/// Summary view for `GET /info`.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerInfo {
    pub height: u64,
    pub pending_count: usize,
}

impl Ledger {
    /// Creates a fresh ledger containing only the genesis block.
    pub fn new() -> Self {
        Ledger {
            state: RwLock::new(LedgerState {
                chain: vec![genesis_block()],
                pending: Vec::new(),
            }),
        }
    }

    /// Appends `(u, v)` to the pending buffer. Returns the transaction's
    /// index within the buffer and the new pending count. No
    /// deduplication is performed.
    pub fn submit(&self, u: String, v: String) -> (usize, usize) {
        let mut state = self.state.write().expect("ledger lock poisoned");
        let index = state.pending.len();
        state.pending.push(Transaction { u, v });
        (index, state.pending.len())
    }

    /// Mines a new block from the current pending buffer.
    ///
    /// Fails with `Err(())` (mapped by callers to `LEDGER_EMPTY`) if the
    /// buffer is empty, leaving the chain untouched. Otherwise the
    /// buffer is snapshotted, a block is appended with
    /// `height = tip.height + 1` and `prev_hash = hash(tip)`, and the
    /// buffer is fully drained.
    pub fn mine(&self) -> Result<Block, ()> {
        let mut state = self.state.write().expect("ledger lock poisoned");
        if state.pending.is_empty() {
            return Err(());
        }

        let transactions = std::mem::take(&mut state.pending);
        let tip = state.chain.last().expect("chain always has a genesis block");
        let header = BlockHeader {
            height: tip.header.height + 1,
            prev_hash: tip.hash(),
            merkle_root: merkle::root(&transactions),
            timestamp: current_unix_timestamp(),
        };
        let block = Block {
            header,
            transactions,
        };
        state.chain.push(block.clone());
        Ok(block)
    }

    /// Looks up a transaction by exact `(u, v)` match within the block at
    /// `height`, returning its SPV inclusion proof if found.
    ///
    /// Invalid heights (negative, or at/past the chain length) and
    /// non-matching transactions both return `None`; this is a pure,
    /// side-effect-free lookup.
    pub fn spv(&self, height: i64, u: &str, v: &str) -> Option<SpvProof> {
        if height < 0 {
            return None;
        }
        let state = self.state.read().expect("ledger lock poisoned");
        let block = state.chain.get(height as usize)?;
        let tx_index = block
            .transactions
            .iter()
            .position(|tx| tx.u == u && tx.v == v)?;

        Some(SpvProof {
            transaction: block.transactions[tx_index].clone(),
            height: block.header.height,
            merkle_root: block.header.merkle_root.clone(),
            proof: merkle::proof(&block.transactions, tx_index),
            tx_index,
            timestamp: block.header.timestamp,
        })
    }

    /// Returns a snapshot of the full chain.
    pub fn chain(&self) -> LedgerSnapshot {
        let state = self.state.read().expect("ledger lock poisoned");
        LedgerSnapshot {
            chain: state.chain.clone(),
        }
    }

    /// Returns the current chain height and pending-buffer size.
    pub fn info(&self) -> LedgerInfo {
        let state = self.state.read().expect("ledger lock poisoned");
        LedgerInfo {
            height: state.chain.last().expect("genesis always present").header.height,
            pending_count: state.pending.len(),
        }
    }
}
