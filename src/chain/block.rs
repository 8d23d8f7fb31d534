use crate::tx::Transaction;
use serde::{Deserialize, Serialize};

/// Timestamp of the canonical genesis block (2021-01-01T00:00:00Z). Fixed so
/// genesis is reproducible field-for-field as a validation reference.
pub const GENESIS_TIMESTAMP: i64 = 1_609_459_200;

/// Hash link carried by the genesis block, which has no predecessor.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub timestamp: i64,
    pub previous_hash: String,
    pub hash: String,
    pub transactions: Vec<Transaction>,
    pub nonce: u64,
}

impl Block {
    /// New unmined block over the given transactions, timestamped now. The
    /// stored hash matches the fields until mining starts varying the nonce.
    pub fn new_block(previous_hash: String, transactions: &[Transaction]) -> Block {
        let mut block = Block {
            timestamp: crate::current_timestamp(),
            previous_hash,
            hash: String::new(),
            transactions: transactions.to_vec(),
            nonce: 0,
        };
        block.hash = block.compute_hash();
        block
    }

    /// The canonical first block: fixed timestamp, no transactions, no
    /// predecessor. Every call returns an identical value.
    pub fn genesis() -> Block {
        let mut block = Block {
            timestamp: GENESIS_TIMESTAMP,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            hash: String::new(),
            transactions: Vec::new(),
            nonce: 0,
        };
        block.hash = block.compute_hash();
        block
    }

    /// SHA256 digest over the predecessor hash, timestamp, the ordered
    /// serialization of the transactions, and the nonce. Transaction order
    /// is part of the input; any field change changes the digest.
    pub fn compute_digest(&self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(self.previous_hash.as_bytes());
        data.extend_from_slice(&self.timestamp.to_be_bytes());
        data.extend_from_slice(&bincode::serialize(&self.transactions).unwrap());
        data.extend_from_slice(&self.nonce.to_be_bytes());
        crate::sha256_digest(&data)
    }

    /// Hex form of `compute_digest`, the value stored in `hash`.
    pub fn compute_hash(&self) -> String {
        hex::encode(self.compute_digest())
    }

    /// True iff every contained transaction is valid. Never raises: a
    /// transaction whose validity check errors counts as invalid. Stops at
    /// the first failure.
    pub fn has_valid_transactions(&self) -> bool {
        self.transactions
            .iter()
            .all(|tx| matches!(tx.is_valid(), Ok(true)))
    }
}
