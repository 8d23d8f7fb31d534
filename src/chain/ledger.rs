use crate::chain::block::Block;
use crate::chain::pow::ProofOfWork;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::tx::Transaction;
use serde::{Deserialize, Serialize};

/// The chain aggregate: an append-only sequence of blocks (index 0 is the
/// canonical genesis) plus the pool of transactions awaiting inclusion. The
/// only sanctioned mutators are `add_transaction` and
/// `mine_pending_transactions`; everything committed is immutable history,
/// and `is_chain_valid` exists to catch anyone breaking that contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub chain: Vec<Block>,
    pub difficulty: usize,
    pub pending: Vec<Transaction>,
    pub mining_reward: u64,
}

impl Ledger {
    pub fn new(config: &Config) -> Self {
        Ledger::with_settings(config.get_difficulty(), config.get_mining_reward())
    }

    pub fn with_settings(difficulty: usize, mining_reward: u64) -> Self {
        Ledger {
            chain: vec![Block::genesis()],
            difficulty,
            pending: Vec::new(),
            mining_reward,
        }
    }

    /// The fixed genesis construction, used as the comparison target when
    /// validating the chain head.
    pub fn genesis_block() -> Block {
        Block::genesis()
    }

    pub fn latest_block(&self) -> &Block {
        self.chain.last().expect("chain always holds genesis")
    }

    /// Admission-time validation, in order: both addresses present (rewards
    /// have no sender and are never submitted here), signature validity
    /// (structural errors propagate), positive amount, and sufficient sender
    /// balance. An admitted transaction only joins the pending pool; nothing
    /// else changes.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<()> {
        let from = tx.from_address().ok_or_else(|| {
            Error::InvalidTransaction("Transaction must include from and to address".to_string())
        })?;
        if from.is_empty() || tx.to_address().is_empty() {
            return Err(Error::InvalidTransaction(
                "Transaction must include from and to address".to_string(),
            ));
        }

        if !tx.is_valid()? {
            return Err(Error::InvalidTransaction(
                "Signature does not verify against the sender address".to_string(),
            ));
        }

        if tx.amount() == 0 {
            return Err(Error::InvalidTransaction(
                "Amount must be greater than zero".to_string(),
            ));
        }

        let balance = self.balance_of(from);
        if balance < tx.amount() as i64 {
            return Err(Error::InvalidTransaction(format!(
                "Insufficient balance: {} holds {}, needs {}",
                from,
                balance,
                tx.amount()
            )));
        }

        self.pending.push(tx);
        Ok(())
    }

    /// Drain the pending pool into a new block: append the miner's reward
    /// transaction, seal the block with proof-of-work against the current
    /// chain tail, append it, and clear the pool. The only path by which
    /// blocks enter the chain.
    pub fn mine_pending_transactions(&mut self, reward_address: &str) -> Result<()> {
        self.pending
            .push(Transaction::reward(reward_address, self.mining_reward));

        let mut block = Block::new_block(self.latest_block().hash.clone(), &self.pending);
        ProofOfWork::new(self.difficulty).run(&mut block)?;

        self.chain.push(block);
        self.pending.clear();
        Logger::debug(&format!("Chain extended to {} blocks", self.chain.len()));
        Ok(())
    }

    /// Fold over every committed transaction in chain order: spend debits,
    /// receipt credits. Linear in total transaction count.
    pub fn balance_of(&self, address: &str) -> i64 {
        let mut balance: i64 = 0;
        for block in &self.chain {
            for tx in &block.transactions {
                if tx.from_address() == Some(address) {
                    balance -= tx.amount() as i64;
                }
                if tx.to_address() == address {
                    balance += tx.amount() as i64;
                }
            }
        }
        balance
    }

    /// Every committed transaction touching `address` as sender or
    /// recipient, in chain-then-in-block order.
    pub fn transactions_for_wallet(&self, address: &str) -> Vec<&Transaction> {
        self.chain
            .iter()
            .flat_map(|block| &block.transactions)
            .filter(|tx| tx.from_address() == Some(address) || tx.to_address() == address)
            .collect()
    }

    /// Full integrity check: the head must equal the canonical genesis
    /// field-for-field, and every later block must carry valid transactions,
    /// a hash matching its recomputed value, and the hash of its
    /// predecessor. Reports a single boolean; it never raises.
    pub fn is_chain_valid(&self) -> bool {
        if self.chain.first() != Some(&Block::genesis()) {
            return false;
        }

        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let previous = &self.chain[i - 1];

            if !current.has_valid_transactions() {
                return false;
            }

            if current.hash != current.compute_hash() {
                return false;
            }

            if current.previous_hash != previous.hash {
                return false;
            }
        }

        true
    }
}
