use crate::chain::block::Block;
use crate::error::{Error, Result};
use crate::logger::Logger;
use num_bigint::{BigInt, Sign};

const MAX_NONCE: u64 = u64::MAX;

/// Proof-of-work search parameters. The difficulty counts leading zero hex
/// digits in the block hash; the equivalent numeric target is
/// `1 << (256 - 4 * difficulty)`, and a digest qualifies iff its integer
/// value falls below the target.
pub struct ProofOfWork {
    difficulty: usize,
    target: BigInt,
}

impl ProofOfWork {
    pub fn new(difficulty: usize) -> Self {
        // 64 hex digits in a SHA256 hash; beyond that the target is zero
        // and nothing can qualify, so cap the shift instead of underflowing.
        let bits = 256usize.saturating_sub(4 * difficulty.min(64));
        ProofOfWork {
            difficulty,
            target: BigInt::from(1) << bits,
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Increment the nonce until the block digest meets the target, then
    /// store the winning hash on the block. Blocking and CPU-bound; errors
    /// only if the whole nonce range is exhausted.
    pub fn run(&self, block: &mut Block) -> Result<()> {
        Logger::debug(&format!(
            "Mining block at difficulty {} over {} transactions",
            self.difficulty,
            block.transactions.len()
        ));
        let mut nonce = 0u64;
        loop {
            block.nonce = nonce;
            let digest = block.compute_digest();
            let hash_int = BigInt::from_bytes_be(Sign::Plus, &digest);
            if hash_int < self.target {
                block.hash = hex::encode(&digest);
                Logger::info(&format!("Block mined: {}", block.hash));
                return Ok(());
            }
            if nonce == MAX_NONCE {
                return Err(Error::MiningExhausted);
            }
            nonce += 1;
        }
    }
}
