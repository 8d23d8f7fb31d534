use crate::error::{Error, Result};
use crate::wallet::{verify_signature, Wallet};
use serde::{Deserialize, Serialize};

/// Marker hashed in place of a sender for reward transactions, so a reward
/// and a transfer with otherwise equal fields never share a hash.
const REWARD_SENDER: &str = "none";

/// A transfer record. Two cases instead of a nullable sender: a `Reward`
/// (coinbase) has no sender and carries no signature; a `Transfer` must be
/// signed by the keypair behind its `from` address before it is admissible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transaction {
    Reward {
        to: String,
        amount: u64,
        timestamp: i64,
    },
    Transfer {
        from: String,
        to: String,
        amount: u64,
        timestamp: i64,
        /// Hex-encoded 64-byte Ed25519 signature over `compute_hash()`.
        signature: Option<String>,
    },
}

impl Transaction {
    /// New unsigned transfer, timestamped now.
    pub fn transfer(from: &str, to: &str, amount: u64) -> Self {
        Transaction::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            timestamp: crate::current_timestamp(),
            signature: None,
        }
    }

    /// New mining reward, timestamped now.
    pub fn reward(to: &str, amount: u64) -> Self {
        Transaction::Reward {
            to: to.to_string(),
            amount,
            timestamp: crate::current_timestamp(),
        }
    }

    pub fn from_address(&self) -> Option<&str> {
        match self {
            Transaction::Reward { .. } => None,
            Transaction::Transfer { from, .. } => Some(from),
        }
    }

    pub fn to_address(&self) -> &str {
        match self {
            Transaction::Reward { to, .. } => to,
            Transaction::Transfer { to, .. } => to,
        }
    }

    pub fn amount(&self) -> u64 {
        match self {
            Transaction::Reward { amount, .. } => *amount,
            Transaction::Transfer { amount, .. } => *amount,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            Transaction::Reward { timestamp, .. } => *timestamp,
            Transaction::Transfer { timestamp, .. } => *timestamp,
        }
    }

    /// SHA256 over sender, recipient, amount and timestamp. Deterministic;
    /// the signature is not part of the hash (it signs this digest).
    pub fn compute_hash(&self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(self.from_address().unwrap_or(REWARD_SENDER).as_bytes());
        data.extend_from_slice(self.to_address().as_bytes());
        data.extend_from_slice(&self.amount().to_be_bytes());
        data.extend_from_slice(&self.timestamp().to_be_bytes());
        crate::sha256_digest(&data)
    }

    /// Sign the transaction hash with `wallet`. Fails with
    /// `UnauthorizedSigner` unless the wallet's address is exactly the
    /// transaction's sender; rewards have no sender and cannot be signed.
    pub fn sign(&mut self, wallet: &Wallet) -> Result<()> {
        let digest = self.compute_hash();
        match self {
            Transaction::Reward { .. } => Err(Error::UnauthorizedSigner),
            Transaction::Transfer {
                from, signature, ..
            } => {
                if wallet.address() != from.as_str() {
                    return Err(Error::UnauthorizedSigner);
                }
                *signature = Some(wallet.sign_bytes(&digest));
                Ok(())
            }
        }
    }

    /// Rewards are valid unconditionally. A transfer without a signature is
    /// a structural error (`MissingSignature`); one whose signature merely
    /// fails to verify is `Ok(false)`.
    pub fn is_valid(&self) -> Result<bool> {
        match self {
            Transaction::Reward { .. } => Ok(true),
            Transaction::Transfer {
                from, signature, ..
            } => {
                let sig = match signature {
                    Some(s) if !s.is_empty() => s,
                    _ => return Err(Error::MissingSignature),
                };
                Ok(verify_signature(from, &self.compute_hash(), sig))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn transfer_at(from: &str, to: &str, amount: u64, timestamp: i64) -> Transaction {
        Transaction::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            timestamp,
            signature: None,
        }
    }

    #[test]
    fn test_signed_transfer_is_valid() {
        let wallet = Wallet::new_random();
        let mut tx = Transaction::transfer(wallet.address(), "address2", 10);
        tx.sign(&wallet).unwrap();
        assert!(tx.is_valid().unwrap());
    }

    #[test]
    fn test_sign_for_another_address_fails() {
        let wallet = Wallet::new_random();
        let mut tx = Transaction::transfer("0xdeadbeef", "address2", 10);
        assert!(matches!(tx.sign(&wallet), Err(Error::UnauthorizedSigner)));
    }

    #[test]
    fn test_reward_cannot_be_signed_but_is_valid() {
        let wallet = Wallet::new_random();
        let mut tx = Transaction::reward(wallet.address(), 100);
        assert!(matches!(tx.sign(&wallet), Err(Error::UnauthorizedSigner)));
        assert!(tx.is_valid().unwrap());
    }

    #[test]
    fn test_unsigned_transfer_is_structural_error() {
        let tx = Transaction::transfer("0xaa", "0xbb", 5);
        assert!(matches!(tx.is_valid(), Err(Error::MissingSignature)));
    }

    #[test]
    fn test_swapped_sender_invalidates_signature() {
        let wallet = Wallet::new_random();
        let other = Wallet::new_random();
        let mut tx = Transaction::transfer(wallet.address(), "address2", 10);
        tx.sign(&wallet).unwrap();

        // Re-point the signed transaction at a different sender: the stored
        // signature no longer verifies against the new public key.
        if let Transaction::Transfer { from, .. } = &mut tx {
            *from = other.address().to_string();
        }
        assert!(!tx.is_valid().unwrap());
    }

    #[test]
    fn test_tampered_amount_invalidates_signature() {
        let wallet = Wallet::new_random();
        let mut tx = Transaction::transfer(wallet.address(), "address2", 10);
        tx.sign(&wallet).unwrap();

        if let Transaction::Transfer { amount, .. } = &mut tx {
            *amount = 9999;
        }
        assert!(!tx.is_valid().unwrap());
    }

    proptest! {
        #[test]
        fn prop_hash_is_deterministic(amount in 1u64..1_000_000, ts in 0i64..2_000_000_000) {
            let tx = transfer_at("0xaa", "0xbb", amount, ts);
            prop_assert_eq!(tx.compute_hash(), tx.compute_hash());
        }

        #[test]
        fn prop_hash_tracks_amount(amount in 1u64..1_000_000, ts in 0i64..2_000_000_000) {
            let a = transfer_at("0xaa", "0xbb", amount, ts);
            let b = transfer_at("0xaa", "0xbb", amount + 1, ts);
            prop_assert_ne!(a.compute_hash(), b.compute_hash());
        }

        #[test]
        fn prop_reward_and_transfer_hashes_differ(amount in 1u64..1_000_000, ts in 0i64..2_000_000_000) {
            let reward = Transaction::Reward {
                to: "0xbb".to_string(),
                amount,
                timestamp: ts,
            };
            let transfer = transfer_at("0xaa", "0xbb", amount, ts);
            prop_assert_ne!(reward.compute_hash(), transfer.compute_hash());
        }
    }
}
