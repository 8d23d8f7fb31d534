//! Infrastructure: keypair, address derivation (hex of pubkey), sign, verify.
//! The ledger core only sees addresses and hex signatures; the keypair is
//! passed explicitly into every signing call, so there is no shared crypto
//! context to mock around in tests.

use crate::error::{Error, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

const ADDRESS_PREFIX: &str = "0x";

/// Single wallet: address = hex(public key), secret key kept in memory.
pub struct Wallet {
    address: String,
    signing_key: SigningKey,
}

impl Wallet {
    pub fn new_random() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let address = public_key_to_address(signing_key.verifying_key().as_bytes());
        Wallet {
            address,
            signing_key,
        }
    }

    /// Rebuild a wallet from a 32-byte secret key in hex. Deterministic:
    /// the same secret always yields the same address.
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self> {
        let bytes: [u8; 32] = hex::decode(secret_hex)
            .ok()
            .and_then(|v| v.try_into().ok())
            .ok_or_else(|| {
                Error::InvalidTransaction("Secret key must be 32 bytes of hex".to_string())
            })?;
        let signing_key = SigningKey::from_bytes(&bytes);
        let address = public_key_to_address(signing_key.verifying_key().as_bytes());
        Ok(Wallet {
            address,
            signing_key,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sign message bytes; returns the 64-byte Ed25519 signature as hex.
    pub fn sign_bytes(&self, message: &[u8]) -> String {
        let sig: Signature = self.signing_key.sign(message);
        hex::encode(sig.to_bytes())
    }

    /// Hex of the 32-byte secret key, for `from_secret_hex` round trips.
    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

/// Address = 0x + hex(32-byte public key).
pub fn public_key_to_address(pubkey: &[u8]) -> String {
    format!("{}{}", ADDRESS_PREFIX, hex::encode(pubkey))
}

/// Decode address to 32-byte public key. Returns None if not a valid hex pubkey.
pub fn address_to_public_key(address: &str) -> Option<[u8; 32]> {
    let hex_part = address.strip_prefix(ADDRESS_PREFIX).unwrap_or(address);
    let bytes = hex::decode(hex_part).ok()?;
    let arr: [u8; 32] = bytes.try_into().ok()?;
    Some(arr)
}

/// Verify a hex signature over message bytes against an address used as the
/// public key. Anything that fails to decode (address, signature length)
/// simply does not verify; this never errors.
pub fn verify_signature(address: &str, message: &[u8], signature_hex: &str) -> bool {
    let Some(pubkey_bytes) = address_to_public_key(address) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&pubkey_bytes) else {
        return false;
    };
    let Ok(sig_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(arr) = <[u8; 64]>::try_from(sig_bytes.as_slice()) else {
        return false;
    };
    let sig = Signature::from_bytes(&arr);
    verifying_key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let wallet = Wallet::new_random();
        let sig = wallet.sign_bytes(b"hello ledger");
        assert!(verify_signature(wallet.address(), b"hello ledger", &sig));
        assert!(!verify_signature(wallet.address(), b"other message", &sig));
    }

    #[test]
    fn test_foreign_key_does_not_verify() {
        let signer = Wallet::new_random();
        let other = Wallet::new_random();
        let sig = signer.sign_bytes(b"payload");
        assert!(!verify_signature(other.address(), b"payload", &sig));
    }

    #[test]
    fn test_from_secret_hex_is_deterministic() {
        let secret = "217e27460b289e2c0e2928dcb26c4b93bb3d1c5ef70d776f58bb0a538647374a";
        let a = Wallet::from_secret_hex(secret).unwrap();
        let b = Wallet::from_secret_hex(secret).unwrap();
        assert_eq!(a.address(), b.address());
        assert!(a.address().starts_with("0x"));
    }

    #[test]
    fn test_bad_secret_rejected() {
        assert!(Wallet::from_secret_hex("not hex").is_err());
        assert!(Wallet::from_secret_hex("abcd").is_err());
    }

    #[test]
    fn test_malformed_inputs_do_not_verify() {
        let wallet = Wallet::new_random();
        let sig = wallet.sign_bytes(b"m");
        assert!(!verify_signature("not-an-address", b"m", &sig));
        assert!(!verify_signature(wallet.address(), b"m", "zz"));
        assert!(!verify_signature(wallet.address(), b"m", "abcd"));
    }
}
