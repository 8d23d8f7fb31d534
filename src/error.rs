use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Mining failed: exhausted nonce range without finding valid hash")]
    MiningExhausted,

    #[error("Cannot sign transactions for another address")]
    UnauthorizedSigner,

    #[error("No signature in this transaction")]
    MissingSignature,

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
}

pub type Result<T> = std::result::Result<T, Error>;
