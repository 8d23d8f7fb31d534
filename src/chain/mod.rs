pub mod block;
pub mod ledger;
pub mod pow;

pub use block::Block;
pub use ledger::Ledger;
pub use pow::ProofOfWork;
