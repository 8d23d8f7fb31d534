//! Demo: build a small chain, then rewrite committed history and watch
//! validation catch it.
//!
//! Run: cargo run --example tamper_demo

use coin_ledger::chain::Ledger;
use coin_ledger::error::Result;
use coin_ledger::tx::Transaction;
use coin_ledger::wallet::Wallet;

fn main() -> Result<()> {
    let wallet = Wallet::new_random();
    let mut ledger = Ledger::with_settings(2, 100);

    println!("Starting the miner...");
    ledger.mine_pending_transactions(wallet.address())?;

    let mut tx = Transaction::transfer(wallet.address(), "address2", 100);
    tx.sign(&wallet)?;
    ledger.add_transaction(tx)?;
    ledger.mine_pending_transactions(wallet.address())?;

    println!(
        "Balance of {} is {}",
        wallet.address(),
        ledger.balance_of(wallet.address())
    );
    println!("Is chain valid? {}", ledger.is_chain_valid());

    // Bump a committed reward amount and re-validate.
    if let Transaction::Reward { amount, .. } = &mut ledger.chain[1].transactions[0] {
        *amount = 1;
    }
    println!("Is chain valid after tampering? {}", ledger.is_chain_valid());

    Ok(())
}
