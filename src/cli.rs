use clap::{Parser, Subcommand};
use coin_ledger::chain::Ledger;
use coin_ledger::config::Config;
use coin_ledger::error::{Error, Result};
use coin_ledger::logger::Logger;
use coin_ledger::tx::Transaction;
use coin_ledger::wallet::Wallet;

#[derive(Parser)]
#[command(name = "coin-ledger")]
#[command(about = "Coin Ledger CLI - Single-process proof-of-work coin ledger")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: "human" or "json"
    #[arg(short, long, default_value = "human")]
    pub format: String,

    /// Proof-of-work difficulty (leading zero hex digits)
    #[arg(short, long)]
    pub difficulty: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a wallet keypair
    Keygen,

    /// Run the end-to-end demo: mine, transfer, tamper, re-validate
    Demo {
        /// 32-byte secret key in hex for the demo wallet (random if omitted)
        #[arg(short, long)]
        secret: Option<String>,
    },
}

/// Format output based on format type
fn format_output<T: serde::Serialize + std::fmt::Debug>(data: &T, format: &str) -> Result<String> {
    match format {
        "json" => serde_json::to_string_pretty(data)
            .map_err(|e| Error::InvalidTransaction(format!("Failed to serialize JSON: {}", e))),
        _ => Ok(format!("{:#?}", data)),
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(d) = cli.difficulty {
        config.set_difficulty(d);
    }
    if cli.format == "json" {
        config.set_output_format("json".to_string());
    }
    Logger::init(config.get_log_level());

    match cli.command {
        Commands::Keygen => {
            let wallet = Wallet::new_random();
            let output = KeygenOutput {
                address: wallet.address().to_string(),
                secret: wallet.secret_hex(),
            };
            println!("{}", format_output(&output, &cli.format)?);
            Ok(())
        }

        Commands::Demo { secret } => {
            let wallet = match secret {
                Some(hex) => Wallet::from_secret_hex(&hex)?,
                None => Wallet::new_random(),
            };
            let output = run_demo(&config, &wallet)?;
            println!("{}", format_output(&output, &cli.format)?);
            Ok(())
        }
    }
}

/// End-to-end walkthrough: mine a reward, move coins around across two
/// more blocks, read back balances, then tamper with committed history and
/// watch validation flip.
fn run_demo(config: &Config, wallet: &Wallet) -> Result<DemoOutput> {
    let mut ledger = Ledger::new(config);

    Logger::info("Starting the miner...");
    ledger.mine_pending_transactions(wallet.address())?;

    let mut tx1 = Transaction::transfer(wallet.address(), "address2", 100);
    tx1.sign(wallet)?;
    ledger.add_transaction(tx1)?;
    ledger.mine_pending_transactions(wallet.address())?;

    let mut tx2 = Transaction::transfer(wallet.address(), "address1", 50);
    tx2.sign(wallet)?;
    ledger.add_transaction(tx2)?;
    ledger.mine_pending_transactions(wallet.address())?;

    let balance = ledger.balance_of(wallet.address());
    let history_len = ledger.transactions_for_wallet(wallet.address()).len();
    let valid_before_tamper = ledger.is_chain_valid();

    // Rewrite committed history: detection is the whole point.
    if let Transaction::Reward { amount, .. } = &mut ledger.chain[1].transactions[0] {
        *amount = 1;
    }
    let valid_after_tamper = ledger.is_chain_valid();

    Ok(DemoOutput {
        address: wallet.address().to_string(),
        chain_length: ledger.chain.len(),
        balance,
        wallet_transactions: history_len,
        valid_before_tamper,
        valid_after_tamper,
    })
}

#[derive(Debug, serde::Serialize)]
struct KeygenOutput {
    address: String,
    secret: String,
}

#[derive(Debug, serde::Serialize)]
struct DemoOutput {
    address: String,
    chain_length: usize,
    balance: i64,
    wallet_transactions: usize,
    valid_before_tamper: bool,
    valid_after_tamper: bool,
}
