use std::env;

/// Configuration for the coin-ledger CLI tool
///
/// This is a simple, single-process config suitable for the MVP.
/// For multi-node scenarios, consider adding peer addresses and a
/// difficulty-adjustment schedule.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of leading zero hex digits a mined block hash must have
    pub difficulty: usize,

    /// Reward credited to the miner of each block
    pub mining_reward: u64,

    /// Output format: "human" (default) or "json"
    pub output_format: String,

    /// Log level: "info", "debug", "warn", "error" (default: "info")
    pub log_level: String,
}

impl Config {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Config {
            difficulty: 2,
            mining_reward: 100,
            output_format: "human".to_string(),
            log_level: "info".to_string(),
        }
    }

    /// Get the mining difficulty
    pub fn get_difficulty(&self) -> usize {
        self.difficulty
    }

    /// Set mining difficulty
    pub fn set_difficulty(&mut self, difficulty: usize) {
        self.difficulty = difficulty;
    }

    /// Get the block reward
    pub fn get_mining_reward(&self) -> u64 {
        self.mining_reward
    }

    /// Get output format
    pub fn get_output_format(&self) -> &str {
        &self.output_format
    }

    /// Set output format ("human" or "json")
    pub fn set_output_format(&mut self, format: String) {
        self.output_format = format;
    }

    /// Get log level
    pub fn get_log_level(&self) -> &str {
        &self.log_level
    }

    /// Load config from environment variables
    ///
    /// Environment variables:
    /// - `COIN_LEDGER_DIFFICULTY`: leading zero hex digits for mined blocks
    /// - `COIN_LEDGER_MINING_REWARD`: per-block miner reward
    /// - `COIN_LEDGER_OUTPUT_FORMAT`: "human" or "json"
    /// - `COIN_LEDGER_LOG_LEVEL`: log level
    pub fn from_env() -> Self {
        let mut config = Config::new();

        if let Ok(difficulty) = env::var("COIN_LEDGER_DIFFICULTY") {
            if let Ok(d) = difficulty.parse() {
                config.difficulty = d;
            }
        }

        if let Ok(reward) = env::var("COIN_LEDGER_MINING_REWARD") {
            if let Ok(r) = reward.parse() {
                config.mining_reward = r;
            }
        }

        if let Ok(format) = env::var("COIN_LEDGER_OUTPUT_FORMAT") {
            config.output_format = format;
        }

        if let Ok(level) = env::var("COIN_LEDGER_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
