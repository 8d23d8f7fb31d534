//! Simple leveled logger for coin-ledger. Debug lines are gated so mining
//! progress can be silenced without touching call sites.

use std::sync::atomic::{AtomicU8, Ordering};

const LEVEL_DEBUG: u8 = 0;
const LEVEL_INFO: u8 = 1;
const LEVEL_WARN: u8 = 2;
const LEVEL_ERROR: u8 = 3;

static MIN_LEVEL: AtomicU8 = AtomicU8::new(LEVEL_INFO);

pub struct Logger;

impl Logger {
    /// Set the minimum level from a config string; unknown values keep "info".
    pub fn init(level: &str) {
        let min = match level {
            "debug" => LEVEL_DEBUG,
            "warn" => LEVEL_WARN,
            "error" => LEVEL_ERROR,
            _ => LEVEL_INFO,
        };
        MIN_LEVEL.store(min, Ordering::Relaxed);
    }

    pub fn info(msg: &str) {
        if MIN_LEVEL.load(Ordering::Relaxed) <= LEVEL_INFO {
            println!("[INFO] {}", msg);
        }
    }

    pub fn debug(msg: &str) {
        if MIN_LEVEL.load(Ordering::Relaxed) <= LEVEL_DEBUG {
            println!("[DEBUG] {}", msg);
        }
    }

    pub fn warn(msg: &str) {
        if MIN_LEVEL.load(Ordering::Relaxed) <= LEVEL_WARN {
            eprintln!("[WARN] {}", msg);
        }
    }

    pub fn error(msg: &str) {
        if MIN_LEVEL.load(Ordering::Relaxed) <= LEVEL_ERROR {
            eprintln!("[ERROR] {}", msg);
        }
    }
}
