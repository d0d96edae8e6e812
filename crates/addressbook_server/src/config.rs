//! Environment-driven server configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `ADDRESSBOOK_BIND` | `127.0.0.1:8000` |
//! | `ADDRESSBOOK_DB_PATH` | `addressbook.sqlite3` |
//! | `ADDRESSBOOK_POOL_SIZE` | `8` |
//! | `ADDRESSBOOK_LOG_LEVEL` | build-mode default |
//! | `ADDRESSBOOK_LOG_DIR` | unset: log to stderr only |

use addressbook_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const BIND_VAR: &str = "ADDRESSBOOK_BIND";
pub const DB_PATH_VAR: &str = "ADDRESSBOOK_DB_PATH";
pub const POOL_SIZE_VAR: &str = "ADDRESSBOOK_POOL_SIZE";
pub const LOG_LEVEL_VAR: &str = "ADDRESSBOOK_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ADDRESSBOOK_LOG_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:8000";
const DEFAULT_DB_PATH: &str = "addressbook.sqlite3";
const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}=`{}`: {}", self.var, self.value, self.reason)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub pool_size: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through `lookup`; unset and blank values fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let pool_size = match read(POOL_SIZE_VAR) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size >= 1 => size,
                _ => {
                    return Err(ConfigError {
                        var: POOL_SIZE_VAR,
                        value: raw,
                        reason: "expected a positive integer",
                    })
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            bind_addr: read(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            db_path: read(DB_PATH_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from),
            pool_size,
            log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_VAR),
        })
    }
}
