//! Environment-driven configuration.
//!
//! All settings have defaults suitable for local development:
//!
//! - `HOOK_LEDGER_BIND` - socket address to listen on (default `0.0.0.0:3000`)
//! - `HOOK_LEDGER_STORE` - path to the event log file (default `events.log`)

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address could not be parsed as `host:port`.
    #[error("invalid bind address {addr:?}: {source}")]
    InvalidBindAddr {
        addr: String,
        source: std::net::AddrParseError,
    },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Path to the append-only event log file.
    pub store_path: PathBuf,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Config, ConfigError> {
        let addr = std::env::var("HOOK_LEDGER_BIND").unwrap_or_else(|_| "0.0.0.0:3000".into());
        let bind_addr = addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { addr, source })?;

        let store_path = std::env::var("HOOK_LEDGER_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("events.log"));

        Ok(Config {
            bind_addr,
            store_path,
        })
    }
}
