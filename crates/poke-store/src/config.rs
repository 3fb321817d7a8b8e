//! Store configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Nothing here is hot-reloaded; the config is read once at startup
//! and handed to the store and the listener by value.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default TCP port for the storefront listener.
pub const DEFAULT_PORT: u16 = 7667;

/// Default capacity of each actor mailbox (join/leave/order).
pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;

/// Default capacity of each client's outbound response queue.
pub const DEFAULT_OUTBOX_CAPACITY: usize = 32;

/// Default deadline for getting a submission into the actor mailbox.
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 5_000;

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Bind address (default: 0.0.0.0).
    pub bind_addr: String,

    /// TCP listener port.
    pub port: u16,

    /// Capacity of each of the actor's three inbound mailboxes.
    pub mailbox_capacity: usize,

    /// Capacity of each client's outbound response queue. When a client's
    /// queue is full, further broadcasts to that client are dropped and
    /// counted, never queued unboundedly.
    pub outbox_capacity: usize,

    /// Deadline in milliseconds for join/leave/order submissions.
    pub submit_timeout_ms: u64,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                | Default   |
    /// |-------------------------|-----------|
    /// | `POKE_BIND_ADDR`        | `0.0.0.0` |
    /// | `POKE_PORT`             | `7667`    |
    /// | `POKE_MAILBOX_CAPACITY` | `64`      |
    /// | `POKE_OUTBOX_CAPACITY`  | `32`      |
    /// | `POKE_SUBMIT_TIMEOUT_MS`| `5000`    |
    pub fn load() -> Result<Self, ConfigError> {
        let config = StoreConfig {
            bind_addr: env::var("POKE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: parse_env("POKE_PORT", DEFAULT_PORT)?,

            mailbox_capacity: parse_env("POKE_MAILBOX_CAPACITY", DEFAULT_MAILBOX_CAPACITY)?,

            outbox_capacity: parse_env("POKE_OUTBOX_CAPACITY", DEFAULT_OUTBOX_CAPACITY)?,

            submit_timeout_ms: parse_env("POKE_SUBMIT_TIMEOUT_MS", DEFAULT_SUBMIT_TIMEOUT_MS)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Returns the full bind address, e.g. `0.0.0.0:7667`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// The submission deadline as a Duration.
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    /// Rejects capacities that would make the channels unconstructable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::InvalidValue("POKE_MAILBOX_CAPACITY".into()));
        }
        if self.outbox_capacity == 0 {
            return Err(ConfigError::InvalidValue("POKE_OUTBOX_CAPACITY".into()));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address(), "0.0.0.0:7667");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = StoreConfig {
            mailbox_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_submit_timeout_conversion() {
        let config = StoreConfig {
            submit_timeout_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.submit_timeout(), Duration::from_millis(250));
    }
}
