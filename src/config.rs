//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export STORE_PATH="/var/lib/named-links/db.json"
//! export LISTEN="0.0.0.0:8000"
//! ```
//!
//! ## Optional Variables
//!
//! - `STORE_PATH` - Location of the entry collection file (default: `db.json`)
//! - `STORE_LOCK_TIMEOUT_MS` - Max wait for the store lock (default: 5000, range 1..=60000)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORE_PATH: &str = "db.json";
const DEFAULT_LISTEN: &str = "0.0.0.0:8000";
const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5_000;
const MAX_LOCK_TIMEOUT_MS: u64 = 60_000;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    /// Upper bound on waiting for the store lock; expiry is reported as 503.
    pub store_lock_timeout_ms: u64,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables, applying defaults.
    pub fn from_env() -> Self {
        let store_path = env::var("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH));

        let store_lock_timeout_ms = env::var("STORE_LOCK_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LOCK_TIMEOUT_MS);

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Self {
            store_path,
            store_lock_timeout_ms,
            listen_addr,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `store_path` is empty
    /// - `store_lock_timeout_ms` is outside `1..=60000`
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not in `host:port` form
    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            anyhow::bail!("STORE_PATH must not be empty");
        }

        if self.store_lock_timeout_ms == 0 || self.store_lock_timeout_ms > MAX_LOCK_TIMEOUT_MS {
            anyhow::bail!(
                "STORE_LOCK_TIMEOUT_MS must be between 1 and {}, got {}",
                MAX_LOCK_TIMEOUT_MS,
                self.store_lock_timeout_ms
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        Ok(())
    }

    pub fn store_lock_timeout(&self) -> Duration {
        Duration::from_millis(self.store_lock_timeout_ms)
    }

    /// Logs the effective configuration.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Store: {}", self.store_path.display());
        tracing::info!("  Store lock timeout: {}ms", self.store_lock_timeout_ms);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// Expects `.env` to be loaded already (`dotenvy::dotenv()` in `main.rs`).
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            store_path: PathBuf::from("db.json"),
            store_lock_timeout_ms: 5_000,
            listen_addr: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.store_lock_timeout_ms = 0;
        assert!(config.validate().is_err());

        config.store_lock_timeout_ms = 60_001;
        assert!(config.validate().is_err());

        config.store_lock_timeout_ms = 5_000;

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "127.0.0.1:8000".to_string();
        config.store_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_lock_timeout_duration() {
        let config = valid_config();
        assert_eq!(config.store_lock_timeout(), Duration::from_millis(5_000));
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("STORE_PATH");
            env::remove_var("STORE_LOCK_TIMEOUT_MS");
            env::remove_var("LISTEN");
            env::remove_var("LOG_FORMAT");
        }

        let config = Config::from_env();

        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(config.store_lock_timeout_ms, DEFAULT_LOCK_TIMEOUT_MS);
        assert_eq!(config.listen_addr, DEFAULT_LISTEN);
        assert_eq!(config.log_format, "text");
    }

    #[test]
    #[serial]
    fn test_values_from_env() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("STORE_PATH", "/tmp/links/db.json");
            env::set_var("STORE_LOCK_TIMEOUT_MS", "250");
            env::set_var("LISTEN", "127.0.0.1:9000");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.store_path, PathBuf::from("/tmp/links/db.json"));
        assert_eq!(config.store_lock_timeout_ms, 250);
        assert_eq!(config.listen_addr, "127.0.0.1:9000");

        // Cleanup
        unsafe {
            env::remove_var("STORE_PATH");
            env::remove_var("STORE_LOCK_TIMEOUT_MS");
            env::remove_var("LISTEN");
        }
    }

    #[test]
    #[serial]
    fn test_unparsable_timeout_falls_back_to_default() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("STORE_LOCK_TIMEOUT_MS", "soon");
        }

        let config = Config::from_env();
        assert_eq!(config.store_lock_timeout_ms, DEFAULT_LOCK_TIMEOUT_MS);

        unsafe {
            env::remove_var("STORE_LOCK_TIMEOUT_MS");
        }
    }
}
