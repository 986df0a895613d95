//! Runtime configuration from environment variables
//!
//! Built once at startup and handed to the components that need it; there
//! are no process-wide connection singletons.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::config::{
    DEFAULT_BIT_ARRAY_KEY, DEFAULT_CODE_LENGTH, DEFAULT_HASH_COUNT, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_SIZE_BITS,
};
use crate::domain::{Alphabet, FilterConfig, MintingConfig};
use crate::error::ConfigError;
use crate::filter::DEFAULT_STORE_TIMEOUT;
use crate::service::DEFAULT_URL_CACHE_TTL;

/// Complete configuration of a minting node
#[derive(Debug, Clone)]
pub struct ShortlinkConfig {
    pub filter: FilterConfig,
    pub minting: MintingConfig,
    /// Lifetime of `url:<code>` cache entries
    pub cache_ttl: Duration,
    /// Deadline for each call to a backing store
    pub store_timeout: Duration,
    /// Log filter directive (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for ShortlinkConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            minting: MintingConfig::default(),
            cache_ttl: DEFAULT_URL_CACHE_TTL,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

fn parsed<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl ShortlinkConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SL_BLOOM_KEY`: bit array key (default: url_bloom)
    /// - `SL_BLOOM_SIZE_BITS`: filter size m (default: 10000000)
    /// - `SL_BLOOM_HASH_COUNT`: hash functions k (default: 7)
    /// - `SL_ALPHABET`: code alphabet (default: base-62)
    /// - `SL_CODE_LENGTH`: symbols per code (default: 7)
    /// - `SL_MAX_ATTEMPTS`: minting attempts (default: 10)
    /// - `SL_CACHE_TTL_SECS`: URL cache TTL (default: 86400)
    /// - `SL_STORE_TIMEOUT_MS`: per-call store deadline (default: 2000)
    /// - `SL_LOG_LEVEL` or `RUST_LOG`: log level (default: info)
    /// - `SL_JSON_LOGS`: JSON logs (default: false)
    ///
    /// Unparseable numbers fall back to their defaults; the result is
    /// validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let filter = FilterConfig::new(
            env::var("SL_BLOOM_KEY").unwrap_or_else(|_| DEFAULT_BIT_ARRAY_KEY.to_string()),
            parsed("SL_BLOOM_SIZE_BITS", DEFAULT_SIZE_BITS),
            parsed("SL_BLOOM_HASH_COUNT", DEFAULT_HASH_COUNT),
        )?;

        let alphabet = match env::var("SL_ALPHABET") {
            Ok(symbols) => Alphabet::new(&symbols)?,
            Err(_) => Alphabet::base62(),
        };

        let config = Self {
            filter,
            minting: MintingConfig {
                alphabet,
                code_length: parsed("SL_CODE_LENGTH", DEFAULT_CODE_LENGTH),
                max_attempts: parsed("SL_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            },
            cache_ttl: Duration::from_secs(parsed(
                "SL_CACHE_TTL_SECS",
                DEFAULT_URL_CACHE_TTL.as_secs(),
            )),
            store_timeout: Duration::from_millis(parsed(
                "SL_STORE_TIMEOUT_MS",
                DEFAULT_STORE_TIMEOUT.as_millis() as u64,
            )),
            log_level: env::var("SL_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("SL_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filter.validate()?;
        self.minting.validate()?;
        if self.store_timeout.is_zero() {
            return Err(ConfigError::InvalidMinting(
                "store timeout cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}
