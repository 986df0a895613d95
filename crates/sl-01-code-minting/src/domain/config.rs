//! Filter and minting configuration with validation
//!
//! # Example
//!
//! ```ignore
//! use sl_01_code_minting::domain::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .bit_array_key("url_bloom")
//!     .size_bits(10_000_000)
//!     .hash_count(7)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use super::alphabet::Alphabet;
use super::parameters::{calculate_fpr, calculate_optimal_parameters};
use crate::error::ConfigError;

/// Default key of the shared bit array
pub const DEFAULT_BIT_ARRAY_KEY: &str = "url_bloom";
/// Default filter size (m)
pub const DEFAULT_SIZE_BITS: u64 = 10_000_000;
/// Default number of hash functions (k)
pub const DEFAULT_HASH_COUNT: usize = 7;
/// Default length of a minted code
pub const DEFAULT_CODE_LENGTH: usize = 7;
/// Default bound on minting attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Largest addressable bit offset of a bit array (512 MiB, as in Redis)
pub const MAX_BIT_OFFSET: u64 = (1 << 32) - 1;
/// Largest filter size whose positions all stay addressable
pub const MAX_SIZE_BITS: u64 = MAX_BIT_OFFSET + 1;

/// Shared Bloom filter configuration
///
/// Fixed for the lifetime of a filter. Changing `size_bits` or
/// `hash_count` without clearing the bit array invalidates every
/// membership recorded so far. Deserialized values are validated like
/// [`FilterConfig::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFilterConfig")]
pub struct FilterConfig {
    bit_array_key: String,
    size_bits: u64,
    hash_count: usize,
}

#[derive(Deserialize)]
struct RawFilterConfig {
    bit_array_key: String,
    size_bits: u64,
    hash_count: usize,
}

impl TryFrom<RawFilterConfig> for FilterConfig {
    type Error = ConfigError;

    fn try_from(raw: RawFilterConfig) -> Result<Self, Self::Error> {
        FilterConfig::new(raw.bit_array_key, raw.size_bits, raw.hash_count)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            bit_array_key: DEFAULT_BIT_ARRAY_KEY.to_string(),
            size_bits: DEFAULT_SIZE_BITS,
            hash_count: DEFAULT_HASH_COUNT,
        }
    }
}

impl FilterConfig {
    /// Create a validated configuration
    pub fn new(
        bit_array_key: impl Into<String>,
        size_bits: u64,
        hash_count: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            bit_array_key: bit_array_key.into(),
            size_bits,
            hash_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Size a filter for `expected_items` codes at `target_fpr`
    pub fn for_capacity(
        bit_array_key: impl Into<String>,
        expected_items: u64,
        target_fpr: f64,
    ) -> Result<Self, ConfigError> {
        if !(target_fpr > 0.0 && target_fpr < 1.0) {
            return Err(ConfigError::InvalidFilter(format!(
                "target_fpr must be in (0, 1), got {}",
                target_fpr
            )));
        }
        let params = calculate_optimal_parameters(expected_items, target_fpr);
        Self::new(bit_array_key, params.size_bits, params.hash_count)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bit_array_key.is_empty() {
            return Err(ConfigError::InvalidFilter(
                "bit_array_key cannot be empty".to_string(),
            ));
        }
        if self.size_bits == 0 {
            return Err(ConfigError::InvalidFilter(
                "size_bits cannot be 0".to_string(),
            ));
        }
        if self.size_bits > MAX_SIZE_BITS {
            return Err(ConfigError::InvalidFilter(format!(
                "size_bits {} exceeds the addressable maximum {}",
                self.size_bits, MAX_SIZE_BITS
            )));
        }
        if self.hash_count == 0 {
            return Err(ConfigError::InvalidFilter(
                "hash_count cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bit_array_key(&self) -> &str {
        &self.bit_array_key
    }

    /// Filter size in bits (m)
    pub fn size_bits(&self) -> u64 {
        self.size_bits
    }

    /// Number of hash functions (k)
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Expected false positive rate after `items` adds
    pub fn expected_fpr(&self, items: u64) -> f64 {
        calculate_fpr(self.size_bits, items, self.hash_count)
    }
}

/// Builder for [`FilterConfig`]
#[derive(Default)]
pub struct FilterConfigBuilder {
    bit_array_key: Option<String>,
    size_bits: Option<u64>,
    hash_count: Option<usize>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_array_key(mut self, key: impl Into<String>) -> Self {
        self.bit_array_key = Some(key.into());
        self
    }

    pub fn size_bits(mut self, bits: u64) -> Self {
        self.size_bits = Some(bits);
        self
    }

    pub fn hash_count(mut self, k: usize) -> Self {
        self.hash_count = Some(k);
        self
    }

    /// Build the configuration, filling unset fields from the defaults
    pub fn build(self) -> Result<FilterConfig, ConfigError> {
        let defaults = FilterConfig::default();
        FilterConfig::new(
            self.bit_array_key.unwrap_or(defaults.bit_array_key),
            self.size_bits.unwrap_or(defaults.size_bits),
            self.hash_count.unwrap_or(defaults.hash_count),
        )
    }
}

/// Candidate generation and retry policy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintingConfig {
    /// Symbols candidates are drawn from
    pub alphabet: Alphabet,
    /// Symbols per candidate (L)
    pub code_length: usize,
    /// Attempts before giving up with `GenerationExhausted`
    pub max_attempts: u32,
}

impl Default for MintingConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::base62(),
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl MintingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 {
            return Err(ConfigError::InvalidMinting(
                "code_length cannot be 0".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidMinting(
                "max_attempts cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of distinct candidates (`alphabet_size ^ code_length`)
    pub fn space_size(&self) -> u128 {
        self.alphabet.space_size(self.code_length)
    }
}
