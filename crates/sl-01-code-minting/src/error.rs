//! Error types for the code minting subsystem

use thiserror::Error;

/// Errors raised by the driven ports (bit-array store, record store, cache)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store call timed out")]
    Timeout,

    /// The authoritative store rejected an insert on its unique index.
    #[error("Duplicate short code: {0}")]
    DuplicateKey(String),

    /// A bit offset beyond what the backend can address. Permanent, not an
    /// outage.
    #[error("Bit offset {offset} out of range (max {max})")]
    OffsetOutOfRange { offset: u64, max: u64 },
}

/// Errors from the membership filter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Bit-array store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for FilterError {
    fn from(err: StoreError) -> Self {
        FilterError::StoreUnavailable(err.to_string())
    }
}

/// Errors from the alphabet codec
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Cannot decode an empty code")]
    Empty,

    #[error("Decoded value does not fit in 64 bits")]
    Overflow,
}

/// Errors from the minting protocol and the shortener service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MintError {
    /// Every attempt collided. Retryable at the request level.
    #[error("Failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    #[error("Authoritative store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Destination URL is required")]
    InvalidUrl,
}

/// Configuration validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid filter parameters: {0}")]
    InvalidFilter(String),

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid minting parameters: {0}")]
    InvalidMinting(String),
}

impl From<StoreError> for MintError {
    fn from(err: StoreError) -> Self {
        MintError::StoreUnavailable(err.to_string())
    }
}

impl From<FilterError> for MintError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::StoreUnavailable(msg) => MintError::StoreUnavailable(msg),
        }
    }
}
