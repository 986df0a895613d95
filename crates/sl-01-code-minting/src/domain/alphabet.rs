//! Fixed-radix code alphabet
//!
//! Digit value is the symbol's position in the alphabet. The default
//! alphabet is base-62: digits, then lowercase, then uppercase.

use crate::error::{CodecError, ConfigError};

/// Digits, lowercase, uppercase.
pub const BASE62: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Validated symbol set used for both random codes and numeric encoding
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    /// Reverse lookup: ASCII byte -> digit value
    index: [Option<u8>; 128],
}

impl Alphabet {
    /// Build an alphabet from a string of distinct ASCII symbols
    ///
    /// At least two symbols are required for a positional encoding.
    pub fn new(symbols: &str) -> Result<Self, ConfigError> {
        if !symbols.is_ascii() {
            return Err(ConfigError::InvalidAlphabet(
                "symbols must be ASCII".to_string(),
            ));
        }
        let bytes = symbols.as_bytes();
        if bytes.len() < 2 {
            return Err(ConfigError::InvalidAlphabet(format!(
                "need at least 2 symbols, got {}",
                bytes.len()
            )));
        }

        let mut seen = [false; 128];
        for &b in bytes {
            if std::mem::replace(&mut seen[b as usize], true) {
                return Err(ConfigError::InvalidAlphabet(format!(
                    "duplicate symbol {:?}",
                    b as char
                )));
            }
        }

        Ok(Self::from_ascii(bytes))
    }

    /// The base-62 alphabet
    pub fn base62() -> Self {
        Self::from_ascii(BASE62.as_bytes())
    }

    fn from_ascii(bytes: &[u8]) -> Self {
        let mut index = [None; 128];
        for (value, &b) in bytes.iter().enumerate() {
            index[b as usize] = Some(value as u8);
        }
        Self {
            symbols: bytes.to_vec(),
            index,
        }
    }

    /// Radix of the encoding
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol for a digit value, if in range
    pub fn symbol(&self, value: usize) -> Option<char> {
        self.symbols.get(value).map(|&b| b as char)
    }

    pub fn contains(&self, c: char) -> bool {
        self.value_of(c).is_some()
    }

    fn value_of(&self, c: char) -> Option<u64> {
        if !c.is_ascii() {
            return None;
        }
        self.index[c as usize].map(u64::from)
    }

    /// Number of distinct codes of `length` symbols, saturating at `u128::MAX`
    pub fn space_size(&self, length: usize) -> u128 {
        (0..length).fold(1u128, |acc, _| acc.saturating_mul(self.len() as u128))
    }

    /// Encode a non-negative integer, most significant digit first
    ///
    /// `encode(0)` is the first symbol.
    pub fn encode(&self, mut num: u64) -> String {
        if num == 0 {
            return (self.symbols[0] as char).to_string();
        }
        let base = self.len() as u64;
        let mut digits = Vec::new();
        while num > 0 {
            digits.push(self.symbols[(num % base) as usize]);
            num /= base;
        }
        digits.reverse();
        digits.into_iter().map(char::from).collect()
    }

    /// Decode a code produced by [`encode`](Self::encode)
    pub fn decode(&self, code: &str) -> Result<u64, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Empty);
        }
        let base = self.len() as u64;
        code.chars()
            .enumerate()
            .try_fold(0u64, |acc, (position, symbol)| {
                let digit = self
                    .value_of(symbol)
                    .ok_or(CodecError::InvalidSymbol { symbol, position })?;
                acc.checked_mul(base)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or(CodecError::Overflow)
            })
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::base62()
    }
}
