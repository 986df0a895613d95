//! Inbound Ports (Driving Ports)
//!
//! The API request-handling code uses to obtain short codes.

use async_trait::async_trait;

use crate::domain::ShortCodeRecord;
use crate::error::MintError;

/// Outcome of a successful mint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintedCode {
    /// The record as inserted into the authoritative store
    pub record: ShortCodeRecord,
    /// Attempts used, including the accepted one
    pub attempts: u32,
}

impl MintedCode {
    pub fn short_code(&self) -> &str {
        &self.record.short_code
    }
}

/// Code minting API (Driving Port)
#[async_trait]
pub trait CodeMintingApi: Send + Sync {
    /// Mint a code that no other record holds and store it for
    /// `destination_url`
    ///
    /// Fails with `MintError::GenerationExhausted` when every attempt
    /// collided; callers should surface that as a retryable failure.
    async fn mint_unique_code(
        &self,
        destination_url: &str,
        origin_identifier: &str,
    ) -> Result<MintedCode, MintError>;
}
