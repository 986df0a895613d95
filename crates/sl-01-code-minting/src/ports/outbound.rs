//! Outbound Ports (Driven Ports)
//!
//! Backends the minting subsystem depends on. Each one is remote and
//! shared by every minting caller; none of them is locked client-side.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::domain::ShortCodeRecord;
use crate::error::StoreError;

/// Shared bit-addressable storage (Driven Port)
///
/// Bits that were never set read as 0. The array for a key is created on
/// the first set and removed by `delete`. Batched calls are one exchange
/// with the backend and are not transactional across positions.
#[async_trait]
pub trait BitArrayStore: Send + Sync {
    /// Set every position to 1 in a single round trip
    async fn set_bits(&self, key: &str, positions: &[u64]) -> Result<(), StoreError>;

    /// Read every position in a single round trip
    async fn get_bits(&self, key: &str, positions: &[u64]) -> Result<Vec<bool>, StoreError>;

    /// Remove the whole array
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    async fn set_bit(&self, key: &str, position: u64) -> Result<(), StoreError> {
        self.set_bits(key, &[position]).await
    }

    async fn get_bit(&self, key: &str, position: u64) -> Result<bool, StoreError> {
        let bits = self.get_bits(key, &[position]).await?;
        Ok(bits.first().copied().unwrap_or(false))
    }
}

/// Authoritative short-code store (Driven Port)
///
/// Must enforce uniqueness of `short_code` on its side; the minting
/// protocol relies on `insert_unique` as its only linearization point.
#[async_trait]
pub trait ShortCodeRepository: Send + Sync {
    async fn find_by_code(&self, short_code: &str)
        -> Result<Option<ShortCodeRecord>, StoreError>;

    /// Insert a new record, failing with `StoreError::DuplicateKey` if the
    /// code is already taken
    async fn insert_unique(&self, record: ShortCodeRecord) -> Result<(), StoreError>;

    /// Every stored code, used to rebuild the filter
    async fn codes(&self) -> Result<Vec<String>, StoreError>;
}

/// Key/value cache with TTL (Driven Port)
///
/// Pure acceleration: a miss never means the key does not exist.
#[async_trait]
pub trait UrlCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;
}

/// Run a backend call under a deadline; an elapsed deadline is
/// `StoreError::Timeout`
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout)?
}
