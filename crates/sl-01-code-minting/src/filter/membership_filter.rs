//! Shared Bloom filter over a remote bit array
//!
//! INVARIANTS:
//! - No false negatives: after `add(x)` succeeds, `probably_contains(x)`
//!   returns `Ok(true)` until the next `clear()`.
//! - An unreachable store is reported as an error, never as `Ok(false)`.
//!
//! The filter holds no local state besides its configuration, so any number
//! of instances (in any number of processes) may share one bit array. No
//! client-side locking is done: a concurrent `add` racing a
//! `probably_contains` can only turn a would-be `false` into `true`.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::hash_functions::compute_hash_positions;
use crate::domain::FilterConfig;
use crate::error::FilterError;
use crate::ports::{bounded, BitArrayStore};

/// Default deadline for one bit-array exchange
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

/// Bloom filter whose bits live in a [`BitArrayStore`]
#[derive(Clone)]
pub struct MembershipFilter {
    config: FilterConfig,
    store: Arc<dyn BitArrayStore>,
    timeout: Duration,
}

impl MembershipFilter {
    pub fn new(config: FilterConfig, store: Arc<dyn BitArrayStore>) -> Self {
        Self::with_timeout(config, store, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_timeout(
        config: FilterConfig,
        store: Arc<dyn BitArrayStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            config,
            store,
            timeout,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Bit positions of `item`
    pub fn positions(&self, item: &str) -> Vec<u64> {
        compute_hash_positions(item, self.config.hash_count(), self.config.size_bits())
    }

    /// Record `item` as a member
    ///
    /// All k bits are written in one batched exchange. If the exchange
    /// fails part-way some bits may already be set; that only raises the
    /// false positive rate.
    pub async fn add(&self, item: &str) -> Result<(), FilterError> {
        let positions = self.positions(item);
        bounded(
            self.timeout,
            self.store.set_bits(self.config.bit_array_key(), &positions),
        )
        .await?;
        debug!(item = item, "Added to membership filter");
        Ok(())
    }

    /// `Ok(false)` means `item` was never added. `Ok(true)` is a hint that
    /// must be confirmed against the authoritative store.
    pub async fn probably_contains(&self, item: &str) -> Result<bool, FilterError> {
        let positions = self.positions(item);
        let bits = bounded(
            self.timeout,
            self.store.get_bits(self.config.bit_array_key(), &positions),
        )
        .await?;

        if bits.len() != positions.len() {
            return Err(FilterError::StoreUnavailable(format!(
                "expected {} bits, store returned {}",
                positions.len(),
                bits.len()
            )));
        }
        Ok(bits.into_iter().all(|bit| bit))
    }

    /// Delete the whole bit array
    pub async fn clear(&self) -> Result<(), FilterError> {
        bounded(self.timeout, self.store.delete(self.config.bit_array_key())).await?;
        info!(key = self.config.bit_array_key(), "Membership filter cleared");
        Ok(())
    }

    /// Clear the filter and add every code in `codes`
    ///
    /// Returns the number of codes added.
    pub async fn reseed<I>(&self, codes: I) -> Result<usize, FilterError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.clear().await?;
        let mut added = 0;
        for code in codes {
            self.add(code.as_ref()).await?;
            added += 1;
        }
        info!(
            key = self.config.bit_array_key(),
            added = added,
            "Membership filter reseeded"
        );
        Ok(added)
    }

    /// Expected false positive rate after `items` adds
    pub fn expected_false_positive_rate(&self, items: u64) -> f64 {
        self.config.expected_fpr(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryBitArrayStore;
    use crate::error::StoreError;
    use async_trait::async_trait;

    fn filter_with(
        size_bits: u64,
        hash_count: usize,
    ) -> (MembershipFilter, Arc<InMemoryBitArrayStore>) {
        let store = Arc::new(InMemoryBitArrayStore::new());
        let config = FilterConfig::new("test_bloom", size_bits, hash_count).unwrap();
        (MembershipFilter::new(config, store.clone()), store)
    }

    /// Store that never answers
    struct HangingStore;

    #[async_trait]
    impl BitArrayStore for HangingStore {
        async fn set_bits(&self, _: &str, _: &[u64]) -> Result<(), StoreError> {
            std::future::pending().await
        }
        async fn get_bits(&self, _: &str, _: &[u64]) -> Result<Vec<bool>, StoreError> {
            std::future::pending().await
        }
        async fn delete(&self, _: &str) -> Result<(), StoreError> {
            std::future::pending().await
        }
    }

    /// Store that answers with fewer bits than asked for
    struct ShortReadStore;

    #[async_trait]
    impl BitArrayStore for ShortReadStore {
        async fn set_bits(&self, _: &str, _: &[u64]) -> Result<(), StoreError> {
            Ok(())
        }
        async fn get_bits(&self, _: &str, positions: &[u64]) -> Result<Vec<bool>, StoreError> {
            Ok(vec![true; positions.len().saturating_sub(1)])
        }
        async fn delete(&self, _: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_short_read_is_an_error() {
        let config = FilterConfig::new("short", 1000, 3).unwrap();
        let filter = MembershipFilter::new(config, Arc::new(ShortReadStore));

        match filter.probably_contains("x").await {
            Err(FilterError::StoreUnavailable(msg)) => {
                assert!(msg.contains("expected 3 bits"), "{}", msg)
            }
            other => panic!("Short read accepted: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_sets_at_most_k_bits() {
        let (filter, store) = filter_with(10_000, 7);
        filter.add("aZ3kP9q").await.unwrap();

        let set = store.count_ones("test_bloom");
        assert!(set > 0 && set <= 7, "Expected 1..=7 bits set, got {}", set);

        filter.add("aZ3kP9q").await.unwrap();
        assert_eq!(store.count_ones("test_bloom"), set, "Re-adding is a no-op");
    }

    #[tokio::test]
    async fn test_contains_after_add() {
        let (filter, _) = filter_with(10_000, 7);
        assert!(!filter.probably_contains("aZ3kP9q").await.unwrap());
        filter.add("aZ3kP9q").await.unwrap();
        assert!(filter.probably_contains("aZ3kP9q").await.unwrap());
    }

    #[tokio::test]
    async fn test_instances_share_bit_array() {
        let store = Arc::new(InMemoryBitArrayStore::new());
        let config = FilterConfig::new("shared", 50_000, 5).unwrap();
        let writer = MembershipFilter::new(config.clone(), store.clone());
        let reader = MembershipFilter::new(config, store);

        writer.add("shared_code").await.unwrap();
        assert!(reader.probably_contains("shared_code").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_and_reseed() {
        let (filter, store) = filter_with(10_000, 7);
        filter.add("one").await.unwrap();
        filter.add("two").await.unwrap();

        filter.clear().await.unwrap();
        assert!(!store.exists("test_bloom"));
        assert!(!filter.probably_contains("one").await.unwrap());
        assert!(!filter.probably_contains("two").await.unwrap());

        let added = filter.reseed(["two", "three"]).await.unwrap();
        assert_eq!(added, 2);
        assert!(filter.probably_contains("two").await.unwrap());
        assert!(filter.probably_contains("three").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_store_times_out() {
        let config = FilterConfig::new("hung", 1000, 3).unwrap();
        let filter = MembershipFilter::with_timeout(
            config,
            Arc::new(HangingStore),
            Duration::from_millis(50),
        );

        assert!(matches!(
            filter.probably_contains("x").await,
            Err(FilterError::StoreUnavailable(_))
        ));
        assert!(matches!(
            filter.add("x").await,
            Err(FilterError::StoreUnavailable(_))
        ));
        assert!(filter.clear().await.is_err());
    }
}
