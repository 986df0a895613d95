//! # Node Container
//!
//! Builds the storage adapters, the membership filter, the minter and the
//! shortener service from one `ShortlinkConfig`, and keeps handles to the
//! shared pieces for inspection.

use std::sync::Arc;
use tracing::info;

use sl_01_code_minting::{
    CodeMinter, InMemoryBitArrayStore, InMemoryShortCodeRepository, InMemoryUrlCache,
    MembershipFilter, MintError, MintMetrics, MintMetricsSnapshot, ShortenerService,
    ShortlinkConfig,
};

pub struct ShortlinkNode {
    config: ShortlinkConfig,
    repository: Arc<InMemoryShortCodeRepository>,
    bit_store: Arc<InMemoryBitArrayStore>,
    metrics: Arc<MintMetrics>,
    service: ShortenerService,
}

impl ShortlinkNode {
    /// Wire every component from `config`
    pub fn new(config: ShortlinkConfig) -> Self {
        let bit_store = Arc::new(InMemoryBitArrayStore::new());
        let repository = Arc::new(InMemoryShortCodeRepository::new());
        let cache = Arc::new(InMemoryUrlCache::new());
        let metrics = Arc::new(MintMetrics::new());

        let filter = MembershipFilter::with_timeout(
            config.filter.clone(),
            bit_store.clone(),
            config.store_timeout,
        );
        let minter = CodeMinter::new(filter, repository.clone(), &config.minting)
            .with_store_timeout(config.store_timeout)
            .with_metrics(metrics.clone());
        let service = ShortenerService::new(minter, repository.clone(), cache)
            .with_cache_ttl(config.cache_ttl)
            .with_store_timeout(config.store_timeout);

        info!(
            bit_array_key = config.filter.bit_array_key(),
            size_bits = config.filter.size_bits(),
            hash_count = config.filter.hash_count(),
            code_length = config.minting.code_length,
            max_attempts = config.minting.max_attempts,
            "Shortlink node wired"
        );

        Self {
            config,
            repository,
            bit_store,
            metrics,
            service,
        }
    }

    /// Seed the filter from the records already in the store
    pub async fn start(&self) -> Result<usize, MintError> {
        let seeded = self.service.rebuild_filter().await?;
        info!(codes = seeded, "Membership filter seeded from store");
        Ok(seeded)
    }

    pub fn config(&self) -> &ShortlinkConfig {
        &self.config
    }

    pub fn service(&self) -> &ShortenerService {
        &self.service
    }

    pub fn repository(&self) -> &Arc<InMemoryShortCodeRepository> {
        &self.repository
    }

    /// Bits currently set in the shared filter array
    pub fn filter_bits_set(&self) -> usize {
        self.bit_store.count_ones(self.config.filter.bit_array_key())
    }

    pub fn metrics(&self) -> MintMetricsSnapshot {
        self.metrics.snapshot()
    }
}
