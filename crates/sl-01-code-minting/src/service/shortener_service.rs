//! Shortener Service
//!
//! Orchestrates minting, the cache-aside lookup path and filter rebuilds
//! over the injected collaborators. Request parsing and HTTP shapes live in
//! the caller.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::code_minter::CodeMinter;
use crate::domain::url_cache_key;
use crate::error::MintError;
use crate::filter::DEFAULT_STORE_TIMEOUT;
use crate::ports::{bounded, MintedCode, ShortCodeRepository, UrlCache};

/// Default lifetime of `url:<code>` cache entries
pub const DEFAULT_URL_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub struct ShortenerService {
    minter: CodeMinter,
    repository: Arc<dyn ShortCodeRepository>,
    cache: Arc<dyn UrlCache>,
    cache_ttl: Duration,
    store_timeout: Duration,
}

impl ShortenerService {
    pub fn new(
        minter: CodeMinter,
        repository: Arc<dyn ShortCodeRepository>,
        cache: Arc<dyn UrlCache>,
    ) -> Self {
        Self {
            minter,
            repository,
            cache,
            cache_ttl: DEFAULT_URL_CACHE_TTL,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn minter(&self) -> &CodeMinter {
        &self.minter
    }

    /// Mint a code for `destination_url` and warm the cache with it
    pub async fn shorten(
        &self,
        destination_url: &str,
        origin_identifier: &str,
    ) -> Result<MintedCode, MintError> {
        let destination_url = destination_url.trim();
        if destination_url.is_empty() {
            return Err(MintError::InvalidUrl);
        }

        let minted = self
            .minter
            .mint_unique_code(destination_url, origin_identifier)
            .await?;
        self.cache_url(minted.short_code(), destination_url).await;

        info!(
            short_code = minted.short_code(),
            attempts = minted.attempts,
            origin = origin_identifier,
            "Short URL created"
        );
        Ok(minted)
    }

    /// Destination of `short_code`, or `None` if no record exists
    ///
    /// Reads the cache first and falls back to the authoritative store on a
    /// miss or a cache error, refilling the cache on the way out.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>, MintError> {
        let key = url_cache_key(short_code);
        match bounded(self.store_timeout, self.cache.get(&key)).await {
            Ok(Some(url)) => {
                debug!(short_code = short_code, "Cache hit");
                return Ok(Some(url));
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache unavailable, reading store"),
        }

        let record = bounded(self.store_timeout, self.repository.find_by_code(short_code)).await?;
        match record {
            Some(record) => {
                self.cache_url(short_code, &record.destination_url).await;
                Ok(Some(record.destination_url))
            }
            None => Ok(None),
        }
    }

    /// Rebuild the filter from every code in the authoritative store
    pub async fn rebuild_filter(&self) -> Result<usize, MintError> {
        let codes = bounded(self.store_timeout, self.repository.codes()).await?;
        let added = self.minter.filter().reseed(codes).await?;
        Ok(added)
    }

    async fn cache_url(&self, short_code: &str, destination_url: &str) {
        let key = url_cache_key(short_code);
        if let Err(e) = bounded(
            self.store_timeout,
            self.cache.set(&key, destination_url, self.cache_ttl),
        )
        .await
        {
            warn!(error = %e, short_code = short_code, "Failed to cache short URL");
        }
    }
}
