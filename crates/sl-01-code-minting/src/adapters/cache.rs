//! In-memory TTL cache
//!
//! Entries expire a fixed time after they were written. Expired entries
//! are dropped when read, and swept from the whole map every
//! `SWEEP_INTERVAL` writes. Expiry uses the tokio clock so paused-time
//! tests can advance it.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use crate::error::StoreError;
use crate::ports::UrlCache;

/// Writes between full sweeps of expired entries
pub const SWEEP_INTERVAL: u64 = 64;

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

#[derive(Default)]
pub struct InMemoryUrlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    writes: AtomicU64,
}

impl InMemoryUrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries held, expired ones included
    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Removes all expired entries, returning how many were dropped
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

#[async_trait]
impl UrlCache for InMemoryUrlCache {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_INTERVAL == 0 {
            self.cleanup_expired();
        }
        self.entries.write().insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
