//! In-memory shared bit array
//!
//! Stands in for a remote bit store (Redis `SETBIT`/`GETBIT`/`DEL`). Bit
//! order matches Redis: position 0 is the most significant bit of byte 0,
//! and arrays grow a byte at a time on the first write past their end.

use async_trait::async_trait;
use bitvec::prelude::*;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::MAX_BIT_OFFSET;
use crate::error::StoreError;
use crate::ports::BitArrayStore;

/// Shared bit arrays keyed by name
///
/// One instance is shared through `Arc` by every filter that names the
/// same key.
#[derive(Default)]
pub struct InMemoryBitArrayStore {
    arrays: RwLock<HashMap<String, BitVec<u8, Msb0>>>,
}

impl InMemoryBitArrayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of set bits under `key` (Redis `BITCOUNT`)
    pub fn count_ones(&self, key: &str) -> usize {
        self.arrays
            .read()
            .get(key)
            .map(|bits| bits.count_ones())
            .unwrap_or(0)
    }

    /// Whether an array exists under `key`
    pub fn exists(&self, key: &str) -> bool {
        self.arrays.read().contains_key(key)
    }

    /// Raw bytes under `key` (Redis `GET`)
    pub fn raw_bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.arrays
            .read()
            .get(key)
            .map(|bits| bits.as_raw_slice().to_vec())
    }
}

fn check_offsets(positions: &[u64]) -> Result<(), StoreError> {
    match positions.iter().find(|&&pos| pos > MAX_BIT_OFFSET) {
        Some(&offset) => Err(StoreError::OffsetOutOfRange {
            offset,
            max: MAX_BIT_OFFSET,
        }),
        None => Ok(()),
    }
}

#[async_trait]
impl BitArrayStore for InMemoryBitArrayStore {
    async fn set_bits(&self, key: &str, positions: &[u64]) -> Result<(), StoreError> {
        check_offsets(positions)?;
        let Some(&max) = positions.iter().max() else {
            return Ok(());
        };

        let mut arrays = self.arrays.write();
        let bits = arrays.entry(key.to_string()).or_default();
        let needed = ((max as usize / 8) + 1) * 8;
        if bits.len() < needed {
            bits.resize(needed, false);
        }
        for &pos in positions {
            bits.set(pos as usize, true);
        }
        Ok(())
    }

    async fn get_bits(&self, key: &str, positions: &[u64]) -> Result<Vec<bool>, StoreError> {
        check_offsets(positions)?;
        let arrays = self.arrays.read();
        let Some(bits) = arrays.get(key) else {
            return Ok(vec![false; positions.len()]);
        };
        Ok(positions
            .iter()
            .map(|&pos| bits.get(pos as usize).map(|b| *b).unwrap_or(false))
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.arrays.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_bits_read_zero() {
        let store = InMemoryBitArrayStore::new();
        assert!(!store.get_bit("bloom", 12345).await.unwrap());
        assert_eq!(
            store.get_bits("bloom", &[0, 1, 2]).await.unwrap(),
            vec![false, false, false]
        );
        assert!(!store.exists("bloom"));
    }

    #[tokio::test]
    async fn test_set_and_get_batched() {
        let store = InMemoryBitArrayStore::new();
        store.set_bits("bloom", &[3, 17, 900]).await.unwrap();

        assert_eq!(
            store.get_bits("bloom", &[3, 4, 17, 900, 5000]).await.unwrap(),
            vec![true, false, true, true, false]
        );
        assert_eq!(store.count_ones("bloom"), 3);
        // Other keys are independent
        assert!(!store.get_bit("other", 3).await.unwrap());
    }

    #[tokio::test]
    async fn test_redis_bit_order() {
        let store = InMemoryBitArrayStore::new();
        store.set_bit("bloom", 0).await.unwrap();
        store.set_bit("bloom", 15).await.unwrap();
        assert_eq!(store.raw_bytes("bloom").unwrap(), vec![0b1000_0000, 0b0000_0001]);
    }

    #[tokio::test]
    async fn test_set_is_idempotent() {
        let store = InMemoryBitArrayStore::new();
        store.set_bit("bloom", 42).await.unwrap();
        store.set_bit("bloom", 42).await.unwrap();
        assert_eq!(store.count_ones("bloom"), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_array() {
        let store = InMemoryBitArrayStore::new();
        store.set_bits("bloom", &[1, 2, 3]).await.unwrap();
        store.delete("bloom").await.unwrap();

        assert!(!store.exists("bloom"));
        assert!(!store.get_bit("bloom", 1).await.unwrap());
        // Deleting a missing key is fine
        store.delete("bloom").await.unwrap();
    }

    #[tokio::test]
    async fn test_offset_out_of_range() {
        let store = InMemoryBitArrayStore::new();
        let result = store.set_bit("bloom", MAX_BIT_OFFSET + 1).await;
        assert_eq!(
            result,
            Err(StoreError::OffsetOutOfRange {
                offset: MAX_BIT_OFFSET + 1,
                max: MAX_BIT_OFFSET,
            })
        );
        assert!(!store.exists("bloom"));
    }
}
