//! In-memory authoritative store
//!
//! Keyed by short code, so the map itself acts as the unique index.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::domain::ShortCodeRecord;
use crate::error::StoreError;
use crate::ports::ShortCodeRepository;

#[derive(Default)]
pub struct InMemoryShortCodeRepository {
    records: RwLock<HashMap<String, ShortCodeRecord>>,
}

impl InMemoryShortCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl ShortCodeRepository for InMemoryShortCodeRepository {
    async fn find_by_code(
        &self,
        short_code: &str,
    ) -> Result<Option<ShortCodeRecord>, StoreError> {
        Ok(self.records.read().get(short_code).cloned())
    }

    async fn insert_unique(&self, record: ShortCodeRecord) -> Result<(), StoreError> {
        match self.records.write().entry(record.short_code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey(record.short_code)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn codes(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.records.read().keys().cloned().collect())
    }
}
