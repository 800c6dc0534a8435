//! Ordered in-memory copy of the roster.

use std::sync::Arc;

use shared::domain::{UserId, UserRecord};
use tracing::warn;

use crate::error::CacheError;

/// Every mutation builds a fresh sequence and swaps it in, so a snapshot taken before a
/// mutation never observes a partial update.
#[derive(Debug, Clone, Default)]
pub struct LocalUserCache {
    records: Arc<Vec<UserRecord>>,
}

impl LocalUserCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole sequence, keeping the first record for any repeated id.
    pub fn replace_all(&mut self, records: Vec<UserRecord>) {
        let mut next: Vec<UserRecord> = Vec::with_capacity(records.len());
        for record in records {
            if next.iter().any(|existing| existing.id == record.id) {
                warn!(user_id = record.id.0, "dropping fetched user with duplicate id");
                continue;
            }
            next.push(record);
        }
        self.records = Arc::new(next);
    }

    pub fn append(&mut self, record: UserRecord) -> Result<(), CacheError> {
        if self.contains(record.id) {
            return Err(CacheError::DuplicateId(record.id));
        }
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.extend(self.records.iter().cloned());
        next.push(record);
        self.records = Arc::new(next);
        Ok(())
    }

    /// Swaps the record stored under `id` for `record`, keeping its position. The stored
    /// record always keeps `id`. Does nothing when no record matches.
    pub fn replace_by_id(&mut self, id: UserId, record: UserRecord) {
        let Some(position) = self.position(id) else {
            return;
        };
        let mut next = self.records.as_ref().clone();
        next[position] = UserRecord { id, ..record };
        self.records = Arc::new(next);
    }

    pub fn remove_by_id(&mut self, id: UserId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let next = self
            .records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        self.records = Arc::new(next);
        true
    }

    pub fn snapshot(&self) -> Arc<Vec<UserRecord>> {
        Arc::clone(&self.records)
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: UserId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
