//! In-memory storage backend
//!
//! Records live in a `BTreeMap` behind an `RwLock`, so scans come back in
//! identifier order and concurrent readers never see a half-applied write.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::domain::entities::StoredRecord;
use crate::domain::ports::{ModelFilter, ScanPage, StorageBackend, StorageError, StorageResult};
use crate::domain::value_objects::Identifier;

#[derive(Debug, Default)]
struct State {
    records: BTreeMap<Identifier, StoredRecord>,
    alternates: BTreeMap<Identifier, Identifier>,
}

/// Process-local backend; contents are lost on drop
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RwLock<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, restriction records included
    pub fn len(&self) -> StorageResult<usize> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.records.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        self.len().map(|n| n == 0)
    }
}

fn poisoned() -> StorageError {
    StorageError::Poisoned { backend: "memory" }
}

impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn write(&self, record: StoredRecord) -> StorageResult<()> {
        let id = record.id().cloned().ok_or_else(|| StorageError::Rejected {
            backend: self.name(),
            id: String::new(),
            reason: "record has no identifier".to_string(),
        })?;

        let mut state = self.state.write().map_err(|_| poisoned())?;
        let stale = state
            .records
            .get(&id)
            .and_then(StoredRecord::alternate_id)
            .filter(|old| Some(*old) != record.alternate_id())
            .cloned();
        if let Some(stale) = stale {
            state.alternates.remove(&stale);
        }
        if let Some(alternate) = record.alternate_id() {
            state.alternates.insert(alternate.clone(), id.clone());
        }
        state.records.insert(id, record);
        Ok(())
    }

    fn remove(&self, id: &Identifier) -> StorageResult<()> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let removed = state.records.remove(id);
        if let Some(alternate) = removed.as_ref().and_then(StoredRecord::alternate_id) {
            state.alternates.remove(alternate);
        }
        Ok(())
    }

    fn read(&self, id: &Identifier) -> StorageResult<Option<StoredRecord>> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.records.get(id).cloned())
    }

    fn read_by_alternate(&self, alternate_id: &Identifier) -> StorageResult<Option<StoredRecord>> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state
            .alternates
            .get(alternate_id)
            .and_then(|id| state.records.get(id))
            .cloned())
    }

    fn scan(
        &self,
        filter: &ModelFilter,
        offset: usize,
        limit: usize,
    ) -> StorageResult<ScanPage> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state
            .records
            .values()
            .filter(|r| filter.matches(r))
            .skip(offset)
            .take(limit)
            .cloned()
            .map(Ok)
            .collect())
    }
}
