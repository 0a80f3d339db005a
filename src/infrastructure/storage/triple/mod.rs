//! Triple-store storage backend
//!
//! Records are kept as RDF-shaped triples, one named graph per record, with
//! an alternate-id index beside them. Replacing a record swaps its whole
//! graph under the write lock. A catalog of resource graphs (kind and model
//! per id) answers scan filters without decoding graphs.

mod codec;

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::domain::entities::{ResourceKind, StoredRecord};
use crate::domain::ports::{ModelFilter, ScanPage, StorageBackend, StorageError, StorageResult};
use crate::domain::value_objects::Identifier;

pub use codec::{Term, Triple};

#[derive(Debug, Default)]
struct Dataset {
    graphs: BTreeMap<Identifier, Vec<Triple>>,
    alternates: BTreeMap<Identifier, Identifier>,
    catalog: BTreeMap<Identifier, (ResourceKind, String)>,
}

#[derive(Debug, Default)]
pub struct TripleBackend {
    dataset: RwLock<Dataset>,
}

impl TripleBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triples currently stored for `id`
    pub fn graph(&self, id: &Identifier) -> StorageResult<Vec<Triple>> {
        let dataset = self.dataset.read().map_err(|_| poisoned())?;
        Ok(dataset.graphs.get(id).cloned().unwrap_or_default())
    }

    /// Total number of triples across all graphs
    pub fn triple_count(&self) -> StorageResult<usize> {
        let dataset = self.dataset.read().map_err(|_| poisoned())?;
        Ok(dataset.graphs.values().map(Vec::len).sum())
    }
}

fn poisoned() -> StorageError {
    StorageError::Poisoned { backend: "triple" }
}

impl StorageBackend for TripleBackend {
    fn name(&self) -> &'static str {
        "triple"
    }

    fn write(&self, record: StoredRecord) -> StorageResult<()> {
        let id = record.id().cloned().ok_or_else(|| StorageError::Rejected {
            backend: self.name(),
            id: String::new(),
            reason: "record has no identifier".to_string(),
        })?;
        let graph = codec::encode(&id, &record);

        let mut dataset = self.dataset.write().map_err(|_| poisoned())?;
        let stale = dataset
            .graphs
            .get(&id)
            .and_then(|graph| codec::alternate_of(&id, graph))
            .filter(|old| Some(old) != record.alternate_id());
        if let Some(stale) = stale {
            dataset.alternates.remove(&stale);
        }
        if let Some(alternate) = record.alternate_id() {
            dataset.alternates.insert(alternate.clone(), id.clone());
        }
        match record.as_resource() {
            Some(r) => dataset.catalog.insert(id.clone(), (r.kind, r.model.clone())),
            None => dataset.catalog.remove(&id),
        };
        dataset.graphs.insert(id, graph);
        Ok(())
    }

    fn remove(&self, id: &Identifier) -> StorageResult<()> {
        let mut dataset = self.dataset.write().map_err(|_| poisoned())?;
        let alternate = dataset
            .graphs
            .remove(id)
            .and_then(|graph| codec::alternate_of(id, &graph));
        if let Some(alternate) = alternate {
            dataset.alternates.remove(&alternate);
        }
        dataset.catalog.remove(id);
        Ok(())
    }

    fn read(&self, id: &Identifier) -> StorageResult<Option<StoredRecord>> {
        let dataset = self.dataset.read().map_err(|_| poisoned())?;
        dataset
            .graphs
            .get(id)
            .map(|graph| codec::decode(id, graph))
            .transpose()
    }

    fn read_by_alternate(&self, alternate_id: &Identifier) -> StorageResult<Option<StoredRecord>> {
        let dataset = self.dataset.read().map_err(|_| poisoned())?;
        let Some(id) = dataset.alternates.get(alternate_id) else {
            return Ok(None);
        };
        dataset
            .graphs
            .get(id)
            .map(|graph| codec::decode(id, graph))
            .transpose()
    }

    fn scan(
        &self,
        filter: &ModelFilter,
        offset: usize,
        limit: usize,
    ) -> StorageResult<ScanPage> {
        let dataset = self.dataset.read().map_err(|_| poisoned())?;
        Ok(dataset
            .catalog
            .iter()
            .filter(|(_, (kind, model))| filter.matches_entry(*kind, model))
            .skip(offset)
            .take(limit)
            .map(|(id, _)| match dataset.graphs.get(id) {
                Some(graph) => codec::decode(id, graph),
                None => Err(StorageError::Corrupt {
                    location: codec::subject_of(id),
                    message: "catalogued graph is missing".to_string(),
                }),
            })
            .collect())
    }
}
