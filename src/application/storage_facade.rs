//! Storage Adapter Facade
//!
//! Resource-level persistence over whichever `StorageBackend` is active.
//! Embargoes and leases are written first as records of their own; the
//! resource record then references them by id. Reads put them back.
//!
//! The resource record write is the commit point of a persist. A changed
//! embargo or lease is written under a fresh id, so until that commit the
//! stored resource still references its previous, untouched children.
//! Superseded children are removed after the commit.

use std::collections::VecDeque;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::{Embargo, Lease, Resource, ResourceRecord, StoredRecord};
use crate::domain::ports::{ModelFilter, ScanPage, StorageBackend, StorageError, StorageResult};
use crate::domain::value_objects::Identifier;

pub const DEFAULT_PAGE_SIZE: usize = 100;

pub struct StorageFacade {
    backend: Box<dyn StorageBackend>,
    page_size: usize,
}

impl StorageFacade {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Records fetched per page by `find_all`; at least one
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Persist a resource, assigning internal ids where missing
    ///
    /// A resource whose alternate id is already stored replaces that record
    /// under the same internal id. A failed persist leaves the previously
    /// stored version readable as it was. Same-id concurrent persists are
    /// last write wins.
    pub fn persist(&self, resource: Resource) -> StorageResult<Resource> {
        if resource.alternate_id.is_blank() {
            return Err(StorageError::Rejected {
                backend: self.backend.name(),
                id: resource.id.as_ref().map(ToString::to_string).unwrap_or_default(),
                reason: "resource has no alternate identifier".to_string(),
            });
        }

        let existing = match &resource.id {
            Some(id) => self.backend.read(id)?,
            None => self.backend.read_by_alternate(&resource.alternate_id)?,
        };
        let existing = existing.and_then(|r| match r {
            StoredRecord::Resource(r) => Some(r),
            _ => None,
        });

        let id = resource
            .id
            .clone()
            .or_else(|| existing.as_ref().map(|r| r.id.clone()))
            .unwrap_or_else(new_id);

        let mut resource = resource;
        let mut superseded = Vec::new();
        self.stage_child(
            resource.embargo.as_mut(),
            existing.as_ref().and_then(|r| r.embargo_id.clone()),
            &mut superseded,
        )?;
        self.stage_child(
            resource.lease.as_mut(),
            existing.as_ref().and_then(|r| r.lease_id.clone()),
            &mut superseded,
        )?;

        let (record, embargo, lease) = ResourceRecord::split(resource, id);
        self.backend.write(StoredRecord::Resource(record.clone()))?;
        debug!(
            id = %record.id,
            alternate_id = %record.alternate_id,
            backend = self.backend.name(),
            "persisted resource"
        );

        for old in superseded {
            if let Err(e) = self.backend.remove(&old) {
                warn!(
                    alternate_id = %record.alternate_id,
                    child_id = %old,
                    error = %e,
                    "superseded restriction left in store"
                );
            }
        }
        Ok(record.into_resource(embargo, lease))
    }

    /// Settle the id of an embargo or lease before its owner is written
    ///
    /// Content equal to what is stored under the child's id (or the id the
    /// stored owner references) keeps that id without a write. An id nothing
    /// is stored under yet is used as is. Anything else is written under a
    /// fresh id. `previous` lands in `superseded` when it is no longer used.
    fn stage_child<C: ChildRecord>(
        &self,
        child: Option<&mut C>,
        previous: Option<Identifier>,
        superseded: &mut Vec<Identifier>,
    ) -> StorageResult<()> {
        let Some(child) = child else {
            superseded.extend(previous);
            return Ok(());
        };

        let mut settled = None;
        if let Some(candidate) = child.child_id().cloned().or_else(|| previous.clone()) {
            child.set_child_id(candidate.clone());
            match self.backend.read(&candidate) {
                Ok(Some(stored)) if stored == child.to_stored() => settled = Some(candidate),
                Ok(None) if previous.as_ref() != Some(&candidate) => {
                    self.backend.write(child.to_stored())?;
                    settled = Some(candidate);
                }
                _ => {}
            }
        }
        let id = match settled {
            Some(id) => id,
            None => {
                let id = new_id();
                child.set_child_id(id.clone());
                self.backend.write(child.to_stored())?;
                id
            }
        };

        superseded.extend(previous.filter(|p| *p != id));
        Ok(())
    }

    /// Look up by internal id; `NotFound` when absent
    pub fn find_by_identifier(&self, id: &Identifier) -> StorageResult<Resource> {
        match self.backend.read(id)? {
            Some(StoredRecord::Resource(record)) => self.hydrate(record),
            _ => Err(StorageError::not_found(id)),
        }
    }

    /// Look up by alternate (external) id; `NotFound` when absent
    pub fn find_by_alternate_identifier(&self, alternate_id: &Identifier) -> StorageResult<Resource> {
        match self.backend.read_by_alternate(alternate_id)? {
            Some(StoredRecord::Resource(record)) => self.hydrate(record),
            _ => Err(StorageError::not_found(alternate_id)),
        }
    }

    pub fn find_embargo(&self, id: &Identifier) -> StorageResult<Embargo> {
        match self.backend.read(id)? {
            Some(StoredRecord::Embargo(embargo)) => Ok(embargo),
            _ => Err(StorageError::not_found(id)),
        }
    }

    pub fn find_lease(&self, id: &Identifier) -> StorageResult<Lease> {
        match self.backend.read(id)? {
            Some(StoredRecord::Lease(lease)) => Ok(lease),
            _ => Err(StorageError::not_found(id)),
        }
    }

    /// Lazily page through every resource matching `filter`
    pub fn find_all(&self, filter: ModelFilter) -> ResourceCursor<'_> {
        self.find_all_from(filter, 0)
    }

    /// Like `find_all`, skipping the first `offset` matches
    pub fn find_all_from(&self, filter: ModelFilter, offset: usize) -> ResourceCursor<'_> {
        ResourceCursor {
            facade: self,
            filter,
            offset,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// One page of resource records; unreadable ones are errors in place
    pub(crate) fn fetch_page(
        &self,
        filter: &ModelFilter,
        offset: usize,
    ) -> StorageResult<Vec<StorageResult<ResourceRecord>>> {
        let page: ScanPage = self.backend.scan(filter, offset, self.page_size)?;
        Ok(page
            .into_iter()
            .map(|entry| -> StorageResult<ResourceRecord> {
                match entry? {
                    StoredRecord::Resource(r) => Ok(r),
                    other => Err(StorageError::Corrupt {
                        location: format!(
                            "{}:{}",
                            self.backend.name(),
                            other.id().map(ToString::to_string).unwrap_or_default()
                        ),
                        message: "scan returned a restriction record".to_string(),
                    }),
                }
            })
            .collect())
    }

    /// Reattach the embargo and lease a record references
    pub(crate) fn hydrate(&self, record: ResourceRecord) -> StorageResult<Resource> {
        let embargo = match &record.embargo_id {
            Some(id) => match self.find_embargo(id) {
                Ok(embargo) => Some(embargo),
                Err(e) if e.is_not_found() => {
                    warn!(alternate_id = %record.alternate_id, embargo_id = %id, "dangling embargo reference");
                    None
                }
                Err(e) => return Err(e),
            },
            None => None,
        };
        let lease = match &record.lease_id {
            Some(id) => match self.find_lease(id) {
                Ok(lease) => Some(lease),
                Err(e) if e.is_not_found() => {
                    warn!(alternate_id = %record.alternate_id, lease_id = %id, "dangling lease reference");
                    None
                }
                Err(e) => return Err(e),
            },
            None => None,
        };
        Ok(record.into_resource(embargo, lease))
    }
}

fn new_id() -> Identifier {
    Identifier::new(Uuid::new_v4().to_string())
}

/// Restriction values stored as records of their own
trait ChildRecord {
    fn child_id(&self) -> Option<&Identifier>;
    fn set_child_id(&mut self, id: Identifier);
    fn to_stored(&self) -> StoredRecord;
}

impl ChildRecord for Embargo {
    fn child_id(&self) -> Option<&Identifier> {
        self.id.as_ref()
    }

    fn set_child_id(&mut self, id: Identifier) {
        self.id = Some(id);
    }

    fn to_stored(&self) -> StoredRecord {
        StoredRecord::Embargo(self.clone())
    }
}

impl ChildRecord for Lease {
    fn child_id(&self) -> Option<&Identifier> {
        self.id.as_ref()
    }

    fn set_child_id(&mut self, id: Identifier) {
        self.id = Some(id);
    }

    fn to_stored(&self) -> StoredRecord {
        StoredRecord::Lease(self.clone())
    }
}

/// Lazy, paged iterator over stored resources
///
/// Pages are fetched on demand. `offset` is the number of matches consumed
/// so far; pass it to `find_all_from` to resume. A record that cannot be
/// read is yielded as an error in its place and iteration goes on. A failed
/// page fetch is yielded once and ends the iteration.
pub struct ResourceCursor<'a> {
    facade: &'a StorageFacade,
    filter: ModelFilter,
    offset: usize,
    buffer: VecDeque<StorageResult<ResourceRecord>>,
    exhausted: bool,
}

impl ResourceCursor<'_> {
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for ResourceCursor<'_> {
    type Item = StorageResult<Resource>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            let fetch_from = self.offset;
            match self.facade.fetch_page(&self.filter, fetch_from) {
                Ok(page) => {
                    self.exhausted = page.len() < self.facade.page_size;
                    self.buffer.extend(page);
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }

        let entry = self.buffer.pop_front()?;
        self.offset += 1;
        Some(entry.and_then(|record| self.facade.hydrate(record)))
    }
}
