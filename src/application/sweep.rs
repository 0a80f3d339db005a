//! Batch sweep over stored resources
//!
//! Applies a fallible operation to every resource matching a filter. A
//! failure on one resource, including a record that cannot be decoded, is
//! logged and counted; the sweep moves on. Only a failure to fetch a page
//! ends the sweep early.

use tracing::{debug, info, warn};

use super::storage_facade::StorageFacade;
use crate::domain::entities::Resource;
use crate::domain::ports::{ModelFilter, StorageResult};

/// Outcome of a completed sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Resources handed to the operation or failing to load
    pub visited: usize,
    /// Resources whose load or operation failed
    pub failed: usize,
    /// Offset to pass to `resume_from` to continue after this sweep
    pub next_offset: usize,
}

impl SweepSummary {
    pub fn succeeded(&self) -> usize {
        self.visited - self.failed
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

pub struct BatchSweep<'a> {
    facade: &'a StorageFacade,
}

impl<'a> BatchSweep<'a> {
    pub fn new(facade: &'a StorageFacade) -> Self {
        Self { facade }
    }

    /// Sweep every resource matching `filter`
    pub fn run<F>(&self, filter: &ModelFilter, op: F) -> StorageResult<SweepSummary>
    where
        F: FnMut(&Resource) -> anyhow::Result<()>,
    {
        self.resume_from(filter, 0, op)
    }

    /// Sweep matches of `filter`, skipping the first `offset`
    pub fn resume_from<F>(
        &self,
        filter: &ModelFilter,
        offset: usize,
        mut op: F,
    ) -> StorageResult<SweepSummary>
    where
        F: FnMut(&Resource) -> anyhow::Result<()>,
    {
        let mut summary = SweepSummary {
            next_offset: offset,
            ..SweepSummary::default()
        };

        loop {
            let page = self.facade.fetch_page(filter, summary.next_offset)?;
            let page_len = page.len();
            debug!(offset = summary.next_offset, records = page_len, "sweep page");

            for entry in page {
                summary.visited += 1;
                summary.next_offset += 1;

                let record = match entry {
                    Ok(record) => record,
                    Err(e) => {
                        summary.failed += 1;
                        warn!(
                            offset = summary.next_offset - 1,
                            error = %e,
                            "unreadable record in sweep, continuing"
                        );
                        continue;
                    }
                };
                let alternate_id = record.alternate_id.clone();
                let outcome = self
                    .facade
                    .hydrate(record)
                    .map_err(anyhow::Error::from)
                    .and_then(|resource| op(&resource));
                if let Err(e) = outcome {
                    summary.failed += 1;
                    warn!(
                        alternate_id = %alternate_id,
                        error = %format_args!("{e:#}"),
                        "sweep operation failed, continuing"
                    );
                }
            }

            if page_len < self.facade.page_size() {
                break;
            }
        }

        info!(
            visited = summary.visited,
            failed = summary.failed,
            "sweep complete"
        );
        Ok(summary)
    }
}
