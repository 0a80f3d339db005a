//! Fixity sweep over every file set

use tracing::info;

use super::storage_facade::StorageFacade;
use super::sweep::{BatchSweep, SweepSummary};
use crate::domain::entities::ResourceKind;
use crate::domain::ports::{FixityCheck, ModelFilter, StorageResult};

/// Run `checker` against every stored file set
///
/// A failing check is logged with the file set's alternate id and does not
/// stop the sweep.
pub fn fixity_check_everything(
    facade: &StorageFacade,
    checker: &dyn FixityCheck,
) -> StorageResult<SweepSummary> {
    info!(backend = facade.backend_name(), "starting fixity sweep");
    BatchSweep::new(facade).run(&ModelFilter::Kind(ResourceKind::FileSet), |file_set| {
        checker.check(file_set)
    })
}
