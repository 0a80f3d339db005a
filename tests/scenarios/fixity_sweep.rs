//! Scenario: Nightly fixity sweep
//!
//! Journey: A preservation job checks every file set in the repository.
//!
//! Steps:
//! 1. File sets and works are migrated onto a disk store
//! 2. The fixity sweep runs; one file set fails its check
//!
//! Success Criteria:
//! - Every file set is checked, works are not
//! - The failure is counted and the sweep still completes

use std::sync::Mutex;

use anyhow::{bail, Result};
use strata::{fixity_check_everything, BackendKind, FixityCheck, ModelFilter, Resource, Runtime, StrataConfig};

use crate::common::*;

struct Checker {
    seen: Mutex<Vec<String>>,
}

impl FixityCheck for Checker {
    fn check(&self, file_set: &Resource) -> Result<()> {
        let id = file_set.alternate_id.to_string();
        self.seen.lock().unwrap().push(id.clone());
        if id == "fs-2" {
            bail!("checksum mismatch for {id}-original");
        }
        Ok(())
    }
}

fn disk_runtime(dir: &std::path::Path) -> Runtime {
    let mut config = StrataConfig::default();
    config.storage.backend = BackendKind::Disk;
    config.storage.path = Some(dir.to_path_buf());
    config.storage.page_size = 2;
    Runtime::from_config(&config).unwrap()
}

/// SCENARIO: a failing file set does not stop the sweep
#[test]
fn scenario_sweep_survives_partial_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = disk_runtime(dir.path());
    let migration = runtime.migration();
    for i in 1..=5 {
        migration.migrate(&file_set(&format!("fs-{i}"))).unwrap();
    }
    migration.migrate(&child_work("cw1")).unwrap();

    let checker = Checker {
        seen: Mutex::new(Vec::new()),
    };
    let summary = fixity_check_everything(runtime.facade(), &checker).unwrap();

    let mut seen = checker.seen.into_inner().unwrap();
    seen.sort();
    assert_eq!(seen, ["fs-1", "fs-2", "fs-3", "fs-4", "fs-5"]);
    assert_eq!(summary.visited, 5);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded(), 4);
}

/// SCENARIO: an interrupted sweep resumes where it stopped
#[test]
fn scenario_sweep_resumes_from_offset() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = disk_runtime(dir.path());
    for i in 1..=4 {
        runtime.migration().migrate(&child_work(&format!("cw{i}"))).unwrap();
    }

    let mut first_pass = Vec::new();
    let mut cursor = runtime.facade().find_all(ModelFilter::All);
    for resource in cursor.by_ref().take(2) {
        first_pass.push(resource.unwrap().alternate_id.to_string());
    }

    let mut second_pass = Vec::new();
    let summary = runtime
        .sweep()
        .resume_from(&ModelFilter::All, cursor.offset(), |r| {
            second_pass.push(r.alternate_id.to_string());
            Ok(())
        })
        .unwrap();

    let mut all: Vec<_> = first_pass.into_iter().chain(second_pass).collect();
    all.sort();
    assert_eq!(all, ["cw1", "cw2", "cw3", "cw4"]);
    assert_eq!(summary.next_offset, 4);
}
