//! Scenario: Migrate a work hierarchy
//!
//! Journey: An operator migrates a parent work and its two ordered children.
//!
//! Steps:
//! 1. Children are migrated first, then the parent
//! 2. The parent references its children in their legacy order
//! 3. The migration is re-run against the same store
//!
//! Success Criteria:
//! - Member order is preserved
//! - Absent single links stay absent
//! - Re-running does not duplicate resources or change ids

use strata::{Identifier, ModelFilter, Runtime, StrataError};

use crate::common::*;

/// SCENARIO: pw -> [cw1, cw2]
#[test]
fn scenario_parent_work_keeps_child_order() {
    let runtime = Runtime::in_memory();
    let migration = runtime.migration();

    for id in ["cw1", "cw2"] {
        migration.migrate(&child_work(id)).unwrap();
    }
    let migrated = migration.migrate(&parent_work()).unwrap();

    assert!(migrated.warnings.is_empty());
    let pw = runtime
        .facade()
        .find_by_alternate_identifier(&Identifier::new("pw"))
        .unwrap();
    assert_eq!(pw.member_ids, [Identifier::new("cw1"), Identifier::new("cw2")]);
    assert!(pw.members_ordered);
    assert_eq!(pw.title(), Some("Parent work"));

    for child in &pw.member_ids {
        let resource = runtime.facade().find_by_alternate_identifier(child).unwrap();
        assert!(resource.is_persisted());
    }
}

/// SCENARIO: a work without a thumbnail has no thumbnail id
#[test]
fn scenario_absent_thumbnail_stays_absent() {
    let runtime = Runtime::in_memory();
    let migrated = runtime.migration().migrate(&parent_work()).unwrap();

    assert_eq!(migrated.resource.thumbnail_id, None);
    assert_eq!(migrated.resource.representative_id, None);
    let stored = runtime
        .facade()
        .find_by_identifier(migrated.resource.id.as_ref().unwrap())
        .unwrap();
    assert_eq!(stored.thumbnail_id, None);
}

/// SCENARIO: re-running a migration updates in place
#[test]
fn scenario_rerun_is_idempotent() {
    let runtime = Runtime::in_memory();
    let migration = runtime.migration();

    let first = migration.migrate(&parent_work()).unwrap();
    let second = migration.migrate(&parent_work()).unwrap();

    assert_eq!(first.resource, second.resource);
    assert_eq!(runtime.facade().find_all(ModelFilter::All).count(), 1);
}

/// SCENARIO: an object without an identifier gets one minted identifier
#[test]
fn scenario_unsaved_object_is_minted_once() {
    let runtime = Runtime::in_memory();
    let object = strata::LegacyRecord::new("GenericWork").with_value("title", "Fresh");

    let migrated = runtime.migration().migrate(&object).unwrap();
    let minted = migrated.resource.alternate_id.clone();

    let stored = runtime.facade().find_by_alternate_identifier(&minted).unwrap();
    assert_eq!(stored.id, migrated.resource.id);
    assert_ne!(minted.as_str(), "");
}

/// SCENARIO: a work missing its required title is refused
#[test]
fn scenario_invalid_work_is_not_saved() {
    let runtime = Runtime::in_memory();
    let object = strata::LegacyRecord::new("GenericWork").with_id("untitled");

    let err = runtime.migration().migrate(&object).unwrap_err();
    assert!(matches!(err, StrataError::Save(_)));
    assert!(runtime
        .facade()
        .find_by_alternate_identifier(&Identifier::new("untitled"))
        .unwrap_err()
        .is_not_found());
}

/// SCENARIO: an unregistered legacy model is reported
#[test]
fn scenario_unregistered_model_is_reported() {
    let runtime = Runtime::in_memory();
    let object = strata::LegacyRecord::new("Scroll").with_id("s1");

    let err = runtime.migration().migrate(&object).unwrap_err();
    assert_eq!(
        err.to_string(),
        "no schema descriptor registered for model 'Scroll'"
    );
}
