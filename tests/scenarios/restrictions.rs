//! Scenario: Find restricted assets
//!
//! Journey: A repository manager lists works whose embargoes or leases need
//! attention.
//!
//! Steps:
//! 1. Works are migrated with embargoes released two days ago, releasing in
//!    two days, and already lifted
//! 2. The manager queries each restriction class
//!
//! Success Criteria:
//! - Two days ago: expired and still active
//! - Two days ahead: under embargo, not expired
//! - History only: deactivated, nothing else

use chrono::{Duration, Utc};
use strata::domain::entities::LegacyRestriction;
use strata::{LegacyRecord, Resource, Runtime};

fn work(id: &str) -> LegacyRecord {
    LegacyRecord::new("GenericWork")
        .with_id(id)
        .with_value("title", format!("Work {id}"))
}

fn ids(resources: Vec<Resource>) -> Vec<String> {
    let mut ids: Vec<_> = resources.into_iter().map(|r| r.alternate_id.to_string()).collect();
    ids.sort();
    ids
}

/// SCENARIO: embargo classification
#[test]
fn scenario_embargo_classes() {
    let now = Utc::now();
    let runtime = Runtime::in_memory();
    let migration = runtime.migration();

    migration
        .migrate(&work("past").with_embargo(
            LegacyRestriction::until(now - Duration::days(2)).visibilities("restricted", "open"),
        ))
        .unwrap();
    migration
        .migrate(&work("future").with_embargo(LegacyRestriction::until(now + Duration::days(2))))
        .unwrap();
    migration
        .migrate(&work("lifted").with_embargo(
            LegacyRestriction::default().deactivated("An active embargo was deactivated"),
        ))
        .unwrap();
    migration.migrate(&work("open")).unwrap();

    let service = runtime.restrictions();
    assert_eq!(ids(service.assets_with_expired_embargoes_at(now).unwrap()), ["past"]);
    assert_eq!(
        ids(service.assets_under_embargo_at(now).unwrap()),
        ["future", "past"]
    );
    assert_eq!(
        ids(service.assets_with_deactivated_embargoes_at(now).unwrap()),
        ["lifted"]
    );
}

/// SCENARIO: lease classification
#[test]
fn scenario_lease_classes() {
    let now = Utc::now();
    let runtime = Runtime::in_memory();
    let migration = runtime.migration();

    migration
        .migrate(&work("lapsed").with_lease(LegacyRestriction::until(now - Duration::days(2))))
        .unwrap();
    migration
        .migrate(&work("running").with_lease(LegacyRestriction::until(now + Duration::days(2))))
        .unwrap();
    migration
        .migrate(&work("ended").with_lease(LegacyRestriction::default().deactivated("lease ended")))
        .unwrap();

    let service = runtime.restrictions();
    assert_eq!(ids(service.assets_with_expired_leases_at(now).unwrap()), ["lapsed"]);
    assert_eq!(
        ids(service.assets_under_lease_at(now).unwrap()),
        ["lapsed", "running"]
    );
    assert_eq!(ids(service.assets_with_deactivated_leases_at(now).unwrap()), ["ended"]);
}

/// SCENARIO: restriction ids are assigned on save and reused on rerun
#[test]
fn scenario_restriction_ids_are_stable() {
    let runtime = Runtime::in_memory();
    let migration = runtime.migration();
    let object = work("w").with_embargo(LegacyRestriction::until(Utc::now()));

    let first = migration.migrate(&object).unwrap().resource;
    let second = migration.migrate(&object).unwrap().resource;

    let first_id = first.embargo.and_then(|e| e.id);
    assert!(first_id.is_some());
    assert_eq!(first_id, second.embargo.and_then(|e| e.id));
}
