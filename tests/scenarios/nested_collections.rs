//! Scenario: Nest user collections
//!
//! Journey: A curator looks for collections they can nest under theirs.
//!
//! Success Criteria:
//! - Only collections of the same nestable type are offered
//! - The parent is never offered as its own child
//! - Without edit access on the parent nothing is offered

use strata::domain::ports::Access;
use strata::{AccessPolicy, Identifier, Resource, Runtime};

use crate::common::*;

struct AllowEverything;

impl AccessPolicy for AllowEverything {
    fn can(&self, _: Access, _: &Resource) -> bool {
        true
    }
}

struct ReadOnly;

impl AccessPolicy for ReadOnly {
    fn can(&self, access: Access, _: &Resource) -> bool {
        access == Access::Read
    }
}

fn alternates(resources: &[Resource]) -> Vec<String> {
    let mut ids: Vec<_> = resources.iter().map(|r| r.alternate_id.to_string()).collect();
    ids.sort();
    ids
}

fn seeded() -> Runtime {
    let runtime = Runtime::in_memory();
    let migration = runtime.migration();
    for (id, type_gid) in [
        ("mine", "user_collection"),
        ("theirs", "user_collection"),
        ("shared", "user_collection"),
        ("exhibit", "exhibit"),
    ] {
        migration.migrate(&collection(id, type_gid)).unwrap();
    }
    runtime
}

/// SCENARIO: curator with full access sees same-type collections
#[test]
fn scenario_available_children_and_parents() {
    let runtime = seeded();
    let query = runtime.nested_collections();
    let mine = runtime
        .facade()
        .find_by_alternate_identifier(&Identifier::new("mine"))
        .unwrap();

    let children = query.available_child_collections(&mine, &AllowEverything).unwrap();
    assert_eq!(alternates(&children), ["shared", "theirs"]);

    let parents = query.available_parent_collections(&mine, &AllowEverything).unwrap();
    assert_eq!(alternates(&parents), ["shared", "theirs"]);
}

/// SCENARIO: read-only curator cannot nest anything
#[test]
fn scenario_read_only_curator_gets_nothing() {
    let runtime = seeded();
    let query = runtime.nested_collections();
    let mine = runtime
        .facade()
        .find_by_alternate_identifier(&Identifier::new("mine"))
        .unwrap();
    let theirs = runtime
        .facade()
        .find_by_alternate_identifier(&Identifier::new("theirs"))
        .unwrap();

    assert!(query.available_child_collections(&mine, &ReadOnly).unwrap().is_empty());
    assert!(query.available_parent_collections(&mine, &ReadOnly).unwrap().is_empty());
    assert!(!query.parent_and_child_can_nest(&mine, &theirs, &ReadOnly));
    assert!(query.parent_and_child_can_nest(&mine, &theirs, &AllowEverything));
}

/// SCENARIO: non-nestable collection types are left alone
#[test]
fn scenario_exhibit_is_not_nestable() {
    let runtime = seeded();
    let exhibit = runtime
        .facade()
        .find_by_alternate_identifier(&Identifier::new("exhibit"))
        .unwrap();
    let children = runtime
        .nested_collections()
        .available_child_collections(&exhibit, &AllowEverything)
        .unwrap();
    assert!(children.is_empty());
}
