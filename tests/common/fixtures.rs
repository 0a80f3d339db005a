//! Test fixtures - legacy objects shared by scenarios and contracts.

use chrono::{DateTime, Utc};
use strata::domain::entities::{FileRole, LegacyLink, LegacyRestriction, LinkRole};
use strata::domain::value_objects::{Literal, ValueKind};
use strata::{LegacyRecord, Visibility};

/// Parent work with two ordered child works
pub fn parent_work() -> LegacyRecord {
    LegacyRecord::new("GenericWork")
        .with_id("pw")
        .with_value("title", "Parent work")
        .ordered_member(LegacyLink::to("GenericWork", "cw1"))
        .ordered_member(LegacyLink::to("GenericWork", "cw2"))
}

pub fn child_work(id: &str) -> LegacyRecord {
    LegacyRecord::new("GenericWork")
        .with_id(id)
        .with_value("title", format!("Child {id}"))
}

/// A richly described work touching every part of the resource model
pub fn described_work(id: &str, released: DateTime<Utc>) -> LegacyRecord {
    LegacyRecord::new("GenericWork")
        .with_id(id)
        .with_values("title", ["Tove's notebook", "Muumipeikko"])
        .with_values("creator", ["Jansson, Tove"])
        .with_value(
            "date_uploaded",
            Literal::parse(ValueKind::Timestamp, "2019-06-01T08:30:00.125Z")
                .expect("timestamp literal"),
        )
        .with_value("keyword", Literal::symbol("moomin"))
        .member(LegacyLink::to("FileSet", "fs-a"))
        .in_collection(LegacyLink::to("Collection", "col-1"))
        .link(LinkRole::Representative, "fs-a")
        .link(LinkRole::Thumbnail, "fs-a")
        .with_visibility(Visibility::Authenticated)
        .with_embargo(
            LegacyRestriction::until(released).visibilities("restricted", "open"),
        )
}

pub fn file_set(id: &str) -> LegacyRecord {
    LegacyRecord::new("FileSet")
        .with_id(id)
        .with_value("title", format!("File set {id}"))
        .file(format!("{id}-original"), Some(FileRole::OriginalFile))
        .file(format!("{id}-thumb"), Some(FileRole::Thumbnail))
}

pub fn collection(id: &str, type_gid: &str) -> LegacyRecord {
    LegacyRecord::new("Collection")
        .with_id(id)
        .with_value("title", format!("Collection {id}"))
        .with_value("collection_type_gid", type_gid)
}
