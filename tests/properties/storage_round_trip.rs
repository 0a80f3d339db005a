//! Property tests for storage round trips across backends.

use proptest::prelude::*;

use chrono::{TimeZone, Utc};
use strata::domain::entities::{FileRole, LegacyLink, LegacyRestriction, LegacyTerm, LinkRole};
use strata::domain::schema::{PropertyDecl, RelationshipDecl};
use strata::domain::value_objects::{xsd, Permissions, ValueKind};
use strata::{
    DiskBackend, LegacyRecord, Literal, MemoryBackend, ModelFilter, ModelTransformer,
    ResourceKind, SchemaDescriptor, SchemaRegistry, SequenceMinter, StorageBackend,
    StorageFacade, TripleBackend, Visibility,
};

/// A work model declaring one property per literal kind plus relationships
fn registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::with_defaults();
    registry.register(
        SchemaDescriptor::new("TypedWork", ResourceKind::Work)
            .property(PropertyDecl::many("title"))
            .property(PropertyDecl::single("date_uploaded").of(ValueKind::Timestamp))
            .property(PropertyDecl::many("extent").of(ValueKind::Float))
            .property(PropertyDecl::single("page_count").of(ValueKind::Integer))
            .property(PropertyDecl::single("published").of(ValueKind::Boolean))
            .property(PropertyDecl::many("keyword").of(ValueKind::Symbol))
            .property(PropertyDecl::many("source").of(ValueKind::Uri))
            .relationship(RelationshipDecl::many("pages", "Page"))
            .relationship(RelationshipDecl::single("parent", "TypedWork")),
    );
    registry
}

fn float_term() -> impl Strategy<Value = LegacyTerm> {
    prop_oneof![
        proptest::num::f64::ANY.prop_map(LegacyTerm::from),
        Just(LegacyTerm::typed("INF", xsd::DOUBLE)),
        Just(LegacyTerm::typed("-INF", xsd::DOUBLE)),
        Just(LegacyTerm::typed("NaN", xsd::DOUBLE)),
    ]
}

fn file_role() -> impl Strategy<Value = Option<FileRole>> {
    proptest::option::of(prop_oneof![
        Just(FileRole::OriginalFile),
        Just(FileRole::Thumbnail),
        Just(FileRole::ExtractedText),
    ])
}

fn visibility() -> impl Strategy<Value = Option<Visibility>> {
    proptest::option::of(prop_oneof![
        Just(Visibility::Open),
        Just(Visibility::Authenticated),
        Just(Visibility::Restricted),
    ])
}

fn restriction() -> impl Strategy<Value = Option<LegacyRestriction>> {
    proptest::option::of(
        (0i64..4_102_444_800, proptest::collection::vec("[a-z ]{1,12}", 0..=2)).prop_map(
            |(secs, history)| {
                let date = Utc.timestamp_opt(secs, 0).single().unwrap();
                history.into_iter().fold(
                    LegacyRestriction::until(date).visibilities("restricted", "open"),
                    |r, entry| r.deactivated(entry),
                )
            },
        ),
    )
}

fn typed_values() -> impl Strategy<Value = Vec<(&'static str, Vec<LegacyTerm>)>> {
    (
        proptest::collection::vec("\\PC{0,24}", 1..=3),
        (0i64..4_102_444_800, 0u32..1_000_000_000),
        proptest::collection::vec(float_term(), 0..=3),
        any::<i64>(),
        any::<bool>(),
        proptest::collection::vec("[a-z_]{1,8}", 0..=3),
        proptest::collection::vec("[a-z:/. ]{0,16}", 0..=3),
    )
        .prop_map(|(titles, (secs, nanos), floats, count, published, symbols, uris)| {
            let uploaded = Literal::Timestamp(Utc.timestamp_opt(secs, nanos).single().unwrap());
            vec![
                ("title", titles.into_iter().map(LegacyTerm::from).collect()),
                (
                    "date_uploaded",
                    vec![LegacyTerm::typed(uploaded.lexical(), xsd::DATE_TIME)],
                ),
                ("extent", floats),
                (
                    "page_count",
                    vec![LegacyTerm::typed(count.to_string(), xsd::INTEGER)],
                ),
                ("published", vec![LegacyTerm::from(published)]),
                (
                    "keyword",
                    symbols.into_iter().map(|s| Literal::symbol(s).into()).collect(),
                ),
                ("source", uris.into_iter().map(LegacyTerm::iri).collect()),
            ]
        })
}

fn references() -> impl Strategy<Value = LegacyRecord> {
    (
        any::<bool>(),
        proptest::collection::vec("[a-z]{1,6}", 0..=5),
        proptest::collection::vec("[a-z]{1,6}", 0..=3),
        proptest::collection::vec(("[a-z]{1,6}", file_role()), 0..=4),
        proptest::collection::vec(proptest::option::of("[a-z]{1,6}"), 4),
        proptest::collection::vec("[a-z]{1,6}", 0..=3),
        proptest::option::of("[a-z]{1,6}"),
    )
        .prop_map(|(ordered, members, collections, files, links, pages, parent)| {
            let mut object = LegacyRecord::new("TypedWork").with_id("w");
            for id in members {
                let link = LegacyLink::to("TypedWork", id);
                object = if ordered {
                    object.ordered_member(link)
                } else {
                    object.member(link)
                };
            }
            for id in collections {
                object = object.in_collection(LegacyLink::to("Collection", id));
            }
            for (id, role) in files {
                object = object.file(id, role);
            }
            for (role, id) in LinkRole::ALL.into_iter().zip(links) {
                if let Some(id) = id {
                    object = object.link(role, id);
                }
            }
            if !pages.is_empty() {
                object = object.has_many(
                    "pages",
                    pages.into_iter().map(|id| LegacyLink::to("Page", id)).collect(),
                );
            }
            if let Some(parent) = parent {
                object = object.belongs_to("parent", LegacyLink::to("TypedWork", parent));
            }
            object
        })
}

fn permissions() -> impl Strategy<Value = Permissions> {
    (
        proptest::collection::btree_set("[a-z]{1,6}@example\\.com", 0..=2),
        proptest::collection::btree_set("[a-z]{1,6}", 0..=2),
        proptest::collection::btree_set("[a-z]{1,6}@example\\.com", 0..=2),
        proptest::collection::btree_set("[a-z]{1,6}", 0..=2),
    )
        .prop_map(|(read_users, read_groups, edit_users, edit_groups)| Permissions {
            read_users,
            read_groups,
            edit_users,
            edit_groups,
        })
}

fn legacy_work() -> impl Strategy<Value = LegacyRecord> {
    (
        references(),
        typed_values(),
        permissions(),
        visibility(),
        restriction(),
        restriction(),
    )
        .prop_map(|(object, values, permissions, visibility, embargo, lease)| {
            let mut object = values
                .into_iter()
                .fold(object, |object, (name, terms)| object.with_values(name, terms))
                .with_permissions(permissions);
            if let Some(visibility) = visibility {
                object = object.with_visibility(visibility);
            }
            if let Some(embargo) = embargo {
                object = object.with_embargo(embargo);
            }
            if let Some(lease) = lease {
                object = object.with_lease(lease);
            }
            object
        })
}

fn backends(dir: &std::path::Path) -> Vec<Box<dyn StorageBackend>> {
    vec![
        Box::new(MemoryBackend::new()),
        Box::new(DiskBackend::open(dir).unwrap()),
        Box::new(TripleBackend::new()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every backend returns exactly what was persisted, for every
    /// literal kind and reference family.
    #[test]
    fn property_persist_then_read_is_identity(object in legacy_work()) {
        let registry = registry();
        let minter = SequenceMinter::new("p-");
        let resource = ModelTransformer::new(&registry, &minter).build(&object).unwrap();
        let dir = tempfile::tempdir().unwrap();

        for backend in backends(dir.path()) {
            let facade = StorageFacade::new(backend);
            let persisted = facade.persist(resource.clone()).unwrap();
            prop_assert!(persisted.content_eq(&resource));

            let read = facade.find_by_identifier(persisted.id.as_ref().unwrap()).unwrap();
            prop_assert!(read.content_eq(&resource), "backend {}", facade.backend_name());
            prop_assert_eq!(&read, &persisted, "backend {}", facade.backend_name());

            let scanned: Vec<_> = facade.find_all(ModelFilter::All).collect();
            prop_assert_eq!(scanned.len(), 1);
            prop_assert!(scanned[0].is_ok(), "backend {}", facade.backend_name());
        }
    }

    /// PROPERTY: persisting unchanged content again keeps every id.
    #[test]
    fn property_repersist_is_stable(object in legacy_work()) {
        let registry = registry();
        let minter = SequenceMinter::new("p-");
        let transformer = ModelTransformer::new(&registry, &minter);
        let dir = tempfile::tempdir().unwrap();

        for backend in backends(dir.path()) {
            let facade = StorageFacade::new(backend);
            let first = facade.persist(transformer.build(&object).unwrap()).unwrap();
            let second = facade.persist(transformer.build(&object).unwrap()).unwrap();
            prop_assert_eq!(&first, &second, "backend {}", facade.backend_name());
        }
    }
}
