//! Storage contracts
//!
//! Every backend behind the facade satisfies the same contract: a read after
//! persist returns field-for-field equal content, internal ids are stable,
//! and absence is reported as `NotFound`.

use chrono::{Duration, Utc};
use strata::domain::entities::LegacyTerm;
use strata::domain::value_objects::xsd;
use strata::{
    Identifier, LegacyRecord, ModelFilter, ModelTransformer, Runtime, SchemaRegistry,
    SequenceMinter,
};

use crate::common::*;

fn transformer_parts() -> (SchemaRegistry, SequenceMinter) {
    (SchemaRegistry::with_defaults(), SequenceMinter::new("min-"))
}

/// CONTRACT: read after persist is field-for-field equal
mod round_trip {
    use super::*;

    #[test]
    fn contract_read_after_persist_is_equal_on_every_backend() {
        let (registry, minter) = transformer_parts();
        let transformer = ModelTransformer::new(&registry, &minter);
        let released = Utc::now() + Duration::days(30);

        for fixture in all_backends() {
            let resource = transformer.build(&described_work("dw", released)).unwrap();
            let persisted = fixture.facade.persist(resource.clone()).unwrap();

            assert!(persisted.content_eq(&resource), "{:?}", fixture.kind);
            let id = persisted.id.clone().unwrap();
            let by_id = fixture.facade.find_by_identifier(&id).unwrap();
            let by_alt = fixture
                .facade
                .find_by_alternate_identifier(&Identifier::new("dw"))
                .unwrap();

            assert_eq!(by_id, persisted, "{:?} by id", fixture.kind);
            assert_eq!(by_alt, persisted, "{:?} by alternate id", fixture.kind);
        }
    }

    #[test]
    fn contract_non_finite_floats_and_raw_iris_survive_every_backend() {
        let (registry, minter) = transformer_parts();
        let transformer = ModelTransformer::new(&registry, &minter);
        let object = LegacyRecord::new("GenericWork")
            .with_id("odd")
            .with_value("title", "odd values")
            .with_values(
                "source",
                [
                    LegacyTerm::typed("INF", xsd::DOUBLE),
                    LegacyTerm::typed("NaN", xsd::DOUBLE),
                    LegacyTerm::iri("http://example.com/a b"),
                ],
            );

        for fixture in all_backends() {
            let resource = transformer.build(&object).unwrap();
            let persisted = fixture.facade.persist(resource.clone()).unwrap();

            let read = fixture
                .facade
                .find_by_identifier(persisted.id.as_ref().unwrap())
                .unwrap();
            assert!(read.content_eq(&resource), "{:?}", fixture.kind);
            let listed: Vec<_> = fixture.facade.find_all(ModelFilter::All).collect();
            assert!(listed.iter().all(Result::is_ok), "{:?}", fixture.kind);
        }
    }

    #[test]
    fn contract_file_set_roles_survive_storage() {
        let (registry, minter) = transformer_parts();
        let transformer = ModelTransformer::new(&registry, &minter);

        for fixture in all_backends() {
            let resource = transformer.build(&file_set("fs-a")).unwrap();
            let persisted = fixture.facade.persist(resource).unwrap();
            let read = fixture
                .facade
                .find_by_identifier(persisted.id.as_ref().unwrap())
                .unwrap();

            assert_eq!(read.original_file_ids, [Identifier::new("fs-a-original")]);
            assert_eq!(read.thumbnail_ids, [Identifier::new("fs-a-thumb")]);
            assert!(read.extracted_text_ids.is_empty(), "{:?}", fixture.kind);
        }
    }
}

/// CONTRACT: internal ids never change once assigned
mod identifier_stability {
    use super::*;

    #[test]
    fn contract_repersist_keeps_internal_and_restriction_ids() {
        let (registry, minter) = transformer_parts();
        let transformer = ModelTransformer::new(&registry, &minter);
        let released = Utc::now() + Duration::days(1);

        for fixture in all_backends() {
            let first = fixture
                .facade
                .persist(transformer.build(&described_work("dw", released)).unwrap())
                .unwrap();
            let second = fixture
                .facade
                .persist(transformer.build(&described_work("dw", released)).unwrap())
                .unwrap();

            assert_eq!(first.id, second.id, "{:?}", fixture.kind);
            assert_eq!(
                first.embargo.as_ref().and_then(|e| e.id.clone()),
                second.embargo.as_ref().and_then(|e| e.id.clone()),
                "{:?}",
                fixture.kind
            );
            assert_eq!(fixture.facade.find_all(ModelFilter::All).count(), 1);
        }
    }

    #[test]
    fn contract_distinct_alternates_get_distinct_ids() {
        let (registry, minter) = transformer_parts();
        let transformer = ModelTransformer::new(&registry, &minter);

        for fixture in all_backends() {
            let a = fixture
                .facade
                .persist(transformer.build(&child_work("cw1")).unwrap())
                .unwrap();
            let b = fixture
                .facade
                .persist(transformer.build(&child_work("cw2")).unwrap())
                .unwrap();
            assert_ne!(a.id, b.id, "{:?}", fixture.kind);
        }
    }
}

/// CONTRACT: absence is `NotFound`, never a panic or another error
mod not_found {
    use super::*;

    #[test]
    fn contract_missing_lookups_are_not_found() {
        for fixture in all_backends() {
            let missing = Identifier::new("does-not-exist");
            assert!(fixture.facade.find_by_identifier(&missing).unwrap_err().is_not_found());
            assert!(fixture
                .facade
                .find_by_alternate_identifier(&missing)
                .unwrap_err()
                .is_not_found());
        }
    }

    #[test]
    fn contract_not_found_surfaces_through_strata_error() {
        let runtime = Runtime::in_memory();
        let err: strata::StrataError = runtime
            .facade()
            .find_by_identifier(&Identifier::new("nope"))
            .unwrap_err()
            .into();
        assert!(err.is_not_found());
    }
}

/// CONTRACT: find_all pages lazily and can resume from an offset
mod paging {
    use super::*;
    use strata::BackendKind;

    #[test]
    fn contract_find_all_is_complete_and_resumable() {
        let (registry, minter) = transformer_parts();
        let transformer = ModelTransformer::new(&registry, &minter);

        for kind in [BackendKind::Memory, BackendKind::Disk, BackendKind::Triple] {
            let fixture = BackendFixture::with_page_size(kind, 2);
            for i in 0..5 {
                let resource = transformer.build(&child_work(&format!("cw{i}"))).unwrap();
                fixture.facade.persist(resource).unwrap();
            }
            fixture
                .facade
                .persist(transformer.build(&file_set("fs-a")).unwrap())
                .unwrap();

            let works = ModelFilter::model("GenericWork");
            let mut cursor = fixture.facade.find_all(works.clone());
            let head: Vec<_> = cursor.by_ref().take(3).map(Result::unwrap).collect();
            let tail: Vec<_> = fixture
                .facade
                .find_all_from(works, cursor.offset())
                .map(Result::unwrap)
                .collect();

            let mut seen: Vec<_> = head
                .iter()
                .chain(&tail)
                .map(|r| r.alternate_id.to_string())
                .collect();
            seen.sort();
            assert_eq!(seen, ["cw0", "cw1", "cw2", "cw3", "cw4"], "{kind:?}");
        }
    }
}
