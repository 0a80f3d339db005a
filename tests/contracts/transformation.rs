//! Transformation contracts
//!
//! The transformer is pure apart from minting: the same legacy object yields
//! the same resource, and a mint is consumed only when the object has no
//! identifier of its own and the transformation succeeds.

use chrono::{Duration, Utc};
use strata::domain::entities::LegacyLink;
use strata::{Identifier, LegacyRecord, ModelTransformer, SchemaRegistry, SequenceMinter};

use crate::common::*;

/// CONTRACT: re-transforming an object with an identifier is idempotent
mod idempotence {
    use super::*;

    #[test]
    fn contract_same_object_same_resource() {
        let registry = SchemaRegistry::with_defaults();
        let minter = SequenceMinter::new("min-");
        let transformer = ModelTransformer::new(&registry, &minter);
        let object = described_work("dw", Utc::now() + Duration::days(3));

        let first = transformer.build(&object).unwrap();
        let second = transformer.build(&object).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.alternate_id, "dw");
    }
}

/// CONTRACT: identifiers are minted once, only when missing
mod minting {
    use super::*;

    #[test]
    fn contract_unsaved_object_gets_minted_identifier() {
        let registry = SchemaRegistry::with_defaults();
        let minter = SequenceMinter::new("min-");
        let transformer = ModelTransformer::new(&registry, &minter);

        let fresh = LegacyRecord::new("GenericWork").with_value("title", "New");
        let resource = transformer.build(&fresh).unwrap();
        assert_eq!(resource.alternate_id, "min-1");

        let saved = transformer.build(&child_work("cw1")).unwrap();
        assert_eq!(saved.alternate_id, "cw1");

        let next = transformer.build(&fresh).unwrap();
        assert_eq!(next.alternate_id, "min-2");
    }

    #[test]
    fn contract_failed_transformation_does_not_mint() {
        let registry = SchemaRegistry::with_defaults();
        let minter = SequenceMinter::new("min-");
        let transformer = ModelTransformer::new(&registry, &minter);

        let broken = LegacyRecord::new("GenericWork").with_value("date_uploaded", "not a date");
        assert!(transformer.build(&broken).is_err());

        let fresh = LegacyRecord::new("GenericWork").with_value("title", "New");
        assert_eq!(transformer.build(&fresh).unwrap().alternate_id, "min-1");
    }
}

/// CONTRACT: unresolvable references are skipped with a warning
mod references {
    use super::*;

    #[test]
    fn contract_unsaved_member_is_skipped_not_fatal() {
        let registry = SchemaRegistry::with_defaults();
        let minter = SequenceMinter::new("min-");
        let transformer = ModelTransformer::new(&registry, &minter);

        let object = LegacyRecord::new("GenericWork")
            .with_id("pw")
            .with_value("title", "Parent")
            .ordered_member(LegacyLink::to("GenericWork", "cw1"))
            .ordered_member(LegacyLink::unsaved("GenericWork"))
            .ordered_member(LegacyLink::to("GenericWork", "cw2"));

        let transformation = transformer.transform(&object).unwrap();
        assert_eq!(
            transformation.resource.member_ids,
            [Identifier::new("cw1"), Identifier::new("cw2")]
        );
        assert_eq!(transformation.warnings.len(), 1);
        assert_eq!(transformation.warnings[0].target_model, "GenericWork");
    }
}
