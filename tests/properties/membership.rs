//! Property tests for member resolution.

use std::collections::BTreeSet;

use proptest::prelude::*;

use strata::domain::entities::LegacyLink;
use strata::{Identifier, LegacyRecord, ModelTransformer, SchemaRegistry, SequenceMinter};

fn member_id() -> impl Strategy<Value = String> {
    // Small alphabet so duplicates show up often
    proptest::string::string_regex("[a-d][0-3]").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: ordered members keep their sequence, duplicates included.
    #[test]
    fn property_ordered_members_preserve_sequence(
        ids in proptest::collection::vec(member_id(), 0..=12),
    ) {
        let registry = SchemaRegistry::with_defaults();
        let minter = SequenceMinter::new("p-");
        let transformer = ModelTransformer::new(&registry, &minter);

        let object = ids.iter().fold(
            LegacyRecord::new("GenericWork").with_id("pw").with_value("title", "t"),
            |object, id| object.ordered_member(LegacyLink::to("GenericWork", id.as_str())),
        );
        let resource = transformer.build(&object).unwrap();

        let expected: Vec<Identifier> = ids.iter().map(|id| Identifier::new(id.as_str())).collect();
        prop_assert_eq!(resource.member_ids, expected);
        prop_assert_eq!(resource.members_ordered, !ids.is_empty());
    }

    /// PROPERTY: unordered members are all present, whatever their order.
    #[test]
    fn property_unordered_members_are_complete(
        ids in proptest::collection::vec(member_id(), 0..=12),
    ) {
        let registry = SchemaRegistry::with_defaults();
        let minter = SequenceMinter::new("p-");
        let transformer = ModelTransformer::new(&registry, &minter);

        let object = ids.iter().fold(
            LegacyRecord::new("GenericWork").with_id("pw").with_value("title", "t"),
            |object, id| object.member(LegacyLink::to("GenericWork", id.as_str())),
        );
        let resource = transformer.build(&object).unwrap();

        let mut got: Vec<String> = resource.member_ids.iter().map(ToString::to_string).collect();
        let mut want = ids.clone();
        got.sort();
        want.sort();
        prop_assert_eq!(got, want);
        prop_assert!(!resource.members_ordered);
    }

    /// PROPERTY: parent collections are a set of exactly the linked ids.
    #[test]
    fn property_parent_collections_form_a_set(
        ids in proptest::collection::vec(member_id(), 0..=8),
    ) {
        let registry = SchemaRegistry::with_defaults();
        let minter = SequenceMinter::new("p-");
        let transformer = ModelTransformer::new(&registry, &minter);

        let object = ids.iter().fold(
            LegacyRecord::new("GenericWork").with_id("w").with_value("title", "t"),
            |object, id| object.in_collection(LegacyLink::to("Collection", id.as_str())),
        );
        let resource = transformer.build(&object).unwrap();

        let want: BTreeSet<Identifier> = ids.iter().map(|id| Identifier::new(id.as_str())).collect();
        prop_assert_eq!(resource.member_of_collection_ids, want);
    }
}
