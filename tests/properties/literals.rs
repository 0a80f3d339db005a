//! Property tests for typed literal lexical forms.

use proptest::prelude::*;

use chrono::{TimeZone, Utc};
use strata::domain::value_objects::{Literal, ValueKind};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: timestamps keep sub-second precision through their lexical form.
    #[test]
    fn property_timestamp_lexical_round_trip(
        secs in 0i64..4_102_444_800,
        nanos in 0u32..1_000_000_000,
    ) {
        let t = Utc.timestamp_opt(secs, nanos).single().unwrap();
        let literal = Literal::Timestamp(t);
        prop_assert_eq!(Literal::parse(ValueKind::Timestamp, &literal.lexical()).unwrap(), literal);
    }

    /// PROPERTY: finite floats and all integers round-trip exactly.
    #[test]
    fn property_numeric_lexical_round_trip(f in proptest::num::f64::NORMAL, i in any::<i64>()) {
        let float = Literal::Float(f);
        prop_assert_eq!(Literal::parse(ValueKind::Float, &float.lexical()).unwrap(), float);

        let int = Literal::Integer(i);
        prop_assert_eq!(Literal::parse(ValueKind::Integer, &int.lexical()).unwrap(), int);
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(text in "(?s).{0,64}") {
        for kind in [
            ValueKind::String,
            ValueKind::Timestamp,
            ValueKind::Boolean,
            ValueKind::Float,
            ValueKind::Integer,
            ValueKind::Symbol,
            ValueKind::Uri,
        ] {
            let _ = Literal::parse(kind, &text);
        }
    }
}
