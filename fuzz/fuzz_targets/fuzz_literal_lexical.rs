#![no_main]

use libfuzzer_sys::fuzz_target;
use strata::domain::value_objects::{Literal, ValueKind};

const KINDS: [ValueKind; 7] = [
    ValueKind::String,
    ValueKind::Timestamp,
    ValueKind::Boolean,
    ValueKind::Float,
    ValueKind::Integer,
    ValueKind::Symbol,
    ValueKind::Uri,
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let kind = KINDS[usize::from(selector) % KINDS.len()];
    if let Ok(lexical) = std::str::from_utf8(rest) {
        if let Ok(literal) = Literal::parse(kind, lexical) {
            // Anything that parses comes back equal from its own lexical form
            let again = Literal::parse(kind, &literal.lexical());
            assert_eq!(again.as_ref().ok(), Some(&literal), "{kind} literal drifted");
        }
    }
});
