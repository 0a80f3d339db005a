#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Disk records are JSON; a damaged file must decode to an error, not a panic
    if let Ok(record) = serde_json::from_slice::<strata::StoredRecord>(data) {
        // Whatever decodes must survive being written back
        let json = serde_json::to_vec(&record).unwrap();
        let again: strata::StoredRecord = serde_json::from_slice(&json).unwrap();
        assert_eq!(again, record);
    }
});
