#![no_main]

use libfuzzer_sys::fuzz_target;

use distributor_types::{Amount, Batch};

// Batch JSON and unit parsing must never panic, and a parsed batch either
// totals or reports overflow.
fuzz_target!(|data: &[u8]| {
    if let Ok(batch) = serde_json::from_slice::<Batch>(data) {
        let _ = batch.total();
    }

    if let Ok(text) = std::str::from_utf8(data) {
        for decimals in [0u8, 6, 18, 77, 78] {
            if let Ok(amount) = Amount::parse_units(text, decimals) {
                let rendered = amount.format_units(decimals);
                assert_eq!(Amount::parse_units(&rendered, decimals), Ok(amount));
            }
        }
    }
});
