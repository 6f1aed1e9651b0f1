#![no_main]

use cotejar::report::compare;
use cotejar::trial::TrialResult;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert arbitrary bytes to UTF-8 string (lossy conversion)
    if let Ok(input) = std::str::from_utf8(data) {
        // Attempt to parse a trial results document
        // This should not panic regardless of input
        if let Ok(results) = serde_json::from_str::<Vec<TrialResult>>(input) {
            // A successfully parsed document is compared against itself;
            // the comparison must return a report or a typed error
            let _ = compare(&results, &results, &["cost", "latency_seconds"]);
        }
    }
});
