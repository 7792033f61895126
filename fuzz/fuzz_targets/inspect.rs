#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Bypass the guard's size/shape limits and hit the scanner with any
    // tree serde_json will produce.
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let tree = actionguard::ValueTree::from_json(&value);
        let _ = actionguard::inspect(&tree);
    }
});
