#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        // The guard may reject, the scanner may block; neither may panic.
        let _ = actionguard::screen_payload(raw, "0");
    }
});
