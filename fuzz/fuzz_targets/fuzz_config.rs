#![no_main]

use billsheet::core::InvoiceConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        let _ = InvoiceConfig::from_toml_str(s);
    }
});
