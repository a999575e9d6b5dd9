#![no_main]

use libfuzzer_sys::fuzz_target;
use monofont_format::{validate_params, ConvertParams};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(params) = ConvertParams::from_json(s) {
            let _ = validate_params(&params).into_result();
        }
    }
});
