#![no_main]

use libfuzzer_sys::fuzz_target;
use senml::Pack;

fuzz_target!(|data: &[u8]| {
    if let Ok(pack) = Pack::from_json_bytes(data) {
        let _ = pack.normalize();
        if let Ok(encoded) = pack.to_json_bytes() {
            let _ = Pack::from_json_bytes(&encoded);
        }
    }
});
