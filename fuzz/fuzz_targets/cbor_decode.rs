#![no_main]

use libfuzzer_sys::fuzz_target;
use senml::Pack;

fuzz_target!(|data: &[u8]| {
    if let Ok(pack) = Pack::from_cbor(data) {
        let _ = pack.normalize();
        let _ = pack.time_range();
        if let Ok(encoded) = pack.to_cbor() {
            let _ = Pack::from_cbor(&encoded);
        }
    }
});
