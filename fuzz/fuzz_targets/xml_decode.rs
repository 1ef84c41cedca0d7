#![no_main]

use libfuzzer_sys::fuzz_target;
use senml::Pack;

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(pack) = Pack::from_xml(xml) {
        let _ = pack.normalize();
        if let Ok(encoded) = pack.to_xml() {
            let _ = Pack::from_xml(&encoded);
        }
    }
});
