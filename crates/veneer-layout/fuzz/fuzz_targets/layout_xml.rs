#![no_main]

use libfuzzer_sys::fuzz_target;
use veneer_layout::codec;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Anything that parses must also encode and parse again.
        if let Ok(def) = codec::from_xml_str(input)
            && let Ok(xml) = codec::to_xml_string(&def)
        {
            let _reparsed = codec::from_xml_str(&xml);
        }
    }
});
