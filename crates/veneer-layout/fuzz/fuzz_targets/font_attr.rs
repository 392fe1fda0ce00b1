#![no_main]

use libfuzzer_sys::fuzz_target;
use veneer_layout::FontLayout;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data)
        && let Some(font) = FontLayout::parse(input)
    {
        let _ = FontLayout::parse(&font.to_attr());
        let _ = font.effective();
    }
});
