#![no_main]

use bead_mail::Header;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(header) = Header::parse(s) {
            // A parsed header always renders to a line that parses back to itself.
            let reparsed = Header::parse(&header.line()).expect("rendered header must parse");
            assert_eq!(reparsed.name(), header.name());
            assert_eq!(reparsed.parameter_count(), header.parameter_count());
        }
    }
});
