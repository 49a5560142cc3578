#![no_main]

use bead_mail::encoding::quoted_printable;
use bead_mail::LineEnd;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let encoded = quoted_printable(s, LineEnd::Crlf);
        for line in encoded.split("\r\n") {
            assert!(line.len() <= 76);
            assert!(line.bytes().all(|b| b == b'\t' || (b' '..=b'~').contains(&b)));
        }
    }
});
