#![no_main]

use bead_mail::parse_media_type;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok((media_type, params)) = parse_media_type(s) {
            assert!(bead_mail::media_type::is_valid_media_type(&media_type));
            for (key, _) in params.iter() {
                assert!(bead_mail::grammar::is_token(key));
            }
        }
    }
});
