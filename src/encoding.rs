//! Body encoders for the common content transfer encodings.
//!
//! Bodies are rendered verbatim by [`MimeBuilder`](crate::MimeBuilder), so
//! callers encode them up front with these helpers.

use crate::builder::LineEnd;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

const LINE_MAX_LEN: usize = 76;
const UPPER_HEX: &[u8] = b"0123456789ABCDEF";

/// Encodes text as quoted-printable (RFC 2045).
///
/// Hard line breaks (`\n` or `\r\n`) in the input become `line_end`.
/// Encoded lines are at most 76 characters including the soft break.
///
/// # Examples
///
/// ```
/// use bead_mail::encoding::quoted_printable;
/// use bead_mail::LineEnd;
///
/// assert_eq!(quoted_printable("a=b \r\nc", LineEnd::Crlf), "a=3Db=20\r\nc");
/// ```
pub fn quoted_printable(text: &str, line_end: LineEnd) -> String {
    let eol = line_end.as_str();
    let mut out = String::with_capacity(text.len() + text.len() / 8);

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str(eol);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        encode_line(line.as_bytes(), eol, &mut out);
    }

    out
}

fn encode_line(bytes: &[u8], eol: &str, out: &mut String) {
    let mut column = 0;

    for (i, &b) in bytes.iter().enumerate() {
        let is_last = i + 1 == bytes.len();
        let literal = (b'!'..=b'~').contains(&b) && b != b'=' || (is_whitespace(b) && !is_last);
        let width = if literal { 1 } else { 3 };

        // Leave room for the trailing "=" of a soft break.
        if column + width > LINE_MAX_LEN - 1 {
            out.push('=');
            out.push_str(eol);
            column = 0;
        }

        if literal {
            out.push(b as char);
        } else {
            out.push('=');
            out.push(UPPER_HEX[(b >> 4) as usize] as char);
            out.push(UPPER_HEX[(b & 0x0F) as usize] as char);
        }
        column += width;
    }
}

/// Encodes bytes as base64 wrapped at 76 characters per line.
pub fn base64_lines(bytes: &[u8], line_end: LineEnd) -> String {
    let encoded = STANDARD.encode(bytes);
    let eol = line_end.as_str();
    let mut out = String::with_capacity(encoded.len() + encoded.len() / LINE_MAX_LEN * eol.len());

    for (i, chunk) in encoded.as_bytes().chunks(LINE_MAX_LEN).enumerate() {
        if i > 0 {
            out.push_str(eol);
        }
        out.extend(chunk.iter().map(|&b| b as char));
    }

    out
}

/// Checks if a byte is whitespace (space or tab).
fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t'
}
