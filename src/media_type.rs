//! Media type validation and parsing.
//!
//! Handles the `type/subtype; name=value` shape used by `content-type`
//! and `content-disposition` header values (RFC 2045, RFC 2183).

use crate::error::{Error, Result};
use crate::grammar::is_token;
use crate::header::Parameters;

/// Reports whether `v` is a bare `type/subtype` media type.
///
/// # Examples
///
/// ```
/// use bead_mail::media_type::is_valid_media_type;
///
/// assert!(is_valid_media_type("text/plain"));
/// assert!(is_valid_media_type("application/vnd.ms-excel"));
/// assert!(!is_valid_media_type("text"));
/// assert!(!is_valid_media_type("text/plain; charset=utf-8"));
/// ```
pub fn is_valid_media_type(v: &str) -> bool {
    match v.split_once('/') {
        Some((major, sub)) => is_token(major) && is_token(sub),
        None => false,
    }
}

/// Parses a media type value and any optional parameters.
///
/// The media type is lower-cased and validated. Parameter names are
/// lower-cased, values are kept verbatim (including any quotes) and the
/// parameters keep the order they were written in.
///
/// # Examples
///
/// ```
/// use bead_mail::parse_media_type;
///
/// let (media_type, params) = parse_media_type("Multipart/Mixed; boundary=abc").unwrap();
/// assert_eq!(media_type, "multipart/mixed");
/// assert_eq!(params.get("boundary"), Some("abc"));
/// ```
pub fn parse_media_type(v: &str) -> Result<(String, Parameters)> {
    let (base, rest) = v.split_once(';').unwrap_or((v, ""));
    let media_type = base.trim().to_lowercase();

    if !is_valid_media_type(&media_type) {
        return Err(Error::invalid_argument(format!(
            "Expected valid media type, found \"{}\"",
            v
        )));
    }

    let mut params = Parameters::new();
    for (key, value) in split_parameters(rest)? {
        params.insert(key.to_lowercase(), value);
    }

    Ok((media_type, params))
}

/// Splits `; name=value; name="quoted; value"` into ordered pairs.
///
/// Semicolons inside double quotes do not separate parameters. Values are
/// trimmed but otherwise returned as written.
pub(crate) fn split_parameters(rest: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for segment in split_outside_quotes(rest) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let Some((key, value)) = segment.split_once('=') else {
            return Err(Error::invalid_argument(format!(
                "Expected name=value parameter, found \"{}\"",
                segment
            )));
        };

        let key = key.trim();
        if !is_token(key) {
            return Err(Error::invalid_argument(format!(
                "Expected valid parameter name, found \"{}\"",
                key
            )));
        }

        pairs.push((key.to_string(), value.trim().to_string()));
    }

    Ok(pairs)
}

fn split_outside_quotes(s: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, ch) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                segments.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&s[start..]);

    segments
}

/// Removes one pair of surrounding double quotes and unescapes the content.
pub fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        let inner = &value[1..value.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(ch);
            }
        }
        out
    } else {
        value.to_string()
    }
}

/// Wraps a value in double quotes, escaping quotes and backslashes.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
