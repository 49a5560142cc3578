//! Character classes for header names and MIME tokens.
//!
//! Header names follow the RFC 2822 field-name token syntax; media types
//! and parameter names follow the RFC 2045 `token` rule.

/// Reports whether the character is in 'tspecials' as defined by RFC 2045.
///
/// tspecials := "(" / ")" / "<" / ">" / "@" / "," / ";" / ":" / "\" /
///              <"> / "/" / "[" / "]" / "?" / "="
pub fn is_tspecial(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '='
    )
}

/// Reports whether the character is in 'token' as defined by RFC 2045.
///
/// token := 1*<any (US-ASCII) CHAR except SPACE, CTLs, or tspecials>
pub fn is_token_char(c: char) -> bool {
    c > '\x20' && c < '\x7f' && !is_tspecial(c)
}

/// Reports whether the string is a non-empty RFC 2045 'token'.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Reports whether the character may appear in a header name.
///
/// header-name-char := ALPHA / DIGIT / "!" / "#" / "$" / "%" / "&" / "'" /
///                     "*" / "+" / "-" / "^" / "_" / "`" / "|" / "~"
pub fn is_header_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '^' | '_' | '`' | '|' | '~'
        )
}

/// Reports whether the string is a valid header name.
pub fn is_header_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_header_name_char)
}
