//! Renders messages and parts into MIME text.
//!
//! Output layout (RFC 822, RFC 2046):
//!
//! ```text
//! <header-line><line-end>     one per header except bcc, mime-version appended if absent
//! <line-end>
//! <body>                      raw body, or the multipart layout below
//! ```
//!
//! A multipart body is `<line-end>--<boundary><line-end><part-headers><line-end><part-body>`
//! per part, closed by `<line-end>--<boundary>--`.

use crate::contracts::{MailMessage, MimePart, MimeRenderer};
use crate::error::{Error, MimeError, MimeResult, Result};
use crate::header::Header;
use crate::media_type::unquote;
use std::collections::HashSet;
use std::fmt;

/// MIME versions this builder can declare.
pub const SUPPORTED_MIME_VERSIONS: &[&str] = &["1.0"];

/// Line terminator used for every line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnd {
    /// `\r\n`, as RFC 822 requires.
    #[default]
    Crlf,
    /// `\n`, for local delivery agents that expect Unix line ends.
    Lf,
}

impl LineEnd {
    /// The terminator itself.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnd::Crlf => "\r\n",
            LineEnd::Lf => "\n",
        }
    }
}

impl fmt::Display for LineEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds MIME text from a [`MailMessage`] or [`MimePart`] tree.
///
/// The builder only holds configuration; rendering never changes it.
///
/// # Examples
///
/// ```
/// use bead_mail::{Message, MimeBuilder};
///
/// let message = Message::compose("nobody@example.com", "Nothing", "Plain text content.");
/// let mime = MimeBuilder::new().with_lf_line_end().mime(&message).unwrap();
/// assert_eq!(
///     mime,
///     "content-type: text/plain\n\
///      content-transfer-encoding: quoted-printable\n\
///      to: nobody@example.com\n\
///      subject: Nothing\n\
///      mime-version: 1.0\n\
///      \n\
///      Plain text content."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeBuilder {
    mime_version: String,
    line_end: LineEnd,
}

impl MimeBuilder {
    /// Creates a builder for MIME 1.0 with RFC 822 line ends.
    pub fn new() -> Self {
        Self {
            mime_version: SUPPORTED_MIME_VERSIONS[0].to_string(),
            line_end: LineEnd::Crlf,
        }
    }

    /// Reports whether `version` can be passed to [`with_mime_version`](Self::with_mime_version).
    pub fn is_supported_mime_version(version: &str) -> bool {
        SUPPORTED_MIME_VERSIONS.contains(&version)
    }

    /// The MIME version declared in rendered messages.
    pub fn mime_version(&self) -> &str {
        &self.mime_version
    }

    /// The line terminator.
    pub fn line_end(&self) -> LineEnd {
        self.line_end
    }

    /// Returns a copy declaring a different MIME version.
    pub fn with_mime_version(&self, version: &str) -> Result<Self> {
        if !Self::is_supported_mime_version(version) {
            return Err(Error::invalid_argument(format!(
                "Expected supported MIME version, found \"{}\"",
                version
            )));
        }
        Ok(Self {
            mime_version: version.to_string(),
            ..self.clone()
        })
    }

    /// Returns a copy using the given line terminator.
    #[must_use]
    pub fn with_line_end(&self, line_end: LineEnd) -> Self {
        Self {
            line_end,
            ..self.clone()
        }
    }

    /// Returns a copy using `\n` line ends.
    #[must_use]
    pub fn with_lf_line_end(&self) -> Self {
        self.with_line_end(LineEnd::Lf)
    }

    /// Returns a copy using `\r\n` line ends.
    #[must_use]
    pub fn with_rfc822_line_end(&self) -> Self {
        self.with_line_end(LineEnd::Crlf)
    }

    /// Renders a complete message.
    ///
    /// A `mime-version` header is appended unless the message carries one.
    pub fn mime(&self, message: &dyn MailMessage) -> MimeResult<String> {
        let part = message.as_mime_part();
        let body = self.body(part)?;
        let eol = self.line_end.as_str();

        let mut mime = self.headers(part);
        if !part.headers().iter().any(|h| h.is_named("mime-version")) {
            mime.push_str(&Header::trusted("mime-version", self.mime_version.as_str()).line());
            mime.push_str(eol);
        }
        mime.push_str(eol);
        mime.push_str(&body);
        Ok(mime)
    }

    /// Renders each header followed by the line terminator, in order.
    ///
    /// `bcc` headers are never rendered.
    pub fn headers(&self, part: &dyn MimePart) -> String {
        let eol = self.line_end.as_str();
        part.headers()
            .iter()
            .filter(|header| !header.is_named("bcc"))
            .map(|header| header.line() + eol)
            .collect()
    }

    /// Renders the body of a message or part.
    ///
    /// Fails if the tree is incomplete or inconsistent; see [`MimeError`].
    pub fn body(&self, part: &dyn MimePart) -> MimeResult<String> {
        let mut boundaries = HashSet::new();
        self.render_body(part, &mut boundaries)
    }

    fn render_body(
        &self,
        part: &dyn MimePart,
        boundaries: &mut HashSet<String>,
    ) -> MimeResult<String> {
        let content_type =
            find_header(part, "content-type").ok_or(MimeError::MissingContentType)?;
        let encoding = find_header(part, "content-transfer-encoding")
            .ok_or(MimeError::MissingContentTransferEncoding)?;

        if let Some(message) = part.as_message() {
            if message.recipients().is_empty() {
                return Err(MimeError::NoRecipients);
            }
        }

        let parts = part.parts();
        if parts.is_empty() {
            return part
                .body()
                .map(str::to_string)
                .ok_or(MimeError::NoContent);
        }

        let is_multipart = content_type
            .value()
            .to_ascii_lowercase()
            .starts_with("multipart/");
        if !is_multipart {
            // A lone part is inlined only when the outer headers already describe it.
            let inline = &parts[0];
            if parts.len() > 1
                || find_header(inline, "content-type") != Some(content_type)
                || find_header(inline, "content-transfer-encoding") != Some(encoding)
            {
                return Err(MimeError::NotMultipart);
            }
            return self.render_body(inline, boundaries);
        }

        let boundary = content_type
            .parameter("boundary")
            .map(unquote)
            .filter(|b| !b.is_empty())
            .ok_or(MimeError::MissingBoundary)?;
        if !boundaries.insert(boundary.clone()) {
            return Err(MimeError::DuplicateBoundary(boundary));
        }

        let eol = self.line_end.as_str();
        let mut body = String::new();
        for sub_part in parts {
            body.push_str(eol);
            body.push_str("--");
            body.push_str(&boundary);
            body.push_str(eol);
            body.push_str(&self.headers(sub_part));
            body.push_str(eol);
            body.push_str(&self.render_body(sub_part, boundaries)?);
        }
        body.push_str(eol);
        body.push_str("--");
        body.push_str(&boundary);
        body.push_str("--");

        Ok(body)
    }
}

impl Default for MimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MimeRenderer for MimeBuilder {
    fn mime(&self, message: &dyn MailMessage) -> MimeResult<String> {
        MimeBuilder::mime(self, message)
    }

    fn headers(&self, part: &dyn MimePart) -> String {
        MimeBuilder::headers(self, part)
    }

    fn body(&self, part: &dyn MimePart) -> MimeResult<String> {
        MimeBuilder::body(self, part)
    }
}

fn find_header<'a>(part: &'a dyn MimePart, name: &str) -> Option<&'a Header> {
    part.headers().iter().find(|header| header.is_named(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::HasHeaders;
    use crate::message::Message;
    use crate::part::Part;
    use crate::parts::HasParts;

    const BOUNDARY: &str = "bead-multipart-boundary";

    fn plain_message() -> Message {
        Message::compose("nobody@example.com", "Nothing", "Plain text content.")
    }

    fn multipart_message() -> Message {
        Message::compose("nobody@example.com", "Parts", "")
            .with_content_type(&format!("multipart/mixed; boundary={}", BOUNDARY))
            .unwrap()
            .with_part(Part::new("The first part."))
            .with_part(Part::new("The second part."))
    }

    #[test]
    fn test_mime_plain_message() {
        let mime = MimeBuilder::new().mime(&plain_message()).unwrap();
        assert_eq!(
            mime,
            "content-type: text/plain\r\n\
             content-transfer-encoding: quoted-printable\r\n\
             to: nobody@example.com\r\n\
             subject: Nothing\r\n\
             mime-version: 1.0\r\n\
             \r\n\
             Plain text content."
        );
    }

    #[test]
    fn test_mime_keeps_existing_mime_version() {
        let message = plain_message().with_header_value("MIME-Version", "1.0").unwrap();
        let mime = MimeBuilder::new().mime(&message).unwrap();
        assert_eq!(mime.matches("ersion: 1.0").count(), 1);
        assert!(mime.contains("MIME-Version: 1.0\r\n\r\n"));
    }

    #[test]
    fn test_lf_line_end_only_changes_terminators() {
        let message = multipart_message();
        let crlf = MimeBuilder::new().mime(&message).unwrap();
        let lf = MimeBuilder::new().with_lf_line_end().mime(&message).unwrap();
        assert_eq!(lf, crlf.replace("\r\n", "\n"));

        let back = MimeBuilder::new().with_lf_line_end().with_rfc822_line_end();
        assert_eq!(back.mime(&message).unwrap(), crlf);
    }

    #[test]
    fn test_multipart_body() {
        let body = MimeBuilder::new().body(&multipart_message()).unwrap();
        assert_eq!(
            body,
            "\r\n--bead-multipart-boundary\r\n\
             content-type: text/plain\r\n\
             content-transfer-encoding: quoted-printable\r\n\
             \r\n\
             The first part.\r\n\
             --bead-multipart-boundary\r\n\
             content-type: text/plain\r\n\
             content-transfer-encoding: quoted-printable\r\n\
             \r\n\
             The second part.\r\n\
             --bead-multipart-boundary--"
        );
    }

    #[test]
    fn test_nested_multipart() {
        let alternative = Part::default()
            .with_content_type("multipart/alternative; boundary=inner")
            .unwrap()
            .with_part(Part::new("text"))
            .with_part(Part::typed("<p>html</p>", "text/html", "8bit").unwrap());
        let message = Message::compose("a@example.com", "s", "")
            .with_content_type("multipart/mixed; boundary=outer")
            .unwrap()
            .with_part(alternative)
            .with_part(Part::new("footer"));

        let body = MimeBuilder::new().with_lf_line_end().body(&message).unwrap();
        assert_eq!(
            body,
            "\n--outer\n\
             content-type: multipart/alternative; boundary=inner\n\
             content-transfer-encoding: quoted-printable\n\
             \n\
             \n--inner\n\
             content-type: text/plain\n\
             content-transfer-encoding: quoted-printable\n\
             \n\
             text\n\
             --inner\n\
             content-type: text/html\n\
             content-transfer-encoding: 8bit\n\
             \n\
             <p>html</p>\n\
             --inner--\n\
             --outer\n\
             content-type: text/plain\n\
             content-transfer-encoding: quoted-printable\n\
             \n\
             footer\n\
             --outer--"
        );
    }

    #[test]
    fn test_quoted_boundary_is_unquoted() {
        let message = multipart_message()
            .with_content_type("multipart/mixed; boundary=\"quoted b\"")
            .unwrap();
        let body = MimeBuilder::new().body(&message).unwrap();
        assert!(body.starts_with("\r\n--quoted b\r\n"));
        assert!(body.ends_with("\r\n--quoted b--"));
    }

    #[test]
    fn test_duplicate_boundary_in_nested_parts() {
        let nested = |text: &str| {
            Part::default()
                .with_content_type("multipart/alternative; boundary=B")
                .unwrap()
                .with_part(Part::new(text))
                .with_part(Part::new(text))
        };
        let message = Message::compose("a@example.com", "s", "")
            .with_content_type("multipart/mixed; boundary=outer")
            .unwrap()
            .with_part(nested("one"))
            .with_part(nested("two"));

        let err = MimeBuilder::new().mime(&message).unwrap_err();
        assert_eq!(err, MimeError::DuplicateBoundary("B".to_string()));
        assert_eq!(err.to_string(), "Message contains duplicate part boundary \"B\".");
    }

    #[test]
    fn test_duplicate_boundary_with_top_level() {
        let inner = Part::default()
            .with_content_type("multipart/alternative; boundary=same")
            .unwrap()
            .with_part(Part::new("a"))
            .with_part(Part::new("b"));
        let message = Message::compose("a@example.com", "s", "")
            .with_content_type("multipart/mixed; boundary=same")
            .unwrap()
            .with_part(inner)
            .with_part(Part::new("c"));

        assert_eq!(
            MimeBuilder::new().body(&message),
            Err(MimeError::DuplicateBoundary("same".to_string()))
        );
    }

    #[test]
    fn test_generated_boundaries_render() {
        let inner = Part::default()
            .with_multipart_content_type("alternative")
            .unwrap()
            .with_part(Part::new("a"))
            .with_part(Part::new("b"));
        let message = Message::compose("a@example.com", "s", "")
            .with_multipart_content_type("mixed")
            .unwrap()
            .with_part(inner.clone())
            .with_part(Part::new("c"));

        let body = MimeBuilder::new().body(&message).unwrap();
        assert!(body.starts_with(&format!("\r\n--{}\r\n", message.multipart_boundary())));
        assert!(body.contains(&format!("--{}--", inner.multipart_boundary())));
    }

    #[test]
    fn test_missing_recipients() {
        let err = MimeBuilder::new().body(&Message::new()).unwrap_err();
        assert_eq!(err, MimeError::NoRecipients);
        assert_eq!(err.to_string(), "The message has no recipients.");
    }

    #[test]
    fn test_bcc_only_counts_as_recipient() {
        let message = Message::new().with_bcc("hidden@example.com").with_body("x");
        let mime = MimeBuilder::new().mime(&message).unwrap();
        assert!(!mime.contains("hidden@example.com"));
    }

    #[test]
    fn test_missing_content_headers() {
        let message = plain_message().without_header("content-type");
        assert_eq!(MimeBuilder::new().mime(&message), Err(MimeError::MissingContentType));

        let message = plain_message().without_header("CONTENT-TRANSFER-ENCODING");
        assert_eq!(
            MimeBuilder::new().mime(&message),
            Err(MimeError::MissingContentTransferEncoding)
        );
    }

    #[test]
    fn test_part_needs_no_recipients() {
        let body = MimeBuilder::new().body(&Part::new("just a part")).unwrap();
        assert_eq!(body, "just a part");
    }

    #[test]
    fn test_no_body_or_parts() {
        let message = Message::new().with_to("a@example.com");
        assert_eq!(MimeBuilder::new().body(&message), Err(MimeError::NoContent));
        assert_eq!(MimeBuilder::new().body(&Part::default()), Err(MimeError::NoContent));
    }

    #[test]
    fn test_empty_body_is_content() {
        let message = Message::compose("a@example.com", "s", "");
        assert_eq!(MimeBuilder::new().body(&message), Ok(String::new()));
    }

    #[test]
    fn test_several_parts_need_multipart_type() {
        let message = plain_message()
            .with_part(Part::new("a"))
            .with_part(Part::new("b"));
        assert_eq!(MimeBuilder::new().body(&message), Err(MimeError::NotMultipart));
    }

    #[test]
    fn test_multipart_needs_boundary() {
        let message = multipart_message().with_content_type("multipart/mixed").unwrap();
        assert_eq!(MimeBuilder::new().body(&message), Err(MimeError::MissingBoundary));

        let message = multipart_message()
            .with_content_type("multipart/mixed; boundary=\"\"")
            .unwrap();
        assert_eq!(MimeBuilder::new().body(&message), Err(MimeError::MissingBoundary));
    }

    #[test]
    fn test_single_part_without_multipart_type_renders_inline() {
        let message = plain_message().with_part(Part::new("only part"));
        assert_eq!(MimeBuilder::new().body(&message), Ok("only part".to_string()));
    }

    #[test]
    fn test_single_part_with_other_type_needs_multipart() {
        let html = Part::typed("PGI+aGk8L2I+", "text/html", "base64").unwrap();
        let message = plain_message().with_part(html);
        assert_eq!(MimeBuilder::new().body(&message), Err(MimeError::NotMultipart));

        let encoded = Part::new("only part").with_content_transfer_encoding("base64").unwrap();
        let message = plain_message().with_part(encoded);
        assert_eq!(MimeBuilder::new().body(&message), Err(MimeError::NotMultipart));
    }

    #[test]
    fn test_bcc_headers_are_not_rendered() {
        let message = plain_message()
            .with_bcc("hidden@example.com")
            .with_header_value("BCC", "upper@example.com")
            .unwrap();
        let builder = MimeBuilder::new();
        assert!(!builder.headers(&message).to_ascii_lowercase().contains("bcc"));
        let mime = builder.mime(&message).unwrap();
        assert!(!mime.contains("hidden@example.com"));
        assert!(!mime.contains("upper@example.com"));
        assert_eq!(message.bcc(), vec!["hidden@example.com", "upper@example.com"]);
    }

    #[test]
    fn test_single_part_under_multipart_type() {
        let message = multipart_message()
            .without_body()
            .with_body("x")
            .with_part(Part::new("solo"));
        let body = MimeBuilder::new().body(&message).unwrap();
        assert!(body.starts_with("\r\n--bead-multipart-boundary\r\n"));
        assert!(body.ends_with("solo\r\n--bead-multipart-boundary--"));
    }

    #[test]
    fn test_mime_version_configuration() {
        assert!(MimeBuilder::is_supported_mime_version("1.0"));
        assert!(!MimeBuilder::is_supported_mime_version("2.0"));

        let builder = MimeBuilder::new().with_mime_version("1.0").unwrap();
        assert_eq!(builder.mime_version(), "1.0");

        let err = MimeBuilder::new().with_mime_version("2.0").unwrap_err();
        assert_eq!(err.to_string(), "Expected supported MIME version, found \"2.0\"");
    }

    #[test]
    fn test_line_end_toggles_leave_receiver() {
        let builder = MimeBuilder::new();
        let lf = builder.with_lf_line_end();
        assert_eq!(builder.line_end(), LineEnd::Crlf);
        assert_eq!(lf.line_end(), LineEnd::Lf);
        assert_eq!(lf.mime_version(), builder.mime_version());
    }

    #[test]
    fn test_renderer_trait_object() {
        let renderer: &dyn MimeRenderer = &MimeBuilder::new();
        let message = plain_message();
        assert_eq!(renderer.body(&message).unwrap(), "Plain text content.");
        assert!(renderer.headers(&message).starts_with("content-type: text/plain\r\n"));
        assert!(renderer.mime(&message).unwrap().ends_with("Plain text content."));
    }
}
