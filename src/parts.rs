//! Nested parts and multipart boundaries shared by messages and parts.

use crate::builder::LineEnd;
use crate::content::Content;
use crate::encoding::base64_lines;
use crate::error::{Error, Result};
use crate::grammar::is_token;
use crate::header::Header;
use crate::headers::HasHeaders;
use crate::media_type::{parse_media_type, quote};
use crate::mime_type::type_by_filename;
use crate::part::{Part, DEFAULT_CONTENT_TRANSFER_ENCODING, DEFAULT_CONTENT_TYPE};
use once_cell::sync::OnceCell;
use uuid::Uuid;

/// Prefix of every generated multipart boundary.
pub const BOUNDARY_PREFIX: &str = "bead-multipart-boundary-";

/// Content type used for attachments whose file name gives no hint.
pub const FALLBACK_ATTACHMENT_TYPE: &str = "application/octet-stream";

/// Body and sub-part management for messages and parts.
pub trait HasParts: HasHeaders {
    /// Mutable access to the content.
    #[doc(hidden)]
    fn content_mut(&mut self) -> &mut Content;

    /// The lazily generated boundary slot.
    #[doc(hidden)]
    fn boundary_cell(&self) -> &OnceCell<String>;

    /// The body or parts.
    fn content(&self) -> &Content;

    /// Number of nested parts.
    fn part_count(&self) -> usize {
        self.content().parts().len()
    }

    /// Returns a copy with `part` appended. Any scalar body is dropped.
    #[must_use]
    fn with_part(&self, part: Part) -> Self {
        let mut next = self.clone();
        next.content_mut().push_part(part);
        next
    }

    /// Returns a copy with a part built from raw content appended.
    ///
    /// `None` for the type or encoding uses the [`Part`] defaults.
    fn with_part_content(
        &self,
        content: &str,
        content_type: Option<&str>,
        content_transfer_encoding: Option<&str>,
    ) -> Result<Self> {
        let part = Part::typed(
            content,
            content_type.unwrap_or(DEFAULT_CONTENT_TYPE),
            content_transfer_encoding.unwrap_or(DEFAULT_CONTENT_TRANSFER_ENCODING),
        )?;
        Ok(self.with_part(part))
    }

    /// Returns a copy with an attachment part appended.
    ///
    /// The part carries `content-disposition: attachment; filename="..."`.
    /// The content must already be encoded as `content_transfer_encoding`
    /// says.
    fn with_attachment(
        &self,
        content: &str,
        content_type: &str,
        content_transfer_encoding: &str,
        filename: &str,
    ) -> Result<Self> {
        let disposition = Header::trusted("content-disposition", "attachment")
            .with_parameter("filename", quote(filename));
        let part = Part::typed(content, content_type, content_transfer_encoding)?
            .with_header(disposition);
        Ok(self.with_part(part))
    }

    /// Returns a copy with raw bytes attached as a base64 part.
    ///
    /// The content type is guessed from the file name's extension.
    fn with_file_attachment(
        &self,
        bytes: &[u8],
        filename: &str,
        line_end: LineEnd,
    ) -> Result<Self> {
        let content_type = type_by_filename(filename)
            .unwrap_or_else(|| FALLBACK_ATTACHMENT_TYPE.to_string());
        self.with_attachment(&base64_lines(bytes, line_end), &content_type, "base64", filename)
    }

    /// Returns a copy with a scalar body. Any parts are dropped.
    #[must_use]
    fn with_body(&self, body: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.content_mut() = Content::Body(body.into());
        next
    }

    /// Returns a copy with the scalar body removed. Parts are kept.
    #[must_use]
    fn without_body(&self) -> Self {
        let mut next = self.clone();
        if let Content::Body(_) = next.content() {
            *next.content_mut() = Content::Empty;
        }
        next
    }

    /// The boundary for this value's multipart body.
    ///
    /// Generated on first call and then fixed for this value and every
    /// copy derived from it afterwards.
    fn multipart_boundary(&self) -> &str {
        self.boundary_cell().get_or_init(generate_boundary)
    }

    /// The content type, `text/plain` when the header is missing.
    fn content_type(&self) -> &str {
        self.header("content-type")
            .map_or(DEFAULT_CONTENT_TYPE, Header::value)
    }

    /// The content transfer encoding, `quoted-printable` when the header is
    /// missing.
    fn content_transfer_encoding(&self) -> &str {
        self.header("content-transfer-encoding")
            .map_or(DEFAULT_CONTENT_TRANSFER_ENCODING, Header::value)
    }

    /// Returns a copy with a new content type.
    ///
    /// Accepts a bare media type or one with parameters, e.g.
    /// `multipart/mixed; boundary=xyz`.
    fn with_content_type(&self, content_type: &str) -> Result<Self> {
        Ok(self.with_header(content_type_header(content_type)?))
    }

    /// Returns a copy with `multipart/{subtype}` and this value's boundary.
    fn with_multipart_content_type(&self, subtype: &str) -> Result<Self> {
        if !is_token(subtype) {
            return Err(Error::invalid_argument(format!(
                "Expected valid multipart subtype, found \"{}\"",
                subtype
            )));
        }
        let media_type = format!("multipart/{}", subtype.to_lowercase());
        let header = Header::trusted("content-type", media_type)
            .with_parameter("boundary", self.multipart_boundary());
        Ok(self.with_header(header))
    }

    /// Returns a copy with a new content transfer encoding.
    fn with_content_transfer_encoding(&self, encoding: &str) -> Result<Self> {
        Ok(self.with_header(content_transfer_encoding_header(encoding)?))
    }

    /// Returns a copy keeping only the content-type and
    /// content-transfer-encoding headers.
    #[must_use]
    fn clear_headers(&self) -> Self {
        let mut next = self.clone();
        next.headers_mut().retain(|header| {
            header.is_named("content-type") || header.is_named("content-transfer-encoding")
        });
        next
    }
}

pub(crate) fn content_type_header(content_type: &str) -> Result<Header> {
    let (media_type, params) = parse_media_type(content_type)?;
    Header::with_parameters("content-type", media_type, params.iter())
}

pub(crate) fn content_transfer_encoding_header(encoding: &str) -> Result<Header> {
    let trimmed = encoding.trim();
    if trimmed.is_empty() || trimmed.contains(['\r', '\n']) {
        return Err(Error::invalid_argument(format!(
            "Expected valid content transfer encoding, found \"{}\"",
            encoding
        )));
    }
    Ok(Header::trusted("content-transfer-encoding", trimmed))
}

/// Generates a fresh boundary token.
///
/// A random UUID keeps the token out of any realistic body text and well
/// under the 70 character limit of RFC 2046.
pub fn generate_boundary() -> String {
    format!("{}{}", BOUNDARY_PREFIX, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::MimePart;

    #[test]
    fn test_generate_boundary() {
        let a = generate_boundary();
        let b = generate_boundary();
        assert!(a.starts_with(BOUNDARY_PREFIX));
        assert!(a.len() <= 70);
        assert_ne!(a, b);
    }

    #[test]
    fn test_multipart_boundary_is_memoized() {
        let part = Part::default();
        let first = part.multipart_boundary().to_string();
        assert_eq!(part.multipart_boundary(), first);

        let derived = part.with_part(Part::new("child"));
        assert_eq!(derived.multipart_boundary(), first);
    }

    #[test]
    fn test_boundaries_differ_between_fresh_values() {
        let a = Part::default();
        let b = Part::default();
        assert_ne!(a.multipart_boundary(), b.multipart_boundary());
    }

    #[test]
    fn test_with_part_content_defaults() {
        let part = Part::default()
            .with_part_content("hello", None, None)
            .unwrap()
            .with_part_content("<p>hi</p>", Some("text/html"), Some("8bit"))
            .unwrap();

        assert_eq!(part.part_count(), 2);
        assert_eq!(part.parts()[0].content_type(), "text/plain");
        assert_eq!(part.parts()[0].content_transfer_encoding(), "quoted-printable");
        assert_eq!(part.parts()[1].content_type(), "text/html");
        assert_eq!(part.parts()[1].content_transfer_encoding(), "8bit");

        assert!(Part::default()
            .with_part_content("x", Some("nonsense"), None)
            .is_err());
    }

    #[test]
    fn test_with_attachment() {
        let part = Part::default()
            .with_attachment("aGVsbG8=", "application/pdf", "base64", "report.pdf")
            .unwrap();
        let attachment = &part.parts()[0];

        assert_eq!(
            attachment.header("content-disposition").unwrap().line(),
            "content-disposition: attachment; filename=\"report.pdf\""
        );
        assert_eq!(attachment.body(), Some("aGVsbG8="));
    }

    #[test]
    fn test_with_file_attachment() {
        let part = Part::default()
            .with_file_attachment(b"col\n1\n", "data.csv", LineEnd::Crlf)
            .unwrap()
            .with_file_attachment(&[0u8, 1, 2], "blob.unknownext", LineEnd::Crlf)
            .unwrap();

        assert_eq!(part.parts()[0].content_type(), "text/csv");
        assert_eq!(part.parts()[0].content_transfer_encoding(), "base64");
        assert_eq!(part.parts()[0].body(), Some("Y29sCjEK"));
        assert_eq!(part.parts()[1].content_type(), FALLBACK_ATTACHMENT_TYPE);
    }

    #[test]
    fn test_body_and_parts_exclusive() {
        let with_parts = Part::new("text").with_part(Part::new("child"));
        assert_eq!(with_parts.body(), None);
        assert_eq!(with_parts.part_count(), 1);

        let with_body = with_parts.with_body("again");
        assert_eq!(with_body.body(), Some("again"));
        assert_eq!(with_body.part_count(), 0);

        assert_eq!(with_body.without_body().body(), None);
        assert_eq!(with_parts.without_body().part_count(), 1);
    }

    #[test]
    fn test_with_content_type_and_parameters() {
        let part = Part::default()
            .with_content_type("Multipart/Alternative; boundary=abc")
            .unwrap();
        assert_eq!(part.content_type(), "multipart/alternative");
        assert_eq!(
            part.header("content-type").unwrap().parameter("boundary"),
            Some("abc")
        );

        let err = Part::default().with_content_type("plain").unwrap_err();
        assert!(err.to_string().contains("\"plain\""));
    }

    #[test]
    fn test_with_multipart_content_type() {
        let part = Part::default().with_multipart_content_type("mixed").unwrap();
        let header = part.header("content-type").unwrap();
        assert_eq!(header.value(), "multipart/mixed");
        assert_eq!(header.parameter("boundary"), Some(part.multipart_boundary()));

        assert!(Part::default().with_multipart_content_type("a/b").is_err());
    }

    #[test]
    fn test_with_content_transfer_encoding() {
        let part = Part::default().with_content_transfer_encoding("base64").unwrap();
        assert_eq!(part.content_transfer_encoding(), "base64");

        assert!(Part::default().with_content_transfer_encoding("").is_err());
        assert!(Part::default().with_content_transfer_encoding("  ").is_err());
        assert!(Part::default()
            .with_content_transfer_encoding("8bit\r\nx-evil: 1")
            .is_err());
    }

    #[test]
    fn test_clear_headers_keeps_content_pair() {
        let part = Part::default()
            .with_header_value("x-a", "1")
            .unwrap()
            .with_header_value("content-id", "<1@example.com>")
            .unwrap()
            .clear_headers();

        let names: Vec<_> = part.headers().iter().map(Header::name).collect();
        assert_eq!(names, vec!["content-type", "content-transfer-encoding"]);
    }

    #[test]
    fn test_content_accessors_default_when_missing() {
        let part = Part::default()
            .without_header("content-type")
            .without_header("content-transfer-encoding");
        assert_eq!(part.content_type(), DEFAULT_CONTENT_TYPE);
        assert_eq!(part.content_transfer_encoding(), DEFAULT_CONTENT_TRANSFER_ENCODING);
    }
}
