//! A single MIME body segment.

use crate::content::Content;
use crate::contracts::MimePart;
use crate::error::Result;
use crate::header::Header;
use crate::headers::HasHeaders;
use crate::parts::{content_transfer_encoding_header, content_type_header, HasParts};
use once_cell::sync::OnceCell;

/// Content type of a part created without one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Transfer encoding of a part created without one.
pub const DEFAULT_CONTENT_TRANSFER_ENCODING: &str = "quoted-printable";

/// One segment of a message body: headers plus a body or nested parts.
///
/// Parts are values; all `with*` methods (from [`HasHeaders`] and
/// [`HasParts`]) return a new part.
///
/// # Examples
///
/// ```
/// use bead_mail::prelude::*;
/// use bead_mail::Part;
///
/// let part = Part::typed("<p>Hi</p>", "text/html", "8bit").unwrap();
/// assert_eq!(part.content_type(), "text/html");
/// assert_eq!(part.body(), Some("<p>Hi</p>"));
/// ```
#[derive(Debug, Clone)]
pub struct Part {
    headers: Vec<Header>,
    content: Content,
    boundary: OnceCell<String>,
}

impl Part {
    /// Creates a `text/plain`, `quoted-printable` part with a body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            content: Content::Body(body.into()),
            ..Self::default()
        }
    }

    /// Creates a part with an explicit content type and encoding.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// if the content type is not a `type/subtype` media type or the
    /// encoding is empty.
    pub fn typed(
        body: impl Into<String>,
        content_type: &str,
        content_transfer_encoding: &str,
    ) -> Result<Self> {
        Ok(Self {
            headers: vec![
                content_type_header(content_type)?,
                content_transfer_encoding_header(content_transfer_encoding)?,
            ],
            content: Content::Body(body.into()),
            boundary: OnceCell::new(),
        })
    }
}

impl Default for Part {
    /// An empty `text/plain`, `quoted-printable` part.
    fn default() -> Self {
        Self {
            headers: vec![
                Header::trusted("content-type", DEFAULT_CONTENT_TYPE),
                Header::trusted("content-transfer-encoding", DEFAULT_CONTENT_TRANSFER_ENCODING),
            ],
            content: Content::Empty,
            boundary: OnceCell::new(),
        }
    }
}

impl MimePart for Part {
    fn headers(&self) -> &[Header] {
        &self.headers
    }

    fn body(&self) -> Option<&str> {
        self.content.body()
    }

    fn parts(&self) -> &[Part] {
        self.content.parts()
    }
}

impl HasHeaders for Part {
    fn headers_mut(&mut self) -> &mut Vec<Header> {
        &mut self.headers
    }
}

impl HasParts for Part {
    fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    fn boundary_cell(&self) -> &OnceCell<String> {
        &self.boundary
    }

    fn content(&self) -> &Content {
        &self.content
    }
}
