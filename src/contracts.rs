//! Read-only contracts for messages, parts and renderers.
//!
//! [`MimeBuilder`](crate::MimeBuilder) and the transports only talk to these
//! traits, so other message implementations can be rendered and sent.

use crate::error::MimeResult;
use crate::header::Header;
use crate::part::Part;

/// Anything that renders as a MIME entity: headers plus a body or parts.
pub trait MimePart {
    /// All headers in insertion order.
    fn headers(&self) -> &[Header];

    /// The scalar body, if the entity has one.
    fn body(&self) -> Option<&str>;

    /// The nested parts, if any.
    fn parts(&self) -> &[Part];

    /// Returns `Some` when the entity is a top-level message.
    fn as_message(&self) -> Option<&dyn MailMessage> {
        None
    }
}

/// A top-level email message.
pub trait MailMessage: MimePart {
    /// `to` addresses in the order they were added.
    fn to(&self) -> Vec<&str>;

    /// `cc` addresses in the order they were added.
    fn cc(&self) -> Vec<&str>;

    /// `bcc` addresses in the order they were added.
    fn bcc(&self) -> Vec<&str>;

    /// The sender, if set.
    fn from(&self) -> Option<&str>;

    /// The subject, if set.
    fn subject(&self) -> Option<&str>;

    /// The message viewed as a plain MIME entity.
    fn as_mime_part(&self) -> &dyn MimePart;

    /// Every envelope recipient: to, then cc, then bcc.
    fn recipients(&self) -> Vec<&str> {
        let mut all = self.to();
        all.extend(self.cc());
        all.extend(self.bcc());
        all
    }
}

/// A message viewed through its multipart layout.
///
/// Implemented for every sized [`MailMessage`]. The parts themselves are read
/// through [`MimePart::parts`].
pub trait MultipartMessage: MailMessage {
    /// Whether the content-type header names a `multipart/*` type.
    fn is_multipart(&self) -> bool {
        content_type(self)
            .is_some_and(|h| h.value().to_ascii_lowercase().starts_with("multipart/"))
    }

    /// The `boundary` parameter of the content-type header, if any.
    fn boundary(&self) -> Option<&str> {
        content_type(self).and_then(|h| h.parameter("boundary"))
    }
}

impl<T: MailMessage> MultipartMessage for T {}

fn content_type<T: MimePart + ?Sized>(part: &T) -> Option<&Header> {
    part.headers().iter().find(|h| h.is_named("content-type"))
}

/// Turns messages and parts into MIME text.
pub trait MimeRenderer {
    /// Renders a whole message: headers, blank line, body.
    fn mime(&self, message: &dyn MailMessage) -> MimeResult<String>;

    /// Renders the header block of a message or part.
    fn headers(&self, part: &dyn MimePart) -> String;

    /// Renders the body of a message or part.
    fn body(&self, part: &dyn MimePart) -> MimeResult<String>;
}
