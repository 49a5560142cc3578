//! Top-level email messages.

use crate::content::Content;
use crate::contracts::{MailMessage, MimePart};
use crate::header::Header;
use crate::headers::HasHeaders;
use crate::part::{Part, DEFAULT_CONTENT_TRANSFER_ENCODING, DEFAULT_CONTENT_TYPE};
use crate::parts::HasParts;
use once_cell::sync::OnceCell;

/// One or many email addresses.
///
/// Implemented for single strings and for slices, arrays and vectors of
/// strings, so `with_to("a@example.com")` and
/// `with_to(["a@example.com", "b@example.com"])` both work.
pub trait IntoAddressList {
    /// Converts into owned addresses, keeping order and duplicates.
    fn into_addresses(self) -> Vec<String>;
}

impl IntoAddressList for &str {
    fn into_addresses(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoAddressList for String {
    fn into_addresses(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoAddressList for &String {
    fn into_addresses(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<T: AsRef<str>> IntoAddressList for &[T] {
    fn into_addresses(self) -> Vec<String> {
        self.iter().map(|a| a.as_ref().to_string()).collect()
    }
}

impl<T: AsRef<str>, const N: usize> IntoAddressList for [T; N] {
    fn into_addresses(self) -> Vec<String> {
        self.iter().map(|a| a.as_ref().to_string()).collect()
    }
}

impl<T: AsRef<str>> IntoAddressList for Vec<T> {
    fn into_addresses(self) -> Vec<String> {
        self.iter().map(|a| a.as_ref().to_string()).collect()
    }
}

/// An email message.
///
/// `to`, `cc`, `bcc`, `from` and `subject` all live in the header list and
/// keep the order they were set in. [`MimeBuilder`](crate::MimeBuilder)
/// leaves `bcc` headers out of its output.
///
/// # Examples
///
/// ```
/// use bead_mail::prelude::*;
/// use bead_mail::{Message, MimeBuilder};
///
/// let message = Message::compose("nobody@example.com", "Nothing", "Plain text content.");
/// let mime = MimeBuilder::new().mime(&message).unwrap();
/// assert!(mime.ends_with("\r\n\r\nPlain text content."));
/// ```
#[derive(Debug, Clone)]
pub struct Message {
    headers: Vec<Header>,
    content: Content,
    boundary: OnceCell<String>,
}

impl Message {
    /// Creates an empty `text/plain`, `quoted-printable` message.
    pub fn new() -> Self {
        Self {
            headers: vec![
                Header::trusted("content-type", DEFAULT_CONTENT_TYPE),
                Header::trusted("content-transfer-encoding", DEFAULT_CONTENT_TRANSFER_ENCODING),
            ],
            content: Content::Empty,
            boundary: OnceCell::new(),
        }
    }

    /// Creates a message with one recipient, a subject and a body.
    pub fn compose(to: &str, subject: &str, body: &str) -> Self {
        Self::new().with_to(to).with_subject(subject).with_body(body)
    }

    /// Returns a copy with more `to` addresses appended.
    #[must_use]
    pub fn with_to(&self, addresses: impl IntoAddressList) -> Self {
        self.with_address_headers("to", addresses)
    }

    /// Returns a copy with more `cc` addresses appended.
    #[must_use]
    pub fn with_cc(&self, addresses: impl IntoAddressList) -> Self {
        self.with_address_headers("cc", addresses)
    }

    /// Returns a copy with more `bcc` addresses appended.
    #[must_use]
    pub fn with_bcc(&self, addresses: impl IntoAddressList) -> Self {
        self.with_address_headers("bcc", addresses)
    }

    /// Returns a copy with the sender replaced.
    #[must_use]
    pub fn with_from(&self, from: &str) -> Self {
        self.with_header(Header::trusted("from", from))
    }

    /// Returns a copy with the subject replaced.
    #[must_use]
    pub fn with_subject(&self, subject: &str) -> Self {
        self.with_header(Header::trusted("subject", subject))
    }

    fn with_address_headers(&self, name: &str, addresses: impl IntoAddressList) -> Self {
        let mut next = self.clone();
        next.headers.extend(
            addresses
                .into_addresses()
                .into_iter()
                .map(|address| Header::trusted(name, address)),
        );
        next
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl MimePart for Message {
    fn headers(&self) -> &[Header] {
        &self.headers
    }

    fn body(&self) -> Option<&str> {
        self.content.body()
    }

    fn parts(&self) -> &[Part] {
        self.content.parts()
    }

    fn as_message(&self) -> Option<&dyn MailMessage> {
        Some(self)
    }
}

impl MailMessage for Message {
    fn to(&self) -> Vec<&str> {
        self.header_values("to")
    }

    fn cc(&self) -> Vec<&str> {
        self.header_values("cc")
    }

    fn bcc(&self) -> Vec<&str> {
        self.header_values("bcc")
    }

    fn from(&self) -> Option<&str> {
        self.header("from").map(Header::value)
    }

    fn subject(&self) -> Option<&str> {
        self.header("subject").map(Header::value)
    }

    fn as_mime_part(&self) -> &dyn MimePart {
        self
    }
}

impl HasHeaders for Message {
    fn headers_mut(&mut self) -> &mut Vec<Header> {
        &mut self.headers
    }
}

impl HasParts for Message {
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
