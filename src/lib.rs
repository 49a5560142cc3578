//! Immutable email messages and a MIME builder.
//!
//! This crate provides:
//! - [`Header`] values and ordered header collections ([`HasHeaders`])
//! - [`Message`] and [`Part`] trees with nested multipart bodies ([`HasParts`])
//! - [`MimeBuilder`], which renders a tree into RFC 822 / RFC 2046 text
//! - Quoted-printable and base64 body encoders
//! - Async transports that render and deliver messages
//!
//! Every value is immutable: `with_*` methods return a modified copy.
//!
//! ```
//! use bead_mail::prelude::*;
//! use bead_mail::{Message, MimeBuilder, Part};
//!
//! let message = Message::compose("nobody@example.com", "Report", "")
//!     .with_from("reports@example.com")
//!     .with_multipart_content_type("mixed")?
//!     .with_part(Part::new("See attached."))
//!     .with_attachment("aGVsbG8=", "application/pdf", "base64", "report.pdf")?;
//!
//! let mime = MimeBuilder::new().mime(&message)?;
//! assert!(mime.contains("filename=\"report.pdf\""));
//! # Ok::<(), bead_mail::Error>(())
//! ```

pub mod builder;
pub mod content;
pub mod contracts;
pub mod encoding;
pub mod error;
pub mod grammar;
pub mod header;
pub mod headers;
pub mod media_type;
pub mod message;
pub mod mime_type;
pub mod part;
pub mod parts;
pub mod transport;

/// The traits needed to call `with_*` methods and read messages.
pub mod prelude {
    pub use crate::contracts::{MailMessage, MimePart, MimeRenderer, MultipartMessage};
    pub use crate::headers::HasHeaders;
    pub use crate::parts::HasParts;
    pub use crate::transport::Transport;
}

// Re-export commonly used types
pub use builder::{LineEnd, MimeBuilder};
pub use content::Content;
pub use error::{Error, MimeError, MimeResult, Result, TransportError};
pub use header::{Header, Parameters};
pub use headers::{HeaderSelector, SINGLE_USE_HEADERS};
pub use media_type::parse_media_type;
pub use message::{IntoAddressList, Message};
pub use mime_type::{add_extension_type, type_by_extension};
pub use part::Part;
