//! Error types for the bead-mail crate.

use std::io;
use thiserror::Error;

/// The main error type for the bead-mail crate.
#[derive(Error, Debug)]
pub enum Error {
    /// A value passed to a constructor or `with_*` method was rejected.
    #[error("{0}")]
    InvalidArgument(String),

    /// The message tree could not be rendered.
    #[error(transparent)]
    Mime(#[from] MimeError),

    /// A transport failed to deliver a message.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

/// Specialized Result type for bead-mail operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural problems found while rendering a message or part.
///
/// These are deferred checks: a tree can be valid to build but still
/// incomplete when it is handed to [`MimeBuilder`](crate::MimeBuilder).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MimeError {
    /// No `content-type` header.
    #[error("The message or part has no content-type header.")]
    MissingContentType,

    /// No `content-transfer-encoding` header.
    #[error("The message or part has no content-transfer-encoding header.")]
    MissingContentTransferEncoding,

    /// A message with no to, cc or bcc addresses.
    #[error("The message has no recipients.")]
    NoRecipients,

    /// Neither a body nor any parts.
    #[error("Message or part has no parts or body.")]
    NoContent,

    /// Several parts under a non-multipart content type.
    #[error("The message or part does not have a \"multipart/\" content type.")]
    NotMultipart,

    /// Multipart content type without a `boundary` parameter.
    #[error("The message or part has no boundary defined in the content-type header.")]
    MissingBoundary,

    /// The same boundary appears twice anywhere in the tree.
    #[error("Message contains duplicate part boundary \"{0}\".")]
    DuplicateBoundary(String),
}

/// Specialized Result type for rendering.
pub type MimeResult<T> = std::result::Result<T, MimeError>;

/// Errors raised by [`Transport`](crate::transport::Transport) implementations.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The message could not be rendered.
    #[error("Unable to generate MIME message: {0}")]
    Mime(#[from] MimeError),

    /// The sink refused or failed to accept the message.
    #[error("Unable to deliver message \"{subject}\" to {recipients}: {reason}")]
    Delivery {
        /// Comma-separated envelope recipients.
        recipients: String,
        /// Subject of the rejected message.
        subject: String,
        /// What went wrong.
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
