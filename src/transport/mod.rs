//! Delivery of rendered messages.
//!
//! A [`Transport`] renders a message through a [`MimeRenderer`] and hands
//! the text to some sink. Rendering failures surface as
//! [`TransportError::Mime`].

mod log;
mod sendmail;
mod stream;

pub use self::log::LogTransport;
pub use self::sendmail::SendmailTransport;
pub use self::stream::StreamTransport;

use crate::builder::MimeBuilder;
use crate::contracts::{MailMessage, MimeRenderer};
use crate::error::TransportError;
use std::future::Future;

/// Renderer shared by the transports.
pub type BoxedRenderer = Box<dyn MimeRenderer + Send + Sync>;

/// Sends messages somewhere.
pub trait Transport {
    /// Renders and delivers `message`.
    fn send(
        &self,
        message: &(dyn MailMessage + Sync),
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

pub(crate) fn default_renderer() -> BoxedRenderer {
    Box::new(MimeBuilder::new())
}

/// Renders a message, wrapping rendering errors for the transport layer.
pub(crate) fn render(
    renderer: &dyn MimeRenderer,
    message: &dyn MailMessage,
) -> Result<String, TransportError> {
    Ok(renderer.mime(message)?)
}

/// Builds a delivery error carrying the message's envelope.
pub(crate) fn delivery_error(message: &dyn MailMessage, reason: impl ToString) -> TransportError {
    TransportError::Delivery {
        recipients: message.recipients().join(", "),
        subject: message.subject().unwrap_or_default().to_string(),
        reason: reason.to_string(),
    }
}
