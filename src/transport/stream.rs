//! A transport that appends messages to an async byte stream.

use super::{default_renderer, delivery_error, render, BoxedRenderer, Transport};
use crate::builder::LineEnd;
use crate::contracts::{MailMessage, MimeRenderer};
use crate::error::TransportError;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Writes each message to a stream, followed by a blank line.
///
/// Any [`AsyncWrite`] works: a file opened for appending, a socket, or a
/// `Vec<u8>` in tests. Concurrent sends are serialized so messages never
/// interleave.
pub struct StreamTransport<W> {
    writer: Mutex<W>,
    separator: LineEnd,
    renderer: BoxedRenderer,
}

impl<W: AsyncWrite + Unpin + Send> StreamTransport<W> {
    /// Creates a transport writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            separator: LineEnd::Crlf,
            renderer: default_renderer(),
        }
    }

    /// Renders with a different renderer.
    pub fn with_renderer(mut self, renderer: impl MimeRenderer + Send + Sync + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Sets the line end used for the blank line between messages.
    pub fn with_separator(mut self, separator: LineEnd) -> Self {
        self.separator = separator;
        self
    }

    /// Consumes the transport, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    async fn write_message(&self, mime: &str) -> std::io::Result<()> {
        let eol = self.separator.as_str();
        let mut writer = self.writer.lock().await;
        writer.write_all(mime.as_bytes()).await?;
        writer.write_all(eol.as_bytes()).await?;
        writer.write_all(eol.as_bytes()).await?;
        writer.flush().await
    }
}

impl<W: AsyncWrite + Unpin + Send> Transport for StreamTransport<W> {
    async fn send(&self, message: &(dyn MailMessage + Sync)) -> Result<(), TransportError> {
        let mime = render(self.renderer.as_ref(), message)?;

        match self.write_message(&mime).await {
            Ok(()) => {
                tracing::debug!(
                    recipients = %message.recipients().join(", "),
                    bytes = mime.len(),
                    "message written to stream"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to write message to stream");
                Err(delivery_error(message, e))
            }
        }
    }
}
