//! A transport that writes messages to the tracing log instead of sending
//! them.

use super::{default_renderer, render, BoxedRenderer, Transport};
use crate::contracts::{MailMessage, MimeRenderer};
use crate::error::TransportError;
use tracing::Level;

/// Logs the full MIME text of every message it is asked to send.
///
/// Useful in development and tests, where nothing should leave the machine.
pub struct LogTransport {
    level: Level,
    renderer: BoxedRenderer,
}

impl LogTransport {
    /// Logs at `INFO` with a default [`MimeBuilder`](crate::MimeBuilder).
    pub fn new() -> Self {
        Self {
            level: Level::INFO,
            renderer: default_renderer(),
        }
    }

    /// Sets the level messages are logged at.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Renders with a different renderer.
    pub fn with_renderer(mut self, renderer: impl MimeRenderer + Send + Sync + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// The level messages are logged at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for LogTransport {
    async fn send(&self, message: &(dyn MailMessage + Sync)) -> Result<(), TransportError> {
        let mime = render(self.renderer.as_ref(), message)?;
        let recipients = message.recipients().join(", ");
        let subject = message.subject().unwrap_or_default();

        let bytes = mime.len();
        if self.level == Level::ERROR {
            tracing::error!(%recipients, subject, bytes, "{mime}");
        } else if self.level == Level::WARN {
            tracing::warn!(%recipients, subject, bytes, "{mime}");
        } else if self.level == Level::INFO {
            tracing::info!(%recipients, subject, bytes, "{mime}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(%recipients, subject, bytes, "{mime}");
        } else {
            tracing::trace!(%recipients, subject, bytes, "{mime}");
        }

        Ok(())
    }
}
