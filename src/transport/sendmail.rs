//! A transport that pipes messages into a local `sendmail` binary.

use super::{default_renderer, delivery_error, render, BoxedRenderer, Transport};
use crate::contracts::{MailMessage, MimeRenderer};
use crate::error::TransportError;
use crate::header::Header;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default location of the sendmail binary.
pub const DEFAULT_SENDMAIL_PROGRAM: &str = "/usr/sbin/sendmail";

/// Hands each message to the local mail transfer agent.
///
/// The message is written to the program's stdin and no address is ever
/// put on the command line. With the default arguments (`-t -i`) sendmail
/// reads recipients from the headers, so `bcc` addresses are prepended as
/// `bcc:` header lines, which sendmail strips before delivery. Custom
/// arguments must keep `-t` for recipients to be picked up.
pub struct SendmailTransport {
    program: String,
    args: Vec<String>,
    renderer: BoxedRenderer,
}

impl SendmailTransport {
    /// Uses `/usr/sbin/sendmail -t -i`.
    pub fn new() -> Self {
        Self {
            program: DEFAULT_SENDMAIL_PROGRAM.to_string(),
            args: vec!["-t".to_string(), "-i".to_string()],
            renderer: default_renderer(),
        }
    }

    /// Uses a different program.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Replaces the program arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Renders with a different renderer.
    pub fn with_renderer(mut self, renderer: impl MimeRenderer + Send + Sync + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// The program that will be run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments passed to the program.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SendmailTransport {
    async fn send(&self, message: &(dyn MailMessage + Sync)) -> Result<(), TransportError> {
        let mime = render(self.renderer.as_ref(), message)?;
        let input = with_bcc_headers(message, &mime)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                tracing::warn!(program = %self.program, error = %e, "failed to write to sendmail");
                // Reap the child; its exit status adds nothing to the write error.
                let _ = child.wait().await;
                return Err(delivery_error(message, e));
            }
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(program = %self.program, status = %output.status, "sendmail failed");
            return Err(delivery_error(
                message,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        tracing::debug!(
            program = %self.program,
            recipients = %message.recipients().join(", "),
            bytes = mime.len(),
            "message handed to sendmail"
        );
        Ok(())
    }
}

/// Prepends one `bcc:` line per blind recipient, using the rendered
/// message's own line terminator.
fn with_bcc_headers(message: &dyn MailMessage, mime: &str) -> Result<String, TransportError> {
    let bcc = message.bcc();
    if let Some(address) = bcc.iter().find(|a| a.contains(['\r', '\n'])) {
        return Err(delivery_error(
            message,
            format!("bcc address {:?} contains a line break", address),
        ));
    }

    let eol = if mime.contains("\r\n") { "\r\n" } else { "\n" };
    let mut input = String::with_capacity(mime.len());
    for address in bcc {
        input.push_str(&Header::trusted("bcc", address).line());
        input.push_str(eol);
    }
    input.push_str(mime);
    Ok(input)
}
