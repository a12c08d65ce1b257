//! Simulated assistant replies.
//!
//! Stands in for a real inference call: each submission schedules one
//! reply that arrives after a fixed delay.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::message::Message;

/// Reply text used when none is configured.
pub const DEFAULT_REPLY_TEXT: &str = "This is AI replying to your message";

/// Delay used when none is configured.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// A finished reply waiting to be appended.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Id of the user message that triggered this reply.
    pub in_reply_to: String,
    /// The assistant message to append.
    pub message: Message,
}

/// Produces one fixed assistant message per submission after a delay.
#[derive(Debug, Clone)]
pub struct ResponderStub {
    delay: Duration,
    text: String,
}

impl Default for ResponderStub {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY, DEFAULT_REPLY_TEXT)
    }
}

impl ResponderStub {
    /// Create a responder with a custom delay and reply text.
    ///
    /// Blank text falls back to [`DEFAULT_REPLY_TEXT`].
    pub fn new(delay: Duration, text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.trim().is_empty() {
            warn!("blank reply text, using the default");
            text = DEFAULT_REPLY_TEXT.to_string();
        }
        Self { delay, text }
    }

    /// Delay before a reply is delivered.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Text every reply carries.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start the one-shot timer for a reply to `in_reply_to`.
    ///
    /// The reply is sent on `tx` once the delay elapses. The message is
    /// stamped when the timer fires, not when it was scheduled. Aborting the
    /// returned handle cancels the reply.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule_reply(
        &self,
        in_reply_to: impl Into<String>,
        tx: mpsc::UnboundedSender<Reply>,
    ) -> JoinHandle<()> {
        let in_reply_to = in_reply_to.into();
        let delay = self.delay;
        let text = self.text.clone();

        debug!(%in_reply_to, delay_ms = delay.as_millis(), "scheduling reply");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = Reply {
                in_reply_to,
                message: Message::assistant(text),
            };
            if tx.send(reply).is_err() {
                warn!("conversation closed before reply was delivered");
            }
        })
    }
}
