//! Headless mode for the parley chat widget.
//!
//! Drives a conversation without a terminal: submit one message, wait for
//! its reply and hand back the transcript. Used by `parley send` and by
//! automation that wants the same behaviour the TUI shows.

use chrono::{DateTime, Local, TimeZone, Utc};
use parley_engine::{ChatConfig, ConversationView, Message, Sender};
use serde::Serialize;
use tracing::{debug, info};

use crate::theme::IconSet;
use crate::transcript::model::project_in;

/// One transcript row, as printed or serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub id: String,
    pub sender: Sender,
    /// Sender label, assistant rows only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub text: String,
    /// `HH:MM`, user rows only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// The conversation after a headless run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    pub messages: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Build a transcript with times in the local timezone.
    pub fn from_messages(messages: &[Message], assistant_name: &str) -> Self {
        Self::from_messages_in(messages, assistant_name, &Local)
    }

    /// Build a transcript with times formatted in `tz`.
    pub fn from_messages_in<Tz: TimeZone>(
        messages: &[Message],
        assistant_name: &str,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let icons = IconSet::default();
        let rows = project_in(messages, assistant_name, &icons, tz);
        let messages = rows
            .into_iter()
            .zip(messages)
            .map(|(row, message)| TranscriptEntry {
                id: row.id.to_string(),
                sender: row.sender,
                label: row.label.map(str::to_string),
                text: row.body.to_string(),
                time: row.time,
                timestamp: message.timestamp,
            })
            .collect();
        Self { messages }
    }

    /// Plain text: one block per message.
    ///
    /// ```text
    /// WebScraper AI: Hello! How can I help you with web scraping today?
    /// [14:25] you: hello
    /// ```
    pub fn to_text(&self) -> String {
        self.messages
            .iter()
            .map(|entry| match (&entry.label, &entry.time) {
                (Some(label), _) => format!("{label}: {}", entry.text),
                (None, Some(time)) => format!("[{time}] you: {}", entry.text),
                (None, None) => format!("you: {}", entry.text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Submit `text` and wait for the reply.
///
/// A blank `text` is ignored exactly as the composer ignores it, so the
/// transcript comes back unchanged. Must be called from within a tokio
/// runtime.
pub async fn run_send(config: &ChatConfig, text: &str) -> Transcript {
    let mut view = ConversationView::new(config);
    view.set_draft(text);

    match view.submit() {
        Some(id) => {
            debug!(%id, "submitted headless message");
            if let Some(reply) = view.next_reply().await {
                debug!(id = %reply.message.id, "headless reply appended");
            }
        }
        None => info!("blank message ignored"),
    }

    Transcript::from_messages(view.messages(), &config.assistant_name)
}
