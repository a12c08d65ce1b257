//! Display model for the transcript.
//!
//! A pure projection from messages to what each row shows. No styling and
//! no layout; the widget decides how a row looks.

use chrono::{Local, TimeZone};
use parley_engine::{Message, Sender};

use crate::theme::IconSet;

/// One message as the transcript presents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow<'a> {
    /// Rendering key.
    pub id: &'a str,
    pub sender: Sender,
    pub avatar: &'static str,
    /// Sender label, assistant rows only.
    pub label: Option<&'a str>,
    /// Body text, verbatim.
    pub body: &'a str,
    /// `HH:MM` time of day, user rows only.
    pub time: Option<String>,
}

/// Project messages into rows using the local timezone.
pub fn project<'a>(
    messages: &'a [Message],
    assistant_name: &'a str,
    icons: &IconSet,
) -> Vec<MessageRow<'a>> {
    project_in(messages, assistant_name, icons, &Local)
}

/// Project messages into rows, formatting times in `tz`.
pub fn project_in<'a, Tz: TimeZone>(
    messages: &'a [Message],
    assistant_name: &'a str,
    icons: &IconSet,
    tz: &Tz,
) -> Vec<MessageRow<'a>>
where
    Tz::Offset: std::fmt::Display,
{
    messages
        .iter()
        .map(|message| match message.sender {
            Sender::Assistant => MessageRow {
                id: &message.id,
                sender: Sender::Assistant,
                avatar: icons.assistant_avatar(),
                label: Some(assistant_name),
                body: &message.text,
                time: None,
            },
            Sender::User => MessageRow {
                id: &message.id,
                sender: Sender::User,
                avatar: icons.user_avatar(),
                label: None,
                body: &message.text,
                time: Some(message.time_str_in(tz)),
            },
        })
        .collect()
}
