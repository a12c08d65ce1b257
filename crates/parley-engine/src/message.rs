//! Chat message types.
//!
//! Messages are immutable once created. The only way to get one into a
//! conversation is through [`MessageStore::append`](crate::MessageStore::append).

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed into the composer.
    User,
    /// Produced by the responder.
    Assistant,
}

impl Sender {
    /// Check if this is the user side of the conversation.
    pub fn is_user(self) -> bool {
        self == Sender::User
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Rendering key. Carries no ordering meaning.
    pub id: String,
    /// Body text, shown verbatim.
    pub text: String,
    /// Author of the message.
    pub sender: Sender,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current instant.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self::at(sender, text, Utc::now())
    }

    /// Create a message with an explicit timestamp.
    pub fn at(sender: Sender, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp,
        }
    }

    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create a new assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Time of day in the local timezone, 24-hour `HH:MM`.
    pub fn time_str(&self) -> String {
        self.time_str_in(&Local)
    }

    /// Time of day in the given timezone, 24-hour `HH:MM`.
    pub fn time_str_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.timestamp.with_timezone(tz).format("%H:%M").to_string()
    }
}

/// The demo exchange a fresh conversation starts with.
///
/// Timestamps are spread over the ten minutes before `now`.
pub fn welcome_exchange(now: DateTime<Utc>) -> Vec<Message> {
    vec![
        Message::at(
            Sender::Assistant,
            "Hello! How can I help you with web scraping today?",
            now - Duration::minutes(10),
        ),
        Message::at(Sender::User, "hello", now - Duration::minutes(5)),
        Message::at(Sender::User, "how are you?", now - Duration::minutes(1)),
        Message::at(
            Sender::Assistant,
            "I am functioning as expected. How can I assist you with web scraping today?",
            now,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("hi");
        let b = Message::user("hi");
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_time_str_is_24_hour() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 21, 7, 0).unwrap();
        let msg = Message::at(Sender::User, "late", ts);
        assert_eq!(msg.time_str_in(&Utc), "21:07");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(msg.time_str_in(&plus_two), "23:07");
    }

    #[test]
    fn test_time_str_local_format() {
        let time_str = Message::user("x").time_str();
        assert_eq!(time_str.len(), 5);
        assert_eq!(time_str.as_bytes()[2], b':');
    }

    #[test]
    fn test_welcome_exchange_shape() {
        let now = Utc::now();
        let seed = welcome_exchange(now);
        let senders: Vec<Sender> = seed.iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::Assistant, Sender::User, Sender::User, Sender::Assistant]
        );
        assert!(seed.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(seed[3].timestamp, now);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
