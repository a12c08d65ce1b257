//! Append-only message storage.

use std::fmt;

use tracing::debug;

use crate::message::Message;

/// Callback invoked after every append.
type Listener = Box<dyn FnMut(&Message) + Send>;

/// Ordered, append-only list of messages.
///
/// Insertion order is display order. Entries are never edited or removed;
/// the whole list goes away with its owner.
#[derive(Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageStore")
            .field("messages", &self.messages)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that starts with the given messages.
    ///
    /// Seeding does not notify listeners; there are none yet.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            listeners: Vec::new(),
        }
    }

    /// Add a message to the end and notify listeners.
    pub fn append(&mut self, message: Message) {
        debug!(
            id = %message.id,
            sender = ?message.sender,
            position = self.messages.len(),
            "appending message"
        );
        self.messages.push(message);

        if let Some(appended) = self.messages.last() {
            for listener in &mut self.listeners {
                listener(appended);
            }
        }
    }

    /// Register a listener that runs synchronously after each append.
    pub fn subscribe(&mut self, listener: impl FnMut(&Message) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// All messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
