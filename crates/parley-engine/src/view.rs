//! The conversation: messages, draft and pending replies in one place.

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::composer::{Composer, ComposerState};
use crate::config::ChatConfig;
use crate::message::{welcome_exchange, Message};
use crate::responder::{Reply, ResponderStub};
use crate::store::MessageStore;

/// Owns all state of one chat widget instance.
///
/// Submissions append synchronously. Replies are produced by tasks owned by
/// the view and appended when the owner drains them with
/// [`poll_replies`](Self::poll_replies) or [`next_reply`](Self::next_reply).
/// Dropping the view aborts every reply still in flight.
#[derive(Debug)]
pub struct ConversationView {
    store: MessageStore,
    composer: Composer,
    responder: ResponderStub,
    pending: Vec<JoinHandle<()>>,
    /// Replies scheduled but not yet appended.
    in_flight: usize,
    reply_tx: mpsc::UnboundedSender<Reply>,
    reply_rx: mpsc::UnboundedReceiver<Reply>,
}

impl ConversationView {
    /// Create a view from configuration, seeding the welcome exchange if
    /// enabled.
    pub fn new(config: &ChatConfig) -> Self {
        let store = if config.seed_welcome {
            MessageStore::with_messages(welcome_exchange(Utc::now()))
        } else {
            MessageStore::new()
        };
        let responder = ResponderStub::new(config.reply_delay(), config.reply_text.clone());
        Self::with_parts(store, responder)
    }

    /// Create a view from an existing store and responder.
    pub fn with_parts(store: MessageStore, responder: ResponderStub) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            store,
            composer: Composer::new(),
            responder,
            pending: Vec::new(),
            in_flight: 0,
            reply_tx,
            reply_rx,
        }
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    /// The message store.
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Mutable access to the store, for registering listeners.
    pub fn store_mut(&mut self) -> &mut MessageStore {
        &mut self.store
    }

    /// The composer.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Mutable access to the composer, for editing the draft.
    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Replace the draft unconditionally.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.composer.set_draft(text);
    }

    /// Current draft text.
    pub fn draft(&self) -> &str {
        self.composer.draft()
    }

    /// Idle or Ready.
    pub fn composer_state(&self) -> ComposerState {
        self.composer.state()
    }

    /// Check if the send control should be enabled.
    pub fn can_send(&self) -> bool {
        self.composer.can_send()
    }

    /// Submit the draft.
    ///
    /// Whitespace-only drafts are ignored and left in place. Otherwise the
    /// draft becomes a user message, the draft is cleared and a reply is
    /// scheduled. Returns the id of the new user message.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> Option<String> {
        let text = self.composer.take_submission()?;
        let message = Message::user(text);
        let id = message.id.clone();

        self.store.append(message);

        self.pending.retain(|handle| !handle.is_finished());
        let handle = self.responder.schedule_reply(id.clone(), self.reply_tx.clone());
        self.pending.push(handle);
        self.in_flight += 1;

        Some(id)
    }

    /// Number of replies scheduled but not yet appended.
    pub fn pending_replies(&self) -> usize {
        self.in_flight
    }

    /// Check if at least one reply is still on its way.
    pub fn is_awaiting_reply(&self) -> bool {
        self.pending_replies() > 0
    }

    /// Append every reply that has already arrived. Never waits.
    ///
    /// Returns the number of messages appended.
    pub fn poll_replies(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.apply_reply(reply);
            appended += 1;
        }
        appended
    }

    /// Wait for the next reply and append it.
    ///
    /// Pends forever while nothing is scheduled, which makes it suitable as
    /// a `tokio::select!` branch. Returns the reply that was appended.
    pub async fn next_reply(&mut self) -> Option<Reply> {
        let reply = self.reply_rx.recv().await?;
        self.apply_reply(reply.clone());
        Some(reply)
    }

    /// Abort every pending reply.
    pub fn shutdown(&mut self) {
        let aborted = self.pending.len();
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        // Anything already delivered but not yet appended is dropped too.
        while self.reply_rx.try_recv().is_ok() {}
        self.in_flight = 0;
        if aborted > 0 {
            info!(aborted, "cancelled pending replies");
        }
    }

    fn apply_reply(&mut self, reply: Reply) {
        debug!(in_reply_to = %reply.in_reply_to, "reply arrived");
        self.in_flight = self.in_flight.saturating_sub(1);
        self.store.append(reply.message);
    }
}

impl Drop for ConversationView {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;
    use crate::responder::DEFAULT_REPLY_TEXT;
    use std::time::Duration;

    fn empty_view() -> ConversationView {
        ConversationView::new(&ChatConfig {
            seed_welcome: false,
            ..ChatConfig::default()
        })
    }

    fn summary(view: &ConversationView) -> Vec<(Sender, String)> {
        view.messages()
            .iter()
            .map(|m| (m.sender, m.text.clone()))
            .collect()
    }

    #[test]
    fn test_seeded_view_starts_with_welcome() {
        let view = ConversationView::new(&ChatConfig::default());
        assert_eq!(view.messages().len(), 4);
        assert_eq!(view.composer_state(), ComposerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_then_reply_end_to_end() {
        let mut view = empty_view();
        view.set_draft("hi");
        assert!(view.can_send());

        let user_id = view.submit().expect("non-empty draft submits");
        assert_eq!(summary(&view), vec![(Sender::User, "hi".to_string())]);
        assert_eq!(view.draft(), "");
        assert_eq!(view.composer_state(), ComposerState::Idle);
        assert!(view.is_awaiting_reply());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(view.poll_replies(), 0);
        assert_eq!(view.messages().len(), 1);

        let reply = view.next_reply().await.expect("reply arrives");
        assert_eq!(reply.in_reply_to, user_id);
        assert_ne!(reply.message.id, user_id);
        assert_eq!(
            summary(&view),
            vec![
                (Sender::User, "hi".to_string()),
                (Sender::Assistant, DEFAULT_REPLY_TEXT.to_string()),
            ]
        );
        assert!(!view.is_awaiting_reply());
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_submission_is_ignored() {
        let mut view = empty_view();
        view.set_draft("   ");

        assert_eq!(view.submit(), None);
        assert!(view.messages().is_empty());
        assert_eq!(view.draft(), "   ");
        assert!(!view.is_awaiting_reply());

        view.set_draft("");
        assert_eq!(view.submit(), None);
        assert!(view.messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_raw_text_is_stored() {
        let mut view = empty_view();
        view.set_draft("  padded  ");
        view.submit();
        assert_eq!(view.messages()[0].text, "  padded  ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_reply_per_submission_in_order() {
        let mut view = empty_view();
        for text in ["first", "second", "third"] {
            view.set_draft(text);
            view.submit();
        }
        assert_eq!(view.pending_replies(), 3);

        for _ in 0..3 {
            view.next_reply().await;
        }

        let messages = view.messages();
        assert_eq!(messages.len(), 6);
        let users = messages.iter().filter(|m| m.sender == Sender::User).count();
        let replies = messages
            .iter()
            .filter(|m| m.sender == Sender::Assistant)
            .count();
        assert_eq!((users, replies), (3, 3));

        // Every reply sits after the first user message and timestamps never
        // go backwards.
        assert_eq!(messages[0].sender, Sender::User);
        assert!(messages
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test(start_paused = true)]
    async fn test_staggered_replies_follow_their_own_trigger() {
        let mut view = empty_view();

        view.set_draft("first");
        let first = view.submit().unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        view.set_draft("second");
        let second = view.submit().unwrap();
        assert_eq!(view.pending_replies(), 2);

        let mut replies = Vec::new();
        for _ in 0..2 {
            replies.push(view.next_reply().await.unwrap());
        }
        assert!(!view.is_awaiting_reply());

        // Replies arrive in trigger order, one per trigger.
        let triggers: Vec<&str> = replies.iter().map(|r| r.in_reply_to.as_str()).collect();
        assert_eq!(triggers, vec![first.as_str(), second.as_str()]);

        let position = |id: &str| view.messages().iter().position(|m| m.id == id).unwrap();
        for reply in &replies {
            assert!(position(&reply.message.id) > position(&reply.in_reply_to));
        }

        assert_eq!(
            summary(&view),
            vec![
                (Sender::User, "first".to_string()),
                (Sender::User, "second".to_string()),
                (Sender::Assistant, DEFAULT_REPLY_TEXT.to_string()),
                (Sender::Assistant, DEFAULT_REPLY_TEXT.to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_fires_for_user_and_reply() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let appends = Arc::new(AtomicUsize::new(0));
        let mut view = empty_view();
        {
            let appends = Arc::clone(&appends);
            view.store_mut().subscribe(move |_| {
                appends.fetch_add(1, Ordering::SeqCst);
            });
        }

        view.set_draft("ping");
        view.submit();
        assert_eq!(appends.load(Ordering::SeqCst), 1);

        view.next_reply().await;
        assert_eq!(appends.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_replies() {
        let mut view = empty_view();
        view.set_draft("bye");
        view.submit();

        view.shutdown();
        tokio::time::sleep(Duration::from_millis(2000)).await;

        assert_eq!(view.poll_replies(), 0);
        assert_eq!(view.messages().len(), 1);
        assert!(!view.is_awaiting_reply());
    }
}
