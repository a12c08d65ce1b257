//! parley-engine: Headless conversation state for the parley chat widget
//!
//! This crate holds everything that does not touch a terminal:
//! - Message model and the append-only message store
//! - Composer draft with its Idle/Ready state
//! - Simulated responder that replies after a fixed delay
//! - The conversation view tying them together
//! - Configuration

pub mod composer;
pub mod config;
pub mod message;
pub mod responder;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use composer::{Composer, ComposerState};
pub use config::{ChatConfig, ConfigError, MAX_REPLY_DELAY_MS};
pub use message::{welcome_exchange, Message, Sender};
pub use responder::{Reply, ResponderStub, DEFAULT_REPLY_DELAY, DEFAULT_REPLY_TEXT};
pub use store::MessageStore;
pub use view::ConversationView;

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
