//! Transcript pane.
//!
//! - [`model`]: pure projection from messages to display rows
//! - [`TranscriptWidget`]: bubbles, avatars, timestamps
//! - [`TranscriptScroll`]: follow mode and smooth scrolling

pub mod model;
mod scroll;
mod widget;

pub use model::{project, MessageRow};
pub use scroll::{TranscriptScroll, SCROLL_SPEED};
pub use widget::TranscriptWidget;
