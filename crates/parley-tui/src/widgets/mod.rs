//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`InputBar`] - Attach placeholder, draft and send control
//! - [`FooterHints`] - Bottom status line with keybinding hints

mod footer_hints;
mod input_bar;

pub use footer_hints::{FooterHints, KeyHint};
pub use input_bar::InputBar;
