//! Footer status line.
//!
//! Format: `Ready │ replying              [Enter] send │ [Ctrl+J] newline │ [Esc] quit`

use parley_engine::ComposerState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{IconSet, Theme};

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Enter", "Ctrl+J").
    pub key: String,
    /// The action description (e.g., "send", "quit").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer status line widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    icons: &'a IconSet,
    composer_state: ComposerState,
    replying: bool,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            hints,
            theme,
            icons,
            composer_state: ComposerState::Idle,
            replying: false,
        }
    }

    /// Set the composer state to display.
    #[must_use]
    pub fn composer_state(mut self, state: ComposerState) -> Self {
        self.composer_state = state;
        self
    }

    /// Set whether a reply is pending.
    #[must_use]
    pub fn replying(mut self, replying: bool) -> Self {
        self.replying = replying;
        self
    }

    /// Default hints for the chat screen.
    pub fn default_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Enter", "send"),
            KeyHint::new("Ctrl+J", "newline"),
            KeyHint::new("PgUp/PgDn", "scroll"),
            KeyHint::new("Esc", "quit"),
        ]
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = format!(" {} ", self.icons.separator());
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        // Left side: composer state, then reply status
        let (state_str, state_color) = match self.composer_state {
            ComposerState::Idle => ("Idle", self.theme.muted),
            ComposerState::Ready => ("Ready", self.theme.primary),
        };
        left_spans.push(Span::styled(state_str, Style::default().fg(state_color)));

        if self.replying {
            left_spans.push(Span::styled(
                separator.clone(),
                Style::default().fg(self.theme.muted),
            ));
            left_spans.push(Span::styled(
                "replying",
                Style::default().fg(self.theme.subtext),
            ));
        }

        // Right side: hints (rendered right-aligned)
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(
                    separator.clone(),
                    Style::default().fg(self.theme.muted),
                ));
            }

            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.key.clone(),
                Style::default().fg(self.theme.primary),
            ));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.action.clone(),
                Style::default().fg(self.theme.subtext),
            ));
        }

        let left_width: usize = left_spans.iter().map(|s| s.content.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.content.width()).sum();
        let available = usize::from(area.width);

        // Drop hints entirely when they would collide with the status.
        let mut spans = left_spans;
        if left_width + 1 + right_width <= available {
            let gap = available - left_width - right_width;
            spans.push(Span::raw(" ".repeat(gap)));
            spans.extend(right_spans);
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.base))
            .render(area, buf);
    }
}
