//! Input bar widget.
//!
//! Attachment placeholder, draft text and send control in one bordered row
//! at the bottom of the screen. Grows with multi-line drafts.

use parley_engine::Composer;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

use crate::theme::{IconSet, Theme};

/// Most draft lines shown before the bar starts scrolling.
const MAX_VISIBLE_LINES: u16 = 4;

/// Input bar with attach button, draft and send button.
pub struct InputBar<'a> {
    composer: &'a Composer,
    placeholder: &'a str,
    theme: &'a Theme,
    icons: &'a IconSet,
    focused: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(
        composer: &'a Composer,
        placeholder: &'a str,
        theme: &'a Theme,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            composer,
            placeholder,
            theme,
            icons,
            focused: true,
        }
    }

    /// Set whether the input bar is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Rows the bar needs for the current draft, borders included.
    pub fn height(composer: &Composer) -> u16 {
        let lines = composer.draft().split('\n').count();
        let lines = u16::try_from(lines).unwrap_or(u16::MAX).max(1);
        lines.min(MAX_VISIBLE_LINES) + 2
    }

    /// Build Lines for multi-line input display.
    /// Returns the lines to display and which line index contains the cursor.
    fn build_input_lines(&self) -> (Vec<Line<'static>>, usize) {
        let content = self.composer.draft();
        let cursor_pos = self.composer.cursor();
        let text_style = Style::default().fg(self.theme.text);

        if content.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled("█", text_style));
            }
            spans.push(Span::styled(
                self.placeholder.to_string(),
                Style::default().fg(self.theme.muted),
            ));
            return (vec![Line::from(spans)], 0);
        }

        let text_lines: Vec<&str> = content.split('\n').collect();

        // Find which line the cursor is on
        let mut char_count = 0;
        let mut cursor_line = 0;
        let mut cursor_col = 0;
        for (line_idx, line) in text_lines.iter().enumerate() {
            let line_len = line.chars().count();
            if cursor_pos <= char_count + line_len {
                cursor_line = line_idx;
                cursor_col = cursor_pos - char_count;
                break;
            }
            // +1 for the newline character
            char_count += line_len + 1;
        }

        let mut lines = Vec::with_capacity(text_lines.len());
        for (line_idx, line_text) in text_lines.iter().enumerate() {
            if self.focused && line_idx == cursor_line {
                let chars: Vec<char> = line_text.chars().collect();
                let before: String = chars[..cursor_col].iter().collect();
                let after: String = chars[cursor_col..].iter().collect();
                lines.push(Line::from(vec![
                    Span::styled(before, text_style),
                    Span::styled("█", text_style),
                    Span::styled(after, text_style),
                ]));
            } else {
                lines.push(Line::from(Span::styled((*line_text).to_string(), text_style)));
            }
        }

        (lines, cursor_line)
    }

    /// Split the bar's inner area into attach, draft and send columns.
    #[allow(clippy::cast_possible_truncation)]
    fn columns(inner: Rect, icons: &IconSet) -> Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(icons.attach().width() as u16 + 2),
                Constraint::Min(1),
                Constraint::Length(icons.send().width() as u16 + 2),
            ])
            .split(inner)
    }

    /// Where the send control lands when the bar is drawn into `area`.
    pub fn send_area(area: Rect, icons: &IconSet) -> Rect {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        Self::columns(inner, icons)[2]
    }

    fn send_style(&self) -> Style {
        if self.composer.can_send() {
            Style::default()
                .fg(self.theme.send)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM)
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.surface));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let attach = self.icons.attach();
        let send = self.icons.send();
        let chunks = Self::columns(inner, self.icons);

        // Attachment button is a placeholder; nothing is wired to it.
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(attach, Style::default().fg(self.theme.muted)),
        ]))
        .render(chunks[0], buf);

        let (lines, cursor_line) = self.build_input_lines();
        let visible = chunks[1].height as usize;
        let scroll_offset = if lines.len() <= visible {
            0
        } else {
            cursor_line.saturating_sub(visible.saturating_sub(1))
        };
        Paragraph::new(lines)
            .scroll((scroll_offset as u16, 0))
            .render(chunks[1], buf);

        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(send, self.send_style()),
        ]))
        .render(chunks[2], buf);
    }
}
