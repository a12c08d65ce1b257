//! Transcript widget: message bubbles, avatars and timestamps.

use parley_engine::{Message, Sender};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::model::{project, MessageRow};
use super::scroll::TranscriptScroll;
use crate::theme::{IconSet, Theme};

/// Share of the transcript width a bubble may use, in percent.
const BUBBLE_WIDTH_PERCENT: usize = 70;

/// Narrowest bubble we wrap to, so tiny terminals still show something.
const MIN_BUBBLE_WIDTH: usize = 8;

/// Bubble width for a row whose avatar column takes `reserved` columns.
///
/// Never wider than what is left beside the avatar.
fn bubble_width(width: usize, reserved: usize) -> usize {
    let available = width.saturating_sub(reserved).max(1);
    (width * BUBBLE_WIDTH_PERCENT / 100)
        .max(MIN_BUBBLE_WIDTH)
        .min(available)
}

/// Scrollable message list.
///
/// ```text
///  [AI] WebScraper AI
///       Hello! How can I help you with web
///       scraping today?
///
///                             hello   [U]
///                            14:25
/// ```
pub struct TranscriptWidget<'a> {
    messages: &'a [Message],
    assistant_name: &'a str,
    theme: &'a Theme,
    icons: &'a IconSet,
    awaiting_reply: bool,
}

impl<'a> TranscriptWidget<'a> {
    /// Create a new transcript widget.
    pub fn new(
        messages: &'a [Message],
        assistant_name: &'a str,
        theme: &'a Theme,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            messages,
            assistant_name,
            theme,
            icons,
            awaiting_reply: false,
        }
    }

    /// Show the typing indicator below the last message.
    #[must_use]
    pub fn awaiting_reply(mut self, awaiting: bool) -> Self {
        self.awaiting_reply = awaiting;
        self
    }

    /// Lay out every row for the given inner width.
    pub fn build_lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = usize::from(width);

        let rows = project(self.messages, self.assistant_name, self.icons);
        let mut lines = Vec::new();

        for row in &rows {
            // Avatar plus one space of gutter sits beside every bubble.
            let bubble_width = bubble_width(width, row.avatar.width() + 1);
            match row.sender {
                Sender::Assistant => self.push_assistant(row, bubble_width, &mut lines),
                Sender::User => self.push_user(row, bubble_width, &mut lines),
            }
            lines.push(Line::default());
        }

        if self.awaiting_reply {
            lines.push(Line::from(vec![
                Span::styled(
                    self.icons.assistant_avatar(),
                    Style::default().fg(self.theme.assistant_avatar),
                ),
                Span::raw(" "),
                Span::styled(self.icons.typing(), Style::default().fg(self.theme.muted)),
            ]));
        }

        lines
    }

    fn push_assistant(
        &self,
        row: &MessageRow<'_>,
        bubble_width: usize,
        lines: &mut Vec<Line<'static>>,
    ) {
        let indent = " ".repeat(row.avatar.width() + 1);

        let mut header = vec![
            Span::styled(
                row.avatar,
                Style::default()
                    .fg(self.theme.assistant_avatar)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];
        if let Some(label) = row.label {
            header.push(Span::styled(
                label.to_string(),
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(header));

        for chunk in textwrap::wrap(row.body, bubble_width) {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(chunk.into_owned(), Style::default().fg(self.theme.text)),
            ]));
        }
    }

    fn push_user(
        &self,
        row: &MessageRow<'_>,
        bubble_width: usize,
        lines: &mut Vec<Line<'static>>,
    ) {
        let bubble_style = Style::default()
            .bg(self.theme.user_bubble)
            .fg(self.theme.user_text);
        let avatar_width = row.avatar.width();

        // Bubble has one column of padding on each side.
        let text_width = bubble_width.saturating_sub(2).max(1);
        let chunks: Vec<String> = textwrap::wrap(row.body, text_width)
            .into_iter()
            .map(std::borrow::Cow::into_owned)
            .collect();
        let fill = chunks.iter().map(|c| c.width()).max().unwrap_or(0);

        for (i, chunk) in chunks.iter().enumerate() {
            let pad = " ".repeat(fill.saturating_sub(chunk.width()));
            let avatar = if i == 0 {
                Span::styled(row.avatar, Style::default().fg(self.theme.user_bubble))
            } else {
                Span::raw(" ".repeat(avatar_width))
            };
            lines.push(
                Line::from(vec![
                    Span::styled(format!(" {chunk}{pad} "), bubble_style),
                    Span::raw(" "),
                    avatar,
                ])
                .alignment(Alignment::Right),
            );
        }

        if let Some(time) = &row.time {
            lines.push(
                Line::from(vec![
                    Span::styled(time.clone(), Style::default().fg(self.theme.muted)),
                    Span::raw(" ".repeat(avatar_width + 2)),
                ])
                .alignment(Alignment::Right),
            );
        }
    }
}

impl StatefulWidget for TranscriptWidget<'_> {
    type State = TranscriptScroll;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .padding(Padding::new(2, 2, 1, 0))
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.build_lines(inner.width);
        state.record_layout(lines.len(), inner.height);

        Paragraph::new(lines)
            .scroll((state.offset(), 0))
            .render(inner, buf);
    }
}
