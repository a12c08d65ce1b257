//! Application state for the chat screen.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use parley_engine::{ChatConfig, ConversationView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    Frame,
};
use std::sync::atomic::Ordering;
use tracing::debug;

use crate::config::UiConfig;
use crate::event::Action;
use crate::theme::{IconSet, Theme};
use crate::transcript::{TranscriptScroll, TranscriptWidget, SCROLL_SPEED};
use crate::widgets::{FooterHints, InputBar, KeyHint};

/// Main application state.
pub struct App {
    /// The conversation being shown.
    pub view: ConversationView,
    /// Chat settings (labels, placeholder, reply timing).
    pub config: ChatConfig,
    /// Theme colors.
    pub theme: Theme,
    /// Icon set based on config.
    pub icons: IconSet,
    /// Transcript scroll position.
    pub scroll: TranscriptScroll,
    /// Should the app quit?
    pub should_quit: bool,
    hints: Vec<KeyHint>,
    /// Send control position in the last drawn frame.
    send_area: Option<Rect>,
}

impl App {
    /// Create the app and wire the transcript to the message store.
    pub fn new(config: ChatConfig, ui: &UiConfig) -> Self {
        let mut view = ConversationView::new(&config);
        let scroll = TranscriptScroll::new();

        let changed = scroll.change_flag();
        view.store_mut().subscribe(move |_| {
            changed.store(true, Ordering::Release);
        });

        Self {
            view,
            config,
            theme: ui.palette(),
            icons: ui.icon_set(),
            scroll,
            should_quit: false,
            hints: FooterHints::default_hints(),
            send_area: None,
        }
    }

    /// Apply a key action.
    pub fn handle_action(&mut self, action: Action) {
        let composer = self.view.composer_mut();
        match action {
            Action::Quit => self.should_quit = true,
            Action::Submit => self.submit(),
            Action::Newline => composer.insert_newline(),
            Action::Insert(c) => composer.insert(c),
            Action::Backspace => composer.backspace(),
            Action::Delete => composer.delete(),
            Action::Left => composer.move_left(),
            Action::Right => composer.move_right(),
            Action::Home => {
                if composer.is_empty() {
                    self.scroll.jump_to_start();
                } else {
                    composer.move_home();
                }
            }
            Action::End => {
                if composer.is_empty() {
                    self.scroll.jump_to_end();
                } else {
                    composer.move_end();
                }
            }
            Action::ScrollUp => self.scroll.scroll_up(1),
            Action::ScrollDown => self.scroll.scroll_down(1),
            Action::PageUp => self.scroll.page_up(),
            Action::PageDown => self.scroll.page_down(),
            Action::Attach => debug!("attachment button pressed; attachments are not supported"),
            Action::None => {}
        }
    }

    /// Send the draft. Enter and a click on the send control both land here.
    pub fn submit(&mut self) {
        if let Some(id) = self.view.submit() {
            debug!(%id, "submitted draft");
        }
    }

    /// Insert pasted text into the draft, with line endings as `\n`.
    pub fn handle_paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.view.composer_mut().insert_str(&text);
    }

    /// Mouse wheel scrolls the transcript; a left click on send submits.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll.scroll_up(SCROLL_SPEED),
            MouseEventKind::ScrollDown => self.scroll.scroll_down(SCROLL_SPEED),
            MouseEventKind::Down(MouseButton::Left) => {
                let at = Position::new(mouse.column, mouse.row);
                if self.send_area.is_some_and(|area| area.contains(at)) {
                    self.submit();
                }
            }
            _ => {}
        }
    }

    /// Send control position in the last drawn frame.
    pub fn send_area(&self) -> Option<Rect> {
        self.send_area
    }

    /// Advance animations. Returns `true` if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.view.poll_replies();
        self.scroll.tick()
    }

    /// Post-commit hook: run after each frame reaches the terminal.
    pub fn after_commit(&mut self) {
        self.scroll.after_commit();
    }

    /// Render the whole screen.
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let input_height = InputBar::height(self.view.composer());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),               // Transcript (expands)
                Constraint::Length(input_height), // Input bar
                Constraint::Length(1),            // Footer
            ])
            .split(frame.area());

        let awaiting = self.view.is_awaiting_reply();

        let transcript = TranscriptWidget::new(
            self.view.messages(),
            &self.config.assistant_name,
            &self.theme,
            &self.icons,
        )
        .awaiting_reply(awaiting);
        frame.render_stateful_widget(transcript, chunks[0], &mut self.scroll);

        let input = InputBar::new(
            self.view.composer(),
            &self.config.placeholder,
            &self.theme,
            &self.icons,
        )
        .focused(!self.should_quit);
        frame.render_widget(input, chunks[1]);
        self.send_area = Some(InputBar::send_area(chunks[1], &self.icons));

        let footer = FooterHints::new(&self.hints, &self.theme, &self.icons)
            .composer_state(self.view.composer_state())
            .replying(awaiting);
        frame.render_widget(footer, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, create_test_terminal, draw_to_string, type_text};
    use parley_engine::{ComposerState, Sender, DEFAULT_REPLY_TEXT};
    use std::time::Duration;

    fn footer(screen: &str) -> &str {
        screen.lines().last().unwrap_or_default()
    }

    fn click(app: &mut App, column: u16, row: u16) {
        for kind in [
            MouseEventKind::Down(MouseButton::Left),
            MouseEventKind::Up(MouseButton::Left),
        ] {
            app.handle_mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: crossterm::event::KeyModifiers::NONE,
            });
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_and_submit_with_enter() {
        let mut app = create_test_app();
        type_text(&mut app, "hi");
        assert_eq!(app.view.composer_state(), ComposerState::Ready);

        app.handle_action(Action::Submit);
        assert_eq!(app.view.messages().len(), 1);
        assert_eq!(app.view.messages()[0].text, "hi");
        assert_eq!(app.view.draft(), "");
        assert_eq!(app.view.composer_state(), ComposerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_enter_is_ignored() {
        let mut app = create_test_app();
        type_text(&mut app, "   ");
        app.handle_action(Action::Submit);
        assert!(app.view.messages().is_empty());
        assert_eq!(app.view.draft(), "   ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_newline_does_not_submit() {
        let mut app = create_test_app();
        type_text(&mut app, "line one");
        app.handle_action(Action::Newline);
        type_text(&mut app, "line two");

        assert!(app.view.messages().is_empty());
        assert_eq!(app.view.draft(), "line one\nline two");

        app.handle_action(Action::Submit);
        assert_eq!(app.view.messages()[0].text, "line one\nline two");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_appears_on_screen_after_delay() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();

        type_text(&mut app, "hi");
        app.handle_action(Action::Submit);
        let screen = draw_to_string(&mut terminal, &mut app);
        assert!(screen.contains("hi"));
        assert!(footer(&screen).contains("replying"));
        assert!(!screen.contains(DEFAULT_REPLY_TEXT));

        tokio::time::sleep(Duration::from_millis(1001)).await;
        app.tick();
        let screen = draw_to_string(&mut terminal, &mut app);

        let senders: Vec<Sender> = app.view.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Assistant]);
        assert!(screen.contains(DEFAULT_REPLY_TEXT));
        assert!(screen.contains("WebScraper AI"));
        assert!(!footer(&screen).contains("replying"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_message_scrolls_to_bottom() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();

        for i in 0..15 {
            type_text(&mut app, &format!("message {i}"));
            app.handle_action(Action::Submit);
        }
        draw_to_string(&mut terminal, &mut app);

        app.handle_action(Action::PageUp);
        app.handle_action(Action::PageUp);
        let screen = draw_to_string(&mut terminal, &mut app);
        assert!(!screen.contains("message 14"));

        type_text(&mut app, "latest");
        app.handle_action(Action::Submit);
        draw_to_string(&mut terminal, &mut app);
        while app.tick() {}
        let screen = draw_to_string(&mut terminal, &mut app);
        assert!(screen.contains("latest"));
        assert!(app.scroll.is_following());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_on_send_submits() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        type_text(&mut app, "hi");
        let screen = draw_to_string(&mut terminal, &mut app);

        let area = app.send_area().unwrap();
        let glyph_row = screen.lines().nth(usize::from(area.y)).unwrap();
        assert!(glyph_row.contains(">>"));

        click(&mut app, area.x + 1, area.y);
        assert_eq!(app.view.messages().len(), 1);
        assert_eq!(app.view.messages()[0].text, "hi");
        assert_eq!(app.view.draft(), "");
        assert!(app.view.is_awaiting_reply());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_on_send_ignores_blank_draft() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        type_text(&mut app, "   ");
        draw_to_string(&mut terminal, &mut app);

        let area = app.send_area().unwrap();
        click(&mut app, area.x + 1, area.y);
        assert!(app.view.messages().is_empty());
        assert_eq!(app.view.draft(), "   ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_outside_send_does_nothing() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        type_text(&mut app, "hi");

        // Nothing drawn yet, so there is no send control to hit.
        click(&mut app, 77, 21);
        assert!(app.view.messages().is_empty());

        draw_to_string(&mut terminal, &mut app);
        let area = app.send_area().unwrap();
        click(&mut app, area.x.saturating_sub(10), area.y);
        assert!(app.view.messages().is_empty());
    }

    #[test]
    fn test_home_end_scroll_when_draft_empty() {
        let mut app = create_test_app();
        app.handle_action(Action::Home);
        assert!(!app.scroll.is_following());
        app.handle_action(Action::End);
        assert!(app.scroll.is_following());

        type_text(&mut app, "abc");
        app.handle_action(Action::Home);
        assert_eq!(app.view.composer().cursor(), 0);
        assert!(app.scroll.is_following());
    }

    #[test]
    fn test_attach_is_inert() {
        let mut app = create_test_app();
        app.handle_action(Action::Attach);
        assert!(app.view.messages().is_empty());
        assert!(app.view.composer().is_empty());
    }

    #[test]
    fn test_paste_inserts_text() {
        let mut app = create_test_app();
        app.handle_paste("pasted\ntext");
        assert_eq!(app.view.draft(), "pasted\ntext");
    }

    #[test]
    fn test_paste_normalizes_carriage_returns() {
        let mut app = create_test_app();
        app.handle_paste("one\r\ntwo\rthree");
        assert_eq!(app.view.draft(), "one\ntwo\nthree");
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
