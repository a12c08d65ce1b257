//! Test utilities for parley-tui rendering and integration tests.
//!
//! Helpers for creating test terminals and apps, driving the composer and
//! converting buffers to strings for assertions.

use crate::app::App;
use crate::config::UiConfig;
use crate::event::Action;
use crate::theme::{IconMode, ThemeName};
use parley_engine::ChatConfig;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT)
}

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create an app with an empty transcript and ASCII icons.
pub fn create_test_app() -> App {
    create_test_app_with(ChatConfig {
        seed_welcome: false,
        ..ChatConfig::default()
    })
}

/// Create an app from a chat config, with ASCII icons.
pub fn create_test_app_with(config: ChatConfig) -> App {
    let ui = UiConfig {
        icons: IconMode::Ascii,
        theme: ThemeName::Mocha,
    };
    App::new(config, &ui)
}

/// Type text into the composer one key at a time.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_action(Action::Insert(c));
    }
}

/// Draw one frame, run the post-commit hook and return the screen.
pub fn draw_to_string(terminal: &mut Terminal<TestBackend>, app: &mut App) -> String {
    terminal
        .draw(|frame| app.render(frame))
        .expect("Failed to draw frame");
    app.after_commit();
    buffer_to_string(terminal.backend().buffer())
}

/// Convert a buffer to a string representation for assertions.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert!(app.view.messages().is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_seeded_app_shows_welcome() {
        let mut app = create_test_app_with(ChatConfig::default());
        let mut terminal = create_test_terminal_sized(100, 30);
        let screen = draw_to_string(&mut terminal, &mut app);
        assert!(screen.contains("how are you?"));
        assert!(screen.contains("Message WebScraper AI..."));
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }
}
