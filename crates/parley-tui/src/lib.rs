//! parley-tui: Terminal UI for the parley chat widget
//!
//! This crate provides the presentation layer on top of `parley-engine`:
//! - Transcript with avatars, labels, timestamps and smooth scrolling
//! - Input bar with the attachment placeholder and send control
//! - Themes and icon sets (Nerd Font, Unicode, ASCII)
//! - Headless mode for scripting and tests

mod app;
pub mod config;
mod event;
pub mod headless;
pub mod theme;
#[cfg(test)]
pub mod test_utils;
pub mod transcript;
mod widgets;

pub use app::App;
pub use config::UiConfig;
pub use event::{Action, Event, EventHandler};
pub use parley_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parley_engine::ChatConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Event loop tick rate; also the smooth scroll frame interval.
const TICK_RATE_MS: u64 = 50;

/// Errors from the terminal UI.
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// What woke the event loop.
enum Wake {
    Event(Option<Event>),
    Reply,
}

/// Run the chat widget in the terminal.
///
/// Sets up the terminal, runs the event loop and restores the terminal on
/// exit. Replies still pending when the user quits are cancelled.
pub async fn run_tui(config: ChatConfig, ui: &UiConfig) -> Result<(), TuiError> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, ui);
    let mut events = EventHandler::new(TICK_RATE_MS);
    info!(messages = app.view.messages().len(), "chat started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    app.view.shutdown();
    info!("chat closed");

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), TuiError> {
    loop {
        terminal.draw(|frame| app.render(frame))?;
        app.after_commit();

        let wake = tokio::select! {
            event = events.next() => Wake::Event(event),
            Some(_) = app.view.next_reply() => Wake::Reply,
        };

        match wake {
            Wake::Event(None) => break,
            Wake::Event(Some(event)) => match event {
                Event::Key(key) => {
                    let action = event::key_to_action(key);
                    debug!(?action, "key");
                    app.handle_action(action);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Paste(text) => app.handle_paste(&text),
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(..) => {}
            },
            // Appended by `next_reply`; the next draw picks it up.
            Wake::Reply => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
