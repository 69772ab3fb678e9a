// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks, clipboard outcomes)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod markdown;
pub mod modal;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::theme::ThemeState;
use anyhow::{Context, Result};
use app::{App, CopyOutcome};
use clipboard::SystemClipboard;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::ModalAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::ComponentId;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: Config, theme: ThemeState, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (copy_tx, mut copy_rx) = mpsc::unbounded_channel();
    let mut app = App::new(
        &config,
        theme,
        log_buffer,
        Arc::new(SystemClipboard),
        copy_tx,
    );

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut copy_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// This loop handles three types of events:
/// 1. Keyboard and mouse input
/// 2. Timer ticks (periodic redraws, so "copied" badges and toasts expire)
/// 3. Clipboard outcomes from background writes
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    copy_rx: &mut mpsc::UnboundedReceiver<CopyOutcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}

            // Clipboard writes finishing
            Some(outcome) = copy_rx.recv() => {
                app.finish_copy(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Search → Global → Focused component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Release events only exist on some platforms; act on press and repeat
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+C always quits
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    // Layer 2: Search box captures text input while open
    if handle_search_input(app, &key_event) {
        return;
    }

    // Layer 3: Global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 4: Focused component
    if !app.dispatch_to_focused(key_event).was_handled() && key_event.code == KeyCode::Esc {
        // Nothing left to clear: Esc closes the overlay
        app.close_sidebar();
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.modal.is_some() {
        return;
    }
    let code = match mouse_event.kind {
        MouseEventKind::ScrollUp => KeyCode::Up,
        MouseEventKind::ScrollDown => KeyCode::Down,
        _ => return,
    };
    // Synthesize a key event for trait dispatch
    app.dispatch_to_focused(KeyEvent::new(code, KeyModifiers::NONE));
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Quit => {
            app.modal = None;
            app.should_quit = true;
        }
    }

    true
}

/// Handle search box input - returns true while the box is open
fn handle_search_input(app: &mut App, key_event: &KeyEvent) -> bool {
    if app.search.is_none() {
        return false;
    }

    match key_event.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(modal::Modal::help()),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('m') => app.toggle_sidebar(),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('y') => app.copy_sample(),
        KeyCode::Tab | KeyCode::BackTab => app.focus_next(),
        // Arrow keys move focus when the sidebar sits beside the content
        KeyCode::Left if app.sidebar_visible() => app.focused = ComponentId::Sidebar,
        KeyCode::Right if app.focused == ComponentId::Sidebar => {
            app.focused = ComponentId::Content
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryPreferenceStore;
    use crate::tui::clipboard::MemoryClipboard;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut theme = ThemeState::new(Box::new(MemoryPreferenceStore::new()));
        theme.initialize(false);
        App::new(
            &Config::default(),
            theme,
            LogBuffer::new(),
            Arc::new(MemoryClipboard::default()),
            tx,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn help_modal_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.modal.is_some());

        press(&mut app, KeyCode::Char('t'));
        assert!(!app.theme.is_dark());

        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
    }

    #[test]
    fn search_box_captures_letters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        for c in "users".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // 'u', 's', 'e', 'r' didn't trigger global shortcuts
        assert!(!app.should_quit);
        assert_eq!(app.search.as_deref(), Some("users"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_section(), "users");
    }

    #[test]
    fn overlay_selection_via_keyboard() {
        let mut app = app();
        app.set_width(80);
        press(&mut app, KeyCode::Char('m'));
        assert!(app.sidebar_open());

        // Cursor starts on "Introduction"; move to "Quick Start"
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_section(), "quickstart");
        assert!(!app.sidebar_open());
    }

    #[test]
    fn esc_closes_overlay() {
        let mut app = app();
        app.set_width(80);
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.sidebar_open());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
