use crate::app::AppState;
use crate::domain::UiMode;
use crate::persistence::KeyValueStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingName => handle_editing_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_cursor_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_cursor_down();
            Ok(false)
        }

        // Tap the row: select or deselect
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.select_cursor();
            Ok(false)
        }

        // RGA flag, never touches selection
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.toggle_revenue_at_cursor();
            Ok(false)
        }

        // Focus the name field
        KeyCode::Char('e') | KeyCode::Char('i') => {
            app.focus_name();
            Ok(false)
        }

        // Timer controls
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.start();
            Ok(false)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.pause();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while a name field has focus
fn handle_editing_mode<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Dismiss control
        KeyCode::Esc | KeyCode::Enter => {
            app.blur();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_backspace();
            Ok(false)
        }

        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),

        // Add character (without Ctrl modifier to allow Ctrl+C to work)
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}
