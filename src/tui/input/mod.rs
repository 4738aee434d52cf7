mod edit;
mod mouse;
mod move_mode;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use crate::io::store::StoreError;

use super::app::{App, Mode, View};

pub use mouse::handle_mouse;

/// Handle a key event in the current view and mode
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    // Ignore bare modifier key presses
    if matches!(key.code, KeyCode::Modifier(_)) {
        return Ok(());
    }

    match app.view() {
        View::Board => match app.mode {
            Mode::Navigate => navigate::handle_board(app, key),
            Mode::EditTitle => edit::handle(app, key),
            Mode::MoveTask => move_mode::handle(app, key),
        },
        View::Session => navigate::handle_session(app, key),
        View::Summary => navigate::handle_summary(app, key),
    }
}
