use crossterm::event::{KeyCode, KeyEvent};

use crate::io::store::StoreError;
use crate::model::task::{next_step, prev_step};
use crate::ops::{board_ops, session_ops};
use crate::util::time::now_ms;

use crate::tui::app::{App, EditState, Mode};

/// Board view, navigate mode
pub(super) fn handle_board(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.flat_items().len();
            if len > 0 && app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            let default_minutes = app.config.default_minutes;
            let id = app.store.mutate(|b| {
                let id = board_ops::add_task(b, now_ms());
                let _ = board_ops::set_minutes(b, id, default_minutes);
                id
            })?;
            app.select_task(id);
            app.edit = Some(EditState {
                id,
                text: String::new(),
                cursor: 0,
            });
            app.mode = Mode::EditTitle;
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.cursor_task() {
                app.store.mutate(|b| board_ops::remove_task(b, id))?;
                app.clamp_cursor();
            }
        }
        KeyCode::Enter | KeyCode::Char('i') => {
            if let Some(id) = app.cursor_task() {
                let text = app
                    .board()
                    .task(id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                let cursor = text.len();
                app.edit = Some(EditState { id, text, cursor });
                app.mode = Mode::EditTitle;
            }
        }
        KeyCode::Char(']') => step_estimate(app, next_step)?,
        KeyCode::Char('[') => step_estimate(app, prev_step)?,
        KeyCode::Char('s') | KeyCode::Tab => {
            if let Some(id) = app.cursor_task() {
                app.store.mutate(|b| board_ops::switch_task(b, id))?;
                app.select_task(id);
            }
        }
        KeyCode::Char('m') => {
            if app.cursor_task().is_some() {
                app.mode = Mode::MoveTask;
            }
        }
        KeyCode::Char('S') => {
            // Empty session list → rejected, nothing to report
            let _ = app
                .store
                .mutate(|b| session_ops::start_session(b, now_ms()))?;
        }
        _ => {}
    }
    Ok(())
}

fn step_estimate(app: &mut App, step: fn(u32) -> u32) -> Result<(), StoreError> {
    if let Some(id) = app.cursor_task() {
        let Some(minutes) = app.board().task(id).map(|t| t.minutes) else {
            return Ok(());
        };
        let _ = app
            .store
            .mutate(|b| board_ops::set_minutes(b, id, step(minutes)))?;
    }
    Ok(())
}

/// Running-session view
pub(super) fn handle_session(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('d') | KeyCode::Char(' ') => {
            let _ = app
                .store
                .mutate(|b| session_ops::complete_active_task(b, now_ms()))?;
        }
        KeyCode::Char('e') => {
            let _ = app.store.mutate(|b| session_ops::end_session(b, now_ms()))?;
        }
        _ => {}
    }
    Ok(())
}

/// Finished-session summary view
pub(super) fn handle_summary(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') | KeyCode::Enter => {
            let _ = app.store.mutate(session_ops::close_session)?;
            app.cursor = 0;
        }
        _ => {}
    }
    Ok(())
}
