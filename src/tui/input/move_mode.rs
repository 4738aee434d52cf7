use crossterm::event::{KeyCode, KeyEvent};

use crate::dnd::{self, DropId};
use crate::io::store::StoreError;

use crate::tui::app::{App, Mode};

/// Keyboard move mode: reorder the cursor task within its container or send
/// it to the other one, through the same engine the mouse drag uses.
pub(super) fn handle(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    let Some(id) = app.cursor_task() else {
        app.mode = Mode::Navigate;
        return Ok(());
    };

    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(target) = neighbor(app, id, 1) {
                app.store
                    .mutate(|b| dnd::move_task(b, id, DropId::Task(target), false))?;
                app.select_task(id);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(target) = neighbor(app, id, -1) {
                app.store
                    .mutate(|b| dnd::move_task(b, id, DropId::Task(target), false))?;
                app.select_task(id);
            }
        }
        KeyCode::Char('s') | KeyCode::Tab => {
            let Some(container) = app.board().container_of(id) else {
                return Ok(());
            };
            app.store.mutate(|b| {
                dnd::move_task(b, id, DropId::Container(container.other()), false)
            })?;
            app.select_task(id);
        }
        _ => {}
    }
    Ok(())
}

/// The task `offset` positions away within the same container.
fn neighbor(app: &App, id: crate::model::task::TaskId, offset: i64) -> Option<crate::model::task::TaskId> {
    let board = app.board();
    let container = board.container_of(id)?;
    let items = board.items(container);
    let index = items.iter().position(|&t| t == id)? as i64;
    let target = index + offset;
    if target < 0 {
        return None;
    }
    items.get(target as usize).copied()
}
