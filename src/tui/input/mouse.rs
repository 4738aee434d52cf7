use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::dnd::{self, DropId};
use crate::io::store::StoreError;
use crate::ops::session_ops;

use crate::tui::app::{App, DragState, Mode, View};

/// Handle a mouse event in the current view
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Result<(), StoreError> {
    match app.view() {
        View::Board => handle_board(app, mouse),
        View::Session => handle_session(app, mouse),
        View::Summary => Ok(()),
    }
}

/// Board view: press grabs a task row, drag frames preview container
/// changes, release commits the final position (including same-container
/// reordering).
fn handle_board(app: &mut App, mouse: MouseEvent) -> Result<(), StoreError> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.mode != Mode::Navigate {
                return Ok(());
            }
            if let Some((DropId::Task(id), rect)) = app.hit_drop_target(mouse.column, mouse.row) {
                app.select_task(id);
                app.drag = Some(DragState {
                    id,
                    source_rect: rect,
                    column: mouse.column,
                    row: mouse.row,
                });
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(drag) = app.drag.as_mut() else {
                return Ok(());
            };
            drag.column = mouse.column;
            drag.row = mouse.row;
            let (id, rect) = (drag.id, drag.dragged_rect());
            if let Some(target) = dnd::resolve_target(app.board(), id, rect, &app.drop_rects) {
                app.store.mutate(|b| dnd::move_task(b, id, target, true))?;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(drag) = app.drag.take() else {
                return Ok(());
            };
            let (id, rect) = (drag.id, drag.dragged_rect());
            if let Some(target) = dnd::resolve_target(app.board(), id, rect, &app.drop_rects) {
                app.store.mutate(|b| dnd::move_task(b, id, target, false))?;
            }
            app.select_task(id);
        }
        _ => {}
    }
    Ok(())
}

/// Session view: clicking a queued task promotes it to the active slot.
fn handle_session(app: &mut App, mouse: MouseEvent) -> Result<(), StoreError> {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
        && let Some((DropId::Task(id), _)) = app.hit_drop_target(mouse.column, mouse.row)
    {
        app.store.mutate(|b| session_ops::promote_task(b, id))?;
    }
    Ok(())
}
