pub mod board_view;
pub mod session_view;
pub mod status_row;
pub mod summary_view;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::util::unicode;

use super::app::{App, View};

/// Main render function — dispatches to the view for the session state
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    // Drop targets are re-recorded on every frame
    app.drop_rects.clear();

    match app.view() {
        View::Board => board_view::render(frame, app, chunks[0]),
        View::Session => session_view::render(frame, app, chunks[0]),
        View::Summary => summary_view::render(frame, app, chunks[0]),
    }

    status_row::render(frame, app, chunks[1]);

    render_drag_overlay(frame, app);
}

/// The floating row that follows the pointer mid-drag.
fn render_drag_overlay(frame: &mut Frame, app: &App) {
    let Some(drag) = &app.drag else {
        return;
    };
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let title = app
        .board()
        .task(drag.id)
        .map(|t| t.title.clone())
        .unwrap_or_default();
    let label = if title.is_empty() {
        "⋮ New Task".to_string()
    } else {
        format!("⋮ {}", title)
    };
    let width = (unicode::display_width(&label) as u16 + 2).min(area.width);
    let x = drag.column.min(area.width.saturating_sub(width));
    let y = drag.row.min(area.height.saturating_sub(1));
    let rect = ratatui::layout::Rect::new(x, y, width, 1);

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(format!(" {}", label)).style(
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        rect,
    );
}
