use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::dnd::DropId;
use crate::model::board::{Board, Container};
use crate::model::task::TaskId;
use crate::ops::session_ops;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Both task lists, stacked: the session on top, the backlog below.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let board = app.board().clone();

    // Session block: borders + one row per task (or the placeholder) + total
    let session_rows = board.session.len().max(1) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(session_rows + 3), Constraint::Min(3)])
        .split(area);

    render_session_block(frame, app, &board, chunks[0]);
    render_backlog_block(frame, app, &board, chunks[1]);
}

fn render_session_block(frame: &mut Frame, app: &mut App, board: &Board, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" SESSION ")
        .border_style(Style::default().fg(app.theme.dim));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    // Rows area excludes the total line at the bottom
    let rows_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    app.drop_rects
        .push((DropId::Container(Container::Session), rows_area.into()));

    if board.session.is_empty() {
        let placeholder = Paragraph::new("Drop your tasks here!")
            .style(Style::default().fg(app.theme.dim));
        frame.render_widget(placeholder, row_rect(rows_area, 0));
    } else {
        for (i, &id) in board.session.iter().enumerate() {
            if i as u16 >= rows_area.height {
                break;
            }
            render_task_row(frame, app, board, id, i, row_rect(rows_area, i as u16));
        }
    }

    // Total estimate and start hint at the bottom of the block
    let total = session_ops::total_minutes(board.container_tasks(Container::Session));
    let total_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    let label = if total > 0 {
        format!("~{} min · S: start session", total)
    } else {
        String::new()
    };
    let line = Paragraph::new(label)
        .alignment(ratatui::layout::Alignment::Right)
        .style(Style::default().fg(app.theme.dim));
    frame.render_widget(line, total_area);
}

fn render_backlog_block(frame: &mut Frame, app: &mut App, board: &Board, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" BACKLOG ")
        .border_style(Style::default().fg(app.theme.dim));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    app.drop_rects
        .push((DropId::Container(Container::Backlog), inner.into()));

    if board.backlog.is_empty() {
        let placeholder =
            Paragraph::new("Your backlog is empty!").style(Style::default().fg(app.theme.dim));
        frame.render_widget(placeholder, row_rect(inner, 0));
        return;
    }

    let offset = board.session.len();
    for (i, &id) in board.backlog.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        render_task_row(frame, app, board, id, offset + i, row_rect(inner, i as u16));
    }
}

fn row_rect(area: Rect, row: u16) -> Rect {
    Rect {
        y: area.y + row,
        height: 1,
        ..area
    }
}

fn render_task_row(
    frame: &mut Frame,
    app: &mut App,
    board: &Board,
    id: TaskId,
    flat_index: usize,
    area: Rect,
) {
    let Some(task) = board.task(id) else {
        return;
    };
    app.drop_rects.push((DropId::Task(id), area.into()));

    // A row being edited shows the edit buffer with a terminal cursor
    if let Some(edit) = &app.edit
        && edit.id == id
    {
        let text = format!("⋮ {}", edit.text);
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(app.theme.text_bright)),
            area,
        );
        let col = unicode::byte_offset_to_display_col(&edit.text, edit.cursor) as u16;
        frame.set_cursor_position((area.x + 2 + col, area.y));
        return;
    }

    let selected = flat_index == app.cursor;
    let dragging = app.drag.as_ref().is_some_and(|d| d.id == id);

    let base = if dragging {
        Style::default().fg(app.theme.dim).add_modifier(Modifier::DIM)
    } else if selected && app.mode == Mode::MoveTask {
        Style::default()
            .fg(app.theme.blue)
            .add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text)
    };

    let minutes = format!("{:>2} m", task.minutes);
    let title_width = (area.width as usize).saturating_sub(minutes.len() + 4);
    let (title, title_style) = if task.title.is_empty() {
        ("New Task".to_string(), base.add_modifier(Modifier::DIM))
    } else {
        (unicode::truncate_to_width(&task.title, title_width), base)
    };
    let pad = title_width.saturating_sub(unicode::display_width(&title));

    let line = Line::from(vec![
        Span::styled("⋮ ", base),
        Span::styled(title, title_style),
        Span::raw(" ".repeat(pad + 2)),
        Span::styled(minutes, Style::default().fg(app.theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
