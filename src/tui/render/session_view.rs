use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::dnd::DropId;
use crate::ops::session_ops;
use crate::tui::app::App;
use crate::util::time::{format_hms, now_ms};
use crate::util::unicode;

/// Render one line at the running offset, returning its rect (zero-height
/// when out of space).
fn put(frame: &mut Frame, area: Rect, y: &mut u16, line: Line<'static>, align: Alignment) -> Rect {
    if *y >= area.y + area.height {
        return Rect::default();
    }
    let rect = Rect {
        y: *y,
        height: 1,
        ..area
    };
    frame.render_widget(Paragraph::new(line).alignment(align), rect);
    *y += 1;
    rect
}

/// The running session: counter, active task, queued and finished lists.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let board = app.board().clone();
    let Some(session) = board.active_session else {
        return;
    };

    let elapsed = session_ops::elapsed_seconds(&session, now_ms());
    // The counter fades once the session is underway
    let counter_style = if elapsed > 5 {
        Style::default().fg(app.theme.dim)
    } else {
        Style::default()
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD)
    };

    let mut y = area.y;

    put(frame, area, &mut y, Line::raw(""), Alignment::Left);
    put(
        frame,
        area,
        &mut y,
        Line::styled(format_hms(elapsed), counter_style),
        Alignment::Center,
    );
    put(frame, area, &mut y, Line::raw(""), Alignment::Left);

    let header_style = Style::default().fg(app.theme.dim);
    let text_style = Style::default().fg(app.theme.text);

    put(
        frame,
        area,
        &mut y,
        Line::styled("WORKING ON", header_style),
        Alignment::Left,
    );
    if let Some(task) = session_ops::active_task(&board) {
        let line = task_line(app, "( )", &task.title, Some(task.minutes), area.width);
        put(frame, area, &mut y, line, Alignment::Left);
    }

    let queued: Vec<(i64, String, u32)> = session_ops::queued_tasks(&board)
        .iter()
        .map(|t| (t.id, t.title.clone(), t.minutes))
        .collect();
    if !queued.is_empty() {
        put(frame, area, &mut y, Line::raw(""), Alignment::Left);
        put(
            frame,
            area,
            &mut y,
            Line::styled("STILL TO DO", header_style),
            Alignment::Left,
        );
        for (id, title, minutes) in queued {
            let line = task_line(app, "( )", &title, Some(minutes), area.width);
            let rect = put(frame, area, &mut y, line, Alignment::Left);
            if rect.height > 0 {
                // Clicking a queued row promotes it to the active slot
                app.drop_rects.push((DropId::Task(id), rect.into()));
            }
        }
    }

    let finished: Vec<String> = session_ops::finished_tasks(&board)
        .iter()
        .map(|t| t.title.clone())
        .collect();
    if !finished.is_empty() {
        put(frame, area, &mut y, Line::raw(""), Alignment::Left);
        put(
            frame,
            area,
            &mut y,
            Line::styled("DONE", header_style),
            Alignment::Left,
        );
        for title in finished {
            put(
                frame,
                area,
                &mut y,
                Line::styled(format!("(x) {}", title), text_style),
                Alignment::Left,
            );
        }
    }
}

fn task_line(app: &App, mark: &str, title: &str, minutes: Option<u32>, width: u16) -> Line<'static> {
    let text_style = Style::default().fg(app.theme.text_bright);
    let dim = Style::default().fg(app.theme.dim);

    let minutes_label = minutes.map(|m| format!("{:>2} m", m)).unwrap_or_default();
    let title_width = (width as usize).saturating_sub(minutes_label.len() + mark.len() + 3);
    let shown = unicode::truncate_to_width(title, title_width);
    let pad = title_width.saturating_sub(unicode::display_width(&shown));

    Line::from(vec![
        Span::styled(format!("{} ", mark), dim),
        Span::styled(shown, text_style),
        Span::raw(" ".repeat(pad + 2)),
        Span::styled(minutes_label, dim),
    ])
}
