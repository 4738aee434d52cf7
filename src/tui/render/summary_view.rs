use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::session_ops;
use crate::tui::app::App;
use crate::util::time::format_clock_hm;

/// The finished-session summary: estimate vs actual, wall times, and the
/// completed / not-completed partitions.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let board = app.board().clone();
    let Some(session) = board.active_session else {
        return;
    };
    let Some(end) = session.end else {
        return;
    };

    let estimated = session_ops::estimated_done_minutes(&board) as i64;
    let actual = session_ops::actual_minutes(&session).unwrap_or(0);
    let overran = estimated + 10 < actual;

    let bright = Style::default()
        .fg(app.theme.text_bright)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(app.theme.text);
    let dim = Style::default().fg(app.theme.dim);
    let actual_style = if overran {
        Style::default().fg(app.theme.red)
    } else {
        Style::default().fg(app.theme.green)
    };

    let mut lines: Vec<Line> = vec![
        Line::styled("Session finished", bright),
        Line::raw(""),
        Line::from(vec![
            Span::styled("You estimated ", text),
            Span::styled(format!("{} min", estimated), Style::default().fg(app.theme.blue)),
            Span::styled(" for your tasks and actually needed ", text),
            Span::styled(format!("{} min", actual), actual_style),
            Span::styled(if overran { "." } else { ". Good job!" }, text),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("START ", dim),
            Span::styled(format_clock_hm(session.start), bright),
            Span::styled("   →   END ", dim),
            Span::styled(format_clock_hm(end), bright),
        ]),
    ];

    let completed = session_ops::finished_tasks(&board);
    if !completed.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("COMPLETED", dim));
        for task in completed {
            lines.push(Line::from(vec![
                Span::styled("(x) ", dim),
                Span::styled(task.title.clone(), text),
                Span::styled(format!("  {} m", task.minutes), dim),
            ]));
        }
    }

    let remaining = session_ops::unfinished_tasks(&board);
    if !remaining.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("NOT COMPLETED", dim));
        for task in remaining {
            lines.push(Line::from(vec![
                Span::styled("( ) ", dim),
                Span::styled(task.title.clone(), text),
                Span::styled(format!("  {} m", task.minutes), dim),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}
