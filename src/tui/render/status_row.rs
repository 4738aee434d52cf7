use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};

/// One-line key-hint bar at the bottom, view- and mode-dependent.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if !app.config.ui.show_key_hints {
        return;
    }

    let hints = match (app.view(), app.mode) {
        (View::Board, Mode::Navigate) => {
            "j/k: move  a: add  d: delete  enter: edit  [/]: estimate  s: switch  m: reorder  S: start  q: quit"
        }
        (View::Board, Mode::EditTitle) => "enter: save  esc: cancel",
        (View::Board, Mode::MoveTask) => "j/k: reorder  s: other list  enter: done",
        (View::Session, _) => "d: task done  e: end session  q: quit",
        (View::Summary, _) => "c: close session  q: quit",
    };

    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(app.theme.dim)),
        area,
    );
}
