use serde::Serialize;

use crate::model::board::Board;
use crate::model::session::{ActiveSession, SessionStatus};
use crate::model::task::{Task, TaskId};
use crate::ops::session_ops;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: TaskId,
    pub title: String,
    pub minutes: u32,
    pub done: bool,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub session: Vec<TaskJson>,
    pub backlog: Vec<TaskJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_session: Option<SessionJson>,
}

#[derive(Serialize)]
pub struct SessionJson {
    pub status: SessionStatus,
    pub start: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub session_tasks: usize,
    pub backlog_tasks: usize,
    pub done_tasks: usize,
    pub session_minutes: u32,
    pub backlog_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_session: Option<SessionJson>,
}

#[derive(Serialize)]
pub struct CheckJson {
    pub ok: bool,
    pub issues: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        minutes: task.minutes,
        done: task.is_done(),
    }
}

pub fn session_to_json(session: &ActiveSession) -> SessionJson {
    SessionJson {
        status: session.status,
        start: session.start,
        end: session.end,
    }
}

pub fn board_to_json(board: &Board) -> BoardJson {
    use crate::model::board::Container;
    BoardJson {
        session: board.container_tasks(Container::Session).map(task_to_json).collect(),
        backlog: board.container_tasks(Container::Backlog).map(task_to_json).collect(),
        active_session: board.active_session.as_ref().map(session_to_json),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let mark = if task.is_done() { 'x' } else { ' ' };
    format!("[{}] {:>4}  {:>3}m  {}", mark, task.id, task.minutes, task.title)
}

/// Format both lists with headers and per-list totals
pub fn format_board(board: &Board) -> Vec<String> {
    use crate::model::board::Container;
    let mut lines = Vec::new();

    for container in [Container::Session, Container::Backlog] {
        lines.push(format!("== {} ==", container.key().to_uppercase()));
        let tasks: Vec<&Task> = board.container_tasks(container).collect();
        if tasks.is_empty() {
            lines.push("  (empty)".to_string());
        } else {
            for task in &tasks {
                lines.push(format!("  {}", format_task_line(task)));
            }
            lines.push(format!(
                "  ~{} min total",
                session_ops::total_minutes(tasks.iter().copied())
            ));
        }
        lines.push(String::new());
    }

    if let Some(session) = &board.active_session {
        lines.push(format_session_line(session));
    }
    lines
}

pub fn format_session_line(session: &ActiveSession) -> String {
    match session.status {
        SessionStatus::Running => format!("session running since {}", session.start),
        SessionStatus::Paused => format!("session paused since {}", session.start),
        SessionStatus::Finished => match session_ops::actual_minutes(session) {
            Some(minutes) => format!("session finished after {} min", minutes),
            None => "session finished".to_string(),
        },
    }
}

pub fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("error: could not serialize output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_line_shows_done_mark_and_estimate() {
        let mut task = Task::new(3, "write report", 25);
        assert_eq!(format_task_line(&task), "[ ]    3   25m  write report");
        task.done = Some(true);
        assert!(format_task_line(&task).starts_with("[x]"));
    }

    #[test]
    fn board_listing_has_both_headers() {
        let lines = format_board(&Board::default());
        assert!(lines.contains(&"== SESSION ==".to_string()));
        assert!(lines.contains(&"== BACKLOG ==".to_string()));
        assert!(lines.iter().any(|l| l.contains("Fill your backlog")));
    }
}
