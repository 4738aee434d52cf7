use crate::model::board::Board;
use crate::model::session::ActiveSession;
use crate::model::task::{Task, TaskId};

/// Error type for session lifecycle operations.
///
/// These are precondition failures: the board is left untouched when any of
/// them is returned.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot start a session with no tasks")]
    EmptySession,
    #[error("no active session")]
    NoActiveSession,
    #[error("session is not running")]
    NotRunning,
    #[error("session is not finished")]
    NotFinished,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Begin a work run over the current session list.
pub fn start_session(board: &mut Board, now_ms: i64) -> Result<(), SessionError> {
    if board.session.is_empty() {
        return Err(SessionError::EmptySession);
    }
    board.active_session = Some(ActiveSession::running(now_ms));
    Ok(())
}

/// Stop the running session, stamping its end time.
pub fn end_session(board: &mut Board, now_ms: i64) -> Result<(), SessionError> {
    match board.active_session.as_mut() {
        Some(s) if s.is_running() => {
            s.end = Some(now_ms);
            s.status = crate::model::session::SessionStatus::Finished;
            Ok(())
        }
        Some(_) => Err(SessionError::NotRunning),
        None => Err(SessionError::NoActiveSession),
    }
}

/// Acknowledge a finished session: delete the session tasks marked done,
/// keep the rest in the session list for the next run, clear the record.
///
/// Deleting ids and dropping their task entries happens in one call so
/// observers only ever see the closed snapshot.
pub fn close_session(board: &mut Board) -> Result<(), SessionError> {
    match &board.active_session {
        Some(s) if s.is_finished() => {}
        Some(_) => return Err(SessionError::NotFinished),
        None => return Err(SessionError::NoActiveSession),
    }

    let finished: Vec<TaskId> = board
        .session
        .iter()
        .copied()
        .filter(|id| board.tasks.get(id).is_some_and(|t| t.is_done()))
        .collect();
    for id in &finished {
        board.tasks.shift_remove(id);
    }
    board.session.retain(|id| !finished.contains(id));
    board.active_session = None;
    Ok(())
}

/// Mark the active task done. When it was the last unfinished one, the
/// session transitions to finished with `end = now`.
pub fn complete_active_task(board: &mut Board, now_ms: i64) -> Result<(), SessionError> {
    match &board.active_session {
        Some(s) if s.is_running() => {}
        Some(_) => return Err(SessionError::NotRunning),
        None => return Err(SessionError::NoActiveSession),
    }
    let Some(active) = active_task(board).map(|t| t.id) else {
        return Ok(());
    };
    if let Some(task) = board.task_mut(active) {
        task.done = Some(true);
    }
    if active_task(board).is_none() {
        end_session(board, now_ms)?;
    }
    Ok(())
}

/// Move a session task to the front of the list, making it the active one.
/// No-op if the id is not in the session.
pub fn promote_task(board: &mut Board, id: TaskId) {
    if board.session.contains(&id) {
        board.session.retain(|&t| t != id);
        board.session.insert(0, id);
    }
}

// ---------------------------------------------------------------------------
// Derived aggregates — pure reads, recomputed on demand
// ---------------------------------------------------------------------------

/// First session task not yet done.
pub fn active_task(board: &Board) -> Option<&Task> {
    board
        .container_tasks(crate::model::board::Container::Session)
        .find(|t| !t.is_done())
}

/// Session tasks not yet done, excluding the active one ("still to do").
pub fn queued_tasks(board: &Board) -> Vec<&Task> {
    board
        .container_tasks(crate::model::board::Container::Session)
        .filter(|t| !t.is_done())
        .skip(1)
        .collect()
}

pub fn unfinished_tasks(board: &Board) -> Vec<&Task> {
    board
        .container_tasks(crate::model::board::Container::Session)
        .filter(|t| !t.is_done())
        .collect()
}

pub fn finished_tasks(board: &Board) -> Vec<&Task> {
    board
        .container_tasks(crate::model::board::Container::Session)
        .filter(|t| t.is_done())
        .collect()
}

/// Sum of estimates over a task subset.
pub fn total_minutes<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u32 {
    tasks.into_iter().map(|t| t.minutes).sum()
}

/// The user's estimate for what actually got finished.
pub fn estimated_done_minutes(board: &Board) -> u32 {
    total_minutes(finished_tasks(board))
}

/// Wall-clock minutes of a finished session, floored.
pub fn actual_minutes(session: &ActiveSession) -> Option<i64> {
    session.end.map(|end| (end - session.start) / 60_000)
}

/// Whole seconds elapsed since the session started.
pub fn elapsed_seconds(session: &ActiveSession, now_ms: i64) -> i64 {
    (now_ms - session.start) / 1000
}
