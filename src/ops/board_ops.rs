use crate::model::board::Board;
use crate::model::task::{DEFAULT_MINUTES, Task, TaskId};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Create a task with a fresh id and append it to the backlog.
/// Returns the assigned id.
///
/// Ids follow the creation timestamp; two adds inside the same millisecond
/// bump until unique.
pub fn add_task(board: &mut Board, now_ms: i64) -> TaskId {
    let mut id = now_ms;
    while board.tasks.contains_key(&id) {
        id += 1;
    }
    board.tasks.insert(id, Task::new(id, "", DEFAULT_MINUTES));
    board.backlog.push(id);
    id
}

/// Delete a task: remove its id from whichever container holds it, then drop
/// the task entry. A task absent from both containers is a no-op; the other
/// container is never touched.
pub fn remove_task(board: &mut Board, id: TaskId) {
    if let Some(container) = board.container_of(id) {
        board.items_mut(container).retain(|&t| t != id);
    }
    board.tasks.shift_remove(&id);
}

pub fn set_title(board: &mut Board, id: TaskId, title: impl Into<String>) -> Result<(), TaskError> {
    let task = board.task_mut(id).ok_or(TaskError::NotFound(id))?;
    task.title = title.into();
    Ok(())
}

/// No validation here beyond what the UI offers (`MINUTE_STEPS`); the model
/// stores whatever is written.
pub fn set_minutes(board: &mut Board, id: TaskId, minutes: u32) -> Result<(), TaskError> {
    let task = board.task_mut(id).ok_or(TaskError::NotFound(id))?;
    task.minutes = minutes;
    Ok(())
}

pub fn set_done(board: &mut Board, id: TaskId, done: bool) -> Result<(), TaskError> {
    let task = board.task_mut(id).ok_or(TaskError::NotFound(id))?;
    task.done = Some(done);
    Ok(())
}

/// Move a task to the other container, appending at the end.
/// No-op if the id is in neither container.
pub fn switch_task(board: &mut Board, id: TaskId) {
    if let Some(container) = board.container_of(id) {
        board.items_mut(container).retain(|&t| t != id);
        board.items_mut(container.other()).push(id);
    }
}
