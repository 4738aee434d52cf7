use std::collections::HashSet;
use std::fmt;

use crate::model::board::{Board, Container};
use crate::model::task::TaskId;

/// A single integrity problem found on the board.
///
/// These cannot be produced by the ops in this crate; they show up when the
/// stored file was hand-edited or truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// A container references an id with no task entry.
    DanglingId { container: Container, id: TaskId },
    /// An id appears more than once within one container.
    DuplicateId { container: Container, id: TaskId },
    /// An id appears in both containers.
    SharedId { id: TaskId },
    /// A task entry is referenced by neither container.
    OrphanTask { id: TaskId },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::DanglingId { container, id } => {
                write!(f, "{} references missing task {}", container.key(), id)
            }
            Issue::DuplicateId { container, id } => {
                write!(f, "{} lists task {} more than once", container.key(), id)
            }
            Issue::SharedId { id } => {
                write!(f, "task {} is in both backlog and session", id)
            }
            Issue::OrphanTask { id } => {
                write!(f, "task {} is in neither backlog nor session", id)
            }
        }
    }
}

/// Validate the board invariants: every referenced id has a task entry, no
/// duplicates, and the two containers are disjoint.
pub fn check_board(board: &Board) -> Vec<Issue> {
    let mut issues = Vec::new();

    for container in [Container::Session, Container::Backlog] {
        let mut seen = HashSet::new();
        for &id in board.items(container) {
            if !board.tasks.contains_key(&id) {
                issues.push(Issue::DanglingId { container, id });
            }
            if !seen.insert(id) {
                issues.push(Issue::DuplicateId { container, id });
            }
        }
    }

    for &id in &board.session {
        if board.backlog.contains(&id) {
            issues.push(Issue::SharedId { id });
        }
    }

    for &id in board.tasks.keys() {
        if !board.session.contains(&id) && !board.backlog.contains(&id) {
            issues.push(Issue::OrphanTask { id });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;

    #[test]
    fn default_board_is_clean() {
        assert!(check_board(&Board::default()).is_empty());
    }

    #[test]
    fn detects_dangling_and_orphan() {
        let mut board = Board::empty();
        board.backlog.push(3);
        board.tasks.insert(4, Task::new(4, "", 20));

        let issues = check_board(&board);
        assert!(issues.contains(&Issue::DanglingId {
            container: Container::Backlog,
            id: 3
        }));
        assert!(issues.contains(&Issue::OrphanTask { id: 4 }));
    }

    #[test]
    fn detects_shared_and_duplicate_ids() {
        let mut board = Board::empty();
        board.tasks.insert(1, Task::new(1, "", 20));
        board.backlog = vec![1, 1];
        board.session = vec![1];

        let issues = check_board(&board);
        assert!(issues.contains(&Issue::DuplicateId {
            container: Container::Backlog,
            id: 1
        }));
        assert!(issues.contains(&Issue::SharedId { id: 1 }));
    }
}
