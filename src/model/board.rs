use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::session::ActiveSession;
use crate::model::task::{Task, TaskId};

/// One of the two named ordered task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Backlog,
    Session,
}

impl Container {
    /// The stored key for this container.
    pub fn key(self) -> &'static str {
        match self {
            Container::Backlog => "backlog",
            Container::Session => "session",
        }
    }

    pub fn from_key(key: &str) -> Option<Container> {
        match key {
            "backlog" => Some(Container::Backlog),
            "session" => Some(Container::Session),
            _ => None,
        }
    }

    pub fn other(self) -> Container {
        match self {
            Container::Backlog => Container::Session,
            Container::Session => Container::Backlog,
        }
    }
}

/// The whole persisted state: tasks, the two ordered id lists, and the
/// active session record.
///
/// Invariants: every id in `backlog` or `session` has an entry in `tasks`,
/// and the two lists are disjoint (`ops::check` validates both).
/// Serialized as camelCase JSON under a single `board.json` key space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub session: Vec<TaskId>,
    pub backlog: Vec<TaskId>,
    pub tasks: IndexMap<TaskId, Task>,
    #[serde(default)]
    pub active_session: Option<ActiveSession>,
}

impl Default for Board {
    fn default() -> Self {
        let seed = Task::new(1, "Fill your backlog with tasks!", 20);
        let mut tasks = IndexMap::new();
        tasks.insert(seed.id, seed);
        Board {
            session: Vec::new(),
            backlog: vec![1],
            tasks,
            active_session: None,
        }
    }
}

impl Board {
    /// An entirely empty board (tests and repair paths; `default()` is the
    /// seeded first-run board).
    pub fn empty() -> Self {
        Board {
            session: Vec::new(),
            backlog: Vec::new(),
            tasks: IndexMap::new(),
            active_session: None,
        }
    }

    pub fn items(&self, container: Container) -> &[TaskId] {
        match container {
            Container::Backlog => &self.backlog,
            Container::Session => &self.session,
        }
    }

    pub fn items_mut(&mut self, container: Container) -> &mut Vec<TaskId> {
        match container {
            Container::Backlog => &mut self.backlog,
            Container::Session => &mut self.session,
        }
    }

    /// Which container holds `id`, if any. Linear scan of both lists.
    pub fn container_of(&self, id: TaskId) -> Option<Container> {
        for container in [Container::Session, Container::Backlog] {
            if self.items(container).contains(&id) {
                return Some(container);
            }
        }
        None
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(&id)
    }

    /// Tasks of a container in display order. Ids without a task entry are
    /// skipped rather than panicking; `ops::check` reports them.
    pub fn container_tasks(&self, container: Container) -> impl Iterator<Item = &Task> {
        self.items(container)
            .iter()
            .filter_map(|id| self.tasks.get(id))
    }
}
