use serde::{Deserialize, Serialize};

/// Task identifier, derived from the creation timestamp in milliseconds.
pub type TaskId = i64;

/// Estimate assigned to freshly created tasks.
pub const DEFAULT_MINUTES: u32 = 20;

/// The estimate values offered by the UI, in minutes.
pub const MINUTE_STEPS: [u32; 12] = [5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60];

/// A single task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Estimated minutes. The model accepts any value; the UI only offers
    /// `MINUTE_STEPS`.
    pub minutes: u32,
    /// Set once the task is completed during a session. Absent means not done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, minutes: u32) -> Self {
        Task {
            id,
            title: title.into(),
            minutes,
            done: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done.unwrap_or(false)
    }
}

/// Next larger estimate step, saturating at the top of `MINUTE_STEPS`.
pub fn next_step(minutes: u32) -> u32 {
    MINUTE_STEPS
        .iter()
        .copied()
        .find(|&m| m > minutes)
        .unwrap_or(minutes)
}

/// Next smaller estimate step, saturating at the bottom of `MINUTE_STEPS`.
pub fn prev_step(minutes: u32) -> u32 {
    MINUTE_STEPS
        .iter()
        .rev()
        .copied()
        .find(|&m| m < minutes)
        .unwrap_or(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_up_and_down() {
        assert_eq!(next_step(20), 25);
        assert_eq!(prev_step(20), 15);
        assert_eq!(next_step(60), 60);
        assert_eq!(prev_step(5), 5);
    }

    #[test]
    fn steps_snap_off_grid_values() {
        // Values outside the step table still move toward the nearest step
        assert_eq!(next_step(12), 15);
        assert_eq!(prev_step(12), 10);
    }

    #[test]
    fn done_defaults_to_absent() {
        let task = Task::new(1, "write tests", DEFAULT_MINUTES);
        assert!(!task.is_done());
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("done"));
    }
}
