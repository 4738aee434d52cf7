use serde::{Deserialize, Serialize};

/// Lifecycle state of a work session.
///
/// `Paused` exists in the stored format but no operation currently produces
/// it; it is accepted on load for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Running,
    Paused,
    Finished,
}

/// An in-progress or just-finished timed work run.
///
/// Exists only between "Start Session" and closing the summary; the board
/// holds `None` otherwise. Timestamps are Unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    pub start: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    pub status: SessionStatus,
}

impl ActiveSession {
    pub fn running(start: i64) -> Self {
        ActiveSession {
            start,
            end: None,
            status: SessionStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let s = ActiveSession::running(1000);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"start":1000,"status":"running"}"#);
    }

    #[test]
    fn paused_status_is_accepted_on_load() {
        let s: ActiveSession =
            serde_json::from_str(r#"{"start":1,"status":"paused"}"#).unwrap();
        assert_eq!(s.status, SessionStatus::Paused);
        assert!(!s.is_running());
    }
}
