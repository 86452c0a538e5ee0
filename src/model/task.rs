use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sequential task identifier, assigned from 1 in file order
pub type TaskId = usize;

/// Format used for the full date-time rendering of a task's start time
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date-only rendering
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time-only rendering
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Outcome reported for a task by its status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Unknown,
    Ok,
    Changed,
    Skipping,
    Failed,
    Fatal,
}

impl TaskStatus {
    /// The lowercase word used in the log (`ok`, `changed`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Unknown => "unknown",
            TaskStatus::Ok => "ok",
            TaskStatus::Changed => "changed",
            TaskStatus::Skipping => "skipping",
            TaskStatus::Failed => "failed",
            TaskStatus::Fatal => "fatal",
        }
    }

    /// Parse the keyword that prefixes a status line (`ok: [host]`).
    /// `unknown` is never produced by a log line.
    pub fn from_keyword(s: &str) -> Option<TaskStatus> {
        match s {
            "ok" => Some(TaskStatus::Ok),
            "changed" => Some(TaskStatus::Changed),
            "skipping" => Some(TaskStatus::Skipping),
            "failed" => Some(TaskStatus::Failed),
            "fatal" => Some(TaskStatus::Fatal),
            _ => None,
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, TaskStatus::Failed | TaskStatus::Fatal)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One task block parsed from the execution log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    /// Name inside `TASK [...]`, trimmed
    pub description: String,
    /// `None` when no timestamp line parsed successfully
    pub start_time: Option<NaiveDateTime>,
    pub status: TaskStatus,
    /// Empty until a status or started line names a host
    pub host: String,
    pub path: String,
    /// Captured diff blocks, joined with `\n`
    pub diff: String,
    /// Verbatim source lines of the task block, each terminated with `\n`
    pub raw_text: String,
}

impl Task {
    /// Start time as `YYYY-MM-DD HH:MM:SS`, if known
    pub fn start_time_string(&self) -> Option<String> {
        self.start_time
            .map(|t| t.format(DATE_TIME_FORMAT).to_string())
    }

    /// Start time for display, with a placeholder when unknown
    pub fn start_time_display(&self) -> String {
        self.start_time_string()
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// The immutable, ordered list of parsed tasks
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskStore { tasks }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task at a store index
    pub fn at(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Store index of the task with the given ID
    pub fn position(&self, id: TaskId) -> Option<usize> {
        // IDs are dense and 1-based, so the fast path almost always hits
        match id.checked_sub(1).and_then(|i| self.tasks.get(i)) {
            Some(task) if task.id == id => Some(id - 1),
            _ => self.tasks.iter().position(|t| t.id == id),
        }
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.position(id).map(|i| &self.tasks[i])
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: TaskId, description: &str) -> Task {
        Task {
            id,
            description: description.to_string(),
            start_time: None,
            status: TaskStatus::Unknown,
            host: String::new(),
            path: String::new(),
            diff: String::new(),
            raw_text: String::new(),
        }
    }

    #[test]
    fn status_keywords() {
        for status in [
            TaskStatus::Ok,
            TaskStatus::Changed,
            TaskStatus::Skipping,
            TaskStatus::Failed,
            TaskStatus::Fatal,
        ] {
            assert_eq!(TaskStatus::from_keyword(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::from_keyword("unknown"), None);
        assert_eq!(TaskStatus::from_keyword("OK"), None);
        assert_eq!(TaskStatus::default().to_string(), "unknown");
    }

    #[test]
    fn failure_statuses() {
        assert!(TaskStatus::Failed.is_failure());
        assert!(TaskStatus::Fatal.is_failure());
        assert!(!TaskStatus::Skipping.is_failure());
        assert!(!TaskStatus::Unknown.is_failure());
    }

    #[test]
    fn start_time_rendering() {
        let mut t = task(1, "Gather facts");
        assert_eq!(t.start_time_string(), None);
        assert_eq!(t.start_time_display(), "unknown");

        t.start_time = NaiveDate::from_ymd_opt(2025, 10, 28)
            .and_then(|d| d.and_hms_opt(2, 5, 23));
        assert_eq!(t.start_time_string().as_deref(), Some("2025-10-28 02:05:23"));
    }

    #[test]
    fn store_lookup_by_id() {
        let store = TaskStore::new(vec![task(1, "a"), task(2, "b"), task(3, "c")]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.position(2), Some(1));
        assert_eq!(store.get(3).map(|t| t.description.as_str()), Some("c"));
        assert_eq!(store.get(0), None);
        assert_eq!(store.get(4), None);
    }

    #[test]
    fn store_lookup_with_sparse_ids() {
        let store = TaskStore::new(vec![task(5, "a"), task(9, "b")]);
        assert_eq!(store.position(9), Some(1));
        assert_eq!(store.position(1), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Skipping).unwrap();
        assert_eq!(json, "\"skipping\"");
    }
}
