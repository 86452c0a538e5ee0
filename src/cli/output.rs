use serde::Serialize;

use crate::model::task::{Task, TaskId, TaskStatus};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson<'a> {
    pub id: TaskId,
    pub description: &'a str,
    pub status: TaskStatus,
    pub host: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub path: &'a str,
    /// `YYYY-MM-DD HH:MM:SS`, absent when unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub diff: &'a str,
}

impl<'a> From<&'a Task> for TaskJson<'a> {
    fn from(task: &'a Task) -> Self {
        TaskJson {
            id: task.id,
            description: &task.description,
            status: task.status,
            host: &task.host,
            path: &task.path,
            start_time: task.start_time_string(),
            diff: &task.diff,
        }
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `Task 3: 2024-06-03 10:15:02 - Copy file (changed) on web1`
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!(
        "Task {}: {} - {} ({})",
        task.id,
        task.start_time_display(),
        task.description,
        task.status
    );
    if !task.host.is_empty() {
        line.push_str(" on ");
        line.push_str(&task.host);
    }
    line
}

pub fn format_task_list(tasks: &[&Task]) -> String {
    let mut out = format!("Found {} tasks:\n", tasks.len());
    for task in tasks {
        out.push_str(&format_task_line(task));
        out.push('\n');
    }
    out
}

pub fn task_list_json(tasks: &[&Task]) -> Result<String, serde_json::Error> {
    let items: Vec<TaskJson> = tasks.iter().map(|t| TaskJson::from(*t)).collect();
    serde_json::to_string_pretty(&items)
}
