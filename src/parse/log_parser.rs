use std::mem;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::io::diagnostics::{DiagnosticSink, NullSink};
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::parse::timestamp::{TimestampLine, parse_timestamp_line};

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TASK \[(.*)\] \*+\s*$").expect("header pattern"));
static STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(ok|changed|skipping|failed|fatal): \[([^\]]*)\]").expect("status pattern")
});
static STARTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[started TASK: (.*?) on (.*?)\]").expect("started pattern")
});

const PATH_MARKER: &str = "task path: ";
const DIFF_MARKER: &str = "--- before";

/// Description from a `TASK [name] ****` header line
fn task_header(line: &str) -> Option<&str> {
    HEADER_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Status and host from an `ok: [host]` style line
fn status_line(line: &str) -> Option<(TaskStatus, &str)> {
    let caps = STATUS_RE.captures(line)?;
    let status = TaskStatus::from_keyword(caps.get(1)?.as_str())?;
    Some((status, caps.get(2)?.as_str()))
}

/// Host from a `[started TASK: name on host]` line
fn started_host(line: &str) -> Option<&str> {
    STARTED_RE
        .captures(line)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

fn task_path(line: &str) -> Option<&str> {
    line.find(PATH_MARKER)
        .map(|at| &line[at + PATH_MARKER.len()..])
}

fn is_diff_start(line: &str) -> bool {
    line.starts_with(DIFF_MARKER)
}

/// A task still being accumulated. Only the parser loop holds one.
#[derive(Debug)]
struct TaskBuilder {
    id: TaskId,
    description: String,
    start_time: Option<NaiveDateTime>,
    status: TaskStatus,
    host: String,
    path: String,
    diff: String,
    raw_text: String,
}

impl TaskBuilder {
    fn new(id: TaskId, description: &str, header_line: &str) -> Self {
        let mut builder = TaskBuilder {
            id,
            description: description.to_string(),
            start_time: None,
            status: TaskStatus::Unknown,
            host: String::new(),
            path: String::new(),
            diff: String::new(),
            raw_text: String::new(),
        };
        builder.push_raw(header_line);
        builder
    }

    fn push_raw(&mut self, line: &str) {
        self.raw_text.push_str(line);
        self.raw_text.push('\n');
    }

    /// Append one closed diff block
    fn close_diff(&mut self, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        if !self.diff.is_empty() {
            self.diff.push('\n');
        }
        self.diff.push_str(&lines.join("\n"));
    }

    fn finish(self) -> Task {
        Task {
            id: self.id,
            description: self.description,
            start_time: self.start_time,
            status: self.status,
            host: self.host,
            path: self.path,
            diff: self.diff,
            raw_text: self.raw_text,
        }
    }
}

/// Parser position in the line stream
#[derive(Debug)]
enum ParseState {
    /// No task header seen yet
    Seeking,
    InTask(TaskBuilder),
    /// Inside a diff block belonging to the open task
    InDiff {
        task: TaskBuilder,
        lines: Vec<String>,
    },
}

/// Single-pass line parser for execution logs.
///
/// Feed lines in order with [`LogParser::feed`], then call
/// [`LogParser::finish`] to close the last task. Nothing a line contains
/// can make parsing fail: unrecognized lines are kept in the raw text of
/// the open task and bad timestamps leave the start time unset.
pub struct LogParser<'s> {
    state: ParseState,
    tasks: Vec<Task>,
    next_id: TaskId,
    sink: &'s dyn DiagnosticSink,
}

impl<'s> LogParser<'s> {
    pub fn new(sink: &'s dyn DiagnosticSink) -> Self {
        LogParser {
            state: ParseState::Seeking,
            tasks: Vec::new(),
            next_id: 1,
            sink,
        }
    }

    /// Consume one line (without its line terminator).
    pub fn feed(&mut self, line: &str) {
        let state = mem::replace(&mut self.state, ParseState::Seeking);
        self.state = match state {
            ParseState::Seeking => self.on_seeking(line),
            ParseState::InTask(task) => self.on_task(task, line),
            ParseState::InDiff { task, lines } => self.on_diff(task, lines, line),
        };
    }

    /// Close any open task and return all tasks in file order.
    pub fn finish(mut self) -> Vec<Task> {
        match mem::replace(&mut self.state, ParseState::Seeking) {
            ParseState::Seeking => {}
            ParseState::InTask(task) => self.finalize(task),
            ParseState::InDiff { mut task, lines } => {
                task.close_diff(lines);
                self.finalize(task);
            }
        }
        self.sink
            .record(&format!("parse finished: {} tasks", self.tasks.len()));
        self.tasks
    }

    fn open(&mut self, description: &str, header_line: &str) -> TaskBuilder {
        let task = TaskBuilder::new(self.next_id, description, header_line);
        self.next_id += 1;
        task
    }

    fn finalize(&mut self, task: TaskBuilder) {
        let task = task.finish();
        self.sink.record(&format!(
            "task id={} status={} host={:?} path={:?} start={} diff_lines={} raw_lines={}",
            task.id,
            task.status,
            task.host,
            task.path,
            task.start_time_display(),
            if task.diff.is_empty() {
                0
            } else {
                task.diff.lines().count()
            },
            task.raw_text.lines().count(),
        ));
        self.tasks.push(task);
    }

    fn on_seeking(&mut self, line: &str) -> ParseState {
        match task_header(line) {
            Some(description) => ParseState::InTask(self.open(description, line)),
            None => ParseState::Seeking,
        }
    }

    fn on_task(&mut self, mut task: TaskBuilder, line: &str) -> ParseState {
        if let Some(description) = task_header(line) {
            self.finalize(task);
            return ParseState::InTask(self.open(description, line));
        }

        task.push_raw(line);

        if is_diff_start(line) {
            return ParseState::InDiff {
                task,
                lines: vec![line.to_string()],
            };
        }

        if let Some(path) = task_path(line) {
            task.path = path.to_string();
            return ParseState::InTask(task);
        }

        match parse_timestamp_line(line) {
            TimestampLine::Parsed(t) => {
                task.start_time = Some(t);
                return ParseState::InTask(task);
            }
            TimestampLine::Invalid => {
                self.sink.record(&format!(
                    "task id={}: unparseable timestamp {:?}",
                    task.id, line
                ));
                return ParseState::InTask(task);
            }
            TimestampLine::NoMatch => {}
        }

        if let Some(host) = started_host(line) {
            task.host = host.to_string();
        } else if let Some((status, host)) = status_line(line) {
            task.status = status;
            task.host = host.to_string();
        }

        ParseState::InTask(task)
    }

    fn on_diff(&mut self, mut task: TaskBuilder, mut lines: Vec<String>, line: &str) -> ParseState {
        let ends_block = line.trim().is_empty()
            || task_header(line).is_some()
            || status_line(line).is_some();

        if ends_block {
            task.close_diff(lines);
            // The terminating line still belongs to the task stream
            return self.on_task(task, line);
        }

        task.push_raw(line);
        lines.push(line.to_string());
        ParseState::InDiff { task, lines }
    }
}

/// Parse a whole log text into tasks.
pub fn parse_log(text: &str) -> Vec<Task> {
    parse_log_with(text, &NullSink)
}

/// Parse a whole log text, reporting per-task diagnostics to `sink`.
pub fn parse_log_with(text: &str, sink: &dyn DiagnosticSink) -> Vec<Task> {
    let mut parser = LogParser::new(sink);
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}
