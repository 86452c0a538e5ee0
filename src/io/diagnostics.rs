use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

/// Default diagnostic log location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "debug.log";

/// Receives formatted diagnostic lines. Recording never fails from the
/// caller's point of view; sinks swallow their own errors.
pub trait DiagnosticSink {
    fn record(&self, line: &str);
}

/// Sink used when diagnostics are disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _line: &str) {}
}

/// Append-only file sink. Each line is prefixed with a local timestamp.
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Open (creating if needed) the log file in append mode.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileSink { file })
    }
}

impl DiagnosticSink for FileSink {
    fn record(&self, line: &str) {
        let stamp = Local::now().format("%Y/%m/%d %H:%M:%S%.6f");
        let _ = writeln!(&self.file, "{} {}", stamp, line);
    }
}

/// Build the sink for a run: a file sink when enabled, otherwise a no-op.
/// If the file cannot be opened a warning goes to stderr and the run
/// continues without diagnostics.
pub fn sink_for(enabled: bool, path: &Path) -> Box<dyn DiagnosticSink> {
    if !enabled {
        return Box::new(NullSink);
    }
    match FileSink::open(path) {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            eprintln!("warning: could not open {}: {}", path.display(), e);
            Box::new(NullSink)
        }
    }
}

/// In-memory sink for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl DiagnosticSink for MemorySink {
    fn record(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
