use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::io::diagnostics::DiagnosticSink;
use crate::model::task::TaskStore;
use crate::parse::parse_log_with;

/// Error type for loading a log file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no tasks found in {path}")]
    NoTasks { path: PathBuf },
}

/// Read the whole file into memory. Invalid UTF-8 is replaced rather than
/// rejected so that a stray byte cannot hide the rest of the log.
pub fn read_log(path: &Path) -> Result<String, LoadError> {
    let mut file = File::open(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read and parse a log file. A log without any task header is an error:
/// there is nothing to show.
pub fn load_log(path: &Path, sink: &dyn DiagnosticSink) -> Result<TaskStore, LoadError> {
    let text = read_log(path)?;
    sink.record(&format!("read {} bytes from {}", text.len(), path.display()));

    let tasks = parse_log_with(&text, sink);
    if tasks.is_empty() {
        return Err(LoadError::NoTasks {
            path: path.to_path_buf(),
        });
    }
    Ok(TaskStore::new(tasks))
}
