//! Append-only journal of placement and service events.
//!
//! The service owns a `Box<dyn Journal>` handed to it at construction.
//! Recording never fails from the caller's point of view: sinks that can
//! fail report the failure through `tracing` and carry on.

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{info, warn};

pub trait Journal {
    fn record(&self, line: &str);
}

/// Forwards journal lines to `tracing` under the `servery::journal` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingJournal;

impl Journal for TracingJournal {
    fn record(&self, line: &str) {
        info!(target: "servery::journal", "{line}");
    }
}

/// Appends `[LOG] <line>` to a file.
#[derive(Debug)]
pub struct FileJournal {
    path: PathBuf,
    file: File,
}

impl FileJournal {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Journal for FileJournal {
    fn record(&self, line: &str) {
        if let Err(err) = writeln!(&self.file, "[LOG] {line}") {
            warn!(path = %self.path.display(), %err, "journal write failed");
        }
    }
}

/// Keeps journal lines in memory. Clones share the same buffer, so a handle
/// kept by the caller sees what the service records.
#[derive(Debug, Default, Clone)]
pub struct MemoryJournal {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl Journal for MemoryJournal {
    fn record(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
