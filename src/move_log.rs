//! Append-only audit log of organize decisions.
//!
//! Every move (real or dry-run) is written as one line:
//!
//! ```text
//! 2026-10-18 14:03:27,512 INFO Moved /data/a.png -> /data/images/a.png
//! ```
//!
//! The logger is an explicit value handed to the organizer, so tests can log
//! into a `Vec<u8>` instead of a file.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default log file name, resolved against the working directory.
pub const DEFAULT_LOG_FILE: &str = "file_organizer.log";

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line-oriented log writer over an arbitrary sink.
#[derive(Debug)]
pub struct MoveLog<W: Write> {
    sink: W,
    path: Option<PathBuf>,
}

impl MoveLog<File> {
    /// Opens `path` in append mode, creating it if needed.
    ///
    /// Existing content is never truncated.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            sink: file,
            path: Some(path.to_path_buf()),
        })
    }
}

impl<W: Write> MoveLog<W> {
    /// Wraps any writer, e.g. `Vec<u8>` in tests or `io::stderr()`.
    pub fn new(sink: W) -> Self {
        Self { sink, path: None }
    }

    /// The file backing this log, if it was opened with [`MoveLog::open`].
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes one `<timestamp> <LEVEL> <message>` line and flushes it.
    pub fn log(&mut self, level: LogLevel, message: &str) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        writeln!(self.sink, "{} {} {}", timestamp, level, message)?;
        self.sink.flush()
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        self.log(LogLevel::Info, message)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.log(LogLevel::Error, message)
    }

    /// Records a completed move.
    pub fn moved(&mut self, source: &Path, destination: &Path) -> io::Result<()> {
        self.info(&format!(
            "Moved {} -> {}",
            source.display(),
            destination.display()
        ))
    }

    /// Records a move that a dry run would have performed.
    pub fn would_move(&mut self, source: &Path, destination: &Path) -> io::Result<()> {
        self.info(&format!(
            "[DRY-RUN] Would move {} -> {}",
            source.display(),
            destination.display()
        ))
    }

    /// Consumes the log and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
