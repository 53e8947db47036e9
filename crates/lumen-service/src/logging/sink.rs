use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use lumen_core::error::{LumenError, Result};

/// Destination for serialized log lines.
///
/// `line` is a complete newline-terminated JSON record. Implementations may
/// block briefly; the logger guarantees only one writer per sink at a time.
pub trait LogSink: Send {
    fn name(&self) -> &str;
    fn write(&mut self, line: &[u8]) -> Result<()>;
}

/// Writes records to stdout.
#[derive(Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&mut self, line: &[u8]) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line)
            .and_then(|_| out.flush())
            .map_err(|source| LumenError::SinkWrite {
                sink: "console".into(),
                source,
            })
    }
}

/// Appends records to a file, creating the parent directory on first write.
///
/// The handle is dropped after a failed write and reopened on the next one,
/// so a log directory that appears later is picked up.
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<File> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }

    fn try_write(&mut self, line: &[u8]) -> io::Result<()> {
        let file = match self.file.take() {
            Some(f) => f,
            None => self.open()?,
        };
        self.file.insert(file).write_all(line)
    }
}

impl LogSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn write(&mut self, line: &[u8]) -> Result<()> {
        self.try_write(line).map_err(|source| {
            self.file = None;
            LumenError::SinkWrite {
                sink: "file".into(),
                source,
            }
        })
    }
}
