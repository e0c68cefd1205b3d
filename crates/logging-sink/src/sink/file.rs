use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-mode log file that can be reopened after external rotation.
///
/// Rotation tools rename the active file and expect the writer to start a
/// fresh one at the original path. [`reopen`](Self::reopen) does exactly that:
/// it flushes and closes the current handle, then opens `path` again in
/// append mode, creating it if needed.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: File,
}

impl LogFile {
    /// Opens (or creates) `path` for appending.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = Self::open_append(&path)?;
        Ok(Self { path, file })
    }

    fn open_append(path: &Path) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Returns the path the file was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the current handle and opens the same path again.
    pub fn reopen(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file = Self::open_append(&self.path)?;
        tracing::debug!(
            target: "partition_log::sink",
            path = %self.path.display(),
            "log file reopened"
        );
        Ok(())
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
