//! crates/logging-sink/src/backend.rs
//! Host backend: level table, output destination, and record format in one place.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use partition_log::{DirectiveError, LevelConfig, LevelTable, Logger, SinkError};

use crate::format::RecordFormat;
use crate::sink::{LogFile, WriterSink};

/// Environment variable read by [`Backend::init`] for level directives.
pub const LEVELS_ENV: &str = "PARTITION_LOG";

/// Where the backend writes rendered records.
#[derive(Debug)]
pub enum Destination {
    /// The process's standard error stream.
    Stderr(io::Stderr),
    /// An append-mode log file.
    File(LogFile),
}

impl Write for Destination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr(stderr) => stderr.write(buf),
            Self::File(file) => file.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Stderr(stderr) => stderr.write_all(buf),
            Self::File(file) => file.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr(stderr) => stderr.flush(),
            Self::File(file) => file.flush(),
        }
    }
}

/// Process-side logging backend.
///
/// The backend owns the shared [`LevelTable`] and the output sink, and hands
/// out [`Logger`] handles wired to both. Format, destination, and rotation can
/// be changed at any time; records already being written finish with the old
/// settings.
///
/// ```no_run
/// use partition_log_sink::Backend;
///
/// let backend = Backend::init()?;
/// backend.set_format(Some("node-1"), true)?;
/// backend.set_logging_to_file("/var/log/node.log")?;
/// backend.logger().info("net").append("started");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Backend {
    levels: Arc<LevelTable>,
    output: Arc<WriterSink<Destination>>,
    logger: Logger,
}

impl Backend {
    /// Builds a backend writing to stderr, with levels read from
    /// [`LEVELS_ENV`] (default level `info` when unset).
    pub fn init() -> Result<Self, DirectiveError> {
        let config = LevelConfig::from_env(LEVELS_ENV)?;
        Ok(Self::with_config(&config))
    }

    /// Builds a backend writing to stderr with the given level configuration.
    #[must_use]
    pub fn with_config(config: &LevelConfig) -> Self {
        let levels = Arc::new(LevelTable::from_config(config));
        let output = Arc::new(WriterSink::new(Destination::Stderr(io::stderr())));
        let logger = Logger::new(levels.clone(), output.clone());
        Self {
            levels,
            output,
            logger,
        }
    }

    /// Returns a logger wired to this backend.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Returns the shared level table for reconfiguration.
    #[must_use]
    pub const fn levels(&self) -> &Arc<LevelTable> {
        &self.levels
    }

    /// Makes this backend's logger the process-wide default.
    pub fn install(&self) -> Result<(), Logger> {
        partition_log::set_default_logger(self.logger.clone())
    }

    /// Sets the peer id prefix and whether records carry timestamps.
    pub fn set_format(&self, peer_id: Option<&str>, timestamps: bool) -> Result<(), SinkError> {
        self.output.set_format(RecordFormat::new(peer_id, timestamps))
    }

    /// Redirects output to `path`, opened in append mode.
    ///
    /// The current destination is flushed first; if that fails it stays in
    /// place and the error is returned.
    pub fn set_logging_to_file(&self, path: impl AsRef<Path>) -> Result<(), SinkError> {
        let file = LogFile::open(path.as_ref())?;
        self.output.replace_writer(Destination::File(file))?;
        tracing::debug!(
            target: "partition_log::sink",
            path = %path.as_ref().display(),
            "logging to file"
        );
        Ok(())
    }

    /// Redirects output back to stderr.
    pub fn set_logging_to_stderr(&self) -> Result<(), SinkError> {
        self.output
            .replace_writer(Destination::Stderr(io::stderr()))?;
        Ok(())
    }

    /// Returns the log file path, or `None` while writing to stderr.
    pub fn log_path(&self) -> Result<Option<PathBuf>, SinkError> {
        self.output.with_writer(|destination| match destination {
            Destination::Stderr(_) => None,
            Destination::File(file) => Some(file.path().to_path_buf()),
        })
    }

    /// Reopens the log file so an external rotation takes effect.
    ///
    /// Does nothing while writing to stderr.
    pub fn rotate(&self) -> Result<(), SinkError> {
        self.output.with_writer(|destination| match destination {
            Destination::Stderr(_) => Ok(()),
            Destination::File(file) => file.reopen(),
        })??;
        Ok(())
    }
}
