//! crates/logging/src/logger.rs
//! Handle tying a level source and a sink together for call sites.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use crate::accumulator::MessageAccumulator;
use crate::gate::{LevelGate, LevelSource};
use crate::partition::Partition;
use crate::severity::Severity;
use crate::sink::{MessageSink, SinkError};

/// Callback invoked when the sink rejects a message.
pub type ErrorHandler = Arc<dyn Fn(&Partition, Severity, &SinkError) + Send + Sync>;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Cheap-to-clone handle used by call sites to build messages.
///
/// A logger owns no configuration of its own. The level source and sink are
/// injected, which lets tests substitute deterministic fakes while production
/// code shares a single [`LevelTable`](crate::LevelTable) and backend sink.
#[derive(Clone)]
pub struct Logger {
    gate: LevelGate,
    sink: Arc<dyn MessageSink>,
    on_error: ErrorHandler,
}

impl Logger {
    /// Creates a logger that reports sink failures through `tracing`.
    pub fn new(levels: Arc<dyn LevelSource>, sink: Arc<dyn MessageSink>) -> Self {
        Self {
            gate: LevelGate::new(levels),
            sink,
            on_error: Arc::new(report_sink_error),
        }
    }

    /// Replaces the sink failure handler.
    #[must_use]
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Partition, Severity, &SinkError) + Send + Sync + 'static,
    {
        self.on_error = Arc::new(handler);
        self
    }

    /// Returns the level gate.
    #[must_use]
    pub const fn gate(&self) -> &LevelGate {
        &self.gate
    }

    /// Returns the sink messages are delivered to.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn MessageSink> {
        &self.sink
    }

    /// Returns `true` when `severity` is enabled for `partition`.
    #[must_use]
    pub fn is_enabled(&self, partition: &str, severity: Severity) -> bool {
        self.gate.is_enabled(partition, severity)
    }

    /// Returns `true` when debug output is enabled for `partition`.
    #[must_use]
    pub fn log_debug(&self, partition: &str) -> bool {
        self.gate.log_debug(partition)
    }

    /// Returns `true` when trace output is enabled for `partition`.
    #[must_use]
    pub fn log_trace(&self, partition: &str) -> bool {
        self.gate.log_trace(partition)
    }

    /// Starts a message at `severity` for `partition`.
    pub fn message(
        &self,
        severity: Severity,
        partition: impl Into<Partition>,
    ) -> MessageAccumulator<'_> {
        MessageAccumulator::new(self, severity, partition.into())
    }

    /// Starts a [`Severity::Trace`] message.
    pub fn trace(&self, partition: impl Into<Partition>) -> MessageAccumulator<'_> {
        self.message(Severity::Trace, partition)
    }

    /// Starts a [`Severity::Debug`] message.
    pub fn debug(&self, partition: impl Into<Partition>) -> MessageAccumulator<'_> {
        self.message(Severity::Debug, partition)
    }

    /// Starts a [`Severity::Info`] message.
    pub fn info(&self, partition: impl Into<Partition>) -> MessageAccumulator<'_> {
        self.message(Severity::Info, partition)
    }

    /// Starts a [`Severity::Warn`] message.
    pub fn warn(&self, partition: impl Into<Partition>) -> MessageAccumulator<'_> {
        self.message(Severity::Warn, partition)
    }

    /// Starts a [`Severity::Error`] message.
    pub fn error(&self, partition: impl Into<Partition>) -> MessageAccumulator<'_> {
        self.message(Severity::Error, partition)
    }

    /// Starts a [`Severity::Fatal`] message.
    pub fn fatal(&self, partition: impl Into<Partition>) -> MessageAccumulator<'_> {
        self.message(Severity::Fatal, partition)
    }

    /// Runs the emission decision for a finished message.
    ///
    /// Called exactly once per accumulator, from its `Drop`. Sink errors go to
    /// the error handler and sink panics are contained, so finalizing while the
    /// thread is already unwinding never aborts the process.
    pub(crate) fn finalize(&self, partition: &Partition, severity: Severity, body: &str) {
        if !self.gate.is_enabled(partition.as_str(), severity) {
            return;
        }

        let delivered = panic::catch_unwind(AssertUnwindSafe(|| {
            if let Err(error) = self.sink.accept_message(partition, severity, body) {
                (self.on_error)(partition, severity, &error);
            }
        }));

        if delivered.is_err() {
            tracing::warn!(
                target: "partition_log::sink",
                partition = %partition,
                severity = %severity,
                "log sink panicked; message dropped"
            );
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

fn report_sink_error(partition: &Partition, severity: Severity, error: &SinkError) {
    tracing::warn!(
        target: "partition_log::sink",
        partition = %partition,
        severity = %severity,
        error = %error,
        "failed to deliver log message"
    );
}

/// Installs the process-wide logger used by [`clog!`](crate::clog).
///
/// The first installation wins; later calls hand the rejected logger back.
pub fn set_default_logger(logger: Logger) -> Result<(), Logger> {
    DEFAULT_LOGGER.set(logger)
}

/// Returns the process-wide logger, if one has been installed.
#[must_use]
pub fn default_logger() -> Option<&'static Logger> {
    DEFAULT_LOGGER.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelTable;
    use crate::sink::NullSink;
    use std::io;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing;

    impl MessageSink for Failing {
        fn accept_message(
            &self,
            _partition: &Partition,
            _severity: Severity,
            _text: &str,
        ) -> Result<(), SinkError> {
            Err(SinkError::Io(io::Error::other("disk full")))
        }
    }

    struct Panicking;

    impl MessageSink for Panicking {
        fn accept_message(
            &self,
            _partition: &Partition,
            _severity: Severity,
            _text: &str,
        ) -> Result<(), SinkError> {
            panic!("sink exploded");
        }
    }

    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl MessageSink for Counting {
        fn accept_message(
            &self,
            _partition: &Partition,
            _severity: Severity,
            _text: &str,
        ) -> Result<(), SinkError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn sink_errors_reach_the_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let logger = Logger::new(Arc::new(Severity::Trace), Arc::new(Failing)).with_error_handler(
            move |partition, severity, error| {
                recorder.lock().expect("lock").push(format!(
                    "{partition}:{severity}:{error}"
                ));
            },
        );

        logger.error("storage").append("write failed");

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("storage:error:log sink write failed"));
    }

    #[test]
    fn sink_panic_is_contained() {
        let logger = Logger::new(Arc::new(Severity::Trace), Arc::new(Panicking));
        logger.info("net").append("still running");
    }

    #[test]
    fn per_level_shorthands_use_their_severity() {
        let logger = Logger::new(Arc::new(Severity::Info), Arc::new(NullSink));
        assert_eq!(logger.trace("p").severity(), Severity::Trace);
        assert_eq!(logger.debug("p").severity(), Severity::Debug);
        assert_eq!(logger.info("p").severity(), Severity::Info);
        assert_eq!(logger.warn("p").severity(), Severity::Warn);
        assert_eq!(logger.error("p").severity(), Severity::Error);
        assert_eq!(logger.fatal("p").severity(), Severity::Fatal);
    }

    #[test]
    fn clones_share_configuration() {
        let table = Arc::new(LevelTable::new(Severity::Error));
        let sink = Arc::new(Counting::default());
        let logger = Logger::new(table.clone(), sink.clone());
        let clone = logger.clone();

        clone.info("net").append("filtered");
        table.set_level(Partition::from("net"), Severity::Info);
        logger.info("net").append("delivered");
        clone.info("net").append("delivered");

        assert_eq!(sink.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn pre_checks_follow_the_gate() {
        let table = Arc::new(LevelTable::new(Severity::Info));
        let logger = Logger::new(table.clone(), Arc::new(Counting::default()));
        assert!(!logger.log_debug("net"));
        table.set_level(Partition::from("net"), Severity::Debug);
        assert!(logger.log_debug("net"));
        assert!(!logger.log_trace("net"));
        assert!(logger.is_enabled("net", Severity::Debug));
    }
}
