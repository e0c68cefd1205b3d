//! crates/logging/src/accumulator.rs
//! Scoped message builder that emits at most once when dropped.

use std::fmt::{self, Write as _};
use std::mem;

use crate::logger::Logger;
use crate::partition::Partition;
use crate::severity::Severity;

/// Collects the fragments of a single log statement and delivers them on drop.
///
/// An accumulator is created by [`Logger::message`] (or one of the per-level
/// shorthands such as [`Logger::error`]) and lives for one statement. Each
/// [`append`](Self::append) renders its fragment with [`fmt::Display`] and
/// concatenates it to the body; no separators are inserted. Appends never
/// consult the level gate or the sink.
///
/// When the accumulator goes out of scope, on the normal path or while
/// unwinding, the logger checks the gate for the accumulator's partition and
/// severity *at that moment* and, when enabled, hands the body to the sink.
/// This happens exactly once, also for an empty body.
///
/// ```
/// use std::sync::Arc;
/// use partition_log::{Logger, NullSink, Severity};
///
/// let logger = Logger::new(Arc::new(Severity::Info), Arc::new(NullSink));
/// logger.error("net").append("conn ").append(42).append(" failed");
/// ```
#[must_use = "the message is finalized as soon as the accumulator is dropped"]
pub struct MessageAccumulator<'a> {
    logger: &'a Logger,
    severity: Severity,
    partition: Partition,
    body: String,
}

impl<'a> MessageAccumulator<'a> {
    pub(crate) fn new(logger: &'a Logger, severity: Severity, partition: Partition) -> Self {
        Self {
            logger,
            severity,
            partition,
            body: String::new(),
        }
    }

    /// Appends the textual form of `fragment` to the message body.
    #[allow(clippy::needless_pass_by_value)]
    pub fn append<T>(&mut self, fragment: T) -> &mut Self
    where
        T: fmt::Display,
    {
        // A Display impl that reports an error leaves whatever it wrote so far.
        let _ = write!(self.body, "{fragment}");
        self
    }

    /// Returns the severity the message will be logged at.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the partition the message belongs to.
    #[must_use]
    pub const fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Returns the body accumulated so far.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Write for MessageAccumulator<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.body.push_str(s);
        Ok(())
    }
}

impl fmt::Debug for MessageAccumulator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageAccumulator")
            .field("severity", &self.severity)
            .field("partition", &self.partition)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Drop for MessageAccumulator<'_> {
    fn drop(&mut self) {
        let body = mem::take(&mut self.body);
        self.logger.finalize(&self.partition, self.severity, &body);
    }
}
