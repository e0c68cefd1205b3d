//! crates/logging/src/sink.rs
//! Contract for the destination of finished messages.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::partition::Partition;
use crate::severity::Severity;

/// Failure reported by a [`MessageSink`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// The underlying writer failed.
    #[error("log sink write failed: {0}")]
    Io(#[from] io::Error),
    /// The sink has been shut down and no longer accepts messages.
    #[error("log sink is closed")]
    Closed,
    /// A previous writer panicked while holding the sink's lock.
    #[error("log sink lock poisoned")]
    Poisoned,
}

/// Destination that records or displays finished messages.
///
/// The accumulator calls [`accept_message`](Self::accept_message) from
/// whichever thread the log statement ran on, so implementations must be safe
/// to call concurrently. No ordering is promised between messages from
/// different threads.
pub trait MessageSink: Send + Sync {
    /// Delivers one finished message.
    fn accept_message(
        &self,
        partition: &Partition,
        severity: Severity,
        text: &str,
    ) -> Result<(), SinkError>;
}

impl<T> MessageSink for Arc<T>
where
    T: MessageSink + ?Sized,
{
    fn accept_message(
        &self,
        partition: &Partition,
        severity: Severity,
        text: &str,
    ) -> Result<(), SinkError> {
        (**self).accept_message(partition, severity, text)
    }
}

/// Sink that drops every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn accept_message(
        &self,
        _partition: &Partition,
        _severity: Severity,
        _text: &str,
    ) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: SinkError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, SinkError::Io(_)));
        assert!(err.to_string().starts_with("log sink write failed"));
    }

    #[test]
    fn null_sink_accepts_everything() {
        let sink = NullSink;
        assert!(
            sink.accept_message(&Partition::from("net"), Severity::Fatal, "x")
                .is_ok()
        );
    }
}
