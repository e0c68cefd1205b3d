use std::sync::Mutex;

use partition_log::{MessageSink, Partition, Severity, SinkError};

/// A message captured by [`MemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Partition the message was logged to.
    pub partition: Partition,
    /// Severity the message was logged at.
    pub severity: Severity,
    /// Message body.
    pub text: String,
}

/// Sink that keeps every delivered message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the captured records.
    pub fn records(&self) -> Result<Vec<Record>, SinkError> {
        Ok(self
            .records
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .clone())
    }

    /// Removes and returns the captured records.
    pub fn drain(&self) -> Result<Vec<Record>, SinkError> {
        Ok(std::mem::take(
            &mut *self.records.lock().map_err(|_| SinkError::Poisoned)?,
        ))
    }
}

impl MessageSink for MemorySink {
    fn accept_message(
        &self,
        partition: &Partition,
        severity: Severity,
        text: &str,
    ) -> Result<(), SinkError> {
        self.records
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .push(Record {
                partition: partition.clone(),
                severity,
                text: text.to_owned(),
            });
        Ok(())
    }
}
