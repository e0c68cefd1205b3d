//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use partition_log::{MessageSink, Partition, Severity, SinkError};

/// One delivered message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivered {
    pub partition: String,
    pub severity: Severity,
    pub text: String,
}

impl Delivered {
    pub fn new(partition: &str, severity: Severity, text: &str) -> Self {
        Self {
            partition: partition.to_owned(),
            severity,
            text: text.to_owned(),
        }
    }
}

/// Sink that records every delivery in order.
#[derive(Clone, Default)]
pub struct RecordingSink {
    delivered: Arc<Mutex<Vec<Delivered>>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<Delivered> {
        self.delivered.lock().expect("recording lock").clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.delivered()
            .into_iter()
            .map(|delivered| delivered.text)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.delivered.lock().expect("recording lock").len()
    }
}

impl MessageSink for RecordingSink {
    fn accept_message(
        &self,
        partition: &Partition,
        severity: Severity,
        text: &str,
    ) -> Result<(), SinkError> {
        self.delivered
            .lock()
            .expect("recording lock")
            .push(Delivered::new(partition.as_str(), severity, text));
        Ok(())
    }
}

/// Sink that always fails with [`SinkError::Closed`].
#[derive(Clone, Copy, Default)]
pub struct ClosedSink;

impl MessageSink for ClosedSink {
    fn accept_message(
        &self,
        _partition: &Partition,
        _severity: Severity,
        _text: &str,
    ) -> Result<(), SinkError> {
        Err(SinkError::Closed)
    }
}
