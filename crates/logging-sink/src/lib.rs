#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `partition_log_sink` provides the host side of the `partition_log`
//! facade: concrete [`MessageSink`](partition_log::MessageSink)
//! implementations and a [`Backend`] that wires a level table, an output
//! destination, and a record format together.
//!
//! # Design
//!
//! - [`WriterSink`] renders records into any [`std::io::Write`] target behind
//!   a mutex, one record per lock acquisition.
//! - [`RecordFormat`] controls the optional timestamp and peer id prefix;
//!   [`LineMode`] controls the trailing newline.
//! - [`LogFile`] is an append-mode file that can be reopened after external
//!   rotation.
//! - [`MemorySink`] keeps delivered messages in memory for inspection.
//! - [`Backend`] starts on stderr and can be pointed at a file, reformatted,
//!   and rotated while loggers are in use.
//!
//! # Errors
//!
//! Sinks report failures as [`SinkError`](partition_log::SinkError): I/O
//! failures from the writer and poisoned locks. The facade routes these to
//! the logger's error handler; nothing here panics on a failed write.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use partition_log::{Logger, Severity};
//! use partition_log_sink::{MemorySink, Record};
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::new(Arc::new(Severity::Warn), sink.clone());
//!
//! logger.info("net").append("filtered");
//! logger.error("net").append("conn ").append(42).append(" failed");
//!
//! let records = sink.records().unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].text, "conn 42 failed");
//! ```

mod backend;
mod format;
mod line_mode;
mod sink;

pub use backend::{Backend, Destination, LEVELS_ENV};
pub use format::{RecordFormat, severity_label};
pub use line_mode::LineMode;
pub use sink::{LogFile, MemorySink, Record, WriterSink};
