#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `partition_log` is a small logging facade. Call sites build a message from
//! stream-style fragments, tag it with a [`Severity`] and a [`Partition`]
//! (the subsystem it belongs to), and the facade delivers it to a host-owned
//! [`MessageSink`] only when the partition's configured minimum level allows
//! it.
//!
//! # Design
//!
//! Two pieces make up the core:
//!
//! - [`LevelGate`] answers "is severity S enabled for partition P?" by asking
//!   an injected [`LevelSource`]. It caches nothing.
//! - [`MessageAccumulator`] collects fragments for one statement and, when it
//!   is dropped, consults the gate once and delivers the body at most once.
//!
//! [`Logger`] bundles a gate, a sink, and a sink-failure handler. A concrete
//! concurrent level store is provided by [`LevelTable`], configured through
//! [`LevelConfig`] directives such as `"info,net=warn"`.
//!
//! # Invariants
//!
//! - The emission decision is made when the accumulator is dropped, never
//!   earlier; reconfiguring the level table in between changes the outcome.
//! - Fragments are concatenated in append order without separators.
//! - Each accumulator attempts delivery at most once, including for an empty
//!   body.
//! - Appending never touches the gate or the sink.
//!
//! # Errors
//!
//! Building and filtering messages cannot fail. Sink failures are passed to the
//! logger's error handler (by default a `tracing` warning) and a panicking
//! sink is contained, so logging during unwinding never aborts.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use partition_log::{LevelConfig, LevelTable, Logger, NullSink, Partition, Severity};
//!
//! let table = Arc::new(LevelTable::from_config(&LevelConfig::parse("info,net=warn").unwrap()));
//! let logger = Logger::new(table.clone(), Arc::new(NullSink));
//!
//! assert!(!logger.log_debug("net"));
//! logger.error("net").append("conn ").append(42).append(" failed");
//!
//! table.set_level(Partition::from("net"), Severity::Debug);
//! assert!(logger.log_debug("net"));
//! ```

mod accumulator;
mod config;
mod gate;
mod levels;
mod logger;
mod macros;
mod partition;
mod severity;
mod sink;
#[cfg(feature = "tracing-bridge")]
mod tracing_bridge;

pub use accumulator::MessageAccumulator;
pub use config::{DirectiveError, LevelConfig};
pub use gate::{LevelGate, LevelSource};
pub use levels::LevelTable;
pub use logger::{ErrorHandler, Logger, default_logger, set_default_logger};
pub use partition::{ParsePartitionError, Partition};
pub use severity::{ParseSeverityError, Severity};
pub use sink::{MessageSink, NullSink, SinkError};
#[cfg(feature = "tracing-bridge")]
pub use tracing_bridge::{TRACING_TARGET, TracingInitError, TracingSink, init_tracing};
