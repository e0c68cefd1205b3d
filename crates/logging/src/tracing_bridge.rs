//! crates/logging/src/tracing_bridge.rs
//! Bridge from accepted messages to the `tracing` ecosystem.
//!
//! [`TracingSink`] is a [`MessageSink`] that re-emits every delivered message
//! as a `tracing` event, so hosts that already run a `tracing` subscriber can
//! route partition-filtered output through it. Filtering by partition still
//! happens in the [`LevelGate`](crate::LevelGate); the subscriber only sees
//! messages that passed it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use partition_log::{LevelTable, Logger, TracingSink, init_tracing};
//!
//! init_tracing("trace")?;
//! let logger = Logger::new(Arc::new(LevelTable::default()), Arc::new(TracingSink));
//! logger.info("net").append("listening on ").append(8080);
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::partition::Partition;
use crate::severity::Severity;
use crate::sink::{MessageSink, SinkError};

/// Target attached to every event emitted by [`TracingSink`].
pub const TRACING_TARGET: &str = "partition_log";

/// Sink that forwards messages as `tracing` events.
///
/// The partition is recorded as the `partition` field and the body as the
/// event message. [`Severity::Fatal`] has no `tracing` counterpart and is
/// emitted at `ERROR` with `fatal = true`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Maps a severity onto the closest `tracing` level.
    #[must_use]
    pub const fn level_for(severity: Severity) -> Level {
        match severity {
            Severity::Trace => Level::TRACE,
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warn => Level::WARN,
            Severity::Error | Severity::Fatal => Level::ERROR,
        }
    }
}

impl MessageSink for TracingSink {
    fn accept_message(
        &self,
        partition: &Partition,
        severity: Severity,
        text: &str,
    ) -> Result<(), SinkError> {
        let partition = partition.as_str();
        match severity {
            Severity::Trace => tracing::trace!(target: TRACING_TARGET, partition, "{text}"),
            Severity::Debug => tracing::debug!(target: TRACING_TARGET, partition, "{text}"),
            Severity::Info => tracing::info!(target: TRACING_TARGET, partition, "{text}"),
            Severity::Warn => tracing::warn!(target: TRACING_TARGET, partition, "{text}"),
            Severity::Error => tracing::error!(target: TRACING_TARGET, partition, "{text}"),
            Severity::Fatal => {
                tracing::error!(target: TRACING_TARGET, partition, fatal = true, "{text}");
            }
        }
        Ok(())
    }
}

/// Error returned by [`init_tracing`].
#[derive(Debug, Error)]
pub enum TracingInitError {
    /// The filter directives could not be parsed.
    #[error("invalid tracing filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs a formatting `tracing` subscriber filtered by `directives`.
///
/// The directives use `tracing-subscriber`'s `EnvFilter` syntax. Partition
/// level filtering is separate and stays with the
/// [`LevelTable`](crate::LevelTable).
pub fn init_tracing(directives: &str) -> Result<(), TracingInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_new(directives)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}
