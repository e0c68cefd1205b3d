//! crates/logging/src/gate.rs
//! Level filtering predicate backed by an external level store.

use std::fmt;
use std::sync::Arc;

use crate::severity::Severity;

/// Store that reports the minimum severity currently configured for a partition.
///
/// Implementations must answer for every partition name, including ones they
/// have never seen, and must tolerate concurrent reads while being
/// reconfigured. [`LevelTable`](crate::LevelTable) is the stock implementation.
pub trait LevelSource: Send + Sync {
    /// Returns the minimum severity that `partition` currently accepts.
    fn current_minimum_level(&self, partition: &str) -> Severity;
}

impl<T> LevelSource for Arc<T>
where
    T: LevelSource + ?Sized,
{
    fn current_minimum_level(&self, partition: &str) -> Severity {
        (**self).current_minimum_level(partition)
    }
}

impl<T> LevelSource for &T
where
    T: LevelSource + ?Sized,
{
    fn current_minimum_level(&self, partition: &str) -> Severity {
        (**self).current_minimum_level(partition)
    }
}

/// A level source that answers the same severity for every partition.
impl LevelSource for Severity {
    fn current_minimum_level(&self, _partition: &str) -> Severity {
        *self
    }
}

/// Answers whether a severity is enabled for a partition.
///
/// The gate caches nothing. Every query goes to the underlying
/// [`LevelSource`], so reconfiguration is visible to the very next check.
#[derive(Clone)]
pub struct LevelGate {
    source: Arc<dyn LevelSource>,
}

impl LevelGate {
    /// Creates a gate that consults `source`.
    pub fn new(source: Arc<dyn LevelSource>) -> Self {
        Self { source }
    }

    /// Returns `true` when `severity` is at or above the partition's minimum.
    #[must_use]
    pub fn is_enabled(&self, partition: &str, severity: Severity) -> bool {
        severity >= self.source.current_minimum_level(partition)
    }

    /// Shorthand for `is_enabled(partition, Severity::Debug)`.
    #[must_use]
    pub fn log_debug(&self, partition: &str) -> bool {
        self.is_enabled(partition, Severity::Debug)
    }

    /// Shorthand for `is_enabled(partition, Severity::Trace)`.
    #[must_use]
    pub fn log_trace(&self, partition: &str) -> bool {
        self.is_enabled(partition, Severity::Trace)
    }

    /// Returns the underlying level source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn LevelSource> {
        &self.source
    }
}

impl fmt::Debug for LevelGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelGate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

    struct Counting {
        level: AtomicU8,
        queries: AtomicUsize,
    }

    impl Counting {
        fn new(level: Severity) -> Arc<Self> {
            Arc::new(Self {
                level: AtomicU8::new(level.as_u8()),
                queries: AtomicUsize::new(0),
            })
        }
    }

    impl LevelSource for Counting {
        fn current_minimum_level(&self, _partition: &str) -> Severity {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Severity::from_u8(self.level.load(Ordering::SeqCst)).unwrap_or_default()
        }
    }

    #[test]
    fn enabled_at_and_above_minimum() {
        let gate = LevelGate::new(Arc::new(Severity::Warn));
        assert!(!gate.is_enabled("net", Severity::Trace));
        assert!(!gate.is_enabled("net", Severity::Info));
        assert!(gate.is_enabled("net", Severity::Warn));
        assert!(gate.is_enabled("net", Severity::Fatal));
    }

    #[test]
    fn every_query_reaches_the_source() {
        let source = Counting::new(Severity::Info);
        let gate = LevelGate::new(source.clone());

        let _ = gate.is_enabled("net", Severity::Info);
        let _ = gate.log_debug("net");
        let _ = gate.log_trace("net");

        assert_eq!(source.queries.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn reconfiguration_is_visible_immediately() {
        let source = Counting::new(Severity::Error);
        let gate = LevelGate::new(source.clone());
        assert!(!gate.log_debug("storage"));

        source.level.store(Severity::Debug.as_u8(), Ordering::SeqCst);
        assert!(gate.log_debug("storage"));
        assert!(!gate.log_trace("storage"));
    }

    #[test]
    fn convenience_predicates_match_thresholds() {
        for minimum in Severity::ALL {
            let gate = LevelGate::new(Arc::new(minimum));
            assert_eq!(gate.log_debug("p"), minimum <= Severity::Debug);
            assert_eq!(gate.log_trace("p"), minimum <= Severity::Trace);
        }
    }
}
