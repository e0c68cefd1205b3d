//! crates/logging/src/levels.rs
//! Concurrent, reconfigurable per-partition level table.

use std::sync::atomic::{AtomicU8, Ordering};

use dashmap::DashMap;

use crate::config::LevelConfig;
use crate::gate::LevelSource;
use crate::partition::Partition;
use crate::severity::Severity;

/// Process-wide level store keyed by partition name.
///
/// Readers never block each other and a reconfiguration only locks the shard
/// holding the affected partition, so gates on other threads observe either
/// the previous or the new level, never a torn value. Partitions without an
/// override report the table's default level.
#[derive(Debug)]
pub struct LevelTable {
    default_level: AtomicU8,
    overrides: DashMap<Partition, Severity>,
}

impl LevelTable {
    /// Creates a table with no overrides.
    #[must_use]
    pub fn new(default_level: Severity) -> Self {
        Self {
            default_level: AtomicU8::new(default_level.as_u8()),
            overrides: DashMap::new(),
        }
    }

    /// Creates a table populated from `config`.
    #[must_use]
    pub fn from_config(config: &LevelConfig) -> Self {
        let table = Self::new(config.default_level);
        for (partition, level) in &config.partitions {
            table.overrides.insert(partition.clone(), *level);
        }
        table
    }

    /// Returns the level reported for partitions without an override.
    #[must_use]
    pub fn default_level(&self) -> Severity {
        Severity::from_u8(self.default_level.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Changes the level reported for partitions without an override.
    pub fn set_default(&self, level: Severity) {
        let previous = self.default_level.swap(level.as_u8(), Ordering::AcqRel);
        tracing::debug!(
            target: "partition_log::levels",
            previous = previous,
            level = %level,
            "default level changed"
        );
    }

    /// Sets the minimum level for `partition`, returning the previous override.
    pub fn set_level(&self, partition: Partition, level: Severity) -> Option<Severity> {
        tracing::debug!(
            target: "partition_log::levels",
            partition = %partition,
            level = %level,
            "partition level changed"
        );
        self.overrides.insert(partition, level)
    }

    /// Removes the override for `partition`, returning it if present.
    pub fn clear_level(&self, partition: &str) -> Option<Severity> {
        let removed = self.overrides.remove(partition).map(|(_, level)| level);
        if removed.is_some() {
            tracing::debug!(
                target: "partition_log::levels",
                partition = partition,
                "partition level cleared"
            );
        }
        removed
    }

    /// Returns the override for `partition`, if any.
    #[must_use]
    pub fn override_for(&self, partition: &str) -> Option<Severity> {
        self.overrides.get(partition).map(|entry| *entry.value())
    }

    /// Replaces the whole table with `config`.
    ///
    /// Partitions missing from `config` lose their overrides. Each entry is
    /// updated individually, so a concurrent reader may briefly see a mix of
    /// old and new per-partition levels.
    pub fn apply(&self, config: &LevelConfig) {
        self.default_level
            .store(config.default_level.as_u8(), Ordering::Release);
        self.overrides
            .retain(|partition, _| config.partitions.contains_key(partition));
        for (partition, level) in &config.partitions {
            self.overrides.insert(partition.clone(), *level);
        }
        tracing::debug!(
            target: "partition_log::levels",
            default = %config.default_level,
            overrides = config.partitions.len(),
            "level table reconfigured"
        );
    }

    /// Captures the current contents as a [`LevelConfig`].
    #[must_use]
    pub fn snapshot(&self) -> LevelConfig {
        let mut config = LevelConfig::new(self.default_level());
        for entry in &self.overrides {
            config.set(entry.key().clone(), *entry.value());
        }
        config
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

impl LevelSource for LevelTable {
    fn current_minimum_level(&self, partition: &str) -> Severity {
        self.override_for(partition)
            .unwrap_or_else(|| self.default_level())
    }
}
