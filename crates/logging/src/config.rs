//! crates/logging/src/config.rs
//! Level configuration built from `partition=level` directives.

use std::collections::BTreeMap;
use std::env;

use thiserror::Error;

use crate::partition::{ParsePartitionError, Partition};
use crate::severity::{ParseSeverityError, Severity};

/// Error produced while applying a level directive.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DirectiveError {
    /// The level part of the directive is not a severity.
    #[error("invalid level in directive `{directive}`: {source}")]
    Severity {
        /// The offending directive.
        directive: String,
        /// Underlying parse failure.
        #[source]
        source: ParseSeverityError,
    },
    /// The partition part of the directive is empty.
    #[error("invalid partition in directive `{directive}`: {source}")]
    Partition {
        /// The offending directive.
        directive: String,
        /// Underlying parse failure.
        #[source]
        source: ParsePartitionError,
    },
    /// The environment variable holds non-UTF-8 data.
    #[error("environment variable `{name}` is not valid unicode")]
    NotUnicode {
        /// Variable name.
        name: String,
    },
}

/// Default severity plus per-partition overrides.
///
/// The configuration is plain data: it does nothing until applied to a
/// [`LevelTable`](crate::LevelTable). Directives follow the familiar
/// `default,partition=level` shape:
///
/// ```
/// use partition_log::{LevelConfig, Severity};
///
/// let config = LevelConfig::parse("info,net=warn,storage=trace").unwrap();
/// assert_eq!(config.default_level, Severity::Info);
/// assert_eq!(config.level_for("net"), Severity::Warn);
/// assert_eq!(config.level_for("unknown"), Severity::Info);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelConfig {
    /// Level reported for partitions without an override.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_level: Severity,
    /// Per-partition minimum levels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub partitions: BTreeMap<Partition, Severity>,
}

impl LevelConfig {
    /// Creates a configuration with no overrides.
    #[must_use]
    pub fn new(default_level: Severity) -> Self {
        Self {
            default_level,
            partitions: BTreeMap::new(),
        }
    }

    /// Parses a comma-separated directive list on top of the default config.
    pub fn parse(directives: &str) -> Result<Self, DirectiveError> {
        let mut config = Self::default();
        config.apply_directives(directives)?;
        Ok(config)
    }

    /// Reads directives from the environment variable `name`.
    ///
    /// A missing variable yields the default configuration.
    pub fn from_env(name: &str) -> Result<Self, DirectiveError> {
        match env::var(name) {
            Ok(value) => Self::parse(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(DirectiveError::NotUnicode {
                name: name.to_owned(),
            }),
        }
    }

    /// Applies every directive in a comma-separated list.
    ///
    /// Empty entries are skipped. Later directives override earlier ones.
    pub fn apply_directives(&mut self, directives: &str) -> Result<(), DirectiveError> {
        for token in directives.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            self.apply_directive(token)?;
        }
        Ok(())
    }

    /// Applies a single directive: either `level` or `partition=level`.
    pub fn apply_directive(&mut self, directive: &str) -> Result<(), DirectiveError> {
        let parse_level = |text: &str| {
            text.parse::<Severity>()
                .map_err(|source| DirectiveError::Severity {
                    directive: directive.to_owned(),
                    source,
                })
        };

        match directive.split_once('=') {
            None => {
                self.default_level = parse_level(directive)?;
            }
            Some((name, level)) => {
                let partition = name.trim().parse::<Partition>().map_err(|source| {
                    DirectiveError::Partition {
                        directive: directive.to_owned(),
                        source,
                    }
                })?;
                let level = parse_level(level)?;
                self.partitions.insert(partition, level);
            }
        }
        Ok(())
    }

    /// Sets the level for one partition.
    pub fn set(&mut self, partition: Partition, level: Severity) {
        self.partitions.insert(partition, level);
    }

    /// Returns the level a table built from this config reports for `partition`.
    #[must_use]
    pub fn level_for(&self, partition: &str) -> Severity {
        self.partitions
            .get(partition)
            .copied()
            .unwrap_or(self.default_level)
    }
}
