//! crates/logging/src/partition.rs
//! Subsystem names used as level-lookup keys.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Caller-chosen name of the subsystem a message belongs to.
///
/// A partition is only ever used as a key into a
/// [`LevelSource`](crate::LevelSource); this crate does not keep a registry
/// of known partitions. Names are never empty. Static names are stored
/// borrowed, so logging to a literal partition does not allocate.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Partition(Cow<'static, str>);

/// Error returned when a partition name is empty.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("partition name must not be empty")]
pub struct ParsePartitionError {
    _private: (),
}

impl Partition {
    /// Validates `name` and wraps it as a partition.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Result<Self, ParsePartitionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ParsePartitionError { _private: () });
        }
        Ok(Self(name))
    }

    /// Wraps a static name, rejecting empty names at compile time when used in
    /// a const context.
    ///
    /// ```
    /// use partition_log::Partition;
    ///
    /// const NET: Partition = Partition::from_static("net");
    /// assert_eq!(NET.as_str(), "net");
    /// ```
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        assert!(!name.is_empty(), "partition name must not be empty");
        Self(Cow::Borrowed(name))
    }

    /// Returns the partition name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Partition {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Partition {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Partition {
    /// Wraps a literal name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    fn from(name: &'static str) -> Self {
        assert!(!name.is_empty(), "partition name must not be empty");
        Self(Cow::Borrowed(name))
    }
}

impl TryFrom<String> for Partition {
    type Error = ParsePartitionError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<Partition> for String {
    fn from(partition: Partition) -> Self {
        partition.0.into_owned()
    }
}

impl FromStr for Partition {
    type Err = ParsePartitionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::new(input.to_owned())
    }
}
