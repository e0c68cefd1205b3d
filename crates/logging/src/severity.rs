//! crates/logging/src/severity.rs
//! Ordered severity levels shared by the gate, the accumulator, and sinks.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity of a log message.
///
/// Variants are ordered from most verbose to most critical. The numeric
/// discriminant doubles as the filtering order: a message is accepted when its
/// severity compares greater than or equal to the partition's configured
/// minimum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Severity {
    /// Fine-grained tracing output.
    Trace = 0,
    /// Developer diagnostics.
    Debug = 1,
    /// Routine operational messages.
    #[default]
    Info = 2,
    /// Recoverable anomalies.
    Warn = 3,
    /// Failed operations.
    Error = 4,
    /// Unrecoverable failures.
    Fatal = 5,
}

impl Severity {
    /// Every severity in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Returns the lowercase name used in directives and rendered records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Returns the numeric filtering rank.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a numeric rank back into a severity.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Trace),
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warn),
            4 => Some(Self::Error),
            5 => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Severity`] from a string fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised severity `{input}`")]
pub struct ParseSeverityError {
    input: String,
}

impl ParseSeverityError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Ok(rank) = trimmed.parse::<u8>() {
            if let Some(severity) = Self::from_u8(rank) {
                return Ok(severity);
            }
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseSeverityError {
                input: input.to_owned(),
            }),
        }
    }
}
