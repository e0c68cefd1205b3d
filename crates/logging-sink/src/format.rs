//! crates/logging-sink/src/format.rs
//! Layout of rendered log records.

use std::fmt::Write as _;

use partition_log::{Partition, Severity};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Uppercase label used for a severity in rendered records.
#[must_use]
pub const fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Trace => "TRACE",
        Severity::Debug => "DEBUG",
        Severity::Info => "INFO",
        Severity::Warn => "WARN",
        Severity::Error => "ERROR",
        Severity::Fatal => "FATAL",
    }
}

/// How a record is laid out on a line.
///
/// Records render as `[<timestamp> ][<peer id> ]<partition> [<LEVEL>] <text>`;
/// the timestamp (UTC, second precision) and peer id are optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordFormat {
    peer_id: Option<String>,
    timestamps: bool,
}

impl RecordFormat {
    /// Creates a format with an optional peer id prefix.
    #[must_use]
    pub fn new(peer_id: Option<&str>, timestamps: bool) -> Self {
        Self {
            peer_id: peer_id.filter(|id| !id.is_empty()).map(str::to_owned),
            timestamps,
        }
    }

    /// Returns the peer id prefix, if any.
    #[must_use]
    pub fn peer_id(&self) -> Option<&str> {
        self.peer_id.as_deref()
    }

    /// Reports whether timestamps are rendered.
    #[must_use]
    pub const fn timestamps(&self) -> bool {
        self.timestamps
    }

    /// Renders a record using the current time for the timestamp.
    #[must_use]
    pub fn render(&self, partition: &Partition, severity: Severity, text: &str) -> String {
        let now = self.timestamps.then(OffsetDateTime::now_utc);
        self.render_at(partition, severity, text, now)
    }

    /// Renders a record with an explicit timestamp.
    ///
    /// `now` is ignored when timestamps are disabled.
    #[must_use]
    pub fn render_at(
        &self,
        partition: &Partition,
        severity: Severity,
        text: &str,
        now: Option<OffsetDateTime>,
    ) -> String {
        let mut line = String::with_capacity(partition.as_str().len() + text.len() + 32);

        if self.timestamps {
            if let Some(stamp) = now.and_then(|now| now.format(TIMESTAMP_FORMAT).ok()) {
                line.push_str(&stamp);
                line.push(' ');
            }
        }
        if let Some(peer_id) = &self.peer_id {
            line.push_str(peer_id);
            line.push(' ');
        }
        let _ = write!(line, "{partition} [{}] {text}", severity_label(severity));
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn plain_layout() {
        let format = RecordFormat::default();
        assert_eq!(
            format.render(&Partition::from("net"), Severity::Warn, "slow peer"),
            "net [WARN] slow peer"
        );
    }

    #[test]
    fn peer_id_prefix() {
        let format = RecordFormat::new(Some("GABC"), false);
        assert_eq!(
            format.render(&Partition::from("scp"), Severity::Debug, "nominate"),
            "GABC scp [DEBUG] nominate"
        );
    }

    #[test]
    fn empty_peer_id_is_ignored() {
        assert_eq!(RecordFormat::new(Some(""), false).peer_id(), None);
    }

    #[test]
    fn timestamp_prefix() {
        let format = RecordFormat::new(Some("node1"), true);
        let now = datetime!(2024-03-05 06:07:08 UTC);
        assert_eq!(
            format.render_at(&Partition::from("net"), Severity::Error, "down", Some(now)),
            "2024-03-05T06:07:08 node1 net [ERROR] down"
        );
    }

    #[test]
    fn timestamp_ignored_when_disabled() {
        let format = RecordFormat::new(None, false);
        let now = datetime!(2024-03-05 06:07:08 UTC);
        assert_eq!(
            format.render_at(&Partition::from("net"), Severity::Info, "", Some(now)),
            "net [INFO] "
        );
    }

    #[test]
    fn labels_are_uppercase_names() {
        for severity in Severity::ALL {
            assert_eq!(
                severity_label(severity),
                severity.as_str().to_ascii_uppercase()
            );
        }
    }
}
