//! Audit entry data structures
//!
//! A status-change log line is a local timestamp followed by a free-text
//! message: `2024-05-01 14:03:27: Order 42 status changed to Dispatched`.

use chrono::NaiveDateTime;

/// Timestamp layout used at the start of every log line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    /// Local wall-clock time of the event
    pub timestamp: NaiveDateTime,

    /// Human-readable description of the event
    pub message: String,
}

impl AuditLogEntry {
    pub fn new(timestamp: NaiveDateTime, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }

    /// Render the entry as one log line (without the trailing newline)
    pub fn format_line(&self) -> String {
        format!("{}: {}", self.timestamp.format(TIMESTAMP_FORMAT), self.message)
    }

    /// Parse a line written by [`AuditLogEntry::format_line`]
    ///
    /// Returns `None` for blank or malformed lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (timestamp, message) = line.trim_end().split_once(": ")?;
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
        Some(Self::new(timestamp, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_format_line() {
        let entry = AuditLogEntry::new(at(14, 3, 27), "Order 42 status changed to Dispatched");
        assert_eq!(
            entry.format_line(),
            "2024-05-01 14:03:27: Order 42 status changed to Dispatched"
        );
    }

    #[test]
    fn test_parse_line() {
        let entry =
            AuditLogEntry::parse_line("2024-05-01 09:15:00: Order 7 status changed to Cancelled\n")
                .unwrap();
        assert_eq!(entry.timestamp, at(9, 15, 0));
        assert_eq!(entry.message, "Order 7 status changed to Cancelled");
    }

    #[test]
    fn test_message_may_contain_separator() {
        let entry = AuditLogEntry::parse_line("2024-05-01 09:15:00: note: something").unwrap();
        assert_eq!(entry.message, "note: something");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(AuditLogEntry::parse_line("").is_none());
        assert!(AuditLogEntry::parse_line("not a log line").is_none());
        assert!(AuditLogEntry::parse_line("yesterday: something happened").is_none());
    }
}
