//! Status-change audit logger
//!
//! Writes one line per status change into hourly files grouped by day:
//!
//! ```text
//! <base>/2024-05-01/status_change_2024-05-01_14.log
//! <base>/error.log
//! ```
//!
//! Each day directory keeps at most `max_files` log files; when a write pushes
//! the count over the cap the single oldest file is removed. Logging never
//! fails from the caller's point of view: any I/O error is recorded in
//! `error.log` on a best-effort basis and otherwise dropped.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::error::{OrderError, OrderResult};

use super::entry::AuditLogEntry;

/// Default number of hourly log files kept per day directory
pub const DEFAULT_MAX_FILES_PER_DAY: usize = 5;

const ERROR_LOG_FILE: &str = "error.log";
const LOG_EXTENSION: &str = "log";

/// Receives a message for every status change of an order it is attached to
pub trait StatusLogger: Send + Sync {
    /// Record a message. Implementations must not panic or fail.
    fn log(&self, message: &str);
}

/// Rotating file logger for order status changes
#[derive(Debug, Clone)]
pub struct StatusChangeLogger {
    /// Directory holding the day subdirectories and `error.log`
    base_dir: PathBuf,
    /// Retention cap per day directory
    max_files: usize,
}

impl StatusChangeLogger {
    /// Create a logger writing below `base_dir`
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            max_files: DEFAULT_MAX_FILES_PER_DAY,
        }
    }

    /// Override the per-day retention cap
    ///
    /// The cap never drops below one, so the file just written is kept.
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files.max(1);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory for a calendar day
    pub fn day_dir(&self, day: NaiveDate) -> PathBuf {
        self.base_dir.join(day.format("%Y-%m-%d").to_string())
    }

    /// Hourly log file for a point in time
    pub fn log_file(&self, at: NaiveDateTime) -> PathBuf {
        let day = at.date();
        self.day_dir(day).join(format!(
            "status_change_{}_{}.{}",
            day.format("%Y-%m-%d"),
            at.format("%H"),
            LOG_EXTENSION
        ))
    }

    /// Fallback file for logging failures
    pub fn error_log(&self) -> PathBuf {
        self.base_dir.join(ERROR_LOG_FILE)
    }

    /// Record a message as if it happened at `at`
    pub fn log_at(&self, at: NaiveDateTime, message: &str) {
        let entry = AuditLogEntry::new(at, message);
        match self.write_entry(&entry) {
            Ok(Some(evicted)) => {
                tracing::debug!(file = %evicted.display(), "Evicted old status log");
            }
            Ok(None) => {}
            Err(e) => self.report_failure(&entry, &e),
        }
    }

    /// Append the entry and apply retention to its day directory
    ///
    /// Returns the evicted file, if any.
    fn write_entry(&self, entry: &AuditLogEntry) -> OrderResult<Option<PathBuf>> {
        let day_dir = self.day_dir(entry.timestamp.date());
        fs::create_dir_all(&day_dir).map_err(|e| {
            OrderError::Io(format!(
                "Failed to create log directory {}: {}",
                day_dir.display(),
                e
            ))
        })?;

        let path = self.log_file(entry.timestamp);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                OrderError::Io(format!("Failed to open {}: {}", path.display(), e))
            })?;

        writeln!(file, "{}", entry.format_line())
            .map_err(|e| OrderError::Io(format!("Failed to write status log: {}", e)))?;

        file.flush()
            .map_err(|e| OrderError::Io(format!("Failed to flush status log: {}", e)))?;

        self.enforce_retention(&day_dir)
    }

    /// Delete the oldest log file if the directory holds more than the cap
    ///
    /// Removes at most one file per call, even if the directory is further
    /// over the cap.
    fn enforce_retention(&self, day_dir: &Path) -> OrderResult<Option<PathBuf>> {
        let files = list_log_files(day_dir)?;
        if files.len() <= self.max_files {
            return Ok(None);
        }

        let mut oldest: Option<(SystemTime, PathBuf)> = None;
        for path in files {
            let created = creation_time(&path)?;
            let is_older = match &oldest {
                Some((time, current)) => (created, &path) < (*time, current),
                None => true,
            };
            if is_older {
                oldest = Some((created, path));
            }
        }

        match oldest {
            Some((_, path)) => {
                fs::remove_file(&path).map_err(|e| {
                    OrderError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    /// Best-effort record of a logging failure; errors here are dropped
    fn report_failure(&self, entry: &AuditLogEntry, error: &OrderError) {
        tracing::warn!(error = %error, "Failed to write status change log");

        let line = AuditLogEntry::new(
            entry.timestamp,
            format!("Failed to log '{}': {}", entry.message, error),
        )
        .format_line();

        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.error_log())
        {
            let _ = writeln!(file, "{}", line);
        }
    }

    /// Log files of a day, ordered by hour
    pub fn log_files(&self, day: NaiveDate) -> OrderResult<Vec<PathBuf>> {
        let day_dir = self.day_dir(day);
        if !day_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = list_log_files(&day_dir)?;
        files.sort();
        Ok(files)
    }

    /// Read all entries recorded for a day, oldest first
    ///
    /// Lines that do not parse are skipped.
    pub fn read_day(&self, day: NaiveDate) -> OrderResult<Vec<AuditLogEntry>> {
        let mut entries = Vec::new();

        for path in self.log_files(day)? {
            let file = fs::File::open(&path).map_err(|e| {
                OrderError::Io(format!("Failed to open {}: {}", path.display(), e))
            })?;

            for line in BufReader::new(file).lines() {
                let line = line.map_err(|e| {
                    OrderError::Io(format!("Failed to read {}: {}", path.display(), e))
                })?;
                if let Some(entry) = AuditLogEntry::parse_line(&line) {
                    entries.push(entry);
                }
            }
        }

        Ok(entries)
    }
}

impl StatusLogger for StatusChangeLogger {
    fn log(&self, message: &str) {
        self.log_at(Local::now().naive_local(), message);
    }
}

fn list_log_files(dir: &Path) -> OrderResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| {
        OrderError::Io(format!("Failed to read log directory {}: {}", dir.display(), e))
    })? {
        let entry = entry
            .map_err(|e| OrderError::Io(format!("Failed to read directory entry: {}", e)))?;

        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == LOG_EXTENSION) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Creation time, or modification time where the filesystem has no birth time
fn creation_time(path: &Path) -> OrderResult<SystemTime> {
    let metadata = fs::metadata(path).map_err(|e| {
        OrderError::Io(format!("Failed to stat {}: {}", path.display(), e))
    })?;

    metadata
        .created()
        .or_else(|_| metadata.modified())
        .map_err(|e| OrderError::Io(format!("Failed to read file times: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_logger() -> (StatusChangeLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = StatusChangeLogger::new(temp_dir.path().join("logs"));
        (logger, temp_dir)
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_file_layout() {
        let (logger, _temp) = create_test_logger();
        let path = logger.log_file(at(1, 9));

        assert_eq!(
            path,
            logger
                .base_dir()
                .join("2024-05-01")
                .join("status_change_2024-05-01_09.log")
        );
        assert_eq!(logger.error_log(), logger.base_dir().join("error.log"));
    }

    #[test]
    fn test_log_appends_line() {
        let (logger, _temp) = create_test_logger();

        logger.log_at(at(1, 14), "Order 42 status changed to Dispatched");
        logger.log_at(at(1, 14), "Order 42 status changed to Completed");

        let contents = fs::read_to_string(logger.log_file(at(1, 14))).unwrap();
        assert_eq!(
            contents,
            "2024-05-01 14:30:00: Order 42 status changed to Dispatched\n\
             2024-05-01 14:30:00: Order 42 status changed to Completed\n"
        );
    }

    #[test]
    fn test_same_hour_shares_one_file() {
        let (logger, _temp) = create_test_logger();

        for i in 0..6 {
            logger.log_at(at(1, 10), &format!("Order {} status changed to Dispatched", i));
        }

        assert_eq!(logger.log_files(at(1, 10).date()).unwrap().len(), 1);
        assert_eq!(logger.read_day(at(1, 10).date()).unwrap().len(), 6);
    }

    #[test]
    fn test_sixth_file_evicts_oldest() {
        let (logger, _temp) = create_test_logger();

        for hour in 0..5 {
            logger.log_at(at(1, hour), "Order 1 status changed to Dispatched");
            std::thread::sleep(Duration::from_millis(15));
        }
        assert_eq!(logger.log_files(at(1, 0).date()).unwrap().len(), 5);

        logger.log_at(at(1, 5), "Order 1 status changed to Completed");

        let files = logger.log_files(at(1, 0).date()).unwrap();
        assert_eq!(files.len(), 5);
        assert!(!logger.log_file(at(1, 0)).exists());
        assert!(logger.log_file(at(1, 5)).exists());
    }

    #[test]
    fn test_eviction_removes_one_file_per_write() {
        let (logger, _temp) = create_test_logger();

        for hour in 0..4 {
            logger.log_at(at(1, hour), "Order 1 status changed to Dispatched");
            std::thread::sleep(Duration::from_millis(15));
        }

        let logger = logger.with_max_files(2);
        logger.log_at(at(1, 4), "Order 1 status changed to Completed");

        // Five files, cap of two: only the oldest goes
        assert_eq!(logger.log_files(at(1, 0).date()).unwrap().len(), 4);
        assert!(!logger.log_file(at(1, 0)).exists());
    }

    #[test]
    fn test_zero_cap_keeps_latest_entry() {
        let (logger, _temp) = create_test_logger();
        let logger = logger.with_max_files(0);

        logger.log_at(at(1, 9), "Order 1 status changed to Dispatched");

        assert!(logger.log_file(at(1, 9)).exists());
        let entries = logger.read_day(at(1, 9).date()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "Order 1 status changed to Dispatched");
    }

    #[test]
    fn test_days_are_retained_independently() {
        let (logger, _temp) = create_test_logger();

        for hour in 0..5 {
            logger.log_at(at(1, hour), "day one");
        }
        logger.log_at(at(2, 0), "day two");

        assert_eq!(logger.log_files(at(1, 0).date()).unwrap().len(), 5);
        assert_eq!(logger.log_files(at(2, 0).date()).unwrap().len(), 1);
    }

    #[test]
    fn test_failure_goes_to_error_log() {
        let (logger, _temp) = create_test_logger();
        fs::create_dir_all(logger.base_dir()).unwrap();
        // A regular file where the day directory should be
        fs::write(logger.day_dir(at(1, 0).date()), "blocked").unwrap();

        logger.log_at(at(1, 8), "Order 42 status changed to Dispatched");

        let errors = fs::read_to_string(logger.error_log()).unwrap();
        assert!(errors.starts_with("2024-05-01 08:30:00: Failed to log 'Order 42 status changed to Dispatched'"));
    }

    #[test]
    fn test_unwritable_base_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("not-a-dir");
        fs::write(&base, "file").unwrap();
        let logger = StatusChangeLogger::new(base.clone());

        // Neither the log nor error.log can be written; this must not panic
        logger.log_at(at(1, 8), "Order 1 status changed to Dispatched");
        assert_eq!(fs::read_to_string(&base).unwrap(), "file");
    }

    #[test]
    fn test_read_day_orders_by_hour() {
        let (logger, _temp) = create_test_logger();

        logger.log_at(at(1, 15), "later");
        logger.log_at(at(1, 9), "earlier");

        let entries = logger.read_day(at(1, 0).date()).unwrap();
        let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["earlier", "later"]);
    }

    #[test]
    fn test_read_missing_day() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_day(at(3, 0).date()).unwrap().is_empty());
    }

    #[test]
    fn test_non_log_files_ignored_by_retention() {
        let (logger, _temp) = create_test_logger();
        let day_dir = logger.day_dir(at(1, 0).date());
        fs::create_dir_all(&day_dir).unwrap();
        fs::write(day_dir.join("notes.txt"), "keep me").unwrap();

        for hour in 0..6 {
            logger.log_at(at(1, hour), "tick");
        }

        assert!(day_dir.join("notes.txt").exists());
        assert_eq!(logger.log_files(at(1, 0).date()).unwrap().len(), 5);
    }
}
