//! CLI command for reading the status-change log

use chrono::{Local, NaiveDate};

use crate::audit::StatusChangeLogger;
use crate::config::{OrderPaths, Settings};
use crate::display::format_log_entries;
use crate::error::OrderResult;

/// Print the status changes recorded on a day (today by default)
pub fn handle_log_command(
    settings: &Settings,
    paths: &OrderPaths,
    date: Option<NaiveDate>,
) -> OrderResult<()> {
    let day = date.unwrap_or_else(|| Local::now().date_naive());
    let logger =
        StatusChangeLogger::new(settings.log_dir(paths)).with_max_files(settings.log_retention);

    let entries = logger.read_day(day)?;
    println!("Status changes on {}", day);
    print!("{}", format_log_entries(&entries));
    Ok(())
}
