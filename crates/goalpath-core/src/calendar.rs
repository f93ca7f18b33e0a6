//! Calendar arithmetic shared by the generators and the task views.
//!
//! Everything here is pure. Functions that depend on "today" take it as an
//! argument; [`today`] reads the local clock for callers at the edge.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc, Weekday};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// The current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Absolute number of whole days between two dates. Symmetric.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u64 {
    a.signed_duration_since(b).num_days().unsigned_abs()
}

/// Absolute day count between two instants, rounding any partial day up.
pub fn days_between_instants(a: DateTime<Utc>, b: DateTime<Utc>) -> u64 {
    let millis = a.signed_duration_since(b).num_milliseconds().unsigned_abs();
    millis.div_ceil(MILLIS_PER_DAY.unsigned_abs())
}

/// Every date from `start` to `end` inclusive, ascending.
///
/// Empty when `end < start`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// [`date_range`] without Saturdays and Sundays.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    date_range(start, end)
        .into_iter()
        .filter(|d| !is_weekend(*d))
        .collect()
}

/// `start` shifted forward by `offset` days, or `None` past the calendar's end.
pub fn add_days(start: NaiveDate, offset: u64) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(offset))
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Human-friendly label for `date` relative to `today`.
///
/// Within a week either side the label is relative ("Tomorrow", "In 3 days",
/// "2 days ago"); further out it falls back to an absolute date.
pub fn format_relative(date: NaiveDate, today: NaiveDate) -> String {
    match date.signed_duration_since(today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        n @ 2..=7 => format!("In {n} days"),
        n @ -7..=-2 => format!("{} days ago", -n),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}
