//! Month arithmetic and lenient date parsing used by the calendar.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

/// Column headers of a Sunday-first week.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(date);
    first + Duration::days(i64::from(days_in_month(first.year(), first.month())) - 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 31,
    }
}

/// Shifts `date` by whole months, clamping the day to the target month's length
/// (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn is_same_day<A: Datelike, B: Datelike>(left: &A, right: &B) -> bool {
    left.year() == right.year() && left.month() == right.month() && left.day() == right.day()
}

/// Parses the date shapes the backend produces: RFC 3339, ISO without offset,
/// SQL `YYYY-MM-DD HH:MM:SS`, or a bare `YYYY-MM-DD`.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(moment) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(moment.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(moment) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(moment);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Formats a backend date for display; unparseable input is returned unchanged.
pub fn format_date(raw: &str, format: &str) -> String {
    match parse_flexible_date(raw) {
        Some(moment) => moment.format(format).to_string(),
        None => raw.to_string(),
    }
}
