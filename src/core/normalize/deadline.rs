//! Deadline and export date computation
//!
//! Dates are plain calendar days. Timestamps carrying an offset are moved to
//! the process's local time zone before the day is taken; nothing else is
//! time-zone aware.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};

/// Output format for deadlines and export dates
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Default number of days between submission and follow-up deadline
pub const DEFAULT_DEADLINE_OFFSET_DAYS: u32 = 4;

const DATE_ONLY_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y, %H:%M:%S",
];

/// Parses a submission date cell into a calendar day
///
/// Accepts ISO dates, `dd/MM/yyyy`, both with an optional time part, and
/// RFC 3339 timestamps. Returns `None` for blank or unrecognized input.
pub fn parse_submitted_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }

    DATE_ONLY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
}

/// Adds `offset_days` calendar days to a submission date
///
/// Returns the result as `dd/MM/yyyy`, or an empty string when the input is
/// blank, unparseable, or the sum overflows the calendar.
///
/// # Examples
///
/// ```
/// use lead_router::core::normalize::compute_deadline;
///
/// assert_eq!(compute_deadline("2024-01-01", 4), "05/01/2024");
/// assert_eq!(compute_deadline("", 4), "");
/// ```
pub fn compute_deadline(raw: &str, offset_days: u32) -> String {
    parse_submitted_date(raw)
        .and_then(|date| date.checked_add_days(Days::new(u64::from(offset_days))))
        .map(|deadline| deadline.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Formats the run's export date, written into exported source rows
pub fn format_export_date(now: DateTime<Local>) -> String {
    now.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    #[test_case("2024-01-01", 4, "05/01/2024" ; "iso date")]
    #[test_case("2024-02-27", 4, "02/03/2024" ; "leap year february")]
    #[test_case("2023-12-30", 4, "03/01/2024" ; "year boundary")]
    #[test_case("15/03/2024", 4, "19/03/2024" ; "brazilian date")]
    #[test_case("2024-01-01 10:30:00", 4, "05/01/2024" ; "iso with time")]
    #[test_case("2024-01-01T23:59:59", 4, "05/01/2024" ; "iso with t separator")]
    #[test_case("15/03/2024 08:15", 1, "16/03/2024" ; "brazilian with time")]
    #[test_case("2024-01-01", 0, "01/01/2024" ; "zero offset")]
    #[test_case("", 4, "" ; "empty")]
    #[test_case("   ", 4, "" ; "blank")]
    #[test_case("ontem", 4, "" ; "unparseable")]
    #[test_case("2024-13-45", 4, "" ; "invalid calendar date")]
    fn test_compute_deadline(raw: &str, offset: u32, expected: &str) {
        assert_eq!(compute_deadline(raw, offset), expected);
    }

    #[test]
    fn test_parse_submitted_date_rfc3339_uses_local_day() {
        let raw = "2024-06-10T12:00:00+00:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(parse_submitted_date(raw), Some(expected));
    }

    #[test]
    fn test_format_export_date() {
        let now = Local.with_ymd_and_hms(2024, 3, 7, 9, 0, 0).unwrap();
        assert_eq!(format_export_date(now), "07/03/2024");
    }

    #[test]
    fn test_default_offset() {
        assert_eq!(DEFAULT_DEADLINE_OFFSET_DAYS, 4);
        assert_eq!(
            compute_deadline("2024-01-01", DEFAULT_DEADLINE_OFFSET_DAYS),
            "05/01/2024"
        );
    }
}
