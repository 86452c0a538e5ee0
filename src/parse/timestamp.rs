use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::model::task::DATE_TIME_FORMAT;

/// `Tuesday 28 October 2025  02:05:23 +0100 (0:00:00.041) ...`
/// as printed by the `profile_tasks` callback. Note the two spaces
/// between the year and the time.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+) (\d+) (\w+) (\d+)  (\d+):(\d+):(\d+)").expect("timestamp pattern")
});

/// Month name to two-digit month number. Unknown names fall back to `01`.
fn month_number(name: &str) -> &'static str {
    match name {
        "January" => "01",
        "February" => "02",
        "March" => "03",
        "April" => "04",
        "May" => "05",
        "June" => "06",
        "July" => "07",
        "August" => "08",
        "September" => "09",
        "October" => "10",
        "November" => "11",
        "December" => "12",
        _ => "01",
    }
}

/// Result of looking at a line for a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLine {
    /// Not shaped like a timestamp line
    NoMatch,
    /// Shaped like one, but the values do not form a valid date-time
    Invalid,
    Parsed(NaiveDateTime),
}

/// Recognize a timestamp line and parse it into a date-time.
pub fn parse_timestamp_line(line: &str) -> TimestampLine {
    let Some(caps) = TIMESTAMP_RE.captures(line) else {
        return TimestampLine::NoMatch;
    };

    let normalized = format!(
        "{}-{}-{:0>2} {:0>2}:{:0>2}:{:0>2}",
        &caps[4],
        month_number(&caps[3]),
        &caps[2],
        &caps[5],
        &caps[6],
        &caps[7],
    );

    match NaiveDateTime::parse_from_str(&normalized, DATE_TIME_FORMAT) {
        Ok(t) => TimestampLine::Parsed(t),
        Err(_) => TimestampLine::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> TimestampLine {
        TimestampLine::Parsed(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap(),
        )
    }

    #[test]
    fn profile_tasks_line() {
        assert_eq!(
            parse_timestamp_line(
                "Tuesday 28 October 2025  02:05:23 +0100 (0:00:00.041)       0:00:01.233 *****"
            ),
            at(2025, 10, 28, 2, 5, 23)
        );
    }

    #[test]
    fn single_digit_day() {
        assert_eq!(
            parse_timestamp_line("Wednesday 8 January 2025  23:59:01 +0000"),
            at(2025, 1, 8, 23, 59, 1)
        );
    }

    #[test]
    fn unknown_month_defaults_to_january() {
        assert_eq!(
            parse_timestamp_line("Monday 3 Brumaire 2025  10:00:00"),
            at(2025, 1, 3, 10, 0, 0)
        );
    }

    #[test]
    fn impossible_date_is_invalid() {
        assert_eq!(
            parse_timestamp_line("Friday 31 February 2025  10:00:00"),
            TimestampLine::Invalid
        );
        assert_eq!(
            parse_timestamp_line("Friday 3 March 2025  25:00:00"),
            TimestampLine::Invalid
        );
    }

    #[test]
    fn single_space_is_not_a_timestamp() {
        assert_eq!(
            parse_timestamp_line("Tuesday 28 October 2025 02:05:23"),
            TimestampLine::NoMatch
        );
        assert_eq!(parse_timestamp_line("ok: [web1]"), TimestampLine::NoMatch);
        assert_eq!(parse_timestamp_line(""), TimestampLine::NoMatch);
    }
}
