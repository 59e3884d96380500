//! Date parsing and ordering for performance entries.
//!
//! Dates are stored as 8-digit `YYYYMMDD` strings and displayed as
//! `DD/MM/YYYY`. Ordering inside a group is descending by effective
//! timestamp; entries whose date does not parse order after all dated ones,
//! keeping their input order (the surrounding sort is stable).

use chrono::{NaiveDate, NaiveTime};
use std::cmp::Ordering;

use crate::models::DateEntry;

/// Effective timestamp of a date entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateStamp {
    date: NaiveDate,
    /// `None` orders before any concrete time on the same date
    time: Option<NaiveTime>,
}

/// Parses the stored `YYYYMMDD` date plus optional `H:MM:SS` time.
/// Calendar-validated: "20231301" is not a date.
pub fn parse_stamp(date: &str, time: Option<&str>) -> Option<DateStamp> {
    let date = parse_date(date)?;
    Some(DateStamp { date, time: time.and_then(parse_time) })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = raw[0..4].parse().ok()?;
    let month: u32 = raw[4..6].parse().ok()?;
    let day: u32 = raw[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Timeline times come as `H:MM:SS` or `HH:MM:SS`, occasionally with
/// fullwidth colons.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    let cleaned = raw.trim().replace('\u{ff1a}', ":");
    NaiveTime::parse_from_str(&cleaned, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&cleaned, "%H:%M"))
        .ok()
}

/// Newest-first comparator for a group's date list. Total and stable:
/// dated before undated, undated pairs keep input order.
pub fn compare_entries_desc(a: &DateEntry, b: &DateEntry) -> Ordering {
    let sa = parse_stamp(&a.date, a.time.as_deref());
    let sb = parse_stamp(&b.date, b.time.as_deref());
    match (sa, sb) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `DD/MM/YYYY` display label; unparseable dates fall back to the raw
/// string rather than erroring out of a render.
pub fn display_label(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => date.to_string(),
    }
}

/// Recognizes a literal date query: exactly 8 ASCII digits forming a real
/// calendar date. Anything else (odd lengths included) returns `None` and
/// the caller falls back to substring search.
pub fn parse_date_query(query: &str) -> Option<&str> {
    parse_date(query)?;
    Some(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, time: Option<&str>) -> DateEntry {
        let mut e = DateEntry::new(date, "https://youtu.be/x");
        e.time = time.map(str::to_string);
        e
    }

    #[test]
    fn display_label_is_day_month_year() {
        assert_eq!(display_label("20230605"), "05/06/2023");
    }

    #[test]
    fn display_label_falls_back_on_garbage() {
        assert_eq!(display_label("unknown"), "unknown");
    }

    #[test]
    fn descending_by_date() {
        let mut dates = vec![entry("20230101", None), entry("20230102", None)];
        dates.sort_by(compare_entries_desc);
        assert_eq!(dates[0].date, "20230102");
        assert_eq!(dates[1].date, "20230101");
    }

    #[test]
    fn time_breaks_same_day_ties() {
        let mut dates = vec![
            entry("20230101", Some("0:10:00")),
            entry("20230101", Some("2:30:00")),
        ];
        dates.sort_by(compare_entries_desc);
        assert_eq!(dates[0].time.as_deref(), Some("2:30:00"));
    }

    #[test]
    fn undated_entries_sort_last() {
        let mut dates = vec![entry("bogus", None), entry("20230101", None)];
        dates.sort_by(compare_entries_desc);
        assert_eq!(dates[0].date, "20230101");
        assert_eq!(dates[1].date, "bogus");
    }

    #[test]
    fn fullwidth_colons_parse() {
        assert!(parse_stamp("20230101", Some("1\u{ff1a}02\u{ff1a}03")).is_some());
    }

    #[test]
    fn date_query_requires_real_calendar_date() {
        assert_eq!(parse_date_query("20230101"), Some("20230101"));
        assert_eq!(parse_date_query("20231301"), None); // month 13
        assert_eq!(parse_date_query("20230230"), None); // Feb 30
        assert_eq!(parse_date_query("0101202"), None); // odd length
        assert_eq!(parse_date_query("2023010a"), None);
    }

    #[test]
    fn leap_day_is_accepted() {
        assert_eq!(parse_date_query("20240229"), Some("20240229"));
        assert_eq!(parse_date_query("20230229"), None);
    }
}
