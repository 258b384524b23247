//! Posting-time resolution: turns whichever posting signal a record carries into absolute
//! Unix seconds.
//!
//! Resolution order, first present signal wins with no fallthrough:
//! 1. numeric `job_posted_at_timestamp`, used verbatim
//! 2. `job_posted_at_datetime_utc`, parsed as ISO-8601 (unparsable → unknown)
//! 3. `job_posted_human_readable`, matched against `RELATIVE_UNITS`
//!
//! Resolved times are never negative and never later than `now`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::jobs::record::JobSignals;

pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Relative units in match priority. The first unit whose pattern matches decides the
/// result, even if the text also names a smaller unit further along.
const RELATIVE_UNITS: &[(&str, i64)] = &[
    ("hour", SECONDS_PER_HOUR),
    ("day", SECONDS_PER_DAY),
    ("week", 7 * SECONDS_PER_DAY),
    ("month", 30 * SECONDS_PER_DAY),
];

static RELATIVE_PATTERNS: Lazy<Vec<(Regex, i64)>> = Lazy::new(|| {
    RELATIVE_UNITS
        .iter()
        .map(|&(unit, seconds)| {
            let pattern = Regex::new(&format!(r"([0-9]+)\s*{unit}"))
                .expect("relative unit pattern must compile");
            (pattern, seconds)
        })
        .collect()
});

/// Current wall-clock time in Unix seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Resolves the posting time of a job, or `None` when it cannot be determined.
pub fn resolve_posted(signals: &JobSignals, now: i64) -> Option<i64> {
    let resolved = if let Some(timestamp) = signals.posted_timestamp {
        verbatim_timestamp(timestamp)
    } else if let Some(text) = signals.posted_datetime.as_deref() {
        parse_iso_datetime(text)
    } else {
        resolve_relative(&signals.posted_human, now)
    }?;

    (resolved >= 0).then(|| resolved.min(now))
}

/// True iff the posting time is known and at most `days` whole days before `now`.
pub fn within_last(posted: Option<i64>, days: i64, now: i64) -> bool {
    match posted {
        Some(posted) => now - posted <= days * SECONDS_PER_DAY,
        None => false,
    }
}

fn verbatim_timestamp(timestamp: f64) -> Option<i64> {
    timestamp.is_finite().then(|| timestamp.trunc() as i64)
}

/// ISO-8601 date-times carrying an offset. `%#z` takes `Z`, `+hh`, `+hhmm` or `+hh:mm`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Offset-less date-times, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Accepts RFC 3339, the other common ISO-8601 date-time shapes (minute precision, basic
/// offsets, a space separator) or a bare date (midnight UTC).
fn parse_iso_datetime(text: &str) -> Option<i64> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(text, format).ok())
        })
        .map(|dt| dt.timestamp())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|naive| naive.and_utc().timestamp())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc().timestamp())
        })
}

fn resolve_relative(text: &str, now: i64) -> Option<i64> {
    let text = text.to_lowercase();
    if text.is_empty() {
        return None;
    }
    if text.contains("just") {
        return Some(now);
    }

    let (captures, unit_seconds) = RELATIVE_PATTERNS
        .iter()
        .find_map(|(pattern, seconds)| pattern.captures(&text).map(|c| (c, *seconds)))?;
    let count: i64 = captures[1].parse().ok()?;
    now.checked_sub(count.checked_mul(unit_seconds)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_760_000_000;

    fn human(text: &str) -> JobSignals {
        JobSignals {
            posted_human: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_numeric_timestamp_used_verbatim() {
        let s = JobSignals {
            posted_timestamp: Some(1_700_000_000.0),
            posted_human: "just now".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_posted(&s, NOW), Some(1_700_000_000));
    }

    #[test]
    fn test_fractional_timestamp_truncated() {
        let s = JobSignals {
            posted_timestamp: Some(1_700_000_000.9),
            ..Default::default()
        };
        assert_eq!(resolve_posted(&s, NOW), Some(1_700_000_000));
    }

    #[test]
    fn test_negative_timestamp_is_unknown() {
        let s = JobSignals {
            posted_timestamp: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(resolve_posted(&s, NOW), None);
    }

    #[test]
    fn test_future_timestamp_clamped_to_now() {
        let s = JobSignals {
            posted_timestamp: Some((NOW + 500) as f64),
            ..Default::default()
        };
        assert_eq!(resolve_posted(&s, NOW), Some(NOW));
    }

    #[test]
    fn test_iso_datetime_with_offset() {
        let s = JobSignals {
            posted_datetime: Some("2023-11-14T22:13:20.000Z".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_posted(&s, NOW), Some(1_700_000_000));
    }

    #[test]
    fn test_iso_datetime_without_offset_is_utc() {
        let s = JobSignals {
            posted_datetime: Some("2023-11-14T22:13:20".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_posted(&s, NOW), Some(1_700_000_000));
    }

    #[test]
    fn test_iso_bare_date_is_midnight_utc() {
        let s = JobSignals {
            posted_datetime: Some("2023-11-14".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_posted(&s, NOW), Some(1_699_920_000));
    }

    fn iso(text: &str) -> Option<i64> {
        let s = JobSignals {
            posted_datetime: Some(text.to_string()),
            ..Default::default()
        };
        resolve_posted(&s, NOW)
    }

    #[test]
    fn test_iso_minute_precision() {
        assert_eq!(iso("2023-11-14T22:13Z"), Some(1_699_999_980));
        assert_eq!(iso("2023-11-14T22:13"), Some(1_699_999_980));
        assert_eq!(iso("2023-11-14T22:13+00:00"), Some(1_699_999_980));
    }

    #[test]
    fn test_iso_basic_offsets() {
        assert_eq!(iso("2023-11-14T22:13:20+0000"), Some(1_700_000_000));
        assert_eq!(iso("2023-11-15T03:43:20+0530"), Some(1_700_000_000));
        assert_eq!(iso("2023-11-14T22:13:20.000z"), Some(1_700_000_000));
    }

    #[test]
    fn test_iso_space_separator() {
        assert_eq!(iso("2023-11-14 22:13:20"), Some(1_700_000_000));
        assert_eq!(iso("2023-11-14 22:13:20.250"), Some(1_700_000_000));
        assert_eq!(iso("2023-11-14 22:13"), Some(1_699_999_980));
        assert_eq!(iso("2023-11-14 22:13:20Z"), Some(1_700_000_000));
    }

    #[test]
    fn test_iso_garbage_stays_unknown() {
        assert_eq!(iso("2023-11-14T"), None);
        assert_eq!(iso("14/11/2023"), None);
        assert_eq!(iso("2023-11-14T25:00"), None);
    }

    #[test]
    fn test_invalid_iso_is_unknown_without_fallthrough() {
        let s = JobSignals {
            posted_datetime: Some("last tuesday".to_string()),
            posted_human: "2 days ago".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_posted(&s, NOW), None);
    }

    #[test]
    fn test_just_posted_is_now() {
        assert_eq!(resolve_posted(&human("Just posted"), NOW), Some(NOW));
    }

    #[test]
    fn test_relative_units() {
        assert_eq!(resolve_posted(&human("5 hours ago"), NOW), Some(NOW - 5 * 3_600));
        assert_eq!(resolve_posted(&human("3 days ago"), NOW), Some(NOW - 3 * 86_400));
        assert_eq!(resolve_posted(&human("2 Weeks ago"), NOW), Some(NOW - 14 * 86_400));
        assert_eq!(resolve_posted(&human("1 month ago"), NOW), Some(NOW - 30 * 86_400));
        assert_eq!(resolve_posted(&human("Posted 12days ago"), NOW), Some(NOW - 12 * 86_400));
    }

    #[test]
    fn test_hour_branch_wins_over_later_units() {
        // Days appear first in the text, but hours are checked first.
        let s = human("2 days and 4 hours ago");
        assert_eq!(resolve_posted(&s, NOW), Some(NOW - 4 * 3_600));
    }

    #[test]
    fn test_unmatched_relative_text_is_unknown() {
        assert_eq!(resolve_posted(&human("yesterday"), NOW), None);
        assert_eq!(resolve_posted(&human(""), NOW), None);
        assert_eq!(resolve_posted(&JobSignals::default(), NOW), None);
    }

    #[test]
    fn test_relative_overflow_is_unknown() {
        let s = human("99999999999999999999 days ago");
        assert_eq!(resolve_posted(&s, NOW), None);

        let s = human("9999999 months ago");
        assert_eq!(resolve_posted(&s, NOW), None);
    }

    #[test]
    fn test_within_last_boundaries() {
        assert!(within_last(Some(NOW - 86_400), 1, NOW));
        assert!(!within_last(Some(NOW - 86_401), 1, NOW));
        assert!(within_last(Some(NOW), 1, NOW));
    }

    #[test]
    fn test_within_last_unknown_always_fails() {
        for days in [1, 3, 7, 30, 3650] {
            assert!(!within_last(None, days, NOW));
        }
    }
}
