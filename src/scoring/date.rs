// Directory timestamp normalization
//
// The directory reports times as "2025-08-13 9:37am GMT". Anything that cannot
// be read becomes the Unix epoch, which every caller treats as "maximally stale".

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Sentinel for missing or unreadable timestamps
pub const UNKNOWN_DATE: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

const MS_PER_DAY: f64 = 86_400_000.0;

static CLOCK_TIME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(am|pm)\s+GMT").ok());

/// Parse a directory timestamp, falling back to [`UNKNOWN_DATE`]
pub fn normalize(input: Option<&str>) -> DateTime<Utc> {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse(raw).unwrap_or_else(|| {
            tracing::debug!(input = raw, "unparseable timestamp, treating as unknown");
            UNKNOWN_DATE
        }),
        None => UNKNOWN_DATE,
    }
}

/// Whether a normalized instant is the unknown sentinel
pub fn is_unknown(instant: DateTime<Utc>) -> bool {
    instant == UNKNOWN_DATE
}

fn parse(raw: &str) -> Option<DateTime<Utc>> {
    // "9:37am GMT" -> "9:37:00 am GMT" so the hour/meridiem split is explicit
    if let Some(clock) = CLOCK_TIME.as_ref().filter(|re| re.is_match(raw)) {
        let rewritten = clock.replace(raw, "$1:$2:00 $3 GMT");
        return NaiveDateTime::parse_from_str(&rewritten, "%Y-%m-%d %I:%M:%S %p GMT")
            .ok()
            .map(|naive| naive.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn elapsed_days(instant: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - instant).num_milliseconds() as f64 / MS_PER_DAY
}

/// Days since `instant`, rounded up (a partial day counts as a day)
pub fn days_since_ceil(instant: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    elapsed_days(instant, now).ceil() as i64
}

/// Whole days since `instant`, rounded down
pub fn days_since_floor(instant: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    elapsed_days(instant, now).floor() as i64
}

/// 30-day months since `instant`, fractional
pub fn months_since(instant: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    elapsed_days(instant, now) / 30.0
}
