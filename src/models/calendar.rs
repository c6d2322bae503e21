//! Calendar keys for daily and weekly challenges.
//!
//! Keys are computed from the wall-clock date in a fixed reference timezone
//! (Europe/Paris) so a device travelling across timezones keeps a stable
//! notion of "today". Keys are opaque identifiers: equality and the
//! `is_yesterday` check are the only operations collaborators rely on.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Reference timezone for all calendar keys.
pub const REFERENCE_TZ: Tz = chrono_tz::Europe::Paris;

fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&REFERENCE_TZ).date_naive()
}

/// Daily key, `DD/MM/YYYY` in the reference timezone.
/// Also used as the hash seed for daily challenge selection.
pub fn day_key(instant: DateTime<Utc>) -> String {
    let d = local_date(instant);
    format!("{:02}/{:02}/{:04}", d.day(), d.month(), d.year())
}

/// Weekly key, `week-YYYY-MM-DD` where the date is the Monday starting the
/// reference-timezone week containing `instant`.
pub fn week_key(instant: DateTime<Utc>) -> String {
    let d = local_date(instant);
    let monday = d - Duration::days(d.weekday().num_days_from_monday() as i64);
    format!("week-{}", monday.format("%Y-%m-%d"))
}

/// True when `prev_key` names the calendar day immediately before `today_key`.
/// Both arguments are `DD/MM/YYYY` day keys; unparsable keys are never adjacent.
pub fn is_yesterday(prev_key: &str, today_key: &str) -> bool {
    let prev = NaiveDate::parse_from_str(prev_key, "%d/%m/%Y");
    let today = NaiveDate::parse_from_str(today_key, "%d/%m/%Y");
    match (prev, today) {
        (Ok(p), Ok(t)) => (t - p).num_days() == 1,
        _ => false,
    }
}

/// Deterministic rolling hash of a key: `h = h*31 + code_point (mod 2^32)`.
/// Stable across platforms for identical code-point sequences.
pub fn hash_key(text: &str) -> u32 {
    text.chars()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
}
