//! Date and timestamp value generators.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rand::Rng;

/// Random date in `[start, end]`. Returns `start` if the range is empty.
pub fn date_between<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    let offset = rng.random_range(0..=span) as u64;
    start.checked_add_days(Days::new(offset)).unwrap_or(end)
}

/// Random date between `start` and `start + max_days`, never after `cap`.
pub fn date_after<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    max_days: u64,
    cap: NaiveDate,
) -> NaiveDate {
    let end = start
        .checked_add_days(Days::new(max_days))
        .unwrap_or(cap)
        .min(cap);
    date_between(rng, start, end)
}

/// Random timestamp in `[start, end]` with second precision.
pub fn timestamp_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();
    if start_ts >= end_ts {
        return start;
    }
    let random_ts = rng.random_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
}

/// Add whole months, clamping the day to the end of the target month.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(chrono::Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole months elapsed from `from` to `to` (zero if `to` is earlier).
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    use chrono::Datelike;
    if to <= from {
        return 0;
    }
    let months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    let months = if to.day() < from.day() { months - 1 } else { months };
    months.max(0) as u32
}

/// Parse a date in `YYYY-MM-DD` or RFC 3339 form.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Fixed "today" used as the upper bound for historical dates, so output
/// does not drift with the wall clock.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or(NaiveDate::MIN)
}
