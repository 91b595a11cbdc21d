use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ---------------------------------------------------------------------------
// Lenient ISO 8601 parsing
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const SECS_PER_DAY: i64 = 86_400;

/// Parse a datetime or date-only string into the crate's uniform instant
/// representation.
///
/// Date-only values normalize to midnight, and every comparison in this
/// crate is between such instants. Trailing `Z` and numeric UTC offsets are
/// stripped rather than applied: the source data is date-only, so offsets
/// carry no meaning here. Returns `None` for anything unparseable; callers
/// degrade (the record drops out of the affected computation) instead of
/// failing.
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_end_matches('Z');

    // Drop a trailing +HH:MM / -HH:MM offset. The date's own '-' separators
    // all sit before index 10, so only search past the date part.
    let s = match s
        .get(10..)
        .and_then(|tail| tail.find(|c| c == '+' || c == '-'))
    {
        Some(pos) => &s[..10 + pos],
        None => s,
    };

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(midnight)
}

/// Midnight at the start of the given day.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, NaiveTime::MIN)
}

// ---------------------------------------------------------------------------
// Interval primitives
// ---------------------------------------------------------------------------

/// Whole-day span between two instants, rounded up.
///
/// Reversed and empty ranges clamp to 0. The validator reports them as
/// warnings; this never fails.
pub fn duration_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let secs = (end - start).num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs + SECS_PER_DAY - 1) / SECS_PER_DAY
}

/// Whether `instant` lies within `[start, end]`, inclusive at both ends.
pub fn contains_instant(
    start: NaiveDateTime,
    end: NaiveDateTime,
    instant: NaiveDateTime,
) -> bool {
    start <= instant && instant <= end
}

/// How far `now` has progressed through `[start, end]`, clamped to [0, 1].
///
/// Empty and reversed ranges count as fully elapsed, so a same-day project
/// reads as 100% rather than dividing by zero.
pub fn progress_fraction(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let total = (end - start).num_seconds();
    if total <= 0 {
        return 1.0;
    }
    let elapsed = (now - start).num_seconds();
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
