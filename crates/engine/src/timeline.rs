use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::interval::{contains_instant, midnight, parse_instant};
use crate::model::Assignment;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Invalid calendar month {month} of year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Optional narrowing of a timeline query. `None` fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFilter {
    #[serde(default)]
    pub engineer_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl AssignmentFilter {
    pub fn matches(&self, assignment: &Assignment) -> bool {
        if let Some(id) = &self.engineer_id {
            if assignment.engineer_id != *id {
                return false;
            }
        }
        if let Some(id) = &self.project_id {
            if assignment.project_id != *id {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Month buckets
// ---------------------------------------------------------------------------

/// The assignments active on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    /// ISO date of the bucketed day.
    pub date: String,
    /// Day of month, 1-based.
    pub day: u32,
    /// IDs of every assignment whose range covers this day, ascending.
    /// Complete: showing only the first few is a display concern for
    /// callers, never applied here.
    pub assignment_ids: Vec<String>,
}

/// Bucket assignments onto each day of a calendar month.
///
/// A day belongs to an assignment when it falls within the assignment's
/// date range, inclusive at both endpoints. Day count follows the standard
/// Gregorian calendar (leap years included). Assignments with unparseable
/// dates fall out of every bucket.
pub fn bucket_assignments_by_month(
    assignments: &[Assignment],
    year: i32,
    month: u32,
    filter: &AssignmentFilter,
) -> Result<Vec<DayBucket>, TimelineError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(TimelineError::InvalidMonth { year, month })?;
    let days = first
        .checked_add_months(Months::new(1))
        .map(|next| (next - first).num_days() as u32)
        .ok_or(TimelineError::InvalidMonth { year, month })?;

    // Parse each passing assignment's range once, not once per day.
    let ranges: Vec<(&Assignment, NaiveDateTime, NaiveDateTime)> = assignments
        .iter()
        .filter(|a| filter.matches(a))
        .filter_map(|a| {
            let start = parse_instant(&a.start_date)?;
            let end = parse_instant(&a.end_date)?;
            Some((a, start, end))
        })
        .collect();

    let mut buckets = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let date = first + Duration::days(i64::from(day - 1));
        let instant = midnight(date);
        let mut assignment_ids: Vec<String> = ranges
            .iter()
            .filter(|(_, start, end)| contains_instant(*start, *end, instant))
            .map(|(a, _, _)| a.id.clone())
            .collect();
        assignment_ids.sort();
        buckets.push(DayBucket {
            date: date.format("%Y-%m-%d").to_string(),
            day,
            assignment_ids,
        });
    }
    Ok(buckets)
}

// ---------------------------------------------------------------------------
// Upcoming / ending-soon queries
// ---------------------------------------------------------------------------

/// Assignments that have not started yet at `now`, soonest first.
///
/// Ordered ascending by start date, ties by assignment ID; optionally
/// capped at `limit` entries.
pub fn upcoming_assignments(
    assignments: &[Assignment],
    now: NaiveDateTime,
    limit: Option<usize>,
) -> Vec<Assignment> {
    let mut upcoming: Vec<(NaiveDateTime, Assignment)> = assignments
        .iter()
        .filter_map(|a| {
            let start = parse_instant(&a.start_date)?;
            (start >= now).then(|| (start, a.clone()))
        })
        .collect();
    upcoming.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
    if let Some(cap) = limit {
        upcoming.truncate(cap);
    }
    upcoming.into_iter().map(|(_, a)| a).collect()
}

/// Current assignments whose end date falls within `within_days` days of
/// `now`, ordered by how soon they end (ties by assignment ID).
pub fn ending_soon(
    assignments: &[Assignment],
    now: NaiveDateTime,
    within_days: i64,
) -> Vec<Assignment> {
    let horizon = now + Duration::days(within_days.max(0));
    let mut ending: Vec<(NaiveDateTime, Assignment)> = assignments
        .iter()
        .filter_map(|a| {
            let end = parse_instant(&a.end_date)?;
            (end >= now && end <= horizon).then(|| (end, a.clone()))
        })
        .collect();
    ending.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
    ending.into_iter().map(|(_, a)| a).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
