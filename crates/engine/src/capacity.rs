use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::interval::parse_instant;
use crate::model::{Assignment, Engineer};

// ---------------------------------------------------------------------------
// Capacity figures
// ---------------------------------------------------------------------------

/// Capacity derived for one engineer at one evaluation instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineerCapacity {
    /// Sum of allocation percentages across current assignments.
    ///
    /// Not clamped: a value above the engineer's maximum is the overload
    /// signal analytics consumes. The engine reports over-allocation, it
    /// never rejects it.
    pub current_capacity: u32,
    /// Remaining headroom against the engineer's maximum, floored at zero.
    pub available_capacity: u32,
}

// ---------------------------------------------------------------------------
// Activity predicate
// ---------------------------------------------------------------------------

/// Whether an assignment still counts as current at `now`.
///
/// Uses the end-date test only: an allocation that has not started yet but
/// has not ended is current, matching the weaker predicate the suitability
/// view uses. An assignment with an unparseable end date is never current.
pub(crate) fn is_current(assignment: &Assignment, now: NaiveDateTime) -> bool {
    match parse_instant(&assignment.end_date) {
        Some(end) => end >= now,
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sum the engineer's current allocations and derive the headroom left.
///
/// O(assignments), deterministic, no side effects.
pub fn compute_capacity(
    engineer: &Engineer,
    assignments: &[Assignment],
    now: NaiveDateTime,
) -> EngineerCapacity {
    let current_capacity: u32 = assignments
        .iter()
        .filter(|a| a.engineer_id == engineer.id && is_current(a, now))
        .map(|a| a.allocation_percentage)
        .sum();

    EngineerCapacity {
        current_capacity,
        available_capacity: engineer.max_capacity.saturating_sub(current_capacity),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
