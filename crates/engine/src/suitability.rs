use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::capacity::compute_capacity;
use crate::model::{Assignment, Engineer, Project, Role, Seniority};

// ---------------------------------------------------------------------------
// Candidate type
// ---------------------------------------------------------------------------

/// An engineer matching at least one of a project's required skills,
/// annotated with everything the staffing views display alongside the
/// match: seniority, department and the engineer's capacity at `now`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEngineer {
    /// References the matched `Engineer` by ID.
    pub engineer_id: String,
    pub name: String,
    pub role: Role,
    pub seniority: Seniority,
    pub department: Option<String>,
    /// Required skills this engineer covers, in the project's order.
    pub matched_skills: Vec<String>,
    pub match_count: usize,
    pub current_capacity: u32,
    pub available_capacity: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Find every engineer whose skill set intersects the project's required
/// skills. A single shared skill qualifies; full coverage is not required.
///
/// A project with no required skills yields no candidates: the match
/// predicate needs a non-empty intersection, so "no requirements" never
/// means "everyone".
///
/// Candidates are ordered by intersection size descending; ties resolve by
/// engineer ID ascending so the ranking is stable across runs.
pub fn find_suitable_engineers(
    project: &Project,
    engineers: &[Engineer],
    assignments: &[Assignment],
    now: NaiveDateTime,
) -> Vec<CandidateEngineer> {
    if project.required_skills.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<CandidateEngineer> = engineers
        .iter()
        .filter_map(|engineer| {
            let mut matched: Vec<String> = Vec::new();
            for skill in &project.required_skills {
                if engineer.skills.iter().any(|s| s == skill)
                    && !matched.iter().any(|m| m == skill)
                {
                    matched.push(skill.clone());
                }
            }
            if matched.is_empty() {
                return None;
            }

            let capacity = compute_capacity(engineer, assignments, now);
            Some(CandidateEngineer {
                engineer_id: engineer.id.clone(),
                name: engineer.name.clone(),
                role: engineer.role,
                seniority: engineer.seniority,
                department: engineer.department.clone(),
                match_count: matched.len(),
                matched_skills: matched,
                current_capacity: capacity.current_capacity,
                available_capacity: capacity.available_capacity,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| a.engineer_id.cmp(&b.engineer_id))
    });
    candidates
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
