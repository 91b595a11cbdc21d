use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::capacity::compute_capacity;
use crate::model::{Assignment, Engineer, Project, ProjectStatus};

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// An engineer is overloaded once current capacity exceeds this fraction of
/// their maximum. Strictly greater than: sitting exactly at 90% is not yet
/// an overload.
const OVERLOAD_FRACTION: f64 = 0.9;

/// Headroom (in percentage points) an engineer must exceed to count as
/// available for new work. Strictly greater than.
const AVAILABLE_HEADROOM: u32 = 20;

/// A required skill held by fewer engineers than this has no bus-factor
/// redundancy.
const SKILL_REDUNDANCY_THRESHOLD: usize = 2;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Project counts per recognized lifecycle status. Unrecognized statuses
/// land in no bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDistribution {
    pub planning: usize,
    pub active: usize,
    pub completed: usize,
}

/// How many projects require one skill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkillDemand {
    pub skill: String,
    pub project_count: usize,
}

/// Shortfall between the skills projects require and the skills the team
/// holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    /// Required skills no engineer on the team lists.
    pub missing_skills: Vec<String>,
    /// Distinct team skills over distinct required skills, as a percentage.
    /// 0 when nothing is required.
    pub coverage_percentage: f64,
    /// Required skills listed by fewer than two engineers.
    pub low_coverage_skills: Vec<String>,
}

/// Team-wide analytics over one snapshot at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub overloaded_engineers: usize,
    pub available_engineers: usize,
    pub underutilized_engineers: usize,
    /// Mean current capacity across all engineers; 0 for an empty team.
    pub average_utilization: f64,
    pub project_status_distribution: StatusDistribution,
    /// Complete ranking, most-demanded first. Top-K truncation is the
    /// caller's job.
    pub skill_demand: Vec<SkillDemand>,
    pub skill_gap: SkillGapAnalysis,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full analytics report. A pure reduction over the snapshot;
/// every metric has a defined zero-safe value on empty input.
pub fn compute_team_analytics(
    engineers: &[Engineer],
    projects: &[Project],
    assignments: &[Assignment],
    now: NaiveDateTime,
) -> AnalyticsReport {
    let mut overloaded = 0usize;
    let mut available = 0usize;
    let mut total_utilization = 0u64;

    for engineer in engineers {
        let capacity = compute_capacity(engineer, assignments, now);
        if f64::from(capacity.current_capacity)
            > f64::from(engineer.max_capacity) * OVERLOAD_FRACTION
        {
            overloaded += 1;
        }
        if capacity.available_capacity > AVAILABLE_HEADROOM {
            available += 1;
        }
        total_utilization += u64::from(capacity.current_capacity);
    }

    let average_utilization = if engineers.is_empty() {
        0.0
    } else {
        total_utilization as f64 / engineers.len() as f64
    };

    let mut distribution = StatusDistribution {
        planning: 0,
        active: 0,
        completed: 0,
    };
    for project in projects {
        match project.status {
            ProjectStatus::Planning => distribution.planning += 1,
            ProjectStatus::Active => distribution.active += 1,
            ProjectStatus::Completed => distribution.completed += 1,
            ProjectStatus::Unknown => {}
        }
    }

    AnalyticsReport {
        overloaded_engineers: overloaded,
        available_engineers: available,
        underutilized_engineers: available,
        average_utilization,
        project_status_distribution: distribution,
        skill_demand: skill_demand(projects),
        skill_gap: skill_gap_analysis(engineers, projects),
    }
}

/// Projects-per-skill counts, most demanded first.
///
/// A skill repeated within one project's requirements counts once for that
/// project. The sort is stable, so ties keep the order in which skills
/// first appear across the project list.
pub fn skill_demand(projects: &[Project]) -> Vec<SkillDemand> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for project in projects {
        let mut seen: HashSet<&str> = HashSet::new();
        for skill in &project.required_skills {
            if !seen.insert(skill.as_str()) {
                continue;
            }
            if !counts.contains_key(skill.as_str()) {
                order.push(skill.clone());
            }
            *counts.entry(skill.as_str()).or_insert(0) += 1;
        }
    }

    let mut demand: Vec<SkillDemand> = order
        .into_iter()
        .map(|skill| {
            let project_count = counts.get(skill.as_str()).copied().unwrap_or(0);
            SkillDemand {
                skill,
                project_count,
            }
        })
        .collect();
    demand.sort_by(|a, b| b.project_count.cmp(&a.project_count));
    demand
}

/// Compare the union of required skills against the union of team skills.
pub fn skill_gap_analysis(engineers: &[Engineer], projects: &[Project]) -> SkillGapAnalysis {
    // Union of required skills in first-seen order, so output lists are
    // deterministic.
    let mut required: Vec<&str> = Vec::new();
    let mut required_set: HashSet<&str> = HashSet::new();
    for project in projects {
        for skill in &project.required_skills {
            if required_set.insert(skill.as_str()) {
                required.push(skill.as_str());
            }
        }
    }

    let available: HashSet<&str> = engineers
        .iter()
        .flat_map(|e| e.skills.iter().map(String::as_str))
        .collect();

    let missing_skills: Vec<String> = required
        .iter()
        .filter(|skill| !available.contains(**skill))
        .map(|skill| skill.to_string())
        .collect();

    let coverage_percentage = if required.is_empty() {
        0.0
    } else {
        available.len() as f64 / required.len() as f64 * 100.0
    };

    let low_coverage_skills: Vec<String> = required
        .iter()
        .filter(|skill| {
            let holders = engineers
                .iter()
                .filter(|e| e.skills.iter().any(|s| s == **skill))
                .count();
            holders < SKILL_REDUNDANCY_THRESHOLD
        })
        .map(|skill| skill.to_string())
        .collect();

    SkillGapAnalysis {
        missing_skills,
        coverage_percentage,
        low_coverage_skills,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
