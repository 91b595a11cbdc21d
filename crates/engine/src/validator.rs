use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::interval::parse_instant;
use crate::model::Snapshot;

// ---------------------------------------------------------------------------
// Validation result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validate implementation
// ---------------------------------------------------------------------------

/// Check a snapshot's integrity, returning errors (broken references,
/// duplicate IDs) and warnings (degenerate data the engine clamps or
/// excludes). Advisory only: the engine itself computes over any snapshot.
pub fn validate(snapshot: &Snapshot) -> ValidationResult {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // -----------------------------------------------------------------------
    // Errors: duplicate IDs
    // -----------------------------------------------------------------------
    {
        let mut seen: HashSet<&str> = HashSet::new();
        for engineer in &snapshot.engineers {
            if !seen.insert(engineer.id.as_str()) {
                errors.push(format!(
                    "Duplicate engineer ID '{}' -- each engineer must have a unique ID",
                    engineer.id
                ));
            }
        }
    }
    {
        let mut seen: HashSet<&str> = HashSet::new();
        for project in &snapshot.projects {
            if !seen.insert(project.id.as_str()) {
                errors.push(format!(
                    "Duplicate project ID '{}' -- each project must have a unique ID",
                    project.id
                ));
            }
        }
    }
    {
        let mut seen: HashSet<&str> = HashSet::new();
        for assignment in &snapshot.assignments {
            if !seen.insert(assignment.id.as_str()) {
                errors.push(format!(
                    "Duplicate assignment ID '{}' -- each assignment must have a unique ID",
                    assignment.id
                ));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Per-assignment errors and warnings
    // -----------------------------------------------------------------------
    let engineer_ids: HashSet<&str> =
        snapshot.engineers.iter().map(|e| e.id.as_str()).collect();
    let project_ids: HashSet<&str> = snapshot.projects.iter().map(|p| p.id.as_str()).collect();

    for assignment in &snapshot.assignments {
        if !engineer_ids.contains(assignment.engineer_id.as_str()) {
            errors.push(format!(
                "Assignment '{}' references engineer '{}' which doesn't exist",
                assignment.id, assignment.engineer_id
            ));
        }
        if !project_ids.contains(assignment.project_id.as_str()) {
            errors.push(format!(
                "Assignment '{}' references project '{}' which doesn't exist",
                assignment.id, assignment.project_id
            ));
        }

        match (
            parse_instant(&assignment.start_date),
            parse_instant(&assignment.end_date),
        ) {
            (Some(start), Some(end)) => {
                if end < start {
                    warnings.push(format!(
                        "Assignment '{}' ends before it starts -- treated as zero duration",
                        assignment.id
                    ));
                }
            }
            _ => warnings.push(format!(
                "Assignment '{}' has an unparseable date range -- it won't appear in capacity or timeline results",
                assignment.id
            )),
        }

        if assignment.allocation_percentage == 0 {
            warnings.push(format!(
                "Assignment '{}' has no allocation percentage -- it contributes nothing to capacity",
                assignment.id
            ));
        } else if assignment.allocation_percentage > 100 {
            warnings.push(format!(
                "Assignment '{}' allocates {}% -- above a full-time commitment",
                assignment.id, assignment.allocation_percentage
            ));
        }
    }

    // -----------------------------------------------------------------------
    // Per-project warnings
    // -----------------------------------------------------------------------
    for project in &snapshot.projects {
        match (
            parse_instant(&project.start_date),
            parse_instant(&project.end_date),
        ) {
            (Some(start), Some(end)) => {
                if end < start {
                    warnings.push(format!(
                        "Project '{}' ends before it starts -- treated as zero duration",
                        project.name
                    ));
                }
            }
            _ => warnings.push(format!(
                "Project '{}' has an unparseable date range",
                project.name
            )),
        }

        if project.required_skills.is_empty() {
            warnings.push(format!(
                "Project '{}' lists no required skills -- suitability matching will never return candidates",
                project.name
            ));
        }
    }

    // -----------------------------------------------------------------------
    // Per-engineer warnings
    // -----------------------------------------------------------------------
    for engineer in &snapshot.engineers {
        if engineer.skills.is_empty() {
            warnings.push(format!(
                "Engineer '{}' lists no skills -- they can't be matched to any project",
                engineer.name
            ));
        }
    }

    ValidationResult { errors, warnings }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
