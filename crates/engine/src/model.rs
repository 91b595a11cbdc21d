use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Account role of a team member.
///
/// The surrounding application stores roles as free-text strings; anything
/// other than the two known values maps to `Unknown` so new roles added
/// upstream don't break deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Manager,
    Engineer,
    Unknown,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "manager" => Role::Manager,
            "engineer" => Role::Engineer,
            _ => Role::Unknown,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Unknown
    }
}

/// Seniority tier of an engineer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Unknown,
}

impl From<String> for Seniority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "junior" => Seniority::Junior,
            "mid" => Seniority::Mid,
            "senior" => Seniority::Senior,
            _ => Seniority::Unknown,
        }
    }
}

impl Default for Seniority {
    fn default() -> Self {
        Seniority::Unknown
    }
}

/// Lifecycle status of a project. Caller-set, never derived by the engine.
///
/// `Unknown` values are carried through but excluded from the status
/// distribution in analytics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
    Unknown,
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "planning" => ProjectStatus::Planning,
            "active" => ProjectStatus::Active,
            "completed" => ProjectStatus::Completed,
            _ => ProjectStatus::Unknown,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Unknown
    }
}

// ---------------------------------------------------------------------------
// Snapshot records
// ---------------------------------------------------------------------------

/// A member of the engineering team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub department: Option<String>,
    /// Free-text skill labels, compared by case-sensitive equality.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub seniority: Seniority,
    /// Total permitted allocation percentage. 100 for full-time; part-time
    /// staff commonly carry 50.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u32,
}

fn default_max_capacity() -> u32 {
    100
}

/// A project engineers can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO 8601 date string.
    pub start_date: String,
    /// ISO 8601 date string.
    pub end_date: String,
    /// Ordered list of skill labels the project calls for.
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Target headcount for the project.
    #[serde(default)]
    pub team_size: u32,
    #[serde(default)]
    pub status: ProjectStatus,
    /// References the owning manager's `Engineer` by ID.
    #[serde(default)]
    pub manager_id: Option<String>,
}

/// A time-bounded fractional commitment of one engineer to one project.
///
/// References are always bare IDs; expanding them to full records is an
/// explicit join through [`Snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    /// References an `Engineer` by its ID.
    pub engineer_id: String,
    /// References a `Project` by its ID.
    pub project_id: String,
    /// Fraction of the engineer's time committed, expressed 1-100.
    /// Missing values contribute 0 to capacity sums.
    #[serde(default)]
    pub allocation_percentage: u32,
    /// ISO 8601 date string.
    pub start_date: String,
    /// ISO 8601 date string. Expected >= `start_date`; not enforced here.
    pub end_date: String,
    /// Free-text role on the project (e.g. "Developer", "Tech Lead").
    #[serde(default)]
    pub role: Option<String>,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One momentarily-consistent view of the team's records.
///
/// Every engine operation is a pure function of a snapshot plus an
/// evaluation instant; nothing is cached or mutated between calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub engineers: Vec<Engineer>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Snapshot {
    /// Join helper: resolve an engineer ID to its record.
    pub fn engineer(&self, id: &str) -> Option<&Engineer> {
        self.engineers.iter().find(|e| e.id == id)
    }

    /// Join helper: resolve a project ID to its record.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
