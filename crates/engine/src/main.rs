use std::io::{self, Read, Write};

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crewcap_engine::interval::parse_instant;
use crewcap_engine::model::Snapshot;
use crewcap_engine::timeline::AssignmentFilter;
use crewcap_engine::{analytics, capacity, suitability, timeline, validator};

/// Window applied to the ending-soon query when the caller doesn't pick one.
const DEFAULT_ENDING_SOON_DAYS: i64 = 14;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
enum Request {
    #[serde(rename_all = "camelCase")]
    Capacity {
        engineer_id: String,
        snapshot: Snapshot,
        /// Evaluation instant (ISO 8601). Defaults to the wall clock,
        /// read once here at the boundary.
        now: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Suitability {
        project_id: String,
        snapshot: Snapshot,
        now: Option<String>,
    },
    Timeline {
        year: i32,
        month: u32,
        filter: Option<AssignmentFilter>,
        snapshot: Snapshot,
    },
    Upcoming {
        snapshot: Snapshot,
        now: Option<String>,
        limit: Option<usize>,
    },
    #[serde(rename_all = "camelCase")]
    EndingSoon {
        snapshot: Snapshot,
        now: Option<String>,
        within_days: Option<i64>,
    },
    Analytics {
        snapshot: Snapshot,
        now: Option<String>,
    },
    Validate {
        snapshot: Snapshot,
    },
}

#[derive(Debug, Serialize)]
struct OkResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrResponse {
    ok: bool,
    error: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the evaluation instant: the caller's value when present,
/// otherwise one wall-clock read. The engine itself never reads time.
fn resolve_now(now: Option<&String>) -> Result<NaiveDateTime, String> {
    match now {
        Some(s) => parse_instant(s).ok_or_else(|| format!("Unparseable 'now' instant: {}", s)),
        None => Ok(Utc::now().naive_utc()),
    }
}

fn write_ok<T: Serialize>(data: T) {
    let resp = OkResponse { ok: true, data };
    let json = serde_json::to_string(&resp).unwrap_or_else(|e| {
        format!("{{\"ok\":false,\"error\":\"serialization error: {}\"}}", e)
    });
    println!("{}", json);
    let _ = io::stdout().flush();
}

fn write_err(msg: impl std::fmt::Display) -> ! {
    let resp = ErrResponse {
        ok: false,
        error: msg.to_string(),
    };
    let json = serde_json::to_string(&resp)
        .unwrap_or_else(|_| "{\"ok\":false,\"error\":\"double serialization error\"}".to_string());
    println!("{}", json);
    let _ = io::stdout().flush();
    std::process::exit(1);
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    // Read all of stdin
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        write_err(format!("Failed to read stdin: {}", e));
    }

    // Parse request
    let request: Request = match serde_json::from_str(&input) {
        Ok(r) => r,
        Err(e) => write_err(format!("Invalid JSON input: {}", e)),
    };

    match request {
        Request::Capacity {
            engineer_id,
            snapshot,
            now,
        } => {
            let now = resolve_now(now.as_ref()).unwrap_or_else(|e| write_err(e));
            let engineer = match snapshot.engineer(&engineer_id) {
                Some(e) => e,
                None => write_err(format!("Unknown engineer '{}'", engineer_id)),
            };
            write_ok(capacity::compute_capacity(
                engineer,
                &snapshot.assignments,
                now,
            ));
        }
        Request::Suitability {
            project_id,
            snapshot,
            now,
        } => {
            let now = resolve_now(now.as_ref()).unwrap_or_else(|e| write_err(e));
            let project = match snapshot.project(&project_id) {
                Some(p) => p,
                None => write_err(format!("Unknown project '{}'", project_id)),
            };
            write_ok(suitability::find_suitable_engineers(
                project,
                &snapshot.engineers,
                &snapshot.assignments,
                now,
            ));
        }
        Request::Timeline {
            year,
            month,
            filter,
            snapshot,
        } => {
            let filter = filter.unwrap_or_default();
            match timeline::bucket_assignments_by_month(
                &snapshot.assignments,
                year,
                month,
                &filter,
            ) {
                Ok(buckets) => write_ok(buckets),
                Err(e) => write_err(e),
            }
        }
        Request::Upcoming {
            snapshot,
            now,
            limit,
        } => {
            let now = resolve_now(now.as_ref()).unwrap_or_else(|e| write_err(e));
            write_ok(timeline::upcoming_assignments(
                &snapshot.assignments,
                now,
                limit,
            ));
        }
        Request::EndingSoon {
            snapshot,
            now,
            within_days,
        } => {
            let now = resolve_now(now.as_ref()).unwrap_or_else(|e| write_err(e));
            write_ok(timeline::ending_soon(
                &snapshot.assignments,
                now,
                within_days.unwrap_or(DEFAULT_ENDING_SOON_DAYS),
            ));
        }
        Request::Analytics { snapshot, now } => {
            let now = resolve_now(now.as_ref()).unwrap_or_else(|e| write_err(e));
            write_ok(analytics::compute_team_analytics(
                &snapshot.engineers,
                &snapshot.projects,
                &snapshot.assignments,
                now,
            ));
        }
        Request::Validate { snapshot } => {
            write_ok(validator::validate(&snapshot));
        }
    }
}
