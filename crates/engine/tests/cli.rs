/// Integration tests for the crewcap-engine binary.
///
/// These tests spawn the compiled binary via assert_cmd and verify
/// the JSON stdin/stdout protocol for all key scenarios.
///
/// Run with: cargo test --manifest-path crates/engine/Cargo.toml
use assert_cmd::Command;
use predicates::str::contains;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn cmd() -> Command {
    Command::cargo_bin("crewcap-engine").unwrap()
}

/// A small team: two engineers, one project, two assignments. Ada is booked
/// at 60%, Grace at 100%.
const SNAPSHOT: &str = r#"{
    "engineers": [
        {
            "id": "e-ada",
            "name": "Ada",
            "role": "engineer",
            "seniority": "senior",
            "department": "Platform",
            "skills": ["Rust", "Go"]
        },
        {
            "id": "e-grace",
            "name": "Grace",
            "role": "engineer",
            "seniority": "mid",
            "skills": ["Go"],
            "maxCapacity": 100
        }
    ],
    "projects": [
        {
            "id": "p-billing",
            "name": "Billing",
            "startDate": "2024-01-01",
            "endDate": "2024-06-30",
            "requiredSkills": ["Go", "Rust"],
            "teamSize": 2,
            "status": "active"
        }
    ],
    "assignments": [
        {
            "id": "a-1",
            "engineerId": "e-ada",
            "projectId": "p-billing",
            "allocationPercentage": 60,
            "startDate": "2024-01-10",
            "endDate": "2024-01-20",
            "role": "Developer"
        },
        {
            "id": "a-2",
            "engineerId": "e-grace",
            "projectId": "p-billing",
            "allocationPercentage": 100,
            "startDate": "2024-01-05",
            "endDate": "2024-05-01",
            "role": "Tech Lead"
        }
    ]
}"#;

fn request(command_fields: &str) -> String {
    format!(r#"{{{},"snapshot":{}}}"#, command_fields, SNAPSHOT)
}

// ---------------------------------------------------------------------------
// Test 1: capacity_for_engineer
// Ada's assignment ends 2024-01-20; at 2024-01-15 she is 60% booked.
// ---------------------------------------------------------------------------

#[test]
fn capacity_for_engineer() {
    let input = request(r#""command":"capacity","engineerId":"e-ada","now":"2024-01-15""#);

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(r#""ok":true"#))
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    assert_eq!(parsed["data"]["currentCapacity"], 60);
    assert_eq!(parsed["data"]["availableCapacity"], 40);
}

// ---------------------------------------------------------------------------
// Test 2: capacity_after_assignment_ends
// At 2024-03-01 Ada's assignment is over; full headroom is back.
// ---------------------------------------------------------------------------

#[test]
fn capacity_after_assignment_ends() {
    let input = request(r#""command":"capacity","engineerId":"e-ada","now":"2024-03-01""#);

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    assert_eq!(parsed["data"]["currentCapacity"], 0);
    assert_eq!(parsed["data"]["availableCapacity"], 100);
}

// ---------------------------------------------------------------------------
// Test 3: capacity_unknown_engineer
// ---------------------------------------------------------------------------

#[test]
fn capacity_unknown_engineer() {
    let input = request(r#""command":"capacity","engineerId":"e-ghost","now":"2024-01-15""#);

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("Unknown engineer"));
}

// ---------------------------------------------------------------------------
// Test 4: suitability_ranks_candidates
// Ada covers both required skills, Grace covers one; Ada ranks first and
// both carry their capacity at the evaluation instant.
// ---------------------------------------------------------------------------

#[test]
fn suitability_ranks_candidates() {
    let input = request(r#""command":"suitability","projectId":"p-billing","now":"2024-01-15""#);

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(r#""ok":true"#))
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    let candidates = parsed["data"].as_array().unwrap();
    assert_eq!(candidates.len(), 2);

    assert_eq!(candidates[0]["engineerId"], "e-ada");
    assert_eq!(candidates[0]["matchCount"], 2);
    assert_eq!(candidates[0]["availableCapacity"], 40);
    assert_eq!(candidates[0]["seniority"], "senior");
    assert_eq!(candidates[0]["department"], "Platform");

    assert_eq!(candidates[1]["engineerId"], "e-grace");
    assert_eq!(candidates[1]["matchCount"], 1);
    assert_eq!(candidates[1]["availableCapacity"], 0);
}

// ---------------------------------------------------------------------------
// Test 5: timeline_buckets_by_day
// Assignment a-1 runs Jan 10-20; day 9 excludes it, days 10 and 20 include
// it, day 21 excludes it again.
// ---------------------------------------------------------------------------

#[test]
fn timeline_buckets_by_day() {
    let input = request(r#""command":"timeline","year":2024,"month":1"#);

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(r#""ok":true"#))
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    let buckets = parsed["data"].as_array().unwrap();
    assert_eq!(buckets.len(), 31);

    let ids_on = |day: usize| -> Vec<String> {
        buckets[day - 1]["assignmentIds"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(ids_on(9), vec!["a-2"]);
    assert_eq!(ids_on(10), vec!["a-1", "a-2"]);
    assert_eq!(ids_on(20), vec!["a-1", "a-2"]);
    assert_eq!(ids_on(21), vec!["a-2"]);
    assert!(ids_on(2).is_empty());
}

// ---------------------------------------------------------------------------
// Test 6: timeline_filter_by_engineer
// ---------------------------------------------------------------------------

#[test]
fn timeline_filter_by_engineer() {
    let input = request(
        r#""command":"timeline","year":2024,"month":1,"filter":{"engineerId":"e-ada"}"#,
    );

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    let buckets = parsed["data"].as_array().unwrap();
    let day15 = buckets[14]["assignmentIds"].as_array().unwrap();
    assert_eq!(day15.len(), 1);
    assert_eq!(day15[0], "a-1");
}

// ---------------------------------------------------------------------------
// Test 7: timeline_invalid_month
// ---------------------------------------------------------------------------

#[test]
fn timeline_invalid_month() {
    let input = request(r#""command":"timeline","year":2024,"month":13"#);

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("Invalid calendar month"));
}

// ---------------------------------------------------------------------------
// Test 8: upcoming_assignments_sorted_and_capped
// At 2024-01-01 both assignments are still ahead; a-2 starts first.
// ---------------------------------------------------------------------------

#[test]
fn upcoming_assignments_sorted_and_capped() {
    let input = request(r#""command":"upcoming","now":"2024-01-01","limit":1"#);

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    let upcoming = parsed["data"].as_array().unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["id"], "a-2");
}

// ---------------------------------------------------------------------------
// Test 9: ending_soon_defaults_to_two_weeks
// At 2024-01-15, a-1 ends within 14 days; a-2 ends months later.
// ---------------------------------------------------------------------------

#[test]
fn ending_soon_defaults_to_two_weeks() {
    let input = request(r#""command":"endingSoon","now":"2024-01-15""#);

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    let ending = parsed["data"].as_array().unwrap();
    assert_eq!(ending.len(), 1);
    assert_eq!(ending[0]["id"], "a-1");
}

// ---------------------------------------------------------------------------
// Test 10: analytics_report
// At 2024-01-15 Grace is fully booked (overloaded above 90%); Ada has 40
// headroom. The team covers Go and Rust but only one engineer holds Rust.
// ---------------------------------------------------------------------------

#[test]
fn analytics_report() {
    let input = request(r#""command":"analytics","now":"2024-01-15""#);

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(r#""ok":true"#))
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    let report = &parsed["data"];

    assert_eq!(report["overloadedEngineers"], 1);
    assert_eq!(report["availableEngineers"], 1);
    assert_eq!(report["underutilizedEngineers"], 1);
    assert_eq!(report["averageUtilization"], 80.0);
    assert_eq!(report["projectStatusDistribution"]["active"], 1);
    assert_eq!(report["skillDemand"][0]["skill"], "Go");
    assert_eq!(report["skillGap"]["coveragePercentage"], 100.0);
    let low = report["skillGap"]["lowCoverageSkills"].as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0], "Rust");
}

// ---------------------------------------------------------------------------
// Test 11: validate_reports_dangling_reference
// ---------------------------------------------------------------------------

#[test]
fn validate_reports_dangling_reference() {
    let input = r#"{
        "command": "validate",
        "snapshot": {
            "engineers": [],
            "projects": [],
            "assignments": [
                {
                    "id": "a-1",
                    "engineerId": "e-ghost",
                    "projectId": "p-ghost",
                    "allocationPercentage": 50,
                    "startDate": "2024-01-01",
                    "endDate": "2024-02-01"
                }
            ]
        }
    }"#;

    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(r#""ok":true"#))
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    let errors = parsed["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2, "expected both dangling references reported");
}

// ---------------------------------------------------------------------------
// Test 12: invalid_json_input
// Malformed JSON must make the binary exit with code 1 and ok:false.
// ---------------------------------------------------------------------------

#[test]
fn invalid_json_input() {
    let input = r#"{ this is not valid json "#;

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("error"));
}

// ---------------------------------------------------------------------------
// Test 13: unknown_command
// ---------------------------------------------------------------------------

#[test]
fn unknown_command() {
    let input = request(r#""command":"forecast""#);

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("error"));
}

// ---------------------------------------------------------------------------
// Test 14: unparseable_now_is_an_error
// ---------------------------------------------------------------------------

#[test]
fn unparseable_now_is_an_error() {
    let input = request(r#""command":"analytics","now":"soonish""#);

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("Unparseable 'now'"));
}
