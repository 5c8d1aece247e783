//! End-to-end CLI tests: exit codes, output formats, fatal-load
//! diagnostics.

mod common;

use common::Fixture;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_report_text_exits_zero_with_findings() {
    let fixture = Fixture::sample();
    fixture
        .sg()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency Matrix"))
        .stdout(predicate::str::contains("Missing References"))
        .stdout(predicate::str::contains("webhook-universal"))
        .stdout(predicate::str::contains("Summary"));
}

#[test]
fn test_report_structured_is_parseable_json() {
    let fixture = Fixture::sample();
    let output = fixture
        .sg()
        .args(["report", "--format", "structured"])
        .output()
        .expect("run sg");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["summary"]["total_skills"], 6);
    assert_eq!(report["summary"]["total_modules"], 17);
    assert_eq!(report["summary"]["missing_count"], 1);
    assert_eq!(report["summary"]["kind_mismatch_count"], 1);
    assert_eq!(report["summary"]["ambiguous_count"], 1);
    assert_eq!(report["summary"]["orphan_count"], 8);
    assert_eq!(report["summary"]["self_dependency_count"], 1);
    assert_eq!(report["summary"]["unmapped_lesson_count"], 1);
}

#[test]
fn test_report_proposes_mobile_ux_skill() {
    let fixture = Fixture::sample();
    let output = fixture
        .sg()
        .args(["report", "--format", "structured"])
        .output()
        .expect("run sg");
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");

    let proposals = report["recommendations"]["proposed_skills"]
        .as_array()
        .expect("array");
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0]["category"], "mobile-ux");
    assert_eq!(proposals[0]["module_names"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_fail_on_missing_exits_two() {
    let fixture = Fixture::sample();
    fixture
        .sg()
        .args(["report", "--fail-on-missing"])
        .assert()
        .code(2);

    fixture
        .sg()
        .args(["check", "--fail-on-missing"])
        .assert()
        .code(2);
}

#[test]
fn test_fail_on_missing_passes_on_clean_registry() {
    let fixture = Fixture::new(
        r#"{
            "skills": [{"id": "s-1", "name": "publisher"}],
            "modules": [{"id": "m-1", "name": "api-client"}],
            "module_deps": [{"skill_id": "s-1", "target": "api-client"}]
        }"#,
    );
    fixture
        .sg()
        .args(["report", "--fail-on-missing"])
        .assert()
        .success();
}

#[test]
fn test_missing_registry_file_is_fatal() {
    let fixture = Fixture::sample();
    let mut cmd = assert_cmd::Command::cargo_bin("sg").expect("binary builds");
    cmd.current_dir(fixture.path_in_dir(""))
        .env_remove("SG_REGISTRY")
        .args(["--registry", "does-not-exist.json", "report"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("E101"));
}

#[test]
fn test_duplicate_record_is_fatal_and_named() {
    let fixture = Fixture::new(
        r#"{
            "modules": [
                {"id": "m-1", "name": "api-client"},
                {"id": "m-1", "name": "rate-limiter"}
            ]
        }"#,
    );
    fixture
        .sg()
        .arg("report")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("E104"))
        .stderr(predicate::str::contains("m-1"));
}

#[test]
fn test_malformed_record_is_fatal_and_named() {
    let fixture = Fixture::new(
        r#"{
            "skills": [{"id": "s-1", "name": ""}]
        }"#,
    );
    fixture
        .sg()
        .arg("report")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("E103"))
        .stderr(predicate::str::contains("skills"));
}

#[test]
fn test_unparseable_registry_is_fatal() {
    let fixture = Fixture::new("this is not json");
    fixture
        .sg()
        .arg("report")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("E102"));
}

#[test]
fn test_report_out_writes_file() {
    let fixture = Fixture::sample();
    let out = fixture.path_in_dir("report.txt");
    fixture
        .sg()
        .args(["report", "--out"])
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("report written");
    assert!(content.contains("Dependency Matrix"));
    // File output carries no ANSI escapes.
    assert!(!content.contains('\u{1b}'));
}

#[test]
fn test_min_cluster_size_flag() {
    // connectors has only one orphan (base-connector); at threshold 1 it
    // becomes a proposal instead of a wiring suggestion.
    let fixture = Fixture::sample();
    let output = fixture
        .sg()
        .args(["report", "--format", "structured", "--min-cluster-size", "1"])
        .output()
        .expect("run sg");
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let proposals = report["recommendations"]["proposed_skills"]
        .as_array()
        .expect("array");
    assert!(
        proposals
            .iter()
            .any(|p| p["category"] == "connectors")
    );
}

#[test]
fn test_min_cluster_size_from_config() {
    let fixture = Fixture::sample();
    fixture.write_config("[analyzer]\nmin_cluster_size = 1\n");
    let output = fixture
        .sg()
        .args(["report", "--format", "structured"])
        .output()
        .expect("run sg");
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let proposals = report["recommendations"]["proposed_skills"]
        .as_array()
        .expect("array");
    assert!(proposals.iter().any(|p| p["category"] == "connectors"));
}

#[test]
fn test_check_lists_findings() {
    let fixture = Fixture::sample();
    fixture
        .sg()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("missing"))
        .stdout(predicate::str::contains("kind-mismatch"))
        .stdout(predicate::str::contains("self-dependency"))
        .stdout(predicate::str::contains("1 error(s)"));
}

#[test]
fn test_check_structured_envelope() {
    let fixture = Fixture::sample();
    let output = fixture
        .sg()
        .args(["check", "--format", "structured"])
        .output()
        .expect("run sg");
    let envelope: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(envelope["status"], "ok");
    assert_eq!(envelope["data"]["error_count"], 1);
    assert!(envelope["data"]["findings"].as_array().is_some_and(|f| f.len() == 4));
}

#[test]
fn test_usage_ranking_output() {
    let fixture = Fixture::sample();
    fixture
        .sg()
        .arg("usage")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordpress-publisher"))
        .stdout(predicate::str::contains("Skills used as dependencies"));
}

#[test]
fn test_orphans_output() {
    let fixture = Fixture::sample();
    fixture
        .sg()
        .arg("orphans")
        .assert()
        .success()
        .stdout(predicate::str::contains("mobile-ux"))
        .stdout(predicate::str::contains("propose new skill"))
        .stdout(predicate::str::contains("no wiring candidate"));
}

#[test]
fn test_lessons_summary() {
    let fixture = Fixture::sample();
    fixture
        .sg()
        .arg("lessons")
        .assert()
        .success()
        .stdout(predicate::str::contains("critical:"))
        .stdout(predicate::str::contains("Unmapped lessons"));
}

#[test]
fn test_structured_report_is_idempotent() {
    let fixture = Fixture::sample();
    let run = || {
        let output = fixture
            .sg()
            .args(["report", "--format", "structured"])
            .output()
            .expect("run sg");
        output.stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_completions_generate() {
    let fixture = Fixture::sample();
    fixture
        .sg()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sg"));
}
