//! Library-level pipeline tests: end-to-end behavioral scenarios plus
//! the cross-component properties (idempotence, usage conservation,
//! orphan correctness, resolution totality).

use std::collections::HashSet;

use skillgraph::analysis::consistency::Verdict;
use skillgraph::analysis::health::UpgradePriority;
use skillgraph::engine::{Engine, EngineOptions};
use skillgraph::registry::{EntityKind, RegistryExport, Snapshot, build_snapshot};

const SAMPLE_REGISTRY: &str = include_str!("fixtures/registry.json");

fn snapshot_from(json: &str) -> Snapshot {
    let export: RegistryExport = serde_json::from_str(json).unwrap();
    build_snapshot(export).unwrap()
}

fn sample_snapshot() -> Snapshot {
    snapshot_from(SAMPLE_REGISTRY)
}

#[test]
fn test_scenario_required_edge_resolves_and_counts() {
    // S1 declares a Required edge to M1 (module only): Resolved, count 1.
    let snapshot = snapshot_from(
        r#"{
            "skills": [{"id": "s-1", "name": "S1"}],
            "modules": [{"id": "m-1", "name": "M1"}],
            "module_deps": [{"skill_id": "s-1", "target": "M1", "strength": "D"}]
        }"#,
    );
    let outcome = Engine::default().run(&snapshot);
    let usage = &outcome.report.usage;
    assert_eq!(usage.module_ref_count("M1"), 1);
    assert!(outcome.findings.is_empty());
}

#[test]
fn test_scenario_declared_module_exists_as_skill() {
    // Declared kind Module, name exists only as a skill: KindMismatch.
    let snapshot = snapshot_from(
        r#"{
            "skills": [
                {"id": "s-1", "name": "S2"},
                {"id": "s-2", "name": "batch-processing"}
            ],
            "module_deps": [{"skill_id": "s-1", "target": "batch-processing"}]
        }"#,
    );
    let outcome = Engine::default().run(&snapshot);
    assert_eq!(outcome.report.kind_mismatches.len(), 1);
    let mismatch = &outcome.report.kind_mismatches[0];
    assert_eq!(mismatch.target, "batch-processing");
    assert_eq!(mismatch.actual, EntityKind::Skill);
    assert!(!outcome.has_missing());
}

#[test]
fn test_scenario_unknown_name_is_missing() {
    let snapshot = snapshot_from(
        r#"{
            "skills": [{"id": "s-1", "name": "S3"}],
            "module_deps": [{"skill_id": "s-1", "target": "webhook-universal"}]
        }"#,
    );
    let outcome = Engine::default().run(&snapshot);
    assert_eq!(outcome.report.missing.len(), 1);
    assert_eq!(outcome.report.missing[0].target, "webhook-universal");
    assert!(outcome.has_missing());
}

#[test]
fn test_scenario_lesson_heavy_module_is_critical_with_zero_health() {
    // 98 lessons, 6 referring skills: priority Critical, health 0.
    let mut export = RegistryExport::default();
    export.modules.push(serde_json::from_value(serde_json::json!({
        "id": "m-x", "name": "X", "category": "core"
    })).unwrap());
    for i in 0..6 {
        export.skills.push(
            serde_json::from_value(serde_json::json!({
                "id": format!("s-{i}"), "name": format!("skill-{i}")
            }))
            .unwrap(),
        );
        export.module_deps.push(
            serde_json::from_value(serde_json::json!({
                "skill_id": format!("s-{i}"), "target": "X"
            }))
            .unwrap(),
        );
    }
    for i in 0..98 {
        export.lessons.push(
            serde_json::from_value(serde_json::json!({
                "id": format!("l-{i}"),
                "title": format!("lesson {i}"),
                "category": "notes",
                "targets": ["X"]
            }))
            .unwrap(),
        );
    }
    let snapshot = build_snapshot(export).unwrap();
    let outcome = Engine::default().run(&snapshot);

    let health = &outcome.report.health[0];
    assert_eq!(health.module_name, "X");
    assert_eq!(health.lesson_count, 98);
    assert_eq!(health.skill_ref_count, 6);
    assert_eq!(health.health_score, 0);
    assert_eq!(health.upgrade_priority, UpgradePriority::Critical);
}

#[test]
fn test_scenario_untouched_module_is_healthy_low_orphan() {
    let snapshot = snapshot_from(
        r#"{"modules": [{"id": "m-y", "name": "Y"}]}"#,
    );
    let outcome = Engine::default().run(&snapshot);

    let health = &outcome.report.health[0];
    assert_eq!(health.health_score, 100);
    assert_eq!(health.upgrade_priority, UpgradePriority::Low);
    assert_eq!(outcome.report.summary.orphan_count, 1);
}

#[test]
fn test_scenario_five_orphan_cluster_proposed_once() {
    let snapshot = snapshot_from(
        r#"{
            "skills": [{"id": "s-1", "name": "unrelated"}],
            "modules": [
                {"id": "m-1", "name": "swipe-nav", "category": "mobile-ux"},
                {"id": "m-2", "name": "haptic-feedback", "category": "mobile-ux"},
                {"id": "m-3", "name": "pull-refresh", "category": "mobile-ux"},
                {"id": "m-4", "name": "bottom-sheet", "category": "mobile-ux"},
                {"id": "m-5", "name": "gesture-zoom", "category": "mobile-ux"}
            ]
        }"#,
    );
    let outcome = Engine::default().run(&snapshot);
    let proposals = &outcome.report.recommendations.proposed_skills;
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0].module_names.len(), 5);
}

#[test]
fn test_resolution_totality_over_sample() {
    // Every edge gets exactly one verdict; the matrix carries them all.
    let snapshot = sample_snapshot();
    let outcome = Engine::default().run(&snapshot);

    let classified: usize = outcome
        .report
        .matrix
        .iter()
        .map(|row| row.entries.len())
        .sum();
    assert_eq!(classified, snapshot.edges().len());
}

#[test]
fn test_usage_conservation_over_sample() {
    // Sum of module usage counts equals the number of distinct
    // (skill, module) pairs among cleanly-resolved module edges.
    let snapshot = sample_snapshot();
    let outcome = Engine::default().run(&snapshot);

    let resolved_pairs: HashSet<(String, String)> = outcome
        .report
        .matrix
        .iter()
        .flat_map(|row| {
            row.entries
                .iter()
                .filter(|e| {
                    matches!(
                        e.verdict,
                        Verdict::Resolved {
                            kind: EntityKind::Module
                        }
                    )
                })
                .map(|e| (row.skill.clone(), e.target.clone()))
        })
        .collect();

    let total: usize = outcome.report.usage.modules.iter().map(|u| u.count).sum();
    assert_eq!(total, resolved_pairs.len());
}

#[test]
fn test_orphan_correctness_over_sample() {
    // A module is listed as an orphan iff its ref count is zero.
    let outcome = Engine::default().run(&sample_snapshot());

    let orphan_names: HashSet<&str> = outcome
        .report
        .orphans
        .iter()
        .flat_map(|g| g.modules.iter().map(|m| m.name.as_str()))
        .collect();

    for usage in &outcome.report.usage.modules {
        assert_eq!(
            usage.count == 0,
            orphan_names.contains(usage.module_name.as_str()),
            "orphan mismatch for {}",
            usage.module_name
        );
    }
}

#[test]
fn test_idempotence_over_sample() {
    let snapshot = sample_snapshot();
    let engine = Engine::default();
    let first = engine.run(&snapshot).report.to_json().unwrap();
    let second = engine.run(&snapshot).report.to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_priority_monotonic_in_lesson_count() {
    let outcome = Engine::default().run(&sample_snapshot());
    let health = &outcome.report.health;
    for a in health {
        for b in health {
            if a.lesson_count > b.lesson_count {
                assert!(
                    a.upgrade_priority >= b.upgrade_priority,
                    "{} ({} lessons, {}) ranked below {} ({} lessons, {})",
                    a.module_name,
                    a.lesson_count,
                    a.upgrade_priority,
                    b.module_name,
                    b.lesson_count,
                    b.upgrade_priority
                );
            }
        }
    }
}

#[test]
fn test_optional_strength_counts_toward_usage() {
    let outcome = Engine::default().run(&sample_snapshot());
    // wordpress-publisher: one D (pipeline) and one O (wp-seo) referrer.
    assert_eq!(outcome.report.usage.module_ref_count("wordpress-publisher"), 2);
}

#[test]
fn test_wiring_suggestions_over_sample() {
    let outcome = Engine::default().run(&sample_snapshot());
    let recs = &outcome.report.recommendations;

    let wired: Vec<(&str, &str)> = recs
        .wiring
        .iter()
        .map(|w| (w.module_name.as_str(), w.skill_name.as_str()))
        .collect();
    assert!(wired.contains(&("base-connector", "website-seo-optimizer")));
    assert!(wired.contains(&("semantic-chunking", "universal-content-pipeline")));
    assert_eq!(recs.no_wiring_candidate, vec!["abstract-provider"]);
}

#[test]
fn test_duplicate_lesson_pair_collapsed() {
    let outcome = Engine::default().run(&sample_snapshot());
    let publisher_rows: Vec<_> = outcome
        .report
        .lessons
        .mappings
        .iter()
        .filter(|m| m.target_name == "wordpress-publisher")
        .collect();
    // l-1 and l-6; l-6's duplicate target collapses to one row.
    assert_eq!(publisher_rows.len(), 2);
    let mut pairs = HashSet::new();
    for row in &outcome.report.lessons.mappings {
        assert!(
            pairs.insert((row.lesson_id.clone(), row.target_name.clone())),
            "duplicate mapping for ({}, {})",
            row.lesson_id,
            row.target_name
        );
    }
}

#[test]
fn test_scoring_policy_is_configurable() {
    let snapshot = snapshot_from(
        r#"{
            "modules": [{"id": "m-1", "name": "M"}],
            "lessons": [
                {"id": "l-1", "title": "a", "category": "notes", "targets": ["M"]},
                {"id": "l-2", "title": "b", "category": "notes", "targets": ["M"]}
            ]
        }"#,
    );
    let mut options = EngineOptions::default();
    options.scoring.lesson_weight = 10;
    options.scoring.medium_threshold = 1;
    let outcome = Engine::new(options).run(&snapshot);

    let health = &outcome.report.health[0];
    assert_eq!(health.health_score, 80);
    assert_eq!(health.upgrade_priority, UpgradePriority::Medium);
}
