use super::*;
use crate::sequence::ChangeRecord;

fn sequence(records: &[(&str, bool, bool, bool)]) -> ChangeSequence {
    let mut seq = ChangeSequence::new();
    for (hash, upgrade, drop, snapshot) in records {
        seq.append(ChangeRecord::new(*hash, *upgrade, *drop, *snapshot))
            .unwrap();
    }
    seq
}

#[test]
fn test_empty_log_provisions_from_snapshot_then_upgrades() {
    let seq = sequence(&[
        ("h1", false, false, true),
        ("h2", true, false, false),
        ("h3", true, false, false),
    ]);
    let log = BuildLog::new();

    let plan = MigrationPlanner::new(&seq, &log).plan_build().unwrap();
    assert_eq!(
        plan,
        vec![
            PlanStep::new("h1", ScriptRole::Snapshot),
            PlanStep::new("h2", ScriptRole::Upgrade),
            PlanStep::new("h3", ScriptRole::Upgrade),
        ]
    );
}

#[test]
fn test_empty_log_without_snapshot_fails() {
    let seq = sequence(&[("h1", true, false, false), ("h2", true, false, false)]);
    let log = BuildLog::new();

    let err = MigrationPlanner::new(&seq, &log).plan_build().unwrap_err();
    assert!(matches!(err, CoreError::NoSnapshotAvailable));
}

#[test]
fn test_provisioned_plans_only_pending_upgrades() {
    let seq = sequence(&[
        ("h1", false, false, true),
        ("h2", true, false, false),
        ("h3", true, false, false),
    ]);
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    log.append("h2", ScriptRole::Upgrade);

    let plan = MigrationPlanner::new(&seq, &log).plan_build().unwrap();
    assert_eq!(plan, vec![PlanStep::new("h3", ScriptRole::Upgrade)]);
}

#[test]
fn test_up_to_date_database_plans_nothing() {
    let seq = sequence(&[("h1", false, false, true), ("h2", true, false, false)]);
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    log.append("h2", ScriptRole::Upgrade);

    let plan = MigrationPlanner::new(&seq, &log).plan_build().unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_build_is_idempotent_once_log_reflects_the_plan() {
    let seq = sequence(&[
        ("h1", false, false, true),
        ("h2", true, false, false),
        ("h3", true, false, false),
    ]);
    let mut log = BuildLog::new();

    let first = MigrationPlanner::new(&seq, &log).plan_build().unwrap();
    assert_eq!(first.len(), 3);
    for step in &first {
        log.append(step.hash.clone(), step.role);
    }

    let second = MigrationPlanner::new(&seq, &log).plan_build().unwrap();
    assert!(second.is_empty());
}

#[test]
fn test_drop_as_last_action_means_empty_state() {
    let seq = sequence(&[
        ("h1", false, true, true),
        ("h2", true, false, false),
        ("h3", false, false, true),
    ]);
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    log.append("h2", ScriptRole::Upgrade);
    log.append("h1", ScriptRole::Drop);

    let planner = MigrationPlanner::new(&seq, &log);
    assert_eq!(planner.state(), DatabaseState::Empty);

    // Re-provisioning picks the latest snapshot, not the one applied before
    let plan = planner.plan_build().unwrap();
    assert_eq!(plan, vec![PlanStep::new("h3", ScriptRole::Snapshot)]);
}

#[test]
fn test_plan_drop_picks_most_recent_drop_at_or_before_last_applied() {
    let seq = sequence(&[
        ("h1", false, true, true),
        ("h2", true, true, false),
        ("h3", true, false, false),
        ("h4", false, true, false),
    ]);
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    log.append("h2", ScriptRole::Upgrade);
    log.append("h3", ScriptRole::Upgrade);

    // h4's drop is after the last applied hash, so h2's drop is the match
    let plan = MigrationPlanner::new(&seq, &log).plan_drop().unwrap();
    assert_eq!(plan, vec![PlanStep::new("h2", ScriptRole::Drop)]);
}

#[test]
fn test_plan_drop_is_noop_after_a_drop() {
    let seq = sequence(&[("h1", false, true, true)]);
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    log.append("h1", ScriptRole::Drop);

    let plan = MigrationPlanner::new(&seq, &log).plan_drop().unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_plan_drop_is_noop_on_unprovisioned_database() {
    let seq = sequence(&[("h1", false, true, true)]);
    let log = BuildLog::new();

    let plan = MigrationPlanner::new(&seq, &log).plan_drop().unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_plan_drop_without_any_drop_script_fails() {
    let seq = sequence(&[("h1", false, false, true), ("h2", true, false, false)]);
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);

    let err = MigrationPlanner::new(&seq, &log).plan_drop().unwrap_err();
    assert!(matches!(err, CoreError::NoDropAvailable { last_hash } if last_hash == "h1"));
}

#[test]
fn test_unknown_last_applied_hash_replays_full_history() {
    // The journal references a hash missing from the catalogue; the since
    // query falls back to the beginning of history rather than erroring.
    let seq = sequence(&[("h1", false, false, true), ("h2", true, false, false)]);
    let mut log = BuildLog::new();
    log.append("gone", ScriptRole::Upgrade);

    let plan = MigrationPlanner::new(&seq, &log).plan_build().unwrap();
    assert_eq!(plan, vec![PlanStep::new("h2", ScriptRole::Upgrade)]);
}

#[test]
fn test_snapshots_since_last_applied() {
    let seq = sequence(&[
        ("h1", false, false, true),
        ("h2", true, false, false),
        ("h3", false, false, true),
    ]);
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    log.append("h2", ScriptRole::Upgrade);

    let planner = MigrationPlanner::new(&seq, &log);
    assert_eq!(planner.snapshots_since_last_applied(), vec!["h3"]);
}

#[test]
fn test_state_display() {
    assert_eq!(DatabaseState::Empty.to_string(), "empty");
    assert_eq!(
        DatabaseState::Provisioned {
            last_hash: "h2".into()
        }
        .to_string(),
        "provisioned (at h2)"
    );
}
