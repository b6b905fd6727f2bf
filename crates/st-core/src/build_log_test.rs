use super::*;
use tempfile::tempdir;

#[test]
fn test_empty_log_has_no_last_entry() {
    let log = BuildLog::new();
    assert!(log.last().is_none());
    assert!(log.is_empty());
}

#[test]
fn test_last_is_most_recent_append() {
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    log.append("h2", ScriptRole::Upgrade);
    log.append("h3", ScriptRole::Drop);

    let last = log.last().unwrap();
    assert_eq!(last.hash, "h3");
    assert_eq!(last.role, ScriptRole::Drop);
    assert_eq!(log.len(), 3);
}

#[test]
fn test_append_does_not_deduplicate() {
    // The journal records what happened; deduplication is the planner's job.
    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Upgrade);
    log.append("h1", ScriptRole::Upgrade);
    assert_eq!(log.len(), 2);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("build-log.json");

    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    log.append("h2", ScriptRole::Upgrade);
    log.save(&path).unwrap();

    let loaded = BuildLog::load(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    let last = loaded.last().unwrap();
    assert_eq!(last.hash, "h2");
    assert_eq!(last.role, ScriptRole::Upgrade);
}

#[test]
fn test_timestamps_survive_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("build-log.json");

    let mut log = BuildLog::new();
    log.append("h1", ScriptRole::Snapshot);
    let stamped = log.last().unwrap().applied_at;
    log.save(&path).unwrap();

    let loaded = BuildLog::load(&path).unwrap();
    assert_eq!(loaded.last().unwrap().applied_at, stamped);
}

#[test]
fn test_load_or_default_on_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let log = BuildLog::load_or_default(&path).unwrap();
    assert!(log.is_empty());
}
