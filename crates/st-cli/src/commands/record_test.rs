use super::*;
use st_git::GitResult;
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct FakeHistory {
    files: Vec<PathBuf>,
}

impl VersionControlHistory for FakeHistory {
    fn last_change_id(&self) -> GitResult<String> {
        Ok("deadbeef".to_string())
    }

    fn files_changed_by(&self, _id: &str) -> GitResult<Vec<PathBuf>> {
        Ok(self.files.clone())
    }
}

fn project_fixture() -> (TempDir, RuntimeContext) {
    let dir = tempdir().unwrap();
    let config = r#"
name: "fixture"
database:
  host: "localhost"
  database: "fixture"
  username: "builder"
  password: ""
"#;
    fs::write(dir.path().join("strata.yml"), config).unwrap();
    fs::create_dir_all(dir.path().join("database/new")).unwrap();

    let global = GlobalArgs {
        verbose: false,
        project_dir: dir.path().display().to_string(),
        config: None,
    };
    let ctx = RuntimeContext::new(&global).unwrap();
    (dir, ctx)
}

fn touch(dir: &Path, rel: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "-- sql\n").unwrap();
}

#[test]
fn test_collect_moves_maps_incoming_scripts_to_roles() {
    let (dir, ctx) = project_fixture();
    touch(dir.path(), "database/new/snapshot.sql");
    touch(dir.path(), "database/new/upgrade_script.sql");

    let history = FakeHistory {
        files: vec![
            PathBuf::from("database/new/snapshot.sql"),
            PathBuf::from("database/new/upgrade_script.sql"),
        ],
    };

    let moves = collect_moves(&ctx, &history, "abc123").unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].role, ScriptRole::Snapshot);
    assert_eq!(
        moves[0].dest,
        ctx.config.script_path("abc123", ScriptRole::Snapshot)
    );
    assert_eq!(moves[1].role, ScriptRole::Upgrade);
}

#[test]
fn test_collect_moves_ignores_files_outside_incoming_dir() {
    let (dir, ctx) = project_fixture();
    touch(dir.path(), "database/new/drop.sql");
    touch(dir.path(), "htdocs/index.php");
    touch(dir.path(), "database/snapshots/snapshot_old.sql");

    let history = FakeHistory {
        files: vec![
            PathBuf::from("database/new/drop.sql"),
            PathBuf::from("htdocs/index.php"),
            PathBuf::from("database/snapshots/snapshot_old.sql"),
        ],
    };

    let moves = collect_moves(&ctx, &history, "abc123").unwrap();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].role, ScriptRole::Drop);
}

#[test]
fn test_collect_moves_skips_files_missing_from_disk() {
    // A file deleted by the commit is in the change set but has no source
    // to move
    let (_dir, ctx) = project_fixture();

    let history = FakeHistory {
        files: vec![PathBuf::from("database/new/snapshot.sql")],
    };

    let moves = collect_moves(&ctx, &history, "abc123").unwrap();
    assert!(moves.is_empty());
}

#[test]
fn test_collect_moves_rejects_unknown_stem() {
    let (dir, ctx) = project_fixture();
    touch(dir.path(), "database/new/seed.sql");

    let history = FakeHistory {
        files: vec![PathBuf::from("database/new/seed.sql")],
    };

    let err = collect_moves(&ctx, &history, "abc123").unwrap_err();
    assert!(err.to_string().contains("Unknown script type"));
}

#[test]
fn test_collect_moves_skips_non_sql_files() {
    let (dir, ctx) = project_fixture();
    touch(dir.path(), "database/new/notes.txt");

    let history = FakeHistory {
        files: vec![PathBuf::from("database/new/notes.txt")],
    };

    let moves = collect_moves(&ctx, &history, "abc123").unwrap();
    assert!(moves.is_empty());
}
