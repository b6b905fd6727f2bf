use super::*;
use tempfile::tempdir;

const FULL_CONFIG: &str = r#"
name: "myproject"
database_dir: "db"

settings:
  drop_on_new_snapshot: true

database:
  host: "db.internal"
  port: 3307
  database: "myproject_dev"
  username: "builder"
  password: "secret"
"#;

const MINIMAL_CONFIG: &str = r#"
name: "myproject"
database:
  host: "localhost"
  database: "myproject_dev"
  username: "builder"
  password: "secret"
"#;

fn write_config(content: &str) -> (tempfile::TempDir, Config) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, content).unwrap();
    let config = Config::load(&path).unwrap();
    (dir, config)
}

#[test]
fn test_load_full_config() {
    let (_dir, config) = write_config(FULL_CONFIG);

    assert_eq!(config.name, "myproject");
    assert_eq!(config.database_dir, "db");
    assert!(config.settings.drop_on_new_snapshot);
    assert_eq!(config.database.host, "db.internal");
    assert_eq!(config.database.port, 3307);
    assert_eq!(config.database.database, "myproject_dev");
}

#[test]
fn test_defaults() {
    let (_dir, config) = write_config(MINIMAL_CONFIG);

    assert_eq!(config.database_dir, "database");
    assert!(!config.settings.drop_on_new_snapshot);
    assert_eq!(config.database.port, 3306);
}

#[test]
fn test_load_from_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), MINIMAL_CONFIG).unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.root, dir.path());
}

#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_unknown_field_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, format!("{}\nunknown_field: 1\n", MINIMAL_CONFIG)).unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
fn test_empty_name_is_invalid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, MINIMAL_CONFIG.replace("myproject", "  ")).unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_derived_paths() {
    let (dir, config) = write_config(FULL_CONFIG);
    let base = dir.path().join("db");

    assert_eq!(config.database_path(), base);
    assert_eq!(config.sequence_path(), base.join("change-sequence.json"));
    assert_eq!(config.build_log_path(), base.join("build-log.json"));
    assert_eq!(config.new_scripts_path(), base.join("new"));
    assert_eq!(
        config.script_path("abc", ScriptRole::Drop),
        base.join("drops").join("drop_abc.sql")
    );
}
