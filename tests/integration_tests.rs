//! Integration tests for the plantdesk CLI.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a plantdesk Command rooted in `dir` with no config file.
fn plantdesk(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("plantdesk");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn db_arg(dir: &TempDir) -> String {
    dir.path().join("data/reference.db").display().to_string()
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir).arg("--help").assert().success();
    }

    #[test]
    fn test_version() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir).arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir)
            .args(["show", "employees"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid reference kind"));
    }
}

// =============================================================================
// Database Commands
// =============================================================================

mod database {
    use super::*;

    #[test]
    fn test_init_creates_database() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir)
            .args(["init", "--db-path", &db_arg(&dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Reference database initialized"));
        assert!(dir.path().join("data/reference.db").exists());
    }

    #[test]
    fn test_init_seed_is_idempotent() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir)
            .args(["init", "--seed", "--db-path", &db_arg(&dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("statuses: seeded 4 rows"));

        plantdesk(&dir)
            .args(["init", "--seed", "--db-path", &db_arg(&dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("statuses: already populated"));
    }

    #[test]
    fn test_show_empty_database_uses_fallback() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir)
            .args(["init", "--db-path", &db_arg(&dir)])
            .assert()
            .success();
        plantdesk(&dir)
            .args(["show", "status", "--db-path", &db_arg(&dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("IN_PROGRESS"))
            .stderr(predicate::str::contains("fallback (storage empty)"));
    }

    #[test]
    fn test_show_unopenable_database_uses_fallback() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("not-a-dir"), "").unwrap();
        let db_path = dir.path().join("not-a-dir/reference.db");
        plantdesk(&dir)
            .args(["show", "status", "--db-path", &db_path.display().to_string()])
            .assert()
            .success()
            .stdout(predicate::str::contains("IN_PROGRESS"))
            .stderr(predicate::str::contains("fallback (storage unavailable)"));
    }

    #[test]
    fn test_show_does_not_create_database() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir)
            .args(["show", "category", "--db-path", &db_arg(&dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("facility"))
            .stderr(predicate::str::contains("fallback (storage unavailable)"));
        assert!(!dir.path().join("data").exists());
        assert!(!dir.path().join("data/reference.db").exists());
    }

    #[test]
    fn test_show_seeded_database_uses_primary() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir)
            .args(["init", "--seed", "--db-path", &db_arg(&dir)])
            .assert()
            .success();

        let output = plantdesk(&dir)
            .args(["show", "priorities", "--db-path", &db_arg(&dir)])
            .assert()
            .success()
            .stderr(predicate::str::contains("from primary"))
            .get_output()
            .stdout
            .clone();
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["CRITICAL", "HIGH", "MEDIUM", "LOW"]);
    }

    #[test]
    fn test_show_disabled_fallback_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("plantdesk.toml"),
            "[fallback]\ndepartment = \"disabled\"\n",
        )
        .unwrap();
        plantdesk(&dir)
            .args(["show", "department", "--db-path", &db_arg(&dir)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("fallback is disabled"));
    }
}

// =============================================================================
// Config Commands
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = TempDir::new().unwrap();
        plantdesk(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("using defaults"))
            .stdout(predicate::str::contains("port = 3141"));
    }

    #[test]
    fn test_config_validate_reports_problems() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plantdesk.toml"), "[server]\nport = 0\n").unwrap();
        plantdesk(&dir)
            .args(["config", "validate"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("server.port must be non-zero"));
    }

    #[test]
    fn test_invalid_config_file_fails_fast() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plantdesk.toml"), "[fallback]\nstatus = \"maybe\"\n").unwrap();
        plantdesk(&dir)
            .args(["show", "status"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid config file"));
    }
}
