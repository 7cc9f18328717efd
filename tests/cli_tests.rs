//! End-to-end CLI tests

mod common;

use common::nextnote_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn init_repo(dir: &Path, backend: &str) {
    nextnote_cmd()
        .current_dir(dir)
        .args(["init", "--backend", backend, "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized nextnote repository"));
}

#[test]
fn test_init_file_backend_creates_layout() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    assert!(temp.path().join(".nextnote/config.toml").exists());
    assert!(temp.path().join("Notes").is_dir());
}

#[test]
fn test_init_invalid_backend_fails() {
    let temp = TempDir::new().unwrap();
    nextnote_cmd()
        .current_dir(temp.path())
        .args(["init", "--backend", "postgres"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid backend"));
}

#[test]
fn test_command_outside_repository_exits_2() {
    let temp = TempDir::new().unwrap();
    nextnote_cmd()
        .current_dir(temp.path())
        .args(["list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Not a nextnote directory"));
}

#[test]
fn test_create_list_get_delete_flow() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .args([
            "create", "--title", "Shopping", "--group", "Home", "--note", "milk",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created note 1"));

    assert!(temp.path().join("Notes").join("[Home] Shopping.htm").exists());

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Home] Shopping"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["get", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name:     Shopping"))
        .stdout(predicate::str::contains("milk"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted note 1"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["get", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Note not found"));
}

#[test]
fn test_create_empty_title_exits_4() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["create", "--title", ""])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("title is missing"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found"));
}

#[test]
fn test_delete_unknown_id_exits_3() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["delete", "42"])
        .assert()
        .code(3);
}

#[test]
fn test_soft_delete_via_update() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["create", "--title", "Old"])
        .assert()
        .success();

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["update", "1", "--title", "Old", "--deleted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated note 1"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["list", "--deleted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old"));
}

#[test]
fn test_rename_command() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["create", "--title", "Todo", "--group", "Work"])
        .assert()
        .success();

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["rename", "1", "Done", "--group", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed note 1 to [Work] Done"));

    assert!(temp.path().join("Notes").join("[Work] Done.htm").exists());
    assert!(!temp.path().join("Notes").join("[Work] Todo.htm").exists());
}

#[test]
fn test_non_owner_mutation_exits_5() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["create", "--title", "Mine"])
        .assert()
        .success();

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["delete", "1", "--user", "mallory"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Permission denied"));
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .args([
            "create", "--title", "Shopping", "--group", "Home", "--note", "milk", "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Shopping\""));

    let output = nextnote_cmd()
        .current_dir(temp.path())
        .args(["get", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["name"], "Shopping");
    assert_eq!(note["grouping"], "Home");
    assert_eq!(note["note"], "milk");

    let output = nextnote_cmd()
        .current_dir(temp.path())
        .args(["list", "--json"])
        .output()
        .unwrap();
    let notes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(notes.is_array());
    assert_eq!(notes[0]["name"], "Shopping");
}

#[test]
fn test_sqlite_backend_flow() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "sqlite");

    assert!(temp.path().join(".nextnote/notes.db").exists());

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["create", "--title", "DbNote", "--note", "row body"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created note 1"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["get", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("row body"));

    // No .htm files for the sqlite backend
    assert!(!temp.path().join("Notes").exists());
}

#[test]
fn test_config_get_and_set() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["config", "backend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["config", "user", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set user = bob"));

    nextnote_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user = bob"));
}

#[test]
fn test_nextnote_root_env_selects_repository() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    let elsewhere = TempDir::new().unwrap();
    nextnote_cmd()
        .current_dir(elsewhere.path())
        .env("NEXTNOTE_ROOT", temp.path())
        .args(["create", "--title", "Remote"])
        .assert()
        .success();

    assert!(temp.path().join("Notes").join("Remote.htm").exists());
}

#[test]
fn test_nextnote_user_env_sets_owner() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path(), "file");

    nextnote_cmd()
        .current_dir(temp.path())
        .env("NEXTNOTE_USER", "carol")
        .args(["create", "--title", "Hers"])
        .assert()
        .success();

    // alice (the configured user) does not see carol's note
    nextnote_cmd()
        .current_dir(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found"));

    nextnote_cmd()
        .current_dir(temp.path())
        .env("NEXTNOTE_USER", "carol")
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hers"));
}
