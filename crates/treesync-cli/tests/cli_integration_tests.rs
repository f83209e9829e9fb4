//! CLI integration tests
//!
//! Run the built binary against a store in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(temp_dir: &TempDir, db_path: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_treesync-cli");
    Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .env_remove("TREESYNC_DB")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write_script(temp_dir: &TempDir, body: &str) -> PathBuf {
    let path = temp_dir.path().join("edits.txt");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_show_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("store.db");

    let output = run(&temp_dir, &db_path, &["show"]);

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output).trim_end_matches('\n'), " [  ] ");
    assert!(db_path.exists());
}

#[test]
fn test_edit_syncs_and_show_reloads() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("store.db");
    let script = write_script(
        &temp_dir,
        "# one root with a renamed child\n\
         add-root Root\n\
         add-child 0\n\
         rename 0/0 Leaf\n\
         set-data 0/0 hello\n",
    );

    let output = run(&temp_dir, &db_path, &["edit", script.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = stdout(&output);
    assert!(text.contains("✓ Synced: 2 created, 0 updated, 0 deleted"));

    let output = run(&temp_dir, &db_path, &["show"]);
    assert_eq!(
        stdout(&output).trim_end_matches('\n'),
        r#" [  { "name" : "Root" , "children" :  [  { "name" : "Leaf" , "data" : "hello" }  ]  }  ] "#
    );
}

#[test]
fn test_dry_run_prints_changes_without_syncing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("store.db");
    let script = write_script(&temp_dir, "add-root Draft\n");

    let output = run(
        &temp_dir,
        &db_path,
        &["edit", script.to_str().unwrap(), "--dry-run", "--indented"],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("\"name\": \"Draft\""));
    assert!(text.contains("\"add\""));
    assert!(text.contains("\"parentId\": null"));

    let output = run(&temp_dir, &db_path, &["show"]);
    assert_eq!(stdout(&output).trim_end_matches('\n'), " [  ] ");
}

#[test]
fn test_add_root_then_delete_it() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("store.db");

    let output = run(&temp_dir, &db_path, &["add-root", "Eager"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("✓ Created root "));

    let script = write_script(&temp_dir, "delete 0\n");
    let output = run(&temp_dir, &db_path, &["edit", script.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0 created, 0 updated, 1 deleted"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_add_root_without_name_uses_default_name() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("store.db");

    let output = run(&temp_dir, &db_path, &["add-root"]);
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = run(&temp_dir, &db_path, &["show"]);
    assert!(stdout(&output).contains("\"New Root\""));
}

#[test]
fn test_bad_script_line_fails_without_syncing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("store.db");
    let script = write_script(&temp_dir, "add-root R\nset-data 0/4 nope\n");

    let output = run(&temp_dir, &db_path, &["edit", script.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "Stderr: {}", stderr);

    let output = run(&temp_dir, &db_path, &["show"]);
    assert_eq!(stdout(&output).trim_end_matches('\n'), " [  ] ");
}
