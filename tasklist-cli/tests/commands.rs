use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

use tasklist_core::{config, persistence, FileStore, Task};
use tempfile::TempDir;

fn tasklist_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tasklist").expect("tasklist binary");
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn stored(home: &Path) -> Vec<Task> {
    persistence::load(&FileStore::at(home))
}

fn texts(home: &Path) -> Vec<String> {
    stored(home).into_iter().map(|t| t.text).collect()
}

fn add(home: &Path, text: &str) {
    tasklist_cmd(home).args(["add", text]).assert().success();
}

#[test]
fn add_puts_newest_first() {
    let home = TempDir::new().expect("home");
    add(home.path(), "Buy milk");
    add(home.path(), "Walk dog");

    assert_eq!(texts(home.path()), vec!["Walk dog", "Buy milk"]);
    tasklist_cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Walk dog").and(contains("2 tasks pending")));
}

#[test]
fn add_joins_words() {
    let home = TempDir::new().expect("home");
    tasklist_cmd(home.path()).args(["add", "Plan", "the", "trip"]).assert().success();
    assert_eq!(texts(home.path()), vec!["Plan the trip"]);
}

#[test]
fn blank_add_stores_nothing() {
    let home = TempDir::new().expect("home");
    tasklist_cmd(home.path()).args(["add", "   "]).assert().success();
    assert!(stored(home.path()).is_empty());
}

#[test]
fn toggle_marks_done_and_back() {
    let home = TempDir::new().expect("home");
    add(home.path(), "Buy milk");

    tasklist_cmd(home.path()).args(["toggle", "1"]).assert().success();
    assert!(stored(home.path())[0].completed);

    tasklist_cmd(home.path()).args(["toggle", "1"]).assert().success();
    assert!(!stored(home.path())[0].completed);
}

#[test]
fn edit_replaces_text_and_blank_keeps_it() {
    let home = TempDir::new().expect("home");
    add(home.path(), "Buy milk");

    tasklist_cmd(home.path()).args(["edit", "1", "  Buy oat milk "]).assert().success();
    assert_eq!(texts(home.path()), vec!["Buy oat milk"]);

    tasklist_cmd(home.path()).args(["edit", "1"]).assert().success();
    assert_eq!(texts(home.path()), vec!["Buy oat milk"]);
}

#[test]
fn delete_out_of_range_is_a_usage_error() {
    let home = TempDir::new().expect("home");
    add(home.path(), "Buy milk");

    tasklist_cmd(home.path())
        .args(["delete", "3"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("no task at position 3"));
    assert_eq!(texts(home.path()), vec!["Buy milk"]);

    tasklist_cmd(home.path()).args(["delete", "1"]).assert().success();
    assert!(stored(home.path()).is_empty());
}

#[test]
fn list_json_matches_store() {
    let home = TempDir::new().expect("home");
    persistence::save(&FileStore::at(home.path()), &[Task::new(7, "Walk dog")]).unwrap();

    let output = tasklist_cmd(home.path()).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "id": 7, "text": "Walk dog", "completed": false }])
    );
}

#[test]
fn empty_list_shows_placeholder() {
    let home = TempDir::new().expect("home");
    tasklist_cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Nothing to do yet"));
}

#[test]
fn render_escapes_task_text() {
    let home = TempDir::new().expect("home");
    add(home.path(), "<script>alert(1)</script>");

    tasklist_cmd(home.path())
        .arg("render")
        .assert()
        .success()
        .stdout(contains("&lt;script&gt;").and(contains("<script>alert").not()));
}

#[test]
fn render_out_writes_page() {
    let home = TempDir::new().expect("home");
    add(home.path(), "Buy milk");
    let page = home.path().join("page.html");

    tasklist_cmd(home.path())
        .args(["render", "--out"])
        .arg(&page)
        .assert()
        .success();
    let html = fs::read_to_string(&page).unwrap();
    assert!(html.contains("Buy milk"));
    assert!(html.contains("id=\"task-count\""));
}

#[test]
fn shell_reads_commands_from_stdin() {
    let home = TempDir::new().expect("home");
    tasklist_cmd(home.path())
        .arg("shell")
        .write_stdin("Buy milk\nWalk dog\n/toggle 2\n/toggle 9\n/quit\n")
        .assert()
        .success()
        .stdout(contains("no task at position 9"));

    let tasks = stored(home.path());
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].text, "Buy milk");
    assert!(tasks[1].completed);
}

#[test]
fn ephemeral_shell_leaves_store_untouched() {
    let home = TempDir::new().expect("home");
    tasklist_cmd(home.path())
        .args(["shell", "--ephemeral"])
        .write_stdin("Buy milk\n")
        .assert()
        .success();
    assert!(stored(home.path()).is_empty());
}

#[test]
fn split_failure_reports_error_and_adds_nothing() {
    let home = TempDir::new().expect("home");
    add(home.path(), "Plan trip");

    let config_path = config::config_path_at(home.path());
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    // nothing listens on the discard port
    fs::write(&config_path, "endpoint: http://127.0.0.1:9\n").unwrap();

    tasklist_cmd(home.path())
        .args(["split", "1", "--api-key", "test"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("request failed"));
    assert_eq!(texts(home.path()), vec!["Plan trip"]);
}
