//! End-to-end tests for the `liatris` binary.
//!
//! Every test gets its own database in a temp directory and runs with
//! `--json`, so assertions work on parsed output rather than terminal text.

use assert_cmd::Command;
use liatris::model::NewItem;
use liatris::storage::SqliteStorage;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn liatris(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("liatris").unwrap();
    cmd.env_remove("RUST_LOG").arg("--db").arg(db).arg("--json");
    cmd
}

fn run_json(db: &Path, args: &[&str]) -> Value {
    let output = liatris(db).args(args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn run_error(db: &Path, args: &[&str], exit_code: i32) -> Value {
    let output = liatris(db)
        .args(args)
        .assert()
        .failure()
        .code(exit_code)
        .get_output()
        .stderr
        .clone();
    serde_json::from_slice(&output).unwrap()
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("liatris.db");
    (dir, db)
}

#[test]
fn test_add_and_search() {
    let (_dir, db) = setup();

    let project = run_json(&db, &["project", "add", "Groceries"]);
    assert_eq!(project["name"], "Groceries");
    let project_id = project["id"].as_i64().unwrap().to_string();

    run_json(&db, &["item", "add", &project_id, "Milk", "--due", "2024-01-15"]);
    run_json(&db, &["item", "add", &project_id, "Bread"]);

    let results = run_json(&db, &["search", "milk"]);
    assert_eq!(results["item_count"], 1);
    assert_eq!(results["projects"][0]["project"]["name"], "Groceries");
    assert_eq!(results["projects"][0]["items"][0]["title"], "Milk");

    let by_date = run_json(&db, &["search", "2024-01"]);
    assert_eq!(by_date["item_count"], 1);
}

#[test]
fn test_missing_project_is_not_found() {
    let (_dir, db) = setup();

    let error = run_error(&db, &["project", "show", "99"], 3);
    assert_eq!(error["error"]["code"], "PROJECT_NOT_FOUND");

    let error = run_error(&db, &["item", "add", "99", "Orphan"], 3);
    assert_eq!(error["error"]["code"], "PROJECT_NOT_FOUND");
}

#[test]
fn test_blank_title_is_rejected() {
    let (_dir, db) = setup();
    run_json(&db, &["project", "add", "Home"]);

    let error = run_error(&db, &["item", "add", "1", "   "], 4);
    assert_eq!(error["error"]["code"], "INVALID_ARGUMENT");
}

#[test]
fn test_project_delete_cascades() {
    let (_dir, db) = setup();
    run_json(&db, &["project", "add", "Home"]);
    run_json(&db, &["item", "add", "1", "Fix sink"]);
    run_json(&db, &["note", "set", "1", "call plumber"]);

    let deleted = run_json(&db, &["project", "delete", "1"]);
    assert_eq!(deleted["deleted"]["projects"], 1);
    assert_eq!(deleted["deleted"]["items"], 1);
    assert_eq!(deleted["deleted"]["notes"], 1);

    run_error(&db, &["item", "show", "1"], 3);
}

#[test]
fn test_note_show_creates_once() {
    let (_dir, db) = setup();
    run_json(&db, &["project", "add", "Home"]);
    run_json(&db, &["item", "add", "1", "Paint fence"]);

    let first = run_json(&db, &["note", "show", "1"]);
    assert_eq!(first["content"], "");
    let second = run_json(&db, &["note", "show", "1"]);
    assert_eq!(first["id"], second["id"]);

    let updated = run_json(&db, &["note", "set", "1", "white, two coats"]);
    assert_eq!(updated["id"], first["id"]);
    assert_eq!(updated["content"], "white, two coats");
}

#[test]
fn test_settings_defaults_and_normalization() {
    let (_dir, db) = setup();

    let list = run_json(&db, &["settings", "list"]);
    assert_eq!(list["count"], 3);

    let upcoming = run_json(&db, &["settings", "get", "upcoming"]);
    assert_eq!(upcoming["key"], "UPCOMINGTHRESHOLD");
    assert_eq!(upcoming["value"], "7");

    let clamped = run_json(&db, &["settings", "set", "upcoming", "1000"]);
    assert_eq!(clamped["value"], "70");

    let badges = run_json(&db, &["settings", "set", "badges", "off"]);
    assert_eq!(badges["value"], "0");

    let error = run_error(&db, &["settings", "get", "ENABLENUM"], 3);
    assert_eq!(error["error"]["code"], "SETTING_NOT_FOUND");
    assert!(error["error"]["hint"].as_str().unwrap().contains("ENABLENUMS"));
}

#[test]
fn test_views_and_status() {
    let (_dir, db) = setup();
    run_json(&db, &["project", "add", "Work"]);
    run_json(&db, &["item", "add", "1", "Report", "--due", "today"]);
    run_json(&db, &["item", "add", "1", "Review", "--due", "+2d"]);
    run_json(&db, &["item", "add", "1", "Someday idea"]);
    run_json(&db, &["item", "done", "3"]);

    let today = run_json(&db, &["view", "today"]);
    assert_eq!(today["title"], "Today");
    assert_eq!(today["projects"][0]["items"][0]["title"], "Report");

    let upcoming = run_json(&db, &["view", "upcoming"]);
    assert_eq!(upcoming["item_count"], 1);

    let logbook = run_json(&db, &["view", "logbook"]);
    assert_eq!(logbook["projects"][0]["items"][0]["title"], "Someday idea");

    let status = run_json(&db, &["status"]);
    assert_eq!(status["project_count"], 1);
    assert_eq!(status["item_count"], 3);
    assert_eq!(status["done_count"], 1);
    assert_eq!(status["badges"]["today"], 1);
    assert_eq!(status["badges"]["upcoming"], 1);
}

#[test]
fn test_silent_prints_only_id() {
    let (_dir, db) = setup();

    liatris(&db)
        .args(["--silent", "project", "add", "Errands"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_delete_missing_project_leaves_orphans_alone() {
    let (_dir, db) = setup();
    let orphan = {
        let mut storage = SqliteStorage::open(&db).unwrap();
        let id = storage.insert(NewItem::new(4242, "Ghost")).unwrap();
        storage.get_or_create_note(id).unwrap();
        id
    };

    let error = run_error(&db, &["project", "delete", "4242"], 3);
    assert_eq!(error["error"]["code"], "PROJECT_NOT_FOUND");

    let storage = SqliteStorage::open(&db).unwrap();
    assert!(storage.get_item(orphan).unwrap().is_some());
    assert!(storage.get_note(orphan).unwrap().is_some());
}

#[test]
fn test_upcoming_window_rejects_non_integers() {
    let (_dir, db) = setup();

    for bad in ["7.5", "1e3", "soon"] {
        let error = run_error(&db, &["settings", "set", "upcoming", bad], 4);
        assert_eq!(error["error"]["code"], "INVALID_ARGUMENT");
    }

    let clamped = run_json(&db, &["settings", "set", "upcoming", "--", "-5"]);
    assert_eq!(clamped["value"], "1");
}

#[test]
fn test_version_reports_database_without_creating_it() {
    let (_dir, db) = setup();

    let about = run_json(&db, &["version"]);
    assert_eq!(about["name"], "liatris");
    assert_eq!(about["database"], db.to_str().unwrap());
    assert_eq!(about["database_exists"], false);
    assert!(!db.exists());
}
