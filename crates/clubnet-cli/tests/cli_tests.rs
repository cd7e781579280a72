//! CLI integration tests
//!
//! Drive the `clubnet` binary against a scratch database and check the JSON
//! it prints.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn run(dir: &Path, db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clubnet"))
        .current_dir(dir)
        .env_remove("CLUBNET_DB")
        .env_remove("CLUBNET_PASSWORD")
        .env("CLUBNET_LOG_FORMAT", "json")
        .args(args)
        .arg("--db")
        .arg(db)
        .output()
        .expect("Failed to execute CLI")
}

fn run_json(dir: &Path, db: &Path, args: &[&str]) -> Value {
    let output = run(dir, db, args);
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn setup() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("data").join("club.db");
    (temp_dir, db)
}

fn register(dir: &Path, db: &Path, name: &str, email: &str) -> i64 {
    let out = run_json(
        dir,
        db,
        &[
            "user", "register", "--name", name, "--email", email, "--password", "pw",
        ],
    );
    out["user_id"].as_i64().unwrap()
}

#[test]
fn test_db_init_reports_version() {
    let (dir, db) = setup();
    let out = run_json(dir.path(), &db, &["db", "init"]);
    assert_eq!(out["schema_version"], 2);
    assert!(db.exists());

    let out = run_json(dir.path(), &db, &["db", "version"]);
    assert_eq!(out["schema_version"], 2);
}

#[test]
fn test_register_login_and_bad_password() {
    let (dir, db) = setup();
    let id = register(dir.path(), &db, "Ana", "ana@example.com");

    let out = run_json(
        dir.path(),
        &db,
        &["user", "login", "--email", "ana@example.com", "--password", "pw"],
    );
    assert_eq!(out["user"]["id"], id);
    assert!(out["user"].get("password_hash").is_none());

    let output = run(
        dir.path(),
        &db,
        &["user", "login", "--email", "ana@example.com", "--password", "nope"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_UNAUTHORISED"));
}

#[test]
fn test_club_review_flow() {
    let (dir, db) = setup();
    register(dir.path(), &db, "Ana", "ana@example.com");
    let creds = ["--email", "ana@example.com", "--password", "pw"];

    let mut create = vec![
        "club", "create", "--name", "Harbour Runners", "--sport", "running", "--lat", "0.01",
        "--long", "-0.01",
    ];
    create.extend_from_slice(&creds);
    let club = run_json(dir.path(), &db, &create)["club_id"].as_i64().unwrap();

    let club_arg = club.to_string();
    let mut review = vec!["review", "add", "--club", club_arg.as_str()];
    review.extend_from_slice(&["--rating", "4", "--text", "Great hills"]);
    review.extend_from_slice(&creds);
    run_json(dir.path(), &db, &review);

    let near = run_json(
        dir.path(),
        &db,
        &["club", "near", "--lat", "0", "--long", "0", "--radius", "5"],
    );
    assert_eq!(near.as_array().unwrap().len(), 1);
    assert_eq!(near[0]["member_count"], 1);
    assert_eq!(near[0]["rating"], 4.0);

    let reviews = run_json(dir.path(), &db, &["review", "list", &club_arg]);
    assert_eq!(reviews[0]["author_name"], "Ana");
    assert_eq!(reviews[0]["rating"], 4);

    let found = run_json(dir.path(), &db, &["club", "search", "harbour"]);
    assert_eq!(found.as_array().unwrap().len(), 1);
}

#[test]
fn test_friend_flow() {
    let (dir, db) = setup();
    let ana = register(dir.path(), &db, "Ana", "ana@example.com");
    let bo = register(dir.path(), &db, "Bo", "bo@example.com");
    let (ana_arg, bo_arg) = (ana.to_string(), bo.to_string());

    run_json(
        dir.path(),
        &db,
        &[
            "friend", "request", "--to", &bo_arg, "--email", "ana@example.com", "--password", "pw",
        ],
    );
    let pending = run_json(
        dir.path(),
        &db,
        &[
            "friend", "list", "--pending", "--email", "bo@example.com", "--password", "pw",
        ],
    );
    assert_eq!(pending.as_array().unwrap().len(), 1);

    run_json(
        dir.path(),
        &db,
        &[
            "friend", "accept", "--from", &ana_arg, "--email", "bo@example.com", "--password", "pw",
        ],
    );
    let friends = run_json(
        dir.path(),
        &db,
        &["friend", "list", "--email", "ana@example.com", "--password", "pw"],
    );
    assert_eq!(friends[0]["counterpart_id"], bo);
    assert_eq!(friends[0]["direction"], "outgoing");
}

#[test]
fn test_show_missing_club_fails() {
    let (dir, db) = setup();
    let output = run(dir.path(), &db, &["club", "show", "9"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}
