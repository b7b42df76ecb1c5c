use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn jobcat(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jobcat").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("JOBCAT_PASSCODE")
        .env_remove("JOBCAT_HOME")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn write_feed(dir: &TempDir) -> std::path::PathBuf {
    let feed = dir.path().join("feed.json");
    fs::write(
        &feed,
        r#"{"jobs": [
            {"id": "feed-1", "title": "Rust Engineer", "company_name": "Ferrous", "location": "Lisbon", "tags": ["Rust", "Tokio"], "remote": true},
            {"title": "Data Analyst", "company": "Numbers Inc", "location": "Berlin", "skills": "SQL, Python"}
        ]}"#,
    )
    .unwrap();
    feed
}

#[test]
fn mutations_need_login() {
    let temp = TempDir::new().unwrap();

    jobcat(temp.path())
        .args(["add", "--title", "Dev", "--company", "Acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not authenticated"));

    jobcat(temp.path())
        .args(["login", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect passcode"));

    jobcat(temp.path())
        .args(["login", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin session started"));

    jobcat(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin session active"));

    jobcat(temp.path())
        .args(["add", "--title", "Dev", "--company", "Acme", "--skills", "Rust, SQL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job added"));

    jobcat(temp.path()).arg("logout").assert().success();

    jobcat(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn sync_list_and_stats() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(&temp);

    jobcat(temp.path())
        .args(["sync", "--from"])
        .arg(&feed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 2 external job(s)"));

    jobcat(temp.path())
        .args(["list", "--query", "rust", "--remote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Engineer"))
        .stdout(predicate::str::contains("Data Analyst").not());

    jobcat(temp.path())
        .args(["list", "--skill", "python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data Analyst"));

    jobcat(temp.path())
        .args(["list", "--query", "berlin", "--narrow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No jobs found."));

    jobcat(temp.path())
        .args(["view", "feed-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ferrous"))
        .stdout(predicate::str::contains("Rust, Tokio"));

    jobcat(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total jobs"))
        .stdout(predicate::str::contains("2"));
}

#[test]
fn failed_sync_keeps_catalog() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(&temp);

    jobcat(temp.path())
        .args(["sync", "--from"])
        .arg(&feed)
        .assert()
        .success();

    jobcat(temp.path())
        .args(["sync", "--from"])
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Could not fetch external jobs"));

    jobcat(temp.path())
        .args(["view", "feed-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Engineer"));
}

#[test]
fn delete_and_purge() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(&temp);

    jobcat(temp.path()).args(["sync", "--from"]).arg(&feed).assert().success();
    jobcat(temp.path()).args(["login", "admin"]).assert().success();

    jobcat(temp.path())
        .args(["delete", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No job with id ghost"));

    jobcat(temp.path())
        .args(["rm", "feed-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job deleted (feed-1)"));

    jobcat(temp.path())
        .args(["view", "feed-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Job not found"));

    jobcat(temp.path()).arg("purge").assert().failure();

    jobcat(temp.path())
        .args(["purge", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 job(s) deleted"));

    jobcat(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No jobs found."));
}

#[test]
fn config_round_trip_and_env_passcode() {
    let temp = TempDir::new().unwrap();

    jobcat(temp.path())
        .args(["config", "admin-passcode", "hunter2"])
        .assert()
        .success();

    jobcat(temp.path())
        .args(["config", "admin-passcode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2"));

    jobcat(temp.path()).args(["login", "admin"]).assert().failure();
    jobcat(temp.path()).args(["login", "hunter2"]).assert().success();

    jobcat(temp.path())
        .env("JOBCAT_PASSCODE", "from-env")
        .args(["login", "from-env"])
        .assert()
        .success();

    jobcat(temp.path())
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn storage_keys_cannot_collide() {
    let temp = TempDir::new().unwrap();

    jobcat(temp.path())
        .args(["config", "jobs-key", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("that name holds the configuration"));

    jobcat(temp.path())
        .args(["config", "session-key", "jobs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must differ"));

    assert!(!temp.path().join("config.json").exists());

    fs::write(
        temp.path().join("config.json"),
        r#"{"jobs_key": "shared", "session_key": "shared"}"#,
    )
    .unwrap();

    jobcat(temp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must differ"));

    jobcat(temp.path())
        .args(["config", "jobs-key", "listings"])
        .assert()
        .success();

    jobcat(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No jobs found."));
}

#[test]
fn list_refresh_respects_narrow() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(&temp);

    jobcat(temp.path())
        .args(["config", "provider-path"])
        .arg(&feed)
        .assert()
        .success();

    jobcat(temp.path())
        .args(["list", "--refresh", "--query", "berlin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data Analyst"));

    jobcat(temp.path())
        .args(["list", "--refresh", "--query", "berlin", "--narrow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No jobs found."));
}
