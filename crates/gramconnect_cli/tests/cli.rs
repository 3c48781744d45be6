use assert_cmd::prelude::*;
use chrono::{Duration, Local};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn gramconnect(db: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gramconnect").unwrap();
    cmd.env_remove("GRAMCONNECT_LOG_DIR")
        .arg("--db")
        .arg(db)
        .args(args);
    cmd
}

fn json_output(db: &Path, args: &[&str]) -> Value {
    let output = gramconnect(db, args).output().unwrap();
    assert!(output.status.success(), "command failed: {args:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write_catalog(dir: &TempDir) -> PathBuf {
    let soon = (Local::now() + Duration::days(3)).date_naive();
    let far = (Local::now() + Duration::days(90)).date_naive();
    let catalog = serde_json::json!({
        "festivals": [
            { "id": "far-fest", "name": "Far Fest", "date": far.to_string() },
            { "id": "soon-fest", "name": "Soon Fest", "date": soon.to_string() }
        ]
    });
    let path = dir.path().join("festivals.json");
    fs::write(&path, catalog.to_string()).unwrap();
    path
}

#[test]
fn fresh_store_lists_seeded_complaints() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("app.sqlite3");

    let complaints = json_output(&db, &["--json", "complaints", "list"]);
    assert_eq!(complaints.as_array().unwrap().len(), 3);

    let water = json_output(
        &db,
        &["--json", "complaints", "list", "--category", "water"],
    );
    assert_eq!(water.as_array().unwrap().len(), 1);
    assert_eq!(water[0]["location"], "Sector 12, Dwarka, New Delhi");
}

#[test]
fn add_complaint_validates_and_persists() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("app.sqlite3");

    gramconnect(
        &db,
        &["complaints", "add", "--category", "Road", "--description", "short"],
    )
    .assert()
    .failure();

    let created = json_output(
        &db,
        &[
            "--json",
            "complaints",
            "add",
            "--category",
            "Road",
            "--description",
            "Broken divider near the bus stop",
            "--location",
            "Ring Road, Indore",
        ],
    );
    assert_eq!(created["status"], "Submitted");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let id = created["id"].as_str().unwrap().to_string();
    gramconnect(&db, &["complaints", "set-status", &id, "in-review"])
        .assert()
        .success();

    let listed = json_output(&db, &["--json", "complaints", "list"]);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["status"], "In Review");
}

#[test]
fn reminders_toggle_and_upcoming_festivals_use_catalog() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("app.sqlite3");
    let catalog = write_catalog(&dir);
    let catalog = catalog.to_str().unwrap();

    let upcoming = json_output(&db, &["--json", "festivals", "upcoming", "--catalog", catalog]);
    let ids: Vec<&str> = upcoming
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["soon-fest"]);

    let on = json_output(
        &db,
        &["--json", "reminders", "toggle", "soon-fest", "--catalog", catalog],
    );
    assert_eq!(on["active"], true);
    let reminders = json_output(&db, &["--json", "reminders", "list", "--upcoming"]);
    assert_eq!(reminders.as_array().unwrap().len(), 1);

    let off = json_output(
        &db,
        &["--json", "reminders", "toggle", "soon-fest", "--catalog", catalog],
    );
    assert_eq!(off["active"], false);
    let reminders = json_output(&db, &["--json", "reminders", "list"]);
    assert!(reminders.as_array().unwrap().is_empty());

    gramconnect(&db, &["reminders", "toggle", "missing", "--catalog", catalog])
        .assert()
        .failure();
}

#[test]
fn civic_notice_is_active_until_deactivated() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("app.sqlite3");

    let notice = json_output(
        &db,
        &[
            "--json",
            "notices",
            "add",
            "--title",
            "Ward meeting",
            "--message",
            "Sunday 10am at the panchayat office",
        ],
    );
    let id = notice["id"].as_str().unwrap().to_string();

    let active = json_output(&db, &["--json", "notices", "active"]);
    assert!(active
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["id"] == id.as_str()));

    gramconnect(&db, &["notices", "deactivate", &id])
        .assert()
        .success();
    let active = json_output(&db, &["--json", "notices", "active"]);
    assert!(active
        .as_array()
        .unwrap()
        .iter()
        .all(|n| n["id"] != id.as_str()));

    gramconnect(&db, &["notices", "delete", &id]).assert().success();
    let all = json_output(&db, &["--json", "notices", "list"]);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[test]
fn reminders_remove_deletes_the_festival_reminder() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("app.sqlite3");
    let catalog = write_catalog(&dir);
    let catalog = catalog.to_str().unwrap();

    json_output(
        &db,
        &["--json", "reminders", "toggle", "soon-fest", "--catalog", catalog],
    );
    json_output(
        &db,
        &["--json", "reminders", "toggle", "far-fest", "--catalog", catalog],
    );

    let removed = json_output(&db, &["--json", "reminders", "remove", "soon-fest"]);
    assert_eq!(removed["removed"], true);
    let reminders = json_output(&db, &["--json", "reminders", "list"]);
    let ids: Vec<&str> = reminders
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["festivalId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["far-fest"]);

    let again = json_output(&db, &["--json", "reminders", "remove", "soon-fest"]);
    assert_eq!(again["removed"], false);
}
