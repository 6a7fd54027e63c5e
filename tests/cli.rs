//! End-to-end tests for the retail-etl binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_fixture(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn cleans_and_persists_users() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "legacy_users.csv",
        "user_uuid,join_date,country_code\n\
         u1,2013-10-14,GGB\n\
         u2,PJ4EMLH3WW,DE\n\
         NULL,NULL,NULL\n",
    );
    let out_dir = dir.path().join("cleaned");

    Command::cargo_bin("retail-etl")
        .unwrap()
        .arg(format!("users={}", input.display()))
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("dim_users"));

    let persisted = fs::read_to_string(out_dir.join("dim_users.csv")).unwrap();
    assert!(persisted.contains("u1,2013-10-14,GB"));
    // The unparseable join date and the all-null row are gone
    assert!(!persisted.contains("u2"));
    assert_eq!(persisted.lines().count(), 2);
}

#[test]
fn strict_coercion_failure_aborts_source_only() {
    let dir = tempfile::tempdir().unwrap();
    let cards = write_fixture(
        dir.path(),
        "card_details.csv",
        "card_number,date_payment_confirmed\n\
         VAB9DSB8ZM,2016-05-01\n",
    );
    let users = write_fixture(
        dir.path(),
        "legacy_users.csv",
        "user_uuid,join_date,country_code\nu1,2013-10-14,GB\n",
    );
    let out_dir = dir.path().join("cleaned");

    Command::cargo_bin("retail-etl")
        .unwrap()
        .arg(format!("cards={}", cards.display()))
        .arg(format!("users={}", users.display()))
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot coerce"));

    // The bad source aborted, the good one still loaded
    assert!(!out_dir.join("dim_card_details.csv").exists());
    assert!(out_dir.join("dim_users.csv").exists());
}

#[test]
fn stats_only_does_not_persist() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "legacy_users.csv",
        "user_uuid,join_date,country_code\nu1,2013-10-14,GB\n",
    );
    let out_dir = dir.path().join("cleaned");

    Command::cargo_bin("retail-etl")
        .unwrap()
        .arg(format!("users={}", input.display()))
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--stats-only")
        .assert()
        .success();

    assert!(!out_dir.join("dim_users.csv").exists());
}

#[test]
fn cleans_date_events_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "date_details.json",
        r#"[
            {"year":"2020","month":"7","day":"1","timestamp":"10:00:00"},
            {"year":"2020","month":"13","day":"01","timestamp":"10:00:00"}
        ]"#,
    );
    let out_dir = dir.path().join("cleaned");

    Command::cargo_bin("retail-etl")
        .unwrap()
        .arg(format!("dates={}", input.display()))
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let persisted = fs::read_to_string(out_dir.join("dim_date_times.csv")).unwrap();
    assert!(persisted.contains("2020,7,1,10:00:00,2020-07-01 10:00:00"));
    // Invalid month row rejected
    assert_eq!(persisted.lines().count(), 2);
}

#[test]
fn rejects_malformed_source_spec() {
    Command::cargo_bin("retail-etl")
        .unwrap()
        .arg("users")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected <kind>=<path>"));
}
