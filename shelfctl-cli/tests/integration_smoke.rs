//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_root_help() {
    let mut cmd = Command::cargo_bin("shelfctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("book catalog"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("shelfctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("shelfctl").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("catalog tables"));
}

#[test]
fn test_serve_requires_database_url() {
    let mut cmd = Command::cargo_bin("shelfctl").unwrap();
    cmd.arg("serve").env_remove("DATABASE_URL");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}
