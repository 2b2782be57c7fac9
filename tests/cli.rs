use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("gdp-compare").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gdp-compare"))
        .stdout(predicate::str::contains("--key-file"))
        .stdout(predicate::str::contains("--chart-width"));
}

#[test]
fn one_country_prints_usage_and_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("gdp-compare").unwrap();
    cmd.current_dir(dir.path()).arg("mexico");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Usage"))
        .stderr(predicate::str::contains("apikey.cfg").not())
        .stdout(predicate::str::contains("Raw Data").not());
}

#[test]
fn no_arguments_prints_usage_and_exits_cleanly() {
    let mut cmd = Command::cargo_bin("gdp-compare").unwrap();
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn bad_flag_value_is_still_a_usage_error() {
    let mut cmd = Command::cargo_bin("gdp-compare").unwrap();
    cmd.args(["mexico", "sweden", "--interval-secs", "soon"]);
    cmd.assert().failure().code(2);
}

#[test]
fn missing_key_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("gdp-compare").unwrap();
    cmd.current_dir(dir.path()).args(["mexico", "sweden"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot start without an API key"))
        .stderr(predicate::str::contains("apikey.cfg"))
        .stdout(predicate::str::contains("Raw Data").not());
}
