use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn graft_cmd(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("graft").unwrap();
    cmd.current_dir(tmp.path())
        .env("GRAFT_HOME", tmp.path().join(".graft-home"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_parse_prints_canonical_range() {
    let tmp = TempDir::new().unwrap();

    graft_cmd(&tmp)
        .args(["parse", "]1.0,2.0["])
        .assert()
        .success()
        .stdout("range (1.0,2.0)\n");
}

#[test]
fn test_parse_sub_version_verbose() {
    let tmp = TempDir::new().unwrap();

    graft_cmd(&tmp)
        .args(["parse", "1.2+", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sub-version 1.2.+"))
        .stdout(predicate::str::contains("dynamic: true"));
}

#[test]
fn test_parse_malformed_range_fails() {
    let tmp = TempDir::new().unwrap();

    graft_cmd(&tmp)
        .args(["parse", "[1.0,2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing closing bracket"));
}

#[test]
fn test_select_newest_in_range() {
    let tmp = TempDir::new().unwrap();

    graft_cmd(&tmp)
        .args(["select", "[1.0,2.0)", "1.0", "1.5", "2.0", "1.10"])
        .assert()
        .success()
        .stdout("1.10\n");
}

#[test]
fn test_select_by_status() {
    let tmp = TempDir::new().unwrap();

    graft_cmd(&tmp)
        .args(["select", "latest.release", "1.0@release", "1.1@milestone"])
        .assert()
        .success()
        .stdout("1.0\n");
}

#[test]
fn test_select_without_match_fails() {
    let tmp = TempDir::new().unwrap();

    graft_cmd(&tmp)
        .args(["select", "3.+", "1.0", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no candidate matches"));
}

#[test]
fn test_select_uses_workspace_status_scale() {
    let tmp = TempDir::new().unwrap();

    graft_cmd(&tmp)
        .args(["select", "latest.snapshot", "1.0", "2.0"])
        .assert()
        .failure();

    fs::write(
        tmp.path().join("Graft.toml"),
        "[resolution]\nstatus-scale = [\"snapshot\", \"release\"]\n",
    )
    .unwrap();

    graft_cmd(&tmp)
        .args(["select", "latest.snapshot", "1.0", "2.0"])
        .assert()
        .success()
        .stdout("2.0\n");
}

#[test]
fn test_select_uses_global_status_scale() {
    let tmp = TempDir::new().unwrap();
    let home = tmp.path().join(".graft-home");
    fs::create_dir_all(&home).unwrap();
    fs::write(
        home.join("config.toml"),
        "[resolution]\nstatus-scale = [\"nightly\", \"stable\"]\n",
    )
    .unwrap();

    graft_cmd(&tmp)
        .args(["select", "latest.stable", "1.0@nightly", "0.9@stable"])
        .assert()
        .success()
        .stdout("0.9\n");
}
