// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S6 (spec.md §8), exercised through the compiled `runn` binary: a
//! declared catalog with `A depends_on [B]` starts `B` before `A`, and a
//! second `start` call skips both as already recorded. A self-dependent
//! catalog exits non-zero.

use assert_cmd::Command;
use serial_test::serial;
use tempfile::TempDir;

fn write_catalog(dir: &std::path::Path, json: &str) {
    std::fs::write(dir.join(".runn.config.json"), json).unwrap();
}

#[test]
#[serial]
fn s6_start_orders_dependencies_then_list_and_stop() {
    let dir = TempDir::new().unwrap();
    write_catalog(
        dir.path(),
        r#"{
            "name": "platform",
            "services": [
                {"name": "api", "path": "/bin/sleep", "args": ["30"], "auto_restart": true, "depends_on": ["db"]},
                {"name": "db", "path": "/bin/sleep", "args": ["30"], "auto_restart": true}
            ]
        }"#,
    );

    let mut start = Command::cargo_bin("runn").unwrap();
    let start_output = start.current_dir(dir.path()).arg("start").output().unwrap();
    assert!(start_output.status.success());
    let stdout = String::from_utf8_lossy(&start_output.stdout);
    let db_line = stdout.find("db:").unwrap();
    let api_line = stdout.find("api:").unwrap();
    assert!(db_line < api_line, "db must be started before api:\n{stdout}");

    let mut list = Command::cargo_bin("runn").unwrap();
    let list_output = list.current_dir(dir.path()).arg("list").output().unwrap();
    let list_stdout = String::from_utf8_lossy(&list_output.stdout);
    assert!(list_stdout.contains("running"));

    let mut second_start = Command::cargo_bin("runn").unwrap();
    let second_output = second_start.current_dir(dir.path()).arg("start").output().unwrap();
    let second_stdout = String::from_utf8_lossy(&second_output.stdout);
    assert!(second_stdout.contains("already running"));

    let mut stop = Command::cargo_bin("runn").unwrap();
    stop.current_dir(dir.path()).arg("stop").assert().success();

    let mut final_list = Command::cargo_bin("runn").unwrap();
    let final_output = final_list.current_dir(dir.path()).arg("list").output().unwrap();
    assert!(String::from_utf8_lossy(&final_output.stdout).trim().is_empty());
}

#[test]
#[serial]
fn s6_circular_dependency_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    write_catalog(
        dir.path(),
        r#"{"name":"platform","services":[{"name":"a","path":"/bin/true","auto_restart":true,"depends_on":["a"]}]}"#,
    );

    let mut cmd = Command::cargo_bin("runn").unwrap();
    cmd.current_dir(dir.path()).arg("start").assert().failure().code(1);
}
