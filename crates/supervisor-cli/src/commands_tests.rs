// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;
use tempfile::tempdir;

use super::*;

fn write_local_config(json: &str) {
    std::fs::write(svc_supervisor::LOCAL_CONFIG_FILE, json).unwrap();
}

#[tokio::test]
#[serial]
async fn start_then_list_then_stop_round_trips() {
    let dir = tempdir().unwrap();
    let prev_cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    write_local_config(
        r#"{"name":"platform","services":[{"name":"svc","path":"/bin/sleep","args":["30"],"auto_restart":true}]}"#,
    );

    start(false, None).await.expect("start");

    let fresh = build_supervisor(None).expect("build");
    fresh.load_state().expect("load_state");
    let entries = fresh.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "svc");
    assert!(entries[0].running);

    stop(None).await.expect("stop");

    let after_stop = build_supervisor(None).expect("build");
    after_stop.load_state().expect("load_state");
    assert!(after_stop.list().is_empty());

    std::env::set_current_dir(prev_cwd).unwrap();
}

#[tokio::test]
#[serial]
async fn start_reports_config_error_for_malformed_catalog() {
    let dir = tempdir().unwrap();
    let prev_cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    write_local_config("not json");

    let err = start(false, None).await.unwrap_err();
    assert_eq!(err.code, 1);

    std::env::set_current_dir(prev_cwd).unwrap();
}

#[tokio::test]
#[serial]
async fn start_reports_resolve_order_error_for_cycle() {
    let dir = tempdir().unwrap();
    let prev_cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    write_local_config(
        r#"{"name":"platform","services":[{"name":"a","path":"/bin/true","auto_restart":true,"depends_on":["a"]}]}"#,
    );

    let err = start(false, None).await.unwrap_err();
    assert_eq!(err.code, 1);

    std::env::set_current_dir(prev_cwd).unwrap();
}
