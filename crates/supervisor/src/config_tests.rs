// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;
use tempfile::tempdir;

use super::*;

#[test]
fn parses_full_catalog() {
    let json = r#"{
        "name": "platform",
        "version": "1.0.0",
        "description": "core services",
        "queue_group": "q",
        "host": "0.0.0.0",
        "port": 4222,
        "services": [
            {"name": "db", "path": "/bin/db", "auto_restart": true},
            {"name": "api", "path": "/bin/api", "depends_on": ["db"]}
        ]
    }"#;
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("runn.config.json");
    std::fs::write(&path, json).unwrap();

    let config = SupervisorConfig::load(&path).expect("load");
    assert_eq!(config.name, "platform");
    assert_eq!(config.services.len(), 2);
    assert_eq!(config.services[1].depends_on, vec!["db".to_string()]);
}

#[test]
fn missing_file_is_a_config_error() {
    let err = SupervisorConfig::load(Path::new("/no/such/runn.config.json")).unwrap_err();
    assert!(matches!(err, SupervisorError::Config(_)));
}

#[test]
fn malformed_json_is_a_config_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("runn.config.json");
    std::fs::write(&path, b"not json").unwrap();
    let err = SupervisorConfig::load(&path).unwrap_err();
    assert!(matches!(err, SupervisorError::Config(_)));
}

#[test]
#[serial]
fn resolve_path_prefers_local_file_over_env_and_default() {
    let dir = tempdir().expect("tempdir");
    let prev_cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    std::fs::write(LOCAL_CONFIG_FILE, b"{}").unwrap();
    std::env::set_var(CONFIG_ENV_VAR, "/would/not/use/this.json");

    let resolved = SupervisorConfig::resolve_path();

    std::env::remove_var(CONFIG_ENV_VAR);
    std::env::set_current_dir(prev_cwd).unwrap();

    assert_eq!(resolved, Path::new(LOCAL_CONFIG_FILE));
}

#[test]
#[serial]
fn resolve_path_falls_back_to_env_var_then_default() {
    let dir = tempdir().expect("tempdir");
    let prev_cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    std::env::set_var(CONFIG_ENV_VAR, "/configured/via/env.json");
    let via_env = SupervisorConfig::resolve_path();
    std::env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(via_env, Path::new("/configured/via/env.json"));

    let via_default = SupervisorConfig::resolve_path();

    std::env::set_current_dir(prev_cwd).unwrap();

    assert_eq!(via_default, Path::new(DEFAULT_CONFIG_PATH));
}
