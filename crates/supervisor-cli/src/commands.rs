// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `runn start [--force]`, `runn stop`, `runn list` (§6 "CLI surface").

use std::path::PathBuf;

use svc_supervisor::{StartOutcome, StateStore, Supervisor, SupervisorConfig};

use crate::exit_error::ExitError;

pub const DEFAULT_STATE_PATH: &str = ".data/data/runn.state.json";
pub const DEFAULT_LOG_DIR: &str = ".data/logs";

fn build_supervisor(config_path: Option<&std::path::Path>) -> Result<Supervisor, ExitError> {
    let config = match config_path {
        Some(path) => SupervisorConfig::load(path)?,
        None => SupervisorConfig::load_default()?,
    };
    let store = StateStore::new(PathBuf::from(DEFAULT_STATE_PATH));
    Ok(Supervisor::new(config.services, PathBuf::from(DEFAULT_LOG_DIR), store))
}

pub async fn start(force: bool, config_path: Option<&std::path::Path>) -> Result<(), ExitError> {
    let supervisor = build_supervisor(config_path)?;
    let outcomes = supervisor.start(force).await?;

    for outcome in &outcomes {
        match outcome {
            StartOutcome::Started { name, pid } => println!("{name}: started (pid {pid})"),
            StartOutcome::AlreadyRunning { name, pid } => println!("{name}: already running (pid {pid})"),
            StartOutcome::NotAutoRestart { name } => println!("{name}: not auto-restart, skipped"),
            StartOutcome::Failed { name, error } => println!("{name}: failed to start: {error}"),
        }
    }
    Ok(())
}

pub async fn stop(config_path: Option<&std::path::Path>) -> Result<(), ExitError> {
    let supervisor = build_supervisor(config_path)?;
    supervisor.load_state()?;
    let names: Vec<String> = supervisor.list().into_iter().map(|e| e.name).collect();
    supervisor.stop_all().await;
    for name in names {
        println!("{name}: stopped");
    }
    Ok(())
}

pub async fn list(config_path: Option<&std::path::Path>) -> Result<(), ExitError> {
    let supervisor = build_supervisor(config_path)?;
    supervisor.load_state()?;
    for entry in supervisor.list() {
        let status = if entry.running { "running" } else { "dead" };
        println!("{}\t{}\tpid={}\tuptime={}s", entry.name, status, entry.pid, entry.uptime_seconds);
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
