// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Supervisor`: launches and monitors a catalog of declared child
//! processes (§4.5).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::decl::ServiceDecl;
use crate::error::SupervisorError;
use crate::process::{self, RunningProc};
use crate::resolver::resolve_order;
use crate::state::{ProcessRecord, State, StateStore};

/// Per-service outcome of a `start()` call (§4.5 "Failure semantics" — one
/// failed spawn does not abort the rest of the startup sequence).
#[derive(Debug, Clone)]
pub enum StartOutcome {
    Started { name: String, pid: u32 },
    AlreadyRunning { name: String, pid: u32 },
    NotAutoRestart { name: String },
    Failed { name: String, error: String },
}

/// Snapshot entry returned by [`Supervisor::list`].
#[derive(Debug, Clone)]
pub struct ProcEntry {
    pub name: String,
    pub running: bool,
    pub pid: u32,
    pub uptime_seconds: i64,
}

/// Launches, monitors, and stops the declared child processes in
/// `catalog`, persisting the running-process table to `state_store` and
/// writing each child's stdout/stderr under `log_dir`.
pub struct Supervisor {
    catalog: Vec<ServiceDecl>,
    log_dir: PathBuf,
    state_store: Arc<StateStore>,
    // Guards the running-process table and its serialization to the
    // state store (§5 "one supervisor lock").
    table: Arc<Mutex<HashMap<String, RunningProc>>>,
}

impl Supervisor {
    pub fn new(catalog: Vec<ServiceDecl>, log_dir: impl Into<PathBuf>, state_store: StateStore) -> Self {
        Self {
            catalog,
            log_dir: log_dir.into(),
            state_store: Arc::new(state_store),
            table: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn catalog(&self) -> &[ServiceDecl] {
        &self.catalog
    }

    /// Loads the persisted state into the in-memory table, so a fresh
    /// `Supervisor` created by a separate `stop`/`list` invocation sees
    /// what a prior `start` invocation recorded.
    pub fn load_state(&self) -> Result<(), SupervisorError> {
        let loaded = self.state_store.load()?;
        self.seed_table(&loaded);
        Ok(())
    }

    fn seed_table(&self, loaded: &State) {
        let mut table = self.table.lock();
        for (name, record) in &loaded.processes {
            table.insert(
                name.clone(),
                RunningProc {
                    name: name.clone(),
                    pid: record.pid,
                    started_at: record.started,
                    log_path: self.log_dir.join(format!("{name}.log")),
                },
            );
        }
    }

    /// Runs the startup algorithm of §4.5:
    /// 1. compute topological order (abort on cycle/unknown reference);
    /// 2. load previous state (or start empty if `force`, after stopping
    ///    everything currently recorded);
    /// 3. for each `auto_restart` service in order, skip it if already
    ///    recorded (and not forced), otherwise spawn it.
    pub async fn start(&self, force: bool) -> Result<Vec<StartOutcome>, SupervisorError> {
        let order = resolve_order(&self.catalog)?;

        let loaded = if force {
            self.stop_all().await;
            State::default()
        } else {
            self.state_store.load()?
        };

        // Pre-seed the in-memory table with whatever the prior run left us,
        // so `list()` and subsequent `stop()` calls see them even before
        // any new spawn happens this invocation.
        self.seed_table(&loaded);

        let by_name: HashMap<&str, &ServiceDecl> =
            self.catalog.iter().map(|s| (s.name.as_str(), s)).collect();

        let mut outcomes = Vec::with_capacity(order.len());
        for name in &order {
            // `resolve_order` only ever returns names drawn from `self.catalog`,
            // which is exactly what `by_name` is keyed from.
            #[allow(clippy::expect_used)]
            let decl = by_name.get(name.as_str()).expect("resolver only returns catalog names");
            if !decl.auto_restart {
                outcomes.push(StartOutcome::NotAutoRestart { name: name.clone() });
                continue;
            }

            if !force {
                if let Some(record) = loaded.processes.get(name.as_str()) {
                    info!(service = %name, pid = record.pid, "already running, skipping spawn");
                    outcomes.push(StartOutcome::AlreadyRunning { name: name.clone(), pid: record.pid });
                    continue;
                }
            }

            match self.spawn_one(decl).await {
                Ok(pid) => outcomes.push(StartOutcome::Started { name: name.clone(), pid }),
                Err(err) => {
                    warn!(service = %name, error = %err, "spawn failed");
                    outcomes.push(StartOutcome::Failed { name: name.clone(), error: err.to_string() });
                }
            }
        }

        Ok(outcomes)
    }

    async fn spawn_one(&self, decl: &ServiceDecl) -> Result<u32, SupervisorError> {
        let (child, record) = process::spawn(decl, &self.log_dir)?;
        let pid = record.pid;

        self.table.lock().insert(decl.name.clone(), record);
        self.persist()?;

        spawn_reaper(Arc::clone(&self.table), Arc::clone(&self.state_store), decl.name.clone(), child);

        Ok(pid)
    }

    /// Sends `SIGTERM` to the recorded pid and removes the entry. Idempotent
    /// for a name declared in the catalog: stopping an already-stopped
    /// service is not an error. Fails with `not_found` (§7) for a name that
    /// is not declared at all.
    pub async fn stop(&self, name: &str) -> Result<(), SupervisorError> {
        if !self.catalog.iter().any(|decl| decl.name == name) {
            return Err(SupervisorError::NotFound(name.to_string()));
        }
        let record = self.table.lock().remove(name);
        if let Some(record) = record {
            process::terminate(record.pid)?;
        }
        self.persist()?;
        Ok(())
    }

    /// Stops every entry in the table.
    pub async fn stop_all(&self) {
        let names: Vec<String> = self.table.lock().keys().cloned().collect();
        for name in names {
            if let Err(err) = self.stop(&name).await {
                warn!(service = %name, error = %err, "failed to stop");
            }
        }
    }

    /// Returns a snapshot of every tracked service's liveness and uptime.
    pub fn list(&self) -> Vec<ProcEntry> {
        let table = self.table.lock();
        let now = chrono::Utc::now();
        let mut entries: Vec<ProcEntry> = table
            .values()
            .map(|proc| ProcEntry {
                name: proc.name.clone(),
                running: process::is_alive(proc.pid),
                pid: proc.pid,
                uptime_seconds: (now - proc.started_at).num_seconds().max(0),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    fn persist(&self) -> Result<(), SupervisorError> {
        persist_table(&self.table, &self.state_store)
    }
}

fn persist_table(
    table: &Mutex<HashMap<String, RunningProc>>,
    state_store: &StateStore,
) -> Result<(), SupervisorError> {
    let state = State {
        processes: table
            .lock()
            .values()
            .map(|p| (p.name.clone(), ProcessRecord { pid: p.pid, started: p.started_at }))
            .collect(),
    };
    state_store.save(&state).map_err(SupervisorError::from)
}

/// Waits on the spawned child so it never becomes a zombie, logs its exit
/// status, and removes its stale table entry — the core performs no
/// automatic restart on exit (§4.5 "Failure semantics"); `auto_restart`
/// only controls eligibility on the *next* `start()` call, which this
/// removal (persisted immediately) makes possible by un-recording it as
/// already running.
fn spawn_reaper(
    table: Arc<Mutex<HashMap<String, RunningProc>>>,
    state_store: Arc<StateStore>,
    name: String,
    mut child: tokio::process::Child,
) {
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => {
                warn!(service = %name, exit_status = %status, "supervised process exited");
            }
            Err(err) => {
                warn!(service = %name, error = %err, "failed to wait on supervised process");
            }
        }
        table.lock().remove(&name);
        if let Err(err) = persist_table(&table, &state_store) {
            warn!(service = %name, error = %err, "failed to persist state after process exit");
        }
    });
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
