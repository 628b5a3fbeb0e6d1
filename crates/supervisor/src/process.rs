// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawn protocol for one declared child process (§4.5 "Spawn protocol"),
//! grounded on `oj-daemon`'s coop spawn logic (log redirection, reaper task
//! that logs the exit status instead of leaking a zombie).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, Command};

use crate::decl::ServiceDecl;
use crate::error::SupervisorError;

/// One entry in the in-memory running-process table (§3 "Supervisor
/// model"). `log_path` is the file stdout/stderr were redirected to at
/// spawn time.
#[derive(Debug, Clone)]
pub struct RunningProc {
    pub name: String,
    pub pid: u32,
    pub started_at: DateTime<Utc>,
    pub log_path: PathBuf,
}

/// Creates (truncating) `<log_dir>/<name>.log`, execs `decl.path` with
/// `decl.args`, and redirects stdout/stderr to the log sink. Returns the
/// spawned [`Child`] (owned by the caller's reaper task) alongside the
/// [`RunningProc`] record to persist.
pub(crate) fn spawn(decl: &ServiceDecl, log_dir: &Path) -> Result<(Child, RunningProc), SupervisorError> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| SupervisorError::SpawnFailed(decl.name.clone(), e.to_string()))?;

    let log_path = log_dir.join(format!("{}.log", decl.name));
    let stdout_sink = std::fs::File::create(&log_path)
        .map_err(|e| SupervisorError::SpawnFailed(decl.name.clone(), e.to_string()))?;
    let stderr_sink = stdout_sink
        .try_clone()
        .map_err(|e| SupervisorError::SpawnFailed(decl.name.clone(), e.to_string()))?;

    let mut child = Command::new(&decl.path);
    child
        .args(&decl.args)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::from(stdout_sink))
        .stderr(std::process::Stdio::from(stderr_sink));

    let child = child
        .spawn()
        .map_err(|e| SupervisorError::SpawnFailed(decl.name.clone(), e.to_string()))?;

    let pid = child
        .id()
        .ok_or_else(|| SupervisorError::SpawnFailed(decl.name.clone(), "process exited before pid was observed".into()))?;

    let record = RunningProc { name: decl.name.clone(), pid, started_at: Utc::now(), log_path };
    Ok((child, record))
}

/// Sends `SIGTERM` to `pid`. The spec calls for a "forceful termination
/// signal"; `nix` (already a teacher workspace dependency for process
/// control) is used rather than a raw `libc` call.
pub(crate) fn terminate(pid: u32) -> Result<(), SupervisorError> {
    match signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        Ok(()) => Ok(()),
        // Already gone — stop is idempotent.
        Err(nix::errno::Errno::ESRCH) => Ok(()),
        Err(err) => Err(SupervisorError::SpawnFailed(pid.to_string(), err.to_string())),
    }
}

/// Checks liveness without sending a signal (`kill(pid, 0)`).
pub(crate) fn is_alive(pid: u32) -> bool {
    signal::kill(Pid::from_raw(pid as i32), None).is_ok()
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
