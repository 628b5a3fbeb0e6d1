// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable snapshot of the supervisor's running-process table (§4.7).
//!
//! Grounded on `oj-daemon`'s snapshot module: a single current file rather
//! than the daemon's WAL-backed, rotated-`.bak` checkpoint scheme, since the
//! spec calls for one atomic file, not crash-recovery replay.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::StateStoreError;

/// `{pid, started}` recorded for one running (or last-known-running)
/// service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub started: DateTime<Utc>,
}

/// `{processes: {name -> {pid, started}}}` (§6 "State file").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct State {
    #[serde(default)]
    pub processes: HashMap<String, ProcessRecord>,
}

/// Atomic read/write of [`State`] to a durable file (§4.7).
///
/// `save` writes to a temporary sibling and renames over the target so a
/// reader never observes a partially-written file; `load` tolerates a
/// missing file by returning the empty state.
pub struct StateStore {
    path: PathBuf,
    // Serializes concurrent callers; the temp-file + rename dance is only
    // atomic with respect to readers, not other writers.
    lock: Mutex<()>,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes `state` as two-space-indented JSON and writes it to a
    /// temporary sibling file before renaming it over `path`, creating the
    /// parent directory if absent and setting `0644` permissions.
    pub fn save(&self, state: &State) -> Result<(), StateStoreError> {
        let _guard = self.lock.lock();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, serde_json::ser::PrettyFormatter::with_indent(b"  "));
        serde::Serialize::serialize(state, &mut serializer)?;

        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, &buf)?;
        set_permissions(&tmp_path, 0o644)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Reads and parses the state file; a missing file yields the empty
    /// state without error.
    pub fn load(&self) -> Result<State, StateStoreError> {
        let _guard = self.lock.lock();
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(State::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self.path.file_name().and_then(|n| n.to_str()).unwrap_or("state");
        self.path.with_file_name(format!("{file_name}.tmp"))
    }
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
