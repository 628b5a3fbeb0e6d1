// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor configuration loading (§6 "Configuration (supervisor)").
//!
//! Search order: local `.runn.config.json` -> `RUNN_CONFIG` env var ->
//! default `.data/cfg/runn.config.json`, mirroring `oj-cli`'s
//! `--data-dir`-then-default-path search for its own config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::decl::ServiceDecl;
use crate::error::SupervisorError;

pub const LOCAL_CONFIG_FILE: &str = ".runn.config.json";
pub const CONFIG_ENV_VAR: &str = "RUNN_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = ".data/cfg/runn.config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupervisorConfig {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub queue_group: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub services: Vec<ServiceDecl>,
}

impl SupervisorConfig {
    /// Resolves the configuration path per the search order in §6, absent
    /// an explicit `--config` override.
    pub fn resolve_path() -> PathBuf {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return PathBuf::from(LOCAL_CONFIG_FILE);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Loads and parses the catalog at `path`.
    pub fn load(path: &Path) -> Result<Self, SupervisorError> {
        let bytes = std::fs::read(path)
            .map_err(|e| SupervisorError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_slice(&bytes).map_err(|e| SupervisorError::Config(format!("{}: {e}", path.display())))
    }

    /// Loads from the resolved search-order path.
    pub fn load_default() -> Result<Self, SupervisorError> {
        Self::load(&Self::resolve_path())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
