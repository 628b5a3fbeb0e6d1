// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declared service catalog entries (§3 "Supervisor model").

use serde::{Deserialize, Serialize};

/// One declared child process: `{name, path, args, auto_restart, depends_on}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDecl {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub auto_restart: bool,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl ServiceDecl {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            args: Vec::new(),
            auto_restart: false,
            depends_on: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "decl_tests.rs"]
mod tests;
