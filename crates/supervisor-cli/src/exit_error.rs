// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Carries a process exit code through `main()` rather than calling
//! `std::process::exit()` from inside a command (§7 "CLI surface").

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Configuration or dependency-resolution failures exit `1` (§6/§7);
    /// everything else here still exits non-zero to be a well-behaved CLI.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<svc_supervisor::SupervisorError> for ExitError {
    fn from(err: svc_supervisor::SupervisorError) -> Self {
        Self::config(err.to_string())
    }
}
