// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared validation patterns for service names, subjects, and queue groups.
//!
//! These are centralized here rather than inlined in `svc-service` so the
//! supervisor's catalog loader and the service runtime validate identifiers
//! the same way.

use std::sync::LazyLock;

use regex::Regex;

/// Service/endpoint name pattern: alphanumeric, underscore, hyphen.
#[allow(clippy::expect_used)]
pub static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("constant regex pattern is valid"));

/// Subject/queue-group pattern: no spaces, optional trailing tail wildcard.
#[allow(clippy::expect_used)]
pub static SUBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^ >]*[>]?$").expect("constant regex pattern is valid"));

/// Returns `true` if `name` matches the service/endpoint name pattern.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && NAME_RE.is_match(name)
}

/// Returns `true` if `subject` matches the subject/queue-group pattern.
pub fn is_valid_subject(subject: &str) -> bool {
    SUBJECT_RE.is_match(subject)
}

#[cfg(test)]
#[path = "regex_tests.rs"]
mod tests;
