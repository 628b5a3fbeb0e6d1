// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Naming scopes (§3 `Group`) and the queue-group resolution rule shared by
//! groups and the top-level service.

/// Resolves the effective `(queue_group, disabled)` pair for an endpoint
/// given its own settings and its parent's (group or service), per the
/// tabular rule in §3:
///
/// 1. endpoint disables -> `("", true)`
/// 2. endpoint sets a non-empty group -> `(group, false)`
/// 3. parent disables -> `("", true)`
/// 4. parent sets a non-empty group -> `(group, false)`
/// 5. default -> `("q", false)`
pub fn resolve_queue_group(
    endpoint_group: Option<&str>,
    endpoint_disabled: bool,
    parent_group: Option<&str>,
    parent_disabled: bool,
) -> (String, bool) {
    if endpoint_disabled {
        return (String::new(), true);
    }
    if let Some(group) = endpoint_group.filter(|g| !g.is_empty()) {
        return (group.to_string(), false);
    }
    if parent_disabled {
        return (String::new(), true);
    }
    if let Some(group) = parent_group.filter(|g| !g.is_empty()) {
        return (group.to_string(), false);
    }
    ("q".to_string(), false)
}

/// A naming scope with an immutable dotted prefix. Groups do not own
/// endpoints; they only compute the effective subject and queue group at
/// endpoint-registration time.
#[derive(Debug, Clone)]
pub struct Group {
    prefix: String,
    queue_group: Option<String>,
    queue_group_disabled: bool,
}

impl Group {
    pub(crate) fn new(
        prefix: impl Into<String>,
        queue_group: Option<String>,
        queue_group_disabled: bool,
    ) -> Self {
        Self { prefix: prefix.into(), queue_group, queue_group_disabled }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn queue_group(&self) -> Option<&str> {
        self.queue_group.as_deref()
    }

    pub fn queue_group_disabled(&self) -> bool {
        self.queue_group_disabled
    }

    /// Nests a child group under this one: prefixes concatenate with `.`,
    /// empty segments dropped. The child inherits this group's queue-group
    /// settings unless overridden.
    pub fn add_group(
        &self,
        name: &str,
        queue_group: Option<String>,
        queue_group_disabled: bool,
    ) -> Group {
        let prefix = [self.prefix.as_str(), name]
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        let queue_group = queue_group.or_else(|| self.queue_group.clone());
        let queue_group_disabled = queue_group_disabled || self.queue_group_disabled;
        Group::new(prefix, queue_group, queue_group_disabled)
    }

    /// Computes the full subject for an endpoint `name` registered under
    /// this group.
    pub fn subject_for(&self, name: &str) -> String {
        [self.prefix.as_str(), name]
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
