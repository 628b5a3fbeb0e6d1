// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service configuration, deserialized from JSON (§6 "Configuration
//! (service)"). Handlers, middleware, and hooks are programmatic and are not
//! part of this wire shape — they are supplied to [`crate::BusService`]
//! directly by the embedding application.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The optional top-level default endpoint declared in configuration,
/// registered under the name `"default"` at `start()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultEndpointConfig {
    pub subject: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub queue_group: Option<String>,
    #[serde(default)]
    pub queue_group_disabled: bool,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub queue_group: Option<String>,
    #[serde(default)]
    pub queue_group_disabled: bool,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub endpoint: Option<DefaultEndpointConfig>,
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { name: name.into(), version: version.into(), ..Default::default() }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
