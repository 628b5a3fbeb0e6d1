// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service identity: `(name, id, version, metadata)` per the data model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::regex::is_valid_name;
use crate::semver::is_valid_version;

crate::define_id! {
    /// Fresh unique identifier generated per service instance.
    pub struct ServiceId("svc-");
}

/// `(name, id, version, metadata)` tuple identifying one running service
/// instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceIdentity {
    pub name: String,
    pub id: ServiceId,
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ServiceIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: ServiceId::new(),
            version: version.into(),
            metadata: HashMap::new(),
        }
    }

    /// Validates `name` against the name pattern and `version` as strict
    /// semver. Does not validate `metadata` (free-form by design).
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_name(&self.name) {
            return Err(format!("invalid service name: {:?}", self.name));
        }
        if !is_valid_version(&self.version) {
            return Err(format!("invalid service version: {:?}", self.version));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
