// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ordered collection of endpoints under a service (§4.3). Read-heavy
//! (info/stats/matching), so access is guarded by a reader-writer lock
//! rather than a plain mutex.

use parking_lot::RwLock;
use svc_core::subject_match;

use crate::endpoint::Endpoint;
use crate::error::ServiceError;

#[derive(Default)]
pub struct EndpointRegistry {
    endpoints: RwLock<Vec<Endpoint>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforces the name/subject uniqueness invariants before inserting.
    pub fn add(&self, endpoint: Endpoint) -> Result<(), ServiceError> {
        let mut endpoints = self.endpoints.write();
        if endpoints.iter().any(|e| e.name == endpoint.name) {
            return Err(ServiceError::ConfigValidation(format!(
                "duplicate endpoint name: {:?}",
                endpoint.name
            )));
        }
        if endpoints.iter().any(|e| e.subject == endpoint.subject) {
            return Err(ServiceError::ConfigValidation(format!(
                "duplicate endpoint subject: {:?}",
                endpoint.subject
            )));
        }
        endpoints.push(endpoint);
        Ok(())
    }

    /// Removes the endpoint named `name`, preserving the relative order of
    /// the endpoints that remain.
    pub fn remove(&self, name: &str) -> Option<Endpoint> {
        let mut endpoints = self.endpoints.write();
        let idx = endpoints.iter().position(|e| e.name == name)?;
        Some(endpoints.remove(idx))
    }

    pub fn with_endpoint_mut<R>(&self, name: &str, f: impl FnOnce(&mut Endpoint) -> R) -> Option<R> {
        let mut endpoints = self.endpoints.write();
        endpoints.iter_mut().find(|e| e.name == name).map(f)
    }

    /// Finds the endpoint whose subject matches `subject` via dotted-segment
    /// matching, applying `f` to it under the read lock.
    pub fn find_matching<R>(&self, subject: &str, f: impl FnOnce(&Endpoint) -> R) -> Option<R> {
        let endpoints = self.endpoints.read();
        endpoints.iter().find(|e| subject_match(&e.subject, subject)).map(f)
    }

    pub fn for_each<R>(&self, f: impl FnMut(&Endpoint) -> R) -> Vec<R> {
        self.endpoints.read().iter().map(f).collect()
    }

    /// Runs `f` against a snapshot slice of all endpoints under the read
    /// lock, for verb handlers that need to build a response from several
    /// endpoints' state at once.
    pub fn with_endpoints<R>(&self, f: impl FnOnce(&[Endpoint]) -> R) -> R {
        f(&self.endpoints.read())
    }

    pub fn for_each_mut(&self, mut f: impl FnMut(&mut Endpoint)) {
        for endpoint in self.endpoints.write().iter_mut() {
            f(endpoint);
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.read().is_empty()
    }

    pub fn drain_all(&self) {
        for endpoint in self.endpoints.write().iter_mut() {
            endpoint.drain_subscription();
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
